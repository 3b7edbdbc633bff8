pub mod contact;
pub mod health_check;
pub mod subscribe;

pub use contact::*;
pub use health_check::*;
pub use subscribe::*;

/// JSON body of every relay failure the caller gets to see.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

/// JSON body of every relay success.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct SuccessBody {
    pub message: String,
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}\n")?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{cause}")?;
        current = cause.source();
    }
    Ok(())
}

/// Upper bound for a relay request body. A 5000 grapheme message made of
/// multi-codepoint graphemes is well past actix's 32 KiB default.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// Malformed or non-JSON bodies get the relay's own validation message
/// instead of actix's plain-text rejection.
pub fn json_config(message: &'static str) -> actix_web::web::JsonConfig {
    actix_web::web::JsonConfig::default()
        .limit(MAX_BODY_BYTES)
        .error_handler(move |err, _req| {
            tracing::warn!(error.message = %err, "Rejected malformed request body");
            let response = actix_web::HttpResponse::BadRequest().json(ErrorBody {
                error: message.to_string(),
            });
            actix_web::error::InternalError::from_response(err, response).into()
        })
}
