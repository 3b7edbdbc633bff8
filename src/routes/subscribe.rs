use std::fmt::Debug;

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, web};

use crate::domain::email_address::INVALID_EMAIL;
use crate::domain::{SubscribeForm, SubscriptionRequest};
use crate::mailing_list_client::{MailingListClient, UpstreamReply};

use super::{ErrorBody, SuccessBody, error_chain_fmt};

pub const SUBSCRIBED: &str = "Te-ai abonat cu succes!";
const SUBSCRIBE_FAILED: &str = "Eroare server.";

pub fn subscribe_json_config() -> web::JsonConfig {
    super::json_config(INVALID_EMAIL)
}

#[tracing::instrument(
    name = "Relay a newsletter subscription",
    skip(body, mailing_list),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe(
    body: web::Json<SubscribeForm>,
    mailing_list: web::Data<MailingListClient>,
) -> Result<HttpResponse, SubscribeError> {
    let request: SubscriptionRequest = body
        .into_inner()
        .try_into()
        .map_err(SubscribeError::ValidationError)?;
    tracing::Span::current().record("subscriber_email", tracing::field::display(&request.email));

    let reply = mailing_list
        .add_subscriber(&request.email)
        .await
        .map_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Mailing list provider could not be reached"
            );
            SubscribeError::TransportError(e.into())
        })?;

    match reply {
        UpstreamReply::Accepted => Ok(HttpResponse::Ok().json(SuccessBody {
            message: SUBSCRIBED.to_string(),
        })),
        UpstreamReply::Rejected { status, body } => {
            Err(SubscribeError::UpstreamRejection { status, body })
        }
    }
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    ValidationError(String),
    #[error("The mailing list provider rejected the subscriber with status {status}")]
    UpstreamRejection { status: u16, body: Vec<u8> },
    #[error("Failed to reach the mailing list provider")]
    TransportError(#[source] anyhow::Error),
}

impl Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            // An upstream status actix cannot represent is still a failed relay.
            Self::UpstreamRejection { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::TransportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::ValidationError(message) => {
                HttpResponse::build(self.status_code()).json(ErrorBody {
                    error: message.clone(),
                })
            }
            Self::UpstreamRejection { body, .. } => HttpResponse::build(self.status_code())
                .content_type(ContentType::json())
                .body(body.clone()),
            Self::TransportError(_) => HttpResponse::build(self.status_code()).json(ErrorBody {
                error: SUBSCRIBE_FAILED.to_string(),
            }),
        }
    }
}
