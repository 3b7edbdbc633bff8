use std::fmt::Debug;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use anyhow::Context;

use crate::domain::{ALL_FIELDS_REQUIRED, ContactForm, ContactMessage};
use crate::email_client::{MailTransport, OutgoingEmail};

use super::{ErrorBody, SuccessBody, error_chain_fmt};

pub const CONTACT_SENT: &str = "Mesajul a fost trimis cu succes!";
const CONTACT_FAILED: &str = "A apărut o eroare la trimiterea mesajului.";

pub fn contact_json_config() -> web::JsonConfig {
    super::json_config(ALL_FIELDS_REQUIRED)
}

#[tracing::instrument(
    name = "Relay a contact message",
    skip(body, transport),
    fields(contact_name = tracing::field::Empty, contact_email = tracing::field::Empty)
)]
pub async fn contact(
    body: web::Json<ContactForm>,
    transport: web::Data<dyn MailTransport>,
) -> Result<HttpResponse, ContactError> {
    let message: ContactMessage = body
        .into_inner()
        .try_into()
        .map_err(ContactError::ValidationError)?;

    tracing::Span::current()
        .record("contact_name", tracing::field::display(message.name.as_ref()))
        .record("contact_email", tracing::field::display(&message.email));

    transport
        .send_email(compose_email(&message))
        .await
        .context("Failed to hand the contact message to the mail transport")
        .map_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Contact message was not delivered"
            );
            ContactError::TransportError(e)
        })?;

    Ok(HttpResponse::Ok().json(SuccessBody {
        message: CONTACT_SENT.to_string(),
    }))
}

/// Plain and HTML variants both carry every field; user input is escaped in
/// the HTML one.
pub fn compose_email(message: &ContactMessage) -> OutgoingEmail {
    let name = message.name.as_ref();
    let email = message.email.as_ref();
    let text = message.message.as_ref();

    let html_body = format!(
        "<p><strong>Nume:</strong> {}</p>\
         <p><strong>Email:</strong> {}</p>\
         <p><strong>Mesaj:</strong><br/>{}</p>",
        htmlescape::encode_minimal(name),
        htmlescape::encode_minimal(email),
        htmlescape::encode_minimal(text).replace('\n', "<br/>"),
    );
    let text_body = format!("Nume: {name}\nEmail: {email}\nMesaj:\n{text}");

    OutgoingEmail {
        reply_to: message.email.clone(),
        subject: format!("Mesaj de la {name} | LIONFLY"),
        html_body,
        text_body,
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    ValidationError(String),
    #[error("Failed to relay the contact message")]
    TransportError(#[source] anyhow::Error),
}

impl Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::TransportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            Self::ValidationError(message) => message.clone(),
            Self::TransportError(_) => CONTACT_FAILED.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error })
    }
}
