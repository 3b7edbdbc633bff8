use crate::domain::email_address::INVALID_EMAIL;
use crate::domain::{ContactForm, SubscribeForm, is_valid_email};

pub const NAME_REQUIRED: &str = "Te rugăm să introduci numele tău.";
pub const EMAIL_REQUIRED: &str = "Te rugăm să introduci o adresă de email.";
pub const MESSAGE_REQUIRED: &str = "Te rugăm să introduci un mesaj.";

/// The inputs of one form and the checks run before anything leaves the
/// browser. `Default` is the cleared form.
pub trait FormFields: Default {
    type Payload: serde::Serialize + Send + Sync;

    /// Relay path the payload is posted to.
    const ENDPOINT: &'static str;

    /// Required fields in display order, then the email shape. The first
    /// failing check wins.
    fn validate(&self) -> Result<Self::Payload, &'static str>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields for ContactFields {
    type Payload = ContactForm;
    const ENDPOINT: &'static str = "/api/contact";

    fn validate(&self) -> Result<ContactForm, &'static str> {
        required(&self.name, NAME_REQUIRED)?;
        required(&self.email, EMAIL_REQUIRED)?;
        required(&self.message, MESSAGE_REQUIRED)?;
        if !is_valid_email(&self.email) {
            return Err(INVALID_EMAIL);
        }
        Ok(ContactForm {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            message: Some(self.message.clone()),
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewsletterFields {
    pub email: String,
}

impl FormFields for NewsletterFields {
    type Payload = SubscribeForm;
    const ENDPOINT: &'static str = "/api/subscribe";

    fn validate(&self) -> Result<SubscribeForm, &'static str> {
        required(&self.email, EMAIL_REQUIRED)?;
        if !is_valid_email(&self.email) {
            return Err(INVALID_EMAIL);
        }
        Ok(SubscribeForm {
            email: Some(self.email.clone()),
        })
    }
}

fn required(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}
