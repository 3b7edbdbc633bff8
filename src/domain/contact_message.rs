use crate::domain::{ContactName, EmailAddress, MessageBody};

pub const ALL_FIELDS_REQUIRED: &str = "Toate câmpurile sunt obligatorii.";

/// Raw contact form body. Absent fields stay `None` so the relay answers with
/// its own validation error instead of a deserialization failure.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone)]
pub struct ContactForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactMessage {
    pub name: ContactName,
    pub email: EmailAddress,
    pub message: MessageBody,
}

impl TryFrom<ContactForm> for ContactMessage {
    type Error = String;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let present = |field: Option<String>| {
            field
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ALL_FIELDS_REQUIRED.to_string())
        };
        let (name, email, message) = (
            present(form.name)?,
            present(form.email)?,
            present(form.message)?,
        );

        Ok(ContactMessage {
            name: ContactName::parse(name)?,
            email: EmailAddress::parse(email)?,
            message: MessageBody::parse(message)?,
        })
    }
}
