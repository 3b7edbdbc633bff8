use crate::domain::EmailAddress;
use crate::domain::email_address::INVALID_EMAIL;

#[derive(serde::Deserialize, serde::Serialize, Debug, Default, Clone)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SubscriptionRequest {
    pub email: EmailAddress,
}

impl TryFrom<SubscribeForm> for SubscriptionRequest {
    type Error = String;

    fn try_from(form: SubscribeForm) -> Result<Self, Self::Error> {
        let email = form.email.ok_or_else(|| INVALID_EMAIL.to_string())?;
        Ok(SubscriptionRequest {
            email: EmailAddress::parse(email)?,
        })
    }
}
