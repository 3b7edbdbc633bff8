use std::time::Duration;

use anyhow::Context;
use lettre::Address;
use lettre::message::Mailbox;
use secrecy::Secret;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::email_client::SmtpEmailClient;
use crate::mailing_list_client::MailingListClient;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub smtp: SmtpSettings,
    pub mailing_list: MailingListSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
    pub sender_email: String,
    pub sender_name: String,
    pub recipient: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl SmtpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn sender(&self) -> Result<Mailbox, anyhow::Error> {
        let address = self
            .sender_email
            .parse::<Address>()
            .with_context(|| format!("Invalid sender address {}", self.sender_email))?;
        Ok(Mailbox::new(Some(self.sender_name.clone()), address))
    }

    pub fn recipient(&self) -> Result<Mailbox, anyhow::Error> {
        self.recipient
            .parse::<Mailbox>()
            .with_context(|| format!("Invalid recipient address {}", self.recipient))
    }

    pub fn client(&self) -> Result<SmtpEmailClient, anyhow::Error> {
        SmtpEmailClient::new(self)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct MailingListSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    pub group_id: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

impl MailingListSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn client(&self) -> Result<MailingListClient, reqwest::Error> {
        MailingListClient::new(
            self.base_url.clone(),
            self.api_key.clone(),
            self.group_id.clone(),
            self.timeout(),
        )
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

/// Layers `base.yaml`, the environment specific file and `APP_*` variables,
/// in that order.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine current directory");
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
