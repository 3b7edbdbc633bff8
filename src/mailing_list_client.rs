use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::EmailAddress;

/// Client for the MailerLite subscribers API.
pub struct MailingListClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
    group_id: String,
}

/// What the provider answered once a response was received.
#[derive(Debug, PartialEq, Eq)]
pub enum UpstreamReply {
    Accepted,
    Rejected { status: u16, body: Vec<u8> },
}

#[derive(serde::Serialize)]
struct AddSubscriberRequest<'a> {
    email: &'a str,
    groups: [&'a str; 1],
}

impl MailingListClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        group_id: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_key,
            group_id,
        })
    }

    /// A non-success status is not an error here: the caller forwards it.
    #[tracing::instrument(name = "Add subscriber to mailing list", skip(self))]
    pub async fn add_subscriber(
        &self,
        email: &EmailAddress,
    ) -> Result<UpstreamReply, reqwest::Error> {
        let url = format!("{}/api/subscribers", self.base_url);
        let body = AddSubscriberRequest {
            email: email.as_ref(),
            groups: [self.group_id.as_str()],
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(UpstreamReply::Accepted);
        }

        let body = response.bytes().await?.to_vec();
        tracing::warn!(status = status.as_u16(), "Mailing list provider rejected the subscriber");
        Ok(UpstreamReply::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
