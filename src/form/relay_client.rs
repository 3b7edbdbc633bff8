use super::controller::RelayOutcome;

const DELIVERED_FALLBACK: &str = "Trimis cu succes!";
const REFUSED_FALLBACK: &str = "A apărut o eroare.";
const CONNECTION_FAILED: &str = "Eroare de conexiune.";

/// Browser side of the relays: posts JSON and turns whatever comes back into
/// something the form can display. No timeout is configured.
#[derive(Clone)]
pub struct RelayClient {
    http_client: reqwest::Client,
    base_url: String,
}

#[derive(serde::Deserialize)]
struct ReplyBody {
    message: Option<String>,
    error: Option<String>,
}

impl RelayClient {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
        }
    }

    #[tracing::instrument(name = "Submit form to relay", skip(self, payload))]
    pub async fn submit<P: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> RelayOutcome {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = match self.http_client.post(&url).json(payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Relay could not be reached");
                return RelayOutcome::Refused(CONNECTION_FAILED.to_string());
            }
        };

        let delivered = response.status().is_success();
        let body = match response.json::<ReplyBody>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Relay answered with an unreadable body");
                return RelayOutcome::Refused(CONNECTION_FAILED.to_string());
            }
        };

        if delivered {
            RelayOutcome::Delivered(body.message.unwrap_or_else(|| DELIVERED_FALLBACK.to_string()))
        } else {
            // Upstream passthrough bodies carry `message` rather than `error`.
            RelayOutcome::Refused(
                body.error
                    .or(body.message)
                    .unwrap_or_else(|| REFUSED_FALLBACK.to_string()),
            )
        }
    }
}
