use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use reqwest::Response;
use wiremock::MockServer;

use lionfly_relay::configuration::get_configuration;
use lionfly_relay::email_client::{MailTransport, OutgoingEmail};
use lionfly_relay::startup::Application;
use lionfly_relay::telemetry;

pub struct TestApp {
    pub address: String,
    pub mailing_list_server: MockServer,
    pub mail_transport: Arc<RecordingTransport>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_contact(&self, body: serde_json::Value) -> Response {
        self.api_client
            .post(format!("{}/api/contact", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute Request")
    }

    pub async fn post_subscribe(&self, body: serde_json::Value) -> Response {
        self.api_client
            .post(format!("{}/api/subscribe", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute Request")
    }

    pub async fn post_raw(&self, route: &str, body: &'static str) -> Response {
        self.api_client
            .post(format!("{}{}", self.address, route))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute Request")
    }
}

/// Stands in for the SMTP server and remembers what it was asked to send.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
    failing: std::sync::atomic::AtomicBool,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_from_now_on(&self) {
        self.failing.store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl MailTransport for RecordingTransport {
    async fn send_email(&self, email: OutgoingEmail) -> Result<(), anyhow::Error> {
        if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
            anyhow::bail!("454 4.7.0 TLS not available due to local problem at smtp.internal:587");
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber =
            telemetry::get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber);
    };
});

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let mailing_list_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = 0;
        c.mailing_list.base_url = mailing_list_server.uri();
        c.mailing_list.group_id = "test-group".into();
        c.mailing_list.timeout_milliseconds = 200;
        c
    };

    let mail_transport = Arc::new(RecordingTransport::default());
    let application =
        Application::build_with_transport(configuration, mail_transport.clone())
            .await
            .expect("Failed to build application");
    let port = application.port();
    let address = format!("http://127.0.0.1:{port}");

    _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address,
        mailing_list_server,
        mail_transport,
        api_client: reqwest::Client::new(),
    }
}
