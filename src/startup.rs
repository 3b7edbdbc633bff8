use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::email_client::MailTransport;
use crate::mailing_list_client::MailingListClient;
use crate::routes::{contact, contact_json_config, health_check, subscribe, subscribe_json_config};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let transport: Arc<dyn MailTransport> = Arc::new(configuration.smtp.client()?);
        Self::build_with_transport(configuration, transport).await
    }

    /// Same as [`Application::build`] with the SMTP transport swapped out.
    pub async fn build_with_transport(
        configuration: Settings,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self, anyhow::Error> {
        let mailing_list = configuration.mailing_list.client()?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(listener, transport, mailing_list)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    transport: Arc<dyn MailTransport>,
    mailing_list: MailingListClient,
) -> Result<Server, std::io::Error> {
    let transport: Data<dyn MailTransport> = Data::from(transport);
    let mailing_list = Data::new(mailing_list);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/api/contact")
                    .app_data(contact_json_config())
                    .route(web::post().to(contact)),
            )
            .service(
                web::resource("/api/subscribe")
                    .app_data(subscribe_json_config())
                    .route(web::post().to(subscribe)),
            )
            .app_data(transport.clone())
            .app_data(mailing_list.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
