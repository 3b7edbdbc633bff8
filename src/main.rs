use lionfly_relay::startup::Application;
use lionfly_relay::{configuration::get_configuration, telemetry::*};

#[actix_web::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("lionfly-relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    Application::build(configuration)
        .await?
        .run_until_stopped()
        .await?;
    Ok(())
}
