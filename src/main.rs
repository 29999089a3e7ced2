use anyhow::Context;
// this binary will target "package name"
use userauth::configuration::get_configuration;
use userauth::startup::Application;
use userauth::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber =
        get_subscriber("userauth".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration =
        get_configuration().context("Failed to read configuration")?;

    let application = Application::build(configuration).await?;
    if let Err(e) = application.run_until_stopped().await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "API failed"
        );
        return Err(e.into());
    }
    tracing::info!("API has exited");
    Ok(())
}
