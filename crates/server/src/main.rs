use server::{config::get_configuration, startup};

#[tokio::main]
async fn main() {
    let settings = get_configuration().expect("failed to load configuration");
    common::setup_logging(settings.environment.clone());
    tracing::info!(environment = settings.environment.as_str(), "Configuration loaded");

    startup::run(settings).await.expect("server failed");
}
