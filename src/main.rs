use clap::Parser;
use tracing_subscriber::EnvFilter;

use myflix_api::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("myflix_api=info,tower_http=info")),
        )
        .init();

    let config = myflix_api::config::config();
    tracing::info!("Starting myFlix API in {:?} mode", config.environment);

    myflix_api::cli::run(Cli::parse()).await
}
