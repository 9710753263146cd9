use std::sync::Arc;

use anyhow::Context;

use crate::config::{self, DatabaseConfig};
use crate::database::{DatabaseManager, PgStore};
use crate::routes;
use crate::state::AppState;

pub async fn handle(database: DatabaseConfig, port: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    if crate::is_production!() && config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set in production");
    }

    let pool = DatabaseManager::connect(&database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::migrate(&pool).await?;

    let app = routes::app(AppState::new(Arc::new(PgStore::new(pool.clone()))));

    let bind_addr = format!("{}:{}", config.server.host, port.unwrap_or(config.server.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("myFlix API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
