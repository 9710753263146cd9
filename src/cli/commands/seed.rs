use anyhow::Context;
use std::path::PathBuf;

use crate::config::DatabaseConfig;
use crate::database::models::NewMovie;
use crate::database::{DatabaseManager, PgStore};

/// Movies are immutable through the HTTP API; this is how they get in.
pub async fn handle(database: DatabaseConfig, file: PathBuf) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let movies: Vec<NewMovie> = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of movies", file.display()))?;

    let pool = DatabaseManager::connect(&database).await?;
    DatabaseManager::migrate(&pool).await?;
    let store = PgStore::new(pool.clone());

    let total = movies.len();
    for movie in movies {
        let title = movie.title.clone();
        store
            .upsert_movie(movie)
            .await
            .with_context(|| format!("failed to seed '{}'", title))?;
        tracing::debug!("Seeded '{}'", title);
    }

    pool.close().await;
    println!("Seeded {} movies from {}", total, file.display());
    Ok(())
}
