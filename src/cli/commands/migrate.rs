use crate::config::DatabaseConfig;
use crate::database::DatabaseManager;

pub async fn handle(database: DatabaseConfig) -> anyhow::Result<()> {
    let pool = DatabaseManager::connect(&database).await?;
    DatabaseManager::migrate(&pool).await?;
    pool.close().await;
    println!("Migrations applied");
    Ok(())
}
