pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "myflix")]
#[command(about = "myFlix API server and maintenance commands")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Database URL override (defaults to DATABASE_URL)")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run migrations and serve the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Port override (defaults to MYFLIX_PORT / PORT / 8080)")]
        port: Option<u16>,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Upsert movies from a JSON array file, keyed by Title")]
    Seed {
        #[arg(help = "Path to a JSON file containing an array of movie documents")]
        file: PathBuf,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut database = crate::config::config().database.clone();
    if let Some(url) = cli.database_url {
        database.url = url;
    }

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(database, port).await,
        Commands::Migrate => commands::migrate::handle(database).await,
        Commands::Seed { file } => commands::seed::handle(database, file).await,
    }
}
