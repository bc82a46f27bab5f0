use anyhow::Context;
use clap::Parser;
use trivia_api::config::Settings;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Interface to listen on, overrides TRIVIA_HOST
    #[clap(long)]
    host: Option<String>,
    /// Port to listen on, overrides TRIVIA_PORT
    #[clap(long)]
    port: Option<u16>,
    /// SQLite connection string, overrides TRIVIA_DATABASE_URL
    #[clap(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(host) = cli.host {
        settings.host = host;
    }
    if let Some(port) = cli.port {
        settings.port = port;
    }
    if let Some(database_url) = cli.database_url {
        settings.database_url = database_url;
    }

    let pool = db::establish_connection(&settings.database_url, settings.max_connections)
        .await
        .context("Cannot connect to DB")?;

    tracing::info!("Running db migrations...");
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let result = run_server(pool.clone(), &settings.address()).await;
    pool.close().await;
    result
}
