use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use liftlog_server::{AppState, create_router};
use liftlog_storage::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "liftlog", about = "Fitness tracking API server")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "LIFTLOG_BIND", default_value = "127.0.0.1:8080")]
    bind: String,

    /// Path of the SQLite database
    #[arg(long, env = "LIFTLOG_DB", default_value = "liftlog.db")]
    database: PathBuf,

    /// Allowed CORS origin for the frontend
    #[arg(long, env = "LIFTLOG_CORS_ORIGIN")]
    cors_origin: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let db = Database::new(&args.database)
        .await
        .context("failed to open database")?;
    let app = create_router(AppState::new(db), args.cors_origin);

    info!("listening on {}", args.bind);
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
