//! Operational tool for the snapshot backfill: embeds snapshots into legacy
//! workout exercises, reports coverage, and can undo the backfill.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use liftlog_storage::{
    Database,
    migration::{backfill_snapshots, rollback_backfill, verify_snapshots},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "liftlog-migrate", about = "Snapshot backfill migration")]
struct Args {
    /// Path of the SQLite database
    #[arg(long, env = "LIFTLOG_DB", default_value = "liftlog.db")]
    database: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Embed snapshots into workout exercises that have none
    Backfill,
    /// Report how many workout exercises still lack a snapshot
    Verify,
    /// Remove the snapshots written by a previous backfill
    Rollback,
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

    match args.command {
        Command::Backfill => {
            let report = backfill_snapshots(&db).await?;
            println!(
                "backfilled {} workout exercises ({} skipped)",
                report.backfilled, report.skipped
            );
        }
        Command::Verify => {
            let coverage = verify_snapshots(&db).await?;
            println!(
                "{} of {} workout exercises have a snapshot",
                coverage.total - coverage.missing,
                coverage.total
            );
        }
        Command::Rollback => {
            let rolled_back = rollback_backfill(&db).await?;
            println!("removed {rolled_back} backfilled snapshots");
        }
    }

    Ok(())
}
