//! Bulk loader — replaces every stored record with the contents of a JSON file.
//!
//! Usage: `cargo run --bin import [FILE]`
//!
//! Requires `DATABASE_URL` (reads .env). FILE defaults to `IMPORT_FILE`, then
//! `data/jsondata.json`. Exits 0 on success and 1 on any failure.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use insight_dashboard::config::AppConfig;
use insight_dashboard::db;
use insight_dashboard::services::import;
use insight_dashboard::services::store::{ImportSummary, PgRecordStore};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "import", about = "Replace the record store with a JSON dataset")]
struct Args {
    /// JSON array of records to load.
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "insight_dashboard=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(summary) => {
            tracing::info!(
                deleted = summary.deleted,
                inserted = summary.inserted,
                "Data imported successfully"
            );
            println!(
                "[done] Data imported successfully: {} removed, {} inserted",
                summary.deleted, summary.inserted
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Import failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ImportSummary> {
    let config = AppConfig::from_env().context("DATABASE_URL must be set")?;
    let path = args
        .file
        .unwrap_or_else(|| PathBuf::from(&config.import_file));

    let pool = db::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;

    let store = PgRecordStore::new(pool);
    let summary = import::import_file(&store, &path).await?;
    Ok(summary)
}
