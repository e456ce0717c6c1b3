//! F1DB Ingest - flat-file ingestion job

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use f1db_common::logging::{init_logging, LogConfig, LogLevel};
use f1db_ingest::{config::IngestConfig, loader};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "f1db-ingest")]
#[command(author, version, about = "F1DB flat-file ingestion job")]
struct Cli {
    /// Directory containing the source CSV files (overrides F1DB_DATA_DIR)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    // Environment variables take precedence over the built defaults, but
    // unset variables leave them (including the verbose flag) intact.
    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("f1db-ingest".to_string())
        .build()
        .with_env_overrides()?;

    init_logging(&log_config)?;

    let mut config = IngestConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    info!(data_dir = %config.data_dir.display(), "starting full refresh");

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .connect(&config.database_url)
        .await?;

    // Any stage failure propagates here, rolls the run back, and exits
    // non-zero.
    let report = loader::run(&pool, &config).await?;

    for table in &report.tables {
        info!(table = table.table, rows = table.rows, "imported");
    }
    info!("all core tables imported successfully");

    Ok(())
}
