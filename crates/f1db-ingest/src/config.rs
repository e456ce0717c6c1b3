//! Ingestion job configuration

use std::path::PathBuf;

use crate::coerce::NullSentinels;
#[cfg(test)]
use crate::coerce::DEFAULT_NULL_SENTINEL;

/// Default database URL for local development.
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/f1db";

/// Default directory holding the source CSV files.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Ingestion job configuration
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Target database URL
    pub database_url: String,
    /// Directory containing one CSV file per target table
    pub data_dir: PathBuf,
    /// Tokens recognized as "value absent" in source cells
    pub sentinels: NullSentinels,
}

impl IngestConfig {
    /// Load configuration from environment and defaults.
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: target database (default `postgresql://localhost/f1db`)
    /// - `F1DB_DATA_DIR`: source file directory (default `./data`)
    /// - `F1DB_NULL_SENTINEL`: comma-separated null sentinel tokens
    ///   (default `\N`)
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = IngestConfig {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            data_dir: std::env::var("F1DB_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            sentinels: match std::env::var("F1DB_NULL_SENTINEL") {
                Ok(tokens) => {
                    NullSentinels::new(tokens.split(',').map(|s| s.trim().to_string()))
                }
                Err(_) => NullSentinels::default(),
            },
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.database_url.is_empty() {
            anyhow::bail!("Database URL cannot be empty");
        }

        if self.data_dir.as_os_str().is_empty() {
            anyhow::bail!("Data directory cannot be empty");
        }

        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            sentinels: NullSentinels::default(),
        }
    }
}
