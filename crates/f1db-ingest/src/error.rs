//! Ingestion error types
//!
//! Field-level coercion failures never surface here; they degrade to NULL
//! inside [`crate::coerce`]. Everything in this enum aborts the run and rolls
//! back the surrounding transaction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Run-aborting ingestion errors
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read source file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("table '{table}': required source column '{column}' is missing")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("invalid table dependency graph: {0}")]
    Graph(String),

    #[error("database error during stage '{stage}': {source}")]
    Database {
        stage: String,
        #[source]
        source: sqlx::Error,
    },
}

impl IngestError {
    /// Attach a stage name to a database error.
    pub fn database(stage: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Database {
            stage: stage.into(),
            source,
        }
    }
}
