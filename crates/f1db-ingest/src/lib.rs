//! F1DB Ingest Library
//!
//! Full-refresh batch ingestion of the motorsport results dataset from CSV
//! flat files into PostgreSQL.
//!
//! The pipeline loads six interdependent tables (constructors, circuits,
//! drivers, status, races, results) in foreign-key dependency order, inside a
//! single transaction that first empties every target table and resets its
//! identity sequence. Re-running the job from the same source files therefore
//! always produces identical table contents.
//!
//! # Example
//!
//! ```no_run
//! use f1db_ingest::{config::IngestConfig, loader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::load()?;
//!     let pool = sqlx::PgPool::connect(&config.database_url).await?;
//!     let report = loader::run(&pool, &config).await?;
//!     for table in &report.tables {
//!         println!("{}: {} rows", table.table, table.rows);
//!     }
//!     Ok(())
//! }
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod loader;
pub mod project;
pub mod reader;
pub mod schema;

pub use error::IngestError;
