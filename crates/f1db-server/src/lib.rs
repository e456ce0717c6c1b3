//! F1DB Server Library
//!
//! Read-only HTTP API over the motorsport results dataset.
//!
//! # Overview
//!
//! The server exposes parameterized, single-statement queries over the six
//! tables owned by the ingestion job (`f1db-ingest`). It never writes: each
//! request borrows one pooled connection for its duration, executes its
//! query, and releases the connection.
//!
//! # Architecture
//!
//! Feature slices under [`features`], each with its own routes and query
//! handlers:
//!
//! - **drivers**: list with pagination and substring filters, lookup by id,
//!   and season rosters (current or explicit year)
//! - **shared**: pagination helpers common to list queries

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
