//! F1DB Common Library
//!
//! Shared infrastructure for the F1DB workspace.
//!
//! # Overview
//!
//! This crate provides the logging subsystem used by both the ingestion job
//! and the query server: tracing-based logging with console/file output and
//! environment-driven configuration. See [`logging`].

pub mod logging;
