//! Feature modules implementing the F1DB API
//!
//! Each feature is a vertical slice with its own queries and routes. The API
//! is read-only: every handler runs a single parameterized SELECT against
//! the pool and releases the connection when the request completes.
//!
//! # Features
//!
//! - **drivers**: driver listing, lookup and season rosters
//! - **shared**: pagination helpers used by list queries

pub mod drivers;
pub mod shared;

use axum::Router;
use sqlx::PgPool;

/// Creates the main API router with all feature routes mounted
///
/// # Arguments
///
/// * `db` - PostgreSQL connection pool shared by all handlers
pub fn router(db: PgPool) -> Router<()> {
    Router::new().nest("/drivers", drivers::drivers_routes().with_state(db))
}
