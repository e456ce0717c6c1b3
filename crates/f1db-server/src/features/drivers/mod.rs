//! Drivers feature
//!
//! Read-only queries over the `drivers` table: paginated/filtered listing,
//! lookup by id, and season rosters derived by joining results to races.

pub mod queries;
pub mod routes;
pub mod types;

pub use routes::drivers_routes;
