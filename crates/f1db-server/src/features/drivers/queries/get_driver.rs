//! Get driver query
//!
//! Lookup of a single driver by id. Absence is an explicit error mapped to
//! 404, never a 200 with null fields.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::drivers::types::Driver;

/// Query to get a driver by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDriverQuery {
    pub driver_id: i32,
}

/// Error type for the get driver query
#[derive(Debug, thiserror::Error)]
pub enum GetDriverError {
    #[error("Driver not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn handle(pool: PgPool, query: GetDriverQuery) -> Result<Driver, GetDriverError> {
    let driver = sqlx::query_as::<_, Driver>(
        r#"
        SELECT driver_id, code, forename, surname, dob, nationality
        FROM drivers
        WHERE driver_id = $1
        "#,
    )
    .bind(query.driver_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(GetDriverError::NotFound)?;

    Ok(driver)
}
