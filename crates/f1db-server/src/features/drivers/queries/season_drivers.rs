//! Season drivers query
//!
//! Roster of drivers with at least one result in a season's races, distinct,
//! ordered by surname then forename. The "current" variant derives its season
//! as the maximum year present in the races table.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::drivers::types::Driver;

/// Query for a season's driver roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDriversQuery {
    /// Explicit season year; `None` means the latest season on record
    pub year: Option<i32>,
}

/// Response for the season drivers query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonDriversResponse {
    /// `None` only when the races table is empty
    pub season: Option<i32>,
    pub count: usize,
    pub data: Vec<Driver>,
}

/// Error type for the season drivers query
#[derive(Debug, thiserror::Error)]
pub enum SeasonDriversError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn handle(
    pool: PgPool,
    query: SeasonDriversQuery,
) -> Result<SeasonDriversResponse, SeasonDriversError> {
    let season = match query.year {
        Some(year) => Some(year),
        None => latest_season(&pool).await?,
    };

    let Some(year) = season else {
        // No races loaded yet; an empty roster, not an error.
        return Ok(SeasonDriversResponse {
            season: None,
            count: 0,
            data: Vec::new(),
        });
    };

    let data = sqlx::query_as::<_, Driver>(
        r#"
        SELECT DISTINCT d.driver_id, d.code, d.forename, d.surname, d.dob, d.nationality
        FROM results r
        JOIN races ra ON ra.race_id = r.race_id
        JOIN drivers d ON d.driver_id = r.driver_id
        WHERE ra.year = $1
        ORDER BY d.surname, d.forename
        "#,
    )
    .bind(year)
    .fetch_all(&pool)
    .await?;

    Ok(SeasonDriversResponse {
        season: Some(year),
        count: data.len(),
        data,
    })
}

/// Maximum year across all races, if any races exist.
async fn latest_season(pool: &PgPool) -> Result<Option<i32>, sqlx::Error> {
    let (max_year,): (Option<i32>,) = sqlx::query_as("SELECT MAX(year) FROM races")
        .fetch_one(pool)
        .await?;
    Ok(max_year)
}
