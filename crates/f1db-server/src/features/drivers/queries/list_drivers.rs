//! List drivers query
//!
//! Paginated all-time driver listing with optional case-insensitive
//! substring filters on nationality and on forename/surname.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::features::drivers::types::Driver;
use crate::features::shared::pagination::PageParams;

/// Query to list drivers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListDriversQuery {
    /// Items per page. Defaults to 50, must be within 1-200.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Number of items to skip. Defaults to 0, must not be negative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    /// Case-insensitive substring filter on nationality
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    /// Case-insensitive substring filter on forename or surname
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListDriversQuery {
    fn page(&self) -> PageParams {
        PageParams::new(self.limit, self.offset)
    }
}

/// Response for the list drivers query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDriversResponse {
    pub limit: i64,
    pub offset: i64,
    pub count: usize,
    pub data: Vec<Driver>,
}

/// Error type for the list drivers query
#[derive(Debug, thiserror::Error)]
pub enum ListDriversError {
    #[error("Invalid pagination: {0}")]
    Validation(&'static str),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub async fn handle(
    pool: PgPool,
    query: ListDriversQuery,
) -> Result<ListDriversResponse, ListDriversError> {
    let page = query.page();
    page.validate().map_err(ListDriversError::Validation)?;
    let limit = page.limit();
    let offset = page.offset();

    let nationality_like = query.nationality.as_ref().map(|n| format!("%{}%", n));
    let q_like = query.q.as_ref().map(|q| format!("%{}%", q));

    let data = sqlx::query_as::<_, Driver>(
        r#"
        SELECT driver_id, code, forename, surname, dob, nationality
        FROM drivers
        WHERE ($1::text IS NULL OR nationality ILIKE $1)
          AND ($2::text IS NULL OR forename ILIKE $2 OR surname ILIKE $2)
        ORDER BY surname, forename
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(nationality_like)
    .bind(q_like)
    .bind(limit)
    .bind(offset)
    .fetch_all(&pool)
    .await?;

    Ok(ListDriversResponse {
        limit,
        offset,
        count: data.len(),
        data,
    })
}
