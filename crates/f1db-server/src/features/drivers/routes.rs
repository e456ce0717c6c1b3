//! Driver routes
//!
//! Public read-only routes over the drivers dataset.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;

use super::queries::{
    get_driver::{handle as handle_get_driver, GetDriverError},
    list_drivers::{handle as handle_list_drivers, ListDriversError},
    season_drivers::handle as handle_season_drivers,
    GetDriverQuery, ListDriversQuery, SeasonDriversQuery,
};
use crate::error::AppError;

/// Create driver routes
pub fn drivers_routes() -> Router<PgPool> {
    Router::new()
        .route("/", get(list_drivers))
        .route("/current", get(current_drivers))
        .route("/season/:year", get(drivers_by_season))
        .route("/:driver_id", get(get_driver))
}

/// List all-time drivers
///
/// GET /drivers?limit=50&offset=0&nationality=British&q=ham
async fn list_drivers(
    State(db): State<PgPool>,
    Query(query): Query<ListDriversQuery>,
) -> Result<Response, AppError> {
    match handle_list_drivers(db, query).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response))).into_response()),
        Err(ListDriversError::Validation(msg)) => Err(AppError::Validation(msg.to_string())),
        Err(e) => {
            tracing::error!("Failed to list drivers: {:?}", e);
            Err(AppError::Internal("Failed to list drivers".to_string()))
        }
    }
}

/// Drivers who raced in the latest season on record
///
/// GET /drivers/current
async fn current_drivers(State(db): State<PgPool>) -> Result<Response, AppError> {
    match handle_season_drivers(db, SeasonDriversQuery { year: None }).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response))).into_response()),
        Err(e) => {
            tracing::error!("Failed to list current drivers: {:?}", e);
            Err(AppError::Internal(
                "Failed to list current drivers".to_string(),
            ))
        }
    }
}

/// Drivers who raced in a specific season
///
/// GET /drivers/season/:year
async fn drivers_by_season(
    State(db): State<PgPool>,
    Path(year): Path<i32>,
) -> Result<Response, AppError> {
    match handle_season_drivers(db, SeasonDriversQuery { year: Some(year) }).await {
        Ok(response) => Ok((StatusCode::OK, Json(json!(response))).into_response()),
        Err(e) => {
            tracing::error!(year, "Failed to list season drivers: {:?}", e);
            Err(AppError::Internal(
                "Failed to list season drivers".to_string(),
            ))
        }
    }
}

/// Get a single driver by id
///
/// GET /drivers/:driver_id
async fn get_driver(
    State(db): State<PgPool>,
    Path(driver_id): Path<i32>,
) -> Result<Response, AppError> {
    match handle_get_driver(db, GetDriverQuery { driver_id }).await {
        Ok(driver) => Ok((StatusCode::OK, Json(json!(driver))).into_response()),
        Err(GetDriverError::NotFound) => {
            Err(AppError::NotFound("Driver not found".to_string()))
        }
        Err(e) => {
            tracing::error!(driver_id, "Failed to get driver: {:?}", e);
            Err(AppError::Internal("Failed to get driver".to_string()))
        }
    }
}
