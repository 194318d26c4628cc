pub mod admin;
pub mod analytics;
pub mod exercises;
pub mod leaderboard;
pub mod schedule;
pub mod workout;

use axum::{Json, response::IntoResponse};
use liftlog_domain::{DayOfWeek, Name};

use crate::error::ApiError;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub(crate) fn parse_day(value: u8) -> Result<DayOfWeek, ApiError> {
    DayOfWeek::new(value).map_err(|e| ApiError::bad_request(e.to_string()))
}

pub(crate) fn parse_name(value: &str) -> Result<Name, ApiError> {
    Name::new(value).map_err(|e| ApiError::bad_request(e.to_string()))
}
