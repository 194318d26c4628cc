use axum::{
    Json,
    extract::{Path, State},
};
use liftlog_domain::{DayOfWeek, ScheduleService};
use serde::Deserialize;

use crate::{
    AppState,
    auth::{Admin, Identity},
    error::ApiError,
    handlers::parse_day,
};

#[derive(Deserialize)]
pub struct SwapDaysRequest {
    pub day_a: u8,
    pub day_b: u8,
}

pub async fn today(
    State(state): State<AppState>,
    _identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plan = state.service.day_plan(DayOfWeek::today()).await?;
    Ok(Json(serde_json::json!({ "plan": plan })))
}

pub async fn by_day(
    State(state): State<AppState>,
    _identity: Identity,
    Path(day_of_week): Path<u8>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plan = state.service.day_plan(parse_day(day_of_week)?).await?;
    Ok(Json(serde_json::json!({ "plan": plan })))
}

pub async fn weekly(
    State(state): State<AppState>,
    _identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let plans = state.service.weekly_plan().await?;
    Ok(Json(serde_json::json!({ "days": plans })))
}

pub async fn status(
    State(state): State<AppState>,
    _identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let status = state.service.schedule_status().await?;
    Ok(Json(serde_json::json!({ "status": status })))
}

/// Atomically exchanges the names and exercise assignments of two days.
pub async fn swap_days(
    State(state): State<AppState>,
    Admin(_): Admin,
    Json(request): Json<SwapDaysRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let day_a = parse_day(request.day_a)?;
    let day_b = parse_day(request.day_b)?;
    if day_a == day_b {
        return Err(ApiError::bad_request("cannot swap a day with itself"));
    }
    state.service.swap_days(day_a, day_b).await?;
    Ok(Json(serde_json::json!({ "swapped": [request.day_a, request.day_b] })))
}
