use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use liftlog_domain::{AnalyticsFilter, AnalyticsService, MuscleGroup};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppState, auth::Identity, error::ApiError};

#[derive(Deserialize)]
pub struct AnalyticsQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub exercise_id: Option<Uuid>,
    pub muscle_group: Option<MuscleGroup>,
}

pub async fn report(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = AnalyticsFilter {
        start: query.start,
        end: query.end,
        exercise_id: query.exercise_id.map(Into::into),
        muscle_group: query.muscle_group,
    };
    let report = state
        .service
        .analytics_report(identity.user_id, filter)
        .await?;
    Ok(Json(serde_json::json!({ "analytics": report })))
}
