use axum::{Json, extract::State};
use chrono::{Datelike, Local, NaiveDate};
use liftlog_domain::{
    AnalyticsService, ExerciseSnapshot, WorkoutEdit, WorkoutEntry, WorkoutLog, WorkoutService,
};
use serde::Deserialize;

use crate::{AppState, auth::Identity, error::ApiError, handlers::parse_day};

#[derive(Deserialize)]
pub struct SaveWorkoutRequest {
    /// Defaults to today when absent.
    pub date: Option<NaiveDate>,
    /// Defaults to the weekday of the date when absent.
    pub day_of_week: Option<u8>,
    pub exercises: Vec<WorkoutEntry>,
}

pub async fn save(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<SaveWorkoutRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let date = request.date.unwrap_or_else(|| Local::now().date_naive());
    let day = match request.day_of_week {
        Some(day) => parse_day(day)?,
        None => date.weekday().into(),
    };
    let log = state
        .service
        .save_workout(identity.user_id, date, day, request.exercises)
        .await?;
    Ok(Json(serde_json::json!({ "workout": log })))
}

pub async fn history(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let logs = state.service.workout_history(identity.user_id).await?;
    let workouts = logs.iter().map(history_view).collect::<Vec<_>>();
    Ok(Json(serde_json::json!({ "workouts": workouts })))
}

/// History rows present each exercise reconstructed purely from its
/// snapshot, so past workouts stay stable under catalog edits.
fn history_view(log: &WorkoutLog) -> serde_json::Value {
    serde_json::json!({
        "id": log.id,
        "date": log.date,
        "day": log.day,
        "exercises": log
            .exercises
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id,
                    "order": e.order,
                    "is_custom": e.is_custom,
                    "is_replaced": e.is_replaced,
                    "replaced_at": e.replaced_at,
                    "exercise": e.snapshot.as_ref().map(ExerciseSnapshot::to_exercise),
                    "sets": e.sets,
                })
            })
            .collect::<Vec<_>>(),
    })
}

/// Dispatches one of the edit actions (`edit_sets`, `add_exercise`,
/// `remove_exercise`, `delete_workout`) against an already-saved workout.
pub async fn edit(
    State(state): State<AppState>,
    identity: Identity,
    Json(edit): Json<WorkoutEdit>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service.edit_workout(identity.user_id, edit).await?;
    Ok(Json(serde_json::json!({ "updated": true })))
}

pub async fn streak(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let streak = state.service.workout_streak(identity.user_id).await?;
    Ok(Json(serde_json::json!({ "streak": streak })))
}
