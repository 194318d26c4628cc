use axum::{
    Json,
    extract::{Path, Query, State},
};
use liftlog_domain::{
    Equipment, ExerciseDraft, ExerciseService, ExerciseUpdate, MuscleGroup, ScheduleService,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppState,
    auth::Admin,
    error::ApiError,
    handlers::{parse_day, parse_name},
};

#[derive(Deserialize)]
pub struct AdminCreateExerciseRequest {
    pub name: String,
    pub description: Option<String>,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub video_url: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    /// When given, the new exercise is appended to this day's schedule.
    pub day_of_week: Option<u8>,
}

#[derive(Deserialize)]
pub struct UpdateExerciseRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
    pub video_url: Option<String>,
    pub links: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct AddScheduleExerciseRequest {
    pub day_of_week: u8,
    pub exercise_id: Uuid,
}

#[derive(Deserialize)]
pub struct RemoveScheduleExerciseQuery {
    pub exercise_id: Uuid,
}

#[derive(Deserialize)]
pub struct RenameScheduleRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct ReorderRequest {
    pub day_of_week: u8,
    pub exercise_ids: Vec<Uuid>,
}

#[derive(Deserialize)]
pub struct UpdateDayTypeRequest {
    pub day_of_week: u8,
    pub name: String,
}

/// Creates a global exercise, optionally assigning it to a day in the same
/// request.
pub async fn create_exercise(
    State(state): State<AppState>,
    Admin(identity): Admin,
    Json(request): Json<AdminCreateExerciseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let day = request.day_of_week.map(parse_day).transpose()?;
    let draft = ExerciseDraft {
        name: parse_name(&request.name)?,
        description: request.description,
        muscle_group: request.muscle_group,
        equipment: request.equipment,
        video_url: request.video_url,
        links: request.links,
        owner: None,
    };
    let exercise = state.service.create_exercise(draft, identity.user_id).await?;
    let schedule = match day {
        Some(day) => Some(state.service.add_exercise_to_day(day, exercise.id).await?),
        None => None,
    };
    Ok(Json(serde_json::json!({
        "exercise": exercise,
        "schedule": schedule,
    })))
}

/// Full admin view of one exercise: the row itself, its usage in logged
/// workouts and its change history.
pub async fn exercise_details(
    State(state): State<AppState>,
    Admin(_): Admin,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let exercise = state.service.get_exercise(id.into()).await?;
    let usage = state.service.get_exercise_usage(id.into()).await?;
    let change_log = state.service.get_change_log(id.into()).await?;
    Ok(Json(serde_json::json!({
        "exercise": exercise,
        "usage": usage,
        "change_log": change_log,
    })))
}

pub async fn update_exercise(
    State(state): State<AppState>,
    Admin(identity): Admin,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExerciseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let update = ExerciseUpdate {
        name: request.name.as_deref().map(parse_name).transpose()?,
        description: request.description,
        muscle_group: request.muscle_group,
        equipment: request.equipment,
        video_url: request.video_url,
        links: request.links,
    };
    let exercise = state
        .service
        .update_exercise(id.into(), update, identity.user_id)
        .await?;
    Ok(Json(serde_json::json!({ "exercise": exercise })))
}

/// Deletes an exercise: soft when it is referenced by logged workouts, hard
/// otherwise. The outcome is reported to the caller.
pub async fn delete_exercise(
    State(state): State<AppState>,
    Admin(identity): Admin,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deletion = state
        .service
        .delete_exercise(id.into(), identity.user_id)
        .await?;
    Ok(Json(serde_json::json!({ "deletion": deletion })))
}

pub async fn restore_exercise(
    State(state): State<AppState>,
    Admin(identity): Admin,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let exercise = state
        .service
        .restore_exercise(id.into(), identity.user_id)
        .await?;
    Ok(Json(serde_json::json!({ "exercise": exercise })))
}

/// Raw weekly schedule as stored, including assignments whose exercise has
/// been soft-deleted.
pub async fn list_schedule(
    State(state): State<AppState>,
    Admin(_): Admin,
) -> Result<Json<serde_json::Value>, ApiError> {
    let schedules = state.service.get_schedules().await?;
    Ok(Json(serde_json::json!({ "schedules": schedules })))
}

pub async fn initialize_schedule(
    State(state): State<AppState>,
    Admin(_): Admin,
) -> Result<Json<serde_json::Value>, ApiError> {
    let schedules = state.service.initialize_schedules().await?;
    Ok(Json(serde_json::json!({ "schedules": schedules })))
}

pub async fn add_schedule_exercise(
    State(state): State<AppState>,
    Admin(_): Admin,
    Json(request): Json<AddScheduleExerciseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let day = parse_day(request.day_of_week)?;
    let schedule = state
        .service
        .add_exercise_to_day(day, request.exercise_id.into())
        .await?;
    Ok(Json(serde_json::json!({ "schedule": schedule })))
}

pub async fn remove_schedule_exercise(
    State(state): State<AppState>,
    Admin(_): Admin,
    Path(id): Path<Uuid>,
    Query(query): Query<RemoveScheduleExerciseQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let schedule = state
        .service
        .remove_exercise_from_day(id.into(), query.exercise_id.into())
        .await?;
    Ok(Json(serde_json::json!({ "schedule": schedule })))
}

pub async fn rename_schedule(
    State(state): State<AppState>,
    Admin(_): Admin,
    Path(id): Path<Uuid>,
    Json(request): Json<RenameScheduleRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let schedule = state
        .service
        .rename_day(id.into(), parse_name(&request.name)?)
        .await?;
    Ok(Json(serde_json::json!({ "schedule": schedule })))
}

pub async fn reorder_schedule(
    State(state): State<AppState>,
    Admin(_): Admin,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let day = parse_day(request.day_of_week)?;
    let schedule = state
        .service
        .reorder_day(
            day,
            request.exercise_ids.into_iter().map(Into::into).collect(),
        )
        .await?;
    Ok(Json(serde_json::json!({ "schedule": schedule })))
}

pub async fn update_day_type(
    State(state): State<AppState>,
    Admin(_): Admin,
    Json(request): Json<UpdateDayTypeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let day = parse_day(request.day_of_week)?;
    let schedule = state
        .service
        .rename_day_of_week(day, parse_name(&request.name)?)
        .await?;
    Ok(Json(serde_json::json!({ "schedule": schedule })))
}
