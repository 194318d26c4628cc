use axum::{
    Json,
    extract::{Query, State},
};
use liftlog_domain::{
    Equipment, Exercise, ExerciseDraft, ExerciseFilter, ExerciseService, MuscleGroup,
};
use serde::Deserialize;

use crate::{AppState, auth::Identity, error::ApiError, handlers::parse_name};

#[derive(Deserialize)]
pub struct CreateExerciseRequest {
    pub name: String,
    pub description: Option<String>,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub video_url: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
}

pub async fn list(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let exercises = state.service.get_exercises(identity.user_id).await?;
    Ok(Json(serde_json::json!({ "exercises": exercises })))
}

pub async fn global(
    State(state): State<AppState>,
    _identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let exercises = state.service.get_global_exercises().await?;
    Ok(Json(serde_json::json!({ "exercises": exercises })))
}

pub async fn my(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<serde_json::Value>, ApiError> {
    let exercises = state.service.get_user_exercises(identity.user_id).await?;
    Ok(Json(serde_json::json!({ "exercises": exercises })))
}

/// Creates a custom exercise owned by the calling user.
pub async fn create(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateExerciseRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let draft = ExerciseDraft {
        name: parse_name(&request.name)?,
        description: request.description,
        muscle_group: request.muscle_group,
        equipment: request.equipment,
        video_url: request.video_url,
        links: request.links,
        owner: Some(identity.user_id),
    };
    let exercise = state.service.create_exercise(draft, identity.user_id).await?;
    Ok(Json(serde_json::json!({ "exercise": exercise })))
}

pub async fn search(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = ExerciseFilter {
        query: query.q.trim().to_lowercase(),
        muscle_group: query.muscle_group,
        equipment: query.equipment,
    };
    let key = format!(
        "{}:{}:{}:{}",
        *identity.user_id,
        filter.query,
        filter.muscle_group.map(|m| m.to_string()).unwrap_or_default(),
        filter.equipment.map(|e| e.to_string()).unwrap_or_default(),
    );

    if let Ok(cache) = state.search_cache.lock() {
        if let Some(exercises) = cache.get(&key) {
            return Ok(Json(results(&exercises)));
        }
    }

    let exercises = state.service.search_exercises(identity.user_id, &filter).await?;
    if let Ok(mut cache) = state.search_cache.lock() {
        cache.insert(key, exercises.clone());
    }
    Ok(Json(results(&exercises)))
}

fn results(exercises: &[Exercise]) -> serde_json::Value {
    serde_json::json!({ "exercises": exercises })
}
