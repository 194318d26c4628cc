use axum::{
    Json,
    extract::{Query, State},
};
use liftlog_domain::LeaderboardService;
use serde::Deserialize;

use crate::{AppState, auth::Identity, error::ApiError};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    /// Exact snapshot name of the exercise to rank. Without it, the
    /// top-exercises overview is returned.
    pub exercise: Option<String>,
    pub limit: Option<usize>,
}

pub async fn exercise_weights(
    State(state): State<AppState>,
    _identity: Identity,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    match query.exercise {
        Some(exercise) => {
            let entries = state.service.exercise_leaderboard(&exercise, limit).await?;
            Ok(Json(serde_json::json!({
                "exercise": exercise,
                "leaderboard": entries,
            })))
        }
        None => {
            let overview = state.service.top_exercises(limit).await?;
            Ok(Json(serde_json::json!({ "top_exercises": overview })))
        }
    }
}
