use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Equipment, Exercise, ExerciseID, MuscleGroup, Name, UserID};

pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Immutable copy of an exercise's metadata taken at logging time.
///
/// The snapshot is embedded into each workout exercise so that later edits or
/// deletions of the catalog entry cannot change what a past workout displays
/// or how it is aggregated. It is written once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSnapshot {
    pub schema_version: u32,
    pub exercise_id: ExerciseID,
    pub name: Name,
    pub description: Option<String>,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub video_url: Option<String>,
    pub owner: Option<UserID>,
    pub captured_at: DateTime<Utc>,
}

impl ExerciseSnapshot {
    #[must_use]
    pub fn of(exercise: &Exercise, captured_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            exercise_id: exercise.id,
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            muscle_group: exercise.muscle_group,
            equipment: exercise.equipment,
            video_url: exercise.video_url.clone(),
            owner: exercise.owner,
            captured_at,
        }
    }

    /// Reconstructs an exercise-shaped value purely from the snapshot,
    /// without touching the live catalog.
    #[must_use]
    pub fn to_exercise(&self) -> Exercise {
        Exercise {
            id: self.exercise_id,
            name: self.name.clone(),
            description: self.description.clone(),
            muscle_group: self.muscle_group,
            equipment: self.equipment,
            video_url: self.video_url.clone(),
            owner: self.owner,
            links: vec![],
            deleted: None,
            created_at: self.captured_at,
            updated_at: self.captured_at,
        }
    }
}

/// Structural guard for snapshot blobs read back from storage. The embedded
/// JSON may predate the current schema, so required fields and types are
/// checked before the value is trusted.
#[must_use]
pub fn is_valid_snapshot(value: &serde_json::Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    object
        .get("schema_version")
        .and_then(serde_json::Value::as_u64)
        .is_some_and(|v| v >= 1)
        && object
            .get("exercise_id")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| uuid::Uuid::parse_str(s).is_ok())
        && object
            .get("name")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
        && object
            .get("muscle_group")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| s.parse::<MuscleGroup>().is_ok())
        && object
            .get("equipment")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| s.parse::<Equipment>().is_ok())
        && object
            .get("captured_at")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok())
}
