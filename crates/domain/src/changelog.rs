use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{ExerciseID, UserID};

/// Append-only audit row recording one catalog mutation. The old/new blobs
/// hold a full copy of the mutable fields; the inapplicable side is `None`
/// (no old data on create, no new data on hard delete).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseChangeLog {
    pub exercise_id: ExerciseID,
    pub actor: UserID,
    pub change: ChangeType,
    pub old_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub changed_at: DateTime<Utc>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ChangeType {
    Create,
    Update,
    Delete,
    Restore,
}
