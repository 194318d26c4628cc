use chrono::{DateTime, NaiveDate, Utc};
use derive_more::{Deref, Display, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    CreateError, DayOfWeek, DeleteError, ExerciseID, ExerciseSnapshot, ReadError, UpdateError,
    UserID, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository: Send + Sync + 'static {
    /// Inserts the log together with its exercises and sets in one
    /// transaction.
    async fn create_workout_log(&self, log: WorkoutLog) -> Result<WorkoutLog, CreateError>;
    /// All logs of a user, newest first, exercises by order, sets by number.
    async fn read_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError>;
    async fn read_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError>;
    async fn read_workout_exercise(
        &self,
        id: WorkoutExerciseID,
    ) -> Result<(WorkoutLogID, UserID, WorkoutExercise), ReadError>;
    async fn replace_sets(
        &self,
        id: WorkoutExerciseID,
        sets: Vec<ExerciseSet>,
    ) -> Result<(), UpdateError>;
    /// Inserts the exercise, or replaces the sets of the existing row with
    /// the same original exercise, so re-applying an edit converges.
    async fn upsert_workout_exercise(
        &self,
        log_id: WorkoutLogID,
        exercise: WorkoutExercise,
    ) -> Result<(), UpdateError>;
    async fn remove_workout_exercise(&self, id: WorkoutExerciseID) -> Result<(), DeleteError>;
    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError>;
    /// Every logged workout exercise of every user, for leaderboards.
    async fn read_all_workout_exercises(
        &self,
    ) -> Result<Vec<(UserID, WorkoutExercise)>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService: Send + Sync + 'static {
    async fn save_workout(
        &self,
        user_id: UserID,
        date: NaiveDate,
        day: DayOfWeek,
        entries: Vec<WorkoutEntry>,
    ) -> Result<WorkoutLog, CreateError>;
    async fn edit_workout(&self, user_id: UserID, edit: WorkoutEdit) -> Result<(), UpdateError>;
    /// All logs of a user with every exercise resolved through its snapshot.
    async fn workout_history(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutLog {
    pub id: WorkoutLogID,
    pub user_id: UserID,
    pub date: NaiveDate,
    pub day: DayOfWeek,
    pub exercises: Vec<WorkoutExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseID,
    pub order: u32,
    pub is_custom: bool,
    pub is_replaced: bool,
    pub replaced_at: Option<DateTime<Utc>>,
    pub original_exercise_id: ExerciseID,
    pub replacement_exercise_id: Option<ExerciseID>,
    /// `None` only for rows that predate the snapshot pattern.
    pub snapshot: Option<ExerciseSnapshot>,
    pub sets: Vec<ExerciseSet>,
}

impl WorkoutExercise {
    /// The exercise shown for this entry: the replacement if one was logged,
    /// the originally scheduled exercise otherwise.
    #[must_use]
    pub fn active_exercise_id(&self) -> ExerciseID {
        self.replacement_exercise_id
            .filter(|_| self.is_replaced)
            .unwrap_or(self.original_exercise_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExerciseSet {
    pub number: u32,
    pub reps: Reps,
    pub weight: WeightKg,
}

#[derive(
    Deref,
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct WorkoutLogID(Uuid);

impl WorkoutLogID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutLogID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutLogID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(
    Deref,
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct WorkoutExerciseID(Uuid);

impl WorkoutExerciseID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(
    Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Serialize,
)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd, Serialize)]
pub struct WeightKg(f32);

impl WeightKg {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
}

/// One raw set as submitted by the client, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetEntry {
    pub reps: u32,
    pub weight_kg: f32,
}

/// One exercise of a workout being saved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorkoutEntry {
    pub exercise_id: ExerciseID,
    #[serde(default)]
    pub is_replaced: bool,
    /// The originally scheduled exercise when this entry is a replacement.
    #[serde(default)]
    pub original_exercise_id: Option<ExerciseID>,
    pub sets: Vec<SetEntry>,
}

/// Keeps the sets that count as completed (`reps > 0` and `weight >= 0`),
/// numbered densely from 1. An empty result means the exercise is dropped
/// from the save.
pub fn completed_sets(entries: &[SetEntry]) -> Result<Vec<ExerciseSet>, ValidationError> {
    let mut sets = Vec::new();
    for entry in entries {
        if entry.reps > 0 && entry.weight_kg >= 0.0 {
            sets.push(ExerciseSet {
                number: u32::try_from(sets.len()).unwrap_or(u32::MAX) + 1,
                reps: Reps::new(entry.reps)?,
                weight: WeightKg::new(entry.weight_kg)?,
            });
        }
    }
    Ok(sets)
}

/// One edit of an already-saved workout. Each variant carries exactly the
/// payload its action needs and is matched exhaustively by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WorkoutEdit {
    EditSets {
        workout_exercise_id: WorkoutExerciseID,
        sets: Vec<SetEntry>,
    },
    AddExercise {
        workout_log_id: WorkoutLogID,
        exercise_id: ExerciseID,
        sets: Vec<SetEntry>,
    },
    RemoveExercise {
        workout_exercise_id: WorkoutExerciseID,
    },
    DeleteWorkout {
        workout_log_id: WorkoutLogID,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] value: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(value), expected);
    }

    #[rstest]
    #[case(0.0, Ok(WeightKg(0.0)))]
    #[case(102.5, Ok(WeightKg(102.5)))]
    #[case(-1.0, Err(WeightError::OutOfRange))]
    #[case(1000.0, Err(WeightError::OutOfRange))]
    #[case(80.05, Err(WeightError::InvalidResolution))]
    fn test_weight_new(#[case] value: f32, #[case] expected: Result<WeightKg, WeightError>) {
        assert_eq!(WeightKg::new(value), expected);
    }

    #[rstest]
    #[case::all_empty(&[], &[])]
    #[case::zero_reps_dropped(
        &[SetEntry { reps: 0, weight_kg: 50.0 }],
        &[]
    )]
    #[case::bodyweight_kept(
        &[SetEntry { reps: 10, weight_kg: 0.0 }],
        &[(1, 10, 0.0)]
    )]
    #[case::negative_weight_dropped(
        &[SetEntry { reps: 10, weight_kg: -5.0 }],
        &[]
    )]
    #[case::dense_numbering_after_drop(
        &[
            SetEntry { reps: 10, weight_kg: 50.0 },
            SetEntry { reps: 0, weight_kg: 60.0 },
            SetEntry { reps: 8, weight_kg: 60.0 },
        ],
        &[(1, 10, 50.0), (2, 8, 60.0)]
    )]
    fn test_completed_sets(#[case] entries: &[SetEntry], #[case] expected: &[(u32, u32, f32)]) {
        assert_eq!(
            completed_sets(entries).unwrap(),
            expected
                .iter()
                .map(|(number, reps, weight)| ExerciseSet {
                    number: *number,
                    reps: Reps::new(*reps).unwrap(),
                    weight: WeightKg::new(*weight).unwrap(),
                })
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_completed_sets_rejects_out_of_range_reps() {
        assert!(completed_sets(&[SetEntry {
            reps: 1000,
            weight_kg: 50.0,
        }])
        .is_err());
    }

    #[rstest]
    #[case(false, None, 1.into())]
    #[case(true, Some(ExerciseID::from(2)), 2.into())]
    #[case(false, Some(ExerciseID::from(2)), 1.into())]
    fn test_active_exercise_id(
        #[case] is_replaced: bool,
        #[case] replacement: Option<ExerciseID>,
        #[case] expected: ExerciseID,
    ) {
        let exercise = WorkoutExercise {
            id: WorkoutExerciseID::new(),
            order: 1,
            is_custom: false,
            is_replaced,
            replaced_at: None,
            original_exercise_id: 1.into(),
            replacement_exercise_id: replacement,
            snapshot: None,
            sets: vec![],
        };
        assert_eq!(exercise.active_exercise_id(), expected);
    }

    #[test]
    fn test_workout_edit_action_tags() {
        let edit: WorkoutEdit = serde_json::from_value(serde_json::json!({
            "action": "edit_sets",
            "workout_exercise_id": "00000000-0000-0000-0000-000000000001",
            "sets": [{"reps": 10, "weight_kg": 50.0}],
        }))
        .unwrap();
        assert_eq!(
            edit,
            WorkoutEdit::EditSets {
                workout_exercise_id: 1.into(),
                sets: vec![SetEntry {
                    reps: 10,
                    weight_kg: 50.0
                }],
            }
        );

        let edit: WorkoutEdit = serde_json::from_value(serde_json::json!({
            "action": "delete_workout",
            "workout_log_id": "00000000-0000-0000-0000-000000000002",
        }))
        .unwrap();
        assert_eq!(
            edit,
            WorkoutEdit::DeleteWorkout {
                workout_log_id: 2.into(),
            }
        );
    }
}
