use chrono::{DateTime, Utc};
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseChangeLog, Name, ReadError, UpdateError, UserID,
};

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository: Send + Sync + 'static {
    /// All non-deleted exercises visible to the given user (global + own custom).
    async fn read_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError>;
    async fn read_global_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_user_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError>;
    /// A single exercise, including soft-deleted ones.
    async fn read_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError>;
    async fn create_exercise(&self, exercise: Exercise, actor: UserID)
    -> Result<Exercise, CreateError>;
    async fn update_exercise(&self, exercise: Exercise, actor: UserID)
    -> Result<Exercise, UpdateError>;
    async fn soft_delete_exercise(&self, id: ExerciseID, actor: UserID)
    -> Result<Exercise, DeleteError>;
    async fn hard_delete_exercise(&self, id: ExerciseID, actor: UserID)
    -> Result<ExerciseID, DeleteError>;
    async fn restore_exercise(&self, id: ExerciseID, actor: UserID)
    -> Result<Exercise, UpdateError>;
    async fn exercise_usage(&self, id: ExerciseID) -> Result<ExerciseUsage, ReadError>;
    async fn read_change_log(&self, id: ExerciseID) -> Result<Vec<ExerciseChangeLog>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseService: Send + Sync + 'static {
    async fn get_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError>;
    async fn get_global_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn get_user_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError>;
    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError>;
    async fn search_exercises(
        &self,
        user_id: UserID,
        filter: &ExerciseFilter,
    ) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(
        &self,
        draft: ExerciseDraft,
        actor: UserID,
    ) -> Result<Exercise, CreateError>;
    async fn update_exercise(
        &self,
        id: ExerciseID,
        update: ExerciseUpdate,
        actor: UserID,
    ) -> Result<Exercise, UpdateError>;
    /// Soft-deletes the exercise if any workout references it, hard-deletes it
    /// otherwise.
    async fn delete_exercise(
        &self,
        id: ExerciseID,
        actor: UserID,
    ) -> Result<ExerciseDeletion, DeleteError>;
    async fn restore_exercise(&self, id: ExerciseID, actor: UserID)
    -> Result<Exercise, UpdateError>;
    async fn get_exercise_usage(&self, id: ExerciseID) -> Result<ExerciseUsage, ReadError>;
    async fn get_change_log(&self, id: ExerciseID) -> Result<Vec<ExerciseChangeLog>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub description: Option<String>,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub video_url: Option<String>,
    /// `None` marks a global exercise visible to all users.
    pub owner: Option<UserID>,
    pub links: Vec<String>,
    pub deleted: Option<Deletion>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        self.owner.is_none()
    }

    pub fn apply(&mut self, update: ExerciseUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(muscle_group) = update.muscle_group {
            self.muscle_group = muscle_group;
        }
        if let Some(equipment) = update.equipment {
            self.equipment = equipment;
        }
        if let Some(video_url) = update.video_url {
            self.video_url = Some(video_url);
        }
        if let Some(links) = update.links {
            self.links = links;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deletion {
    pub at: DateTime<Utc>,
    pub by: UserID,
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
pub struct ExerciseID(Uuid);

impl ExerciseID {
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

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Forearms,
    Core,
    Glutes,
    Quads,
    Hamstrings,
    Calves,
    FullBody,
}

impl MuscleGroup {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Core => "Core",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Calves => "Calves",
            MuscleGroup::FullBody => "Full Body",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Equipment {
    None,
    Barbell,
    Dumbbell,
    Cable,
    Machine,
    Kettlebell,
    PullUpBar,
    ResistanceBand,
    Other,
}

impl Equipment {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Equipment::None => "No Equipment",
            Equipment::Barbell => "Barbell",
            Equipment::Dumbbell => "Dumbbell",
            Equipment::Cable => "Cable",
            Equipment::Machine => "Machine",
            Equipment::Kettlebell => "Kettlebell",
            Equipment::PullUpBar => "Pull Up Bar",
            Equipment::ResistanceBand => "Resistance Band",
            Equipment::Other => "Other",
        }
    }
}

/// Input for creating a catalog entry. The name is validated before the draft
/// is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDraft {
    pub name: Name,
    pub description: Option<String>,
    pub muscle_group: MuscleGroup,
    pub equipment: Equipment,
    pub video_url: Option<String>,
    pub links: Vec<String>,
    pub owner: Option<UserID>,
}

impl ExerciseDraft {
    #[must_use]
    pub fn into_exercise(self, now: DateTime<Utc>) -> Exercise {
        Exercise {
            id: ExerciseID::new(),
            name: self.name,
            description: self.description,
            muscle_group: self.muscle_group,
            equipment: self.equipment,
            video_url: self.video_url,
            owner: self.owner,
            links: self.links,
            deleted: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a catalog entry. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseUpdate {
    pub name: Option<Name>,
    pub description: Option<String>,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
    pub video_url: Option<String>,
    pub links: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseFilter {
    pub query: String,
    pub muscle_group: Option<MuscleGroup>,
    pub equipment: Option<Equipment>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        exercise
            .name
            .as_ref()
            .to_lowercase()
            .contains(self.query.to_lowercase().trim())
            && self
                .muscle_group
                .is_none_or(|m| exercise.muscle_group == m)
            && self.equipment.is_none_or(|e| exercise.equipment == e)
    }

    #[must_use]
    pub fn exercises(&self, exercises: impl IntoIterator<Item = Exercise>) -> Vec<Exercise> {
        exercises
            .into_iter()
            .filter(|e| self.matches(e))
            .collect()
    }
}

/// How often an exercise is referenced by logged workouts, split by role.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExerciseUsage {
    pub as_original: u64,
    pub as_replacement: u64,
}

impl ExerciseUsage {
    #[must_use]
    pub fn total(&self) -> u64 {
        self.as_original + self.as_replacement
    }

    #[must_use]
    pub fn is_used(&self) -> bool {
        self.total() > 0
    }
}

/// Outcome of a delete request. Referenced exercises are retained as soft
/// deletions so historical workout rows keep a valid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExerciseDeletion {
    Hard,
    Soft { usage: ExerciseUsage },
}
