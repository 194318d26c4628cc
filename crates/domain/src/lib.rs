#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod analytics;
pub mod changelog;
pub mod error;
pub mod exercise;
pub mod leaderboard;
pub mod name;
pub mod schedule;
pub mod service;
pub mod snapshot;
pub mod user;
pub mod workout;

pub use analytics::{
    AnalyticsFilter, AnalyticsReport, AnalyticsService, ExerciseProgress, FrequencyBucket,
    HeatmapDay, MuscleGroupShare, PersonalRecord, ProgressPoint, Streak, Summary, VolumePoint,
    apply_filter, brzycki_one_rm, frequency_trend, muscle_group_distribution, personal_records,
    streak, summary, volume_trend, weight_progress,
};
pub use changelog::{ChangeType, ExerciseChangeLog};
pub use error::{
    CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError,
};
pub use exercise::{
    Deletion, Equipment, Exercise, ExerciseDeletion, ExerciseDraft, ExerciseFilter, ExerciseID,
    ExerciseRepository, ExerciseService, ExerciseUpdate, ExerciseUsage, MuscleGroup,
};
pub use leaderboard::{
    ExerciseOverview, LeaderboardEntry, LeaderboardService, epley_one_rm, exercise_leaderboard,
    top_exercises,
};
pub use name::{Name, NameError};
pub use schedule::{
    DayOfWeek, DayOfWeekError, DayPlan, ScheduleExercise, ScheduleID, ScheduleRepository,
    ScheduleService, ScheduleStatus, WeeklySchedule, renumber,
};
pub use service::Service;
pub use snapshot::{ExerciseSnapshot, SNAPSHOT_SCHEMA_VERSION, is_valid_snapshot};
pub use user::{Role, User, UserID, UserRepository};
pub use workout::{
    ExerciseSet, Reps, RepsError, SetEntry, WeightError, WeightKg, WorkoutEdit, WorkoutEntry,
    WorkoutExercise, WorkoutExerciseID, WorkoutLog, WorkoutLogID, WorkoutRepository,
    WorkoutService, completed_sets,
};
