use std::collections::BTreeSet;

use chrono::{Local, Utc};
use log::{debug, error, info, warn};

use crate::{
    AnalyticsFilter, AnalyticsReport, AnalyticsService, CreateError, DayOfWeek, DayPlan,
    DeleteError, Exercise, ExerciseChangeLog, ExerciseDeletion, ExerciseDraft, ExerciseFilter,
    ExerciseID, ExerciseRepository, ExerciseService, ExerciseSnapshot, ExerciseUpdate,
    ExerciseUsage, LeaderboardService, Name, ReadError, ScheduleExercise, ScheduleID,
    ScheduleRepository, ScheduleService, ScheduleStatus, Streak, UpdateError, UserID,
    UserRepository, ValidationError, WeeklySchedule, WorkoutEdit, WorkoutEntry, WorkoutExercise,
    WorkoutExerciseID, WorkoutLog, WorkoutLogID, WorkoutRepository, WorkoutService, analytics,
    completed_sets, leaderboard, renumber,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        if let Err(ref err) = result {
            if err.is_unexpected() {
                error!("failed to {} {}: {err}", $action, $entity);
            } else {
                debug!("failed to {} {}: {err}", $action, $entity);
            }
        }
        result
    }};
}

impl<R: ExerciseRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(self.repository.read_exercises(user_id), "get", "exercises")
    }

    async fn get_global_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_global_exercises(),
            "get",
            "global exercises"
        )
    }

    async fn get_user_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_user_exercises(user_id),
            "get",
            "custom exercises"
        )
    }

    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError> {
        log_on_error!(self.repository.read_exercise(id), "get", "exercise")
    }

    async fn search_exercises(
        &self,
        user_id: UserID,
        filter: &ExerciseFilter,
    ) -> Result<Vec<Exercise>, ReadError> {
        let exercises = self.get_exercises(user_id).await?;
        Ok(filter.exercises(exercises))
    }

    async fn create_exercise(
        &self,
        draft: ExerciseDraft,
        actor: UserID,
    ) -> Result<Exercise, CreateError> {
        let exercise = draft.into_exercise(Utc::now());
        log_on_error!(
            self.repository.create_exercise(exercise, actor),
            "create",
            "exercise"
        )
    }

    async fn update_exercise(
        &self,
        id: ExerciseID,
        update: ExerciseUpdate,
        actor: UserID,
    ) -> Result<Exercise, UpdateError> {
        let mut exercise = self.repository.read_exercise(id).await.map_err(UpdateError::from)?;
        if exercise.is_deleted() {
            return Err(UpdateError::Conflict(
                "exercise is deleted and must be restored first".to_string(),
            ));
        }
        exercise.apply(update, Utc::now());
        log_on_error!(
            self.repository.update_exercise(exercise, actor),
            "update",
            "exercise"
        )
    }

    async fn delete_exercise(
        &self,
        id: ExerciseID,
        actor: UserID,
    ) -> Result<ExerciseDeletion, DeleteError> {
        let usage = self
            .repository
            .exercise_usage(id)
            .await
            .map_err(DeleteError::from)?;
        if usage.is_used() {
            log_on_error!(
                self.repository.soft_delete_exercise(id, actor),
                "soft delete",
                "exercise"
            )?;
            Ok(ExerciseDeletion::Soft { usage })
        } else {
            log_on_error!(
                self.repository.hard_delete_exercise(id, actor),
                "hard delete",
                "exercise"
            )?;
            Ok(ExerciseDeletion::Hard)
        }
    }

    async fn restore_exercise(
        &self,
        id: ExerciseID,
        actor: UserID,
    ) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.restore_exercise(id, actor),
            "restore",
            "exercise"
        )
    }

    async fn get_exercise_usage(&self, id: ExerciseID) -> Result<ExerciseUsage, ReadError> {
        log_on_error!(self.repository.exercise_usage(id), "get", "exercise usage")
    }

    async fn get_change_log(&self, id: ExerciseID) -> Result<Vec<ExerciseChangeLog>, ReadError> {
        log_on_error!(
            self.repository.read_change_log(id),
            "get",
            "exercise change log"
        )
    }
}

impl<R: ScheduleRepository + ExerciseRepository> ScheduleService for Service<R> {
    async fn get_schedules(&self) -> Result<Vec<WeeklySchedule>, ReadError> {
        log_on_error!(self.repository.read_schedules(), "get", "schedules")
    }

    async fn initialize_schedules(&self) -> Result<Vec<WeeklySchedule>, CreateError> {
        log_on_error!(
            self.repository.initialize_schedules(),
            "initialize",
            "schedules"
        )
    }

    async fn rename_day(&self, id: ScheduleID, name: Name) -> Result<WeeklySchedule, UpdateError> {
        log_on_error!(
            self.repository.rename_schedule(id, name),
            "rename",
            "schedule"
        )
    }

    async fn rename_day_of_week(
        &self,
        day: DayOfWeek,
        name: Name,
    ) -> Result<WeeklySchedule, UpdateError> {
        let schedule = self
            .repository
            .read_schedule(day)
            .await
            .map_err(UpdateError::from)?;
        self.rename_day(schedule.id, name).await
    }

    async fn add_exercise_to_day(
        &self,
        day: DayOfWeek,
        exercise_id: ExerciseID,
    ) -> Result<WeeklySchedule, UpdateError> {
        let exercise = self
            .repository
            .read_exercise(exercise_id)
            .await
            .map_err(UpdateError::from)?;
        if exercise.is_deleted() {
            return Err(UpdateError::Conflict(
                "a deleted exercise cannot be scheduled".to_string(),
            ));
        }
        let schedule = self
            .repository
            .read_schedule(day)
            .await
            .map_err(UpdateError::from)?;
        if schedule.exercises.iter().any(|e| e.exercise_id == exercise_id) {
            return Err(UpdateError::Conflict(
                "exercise is already scheduled for this day".to_string(),
            ));
        }
        let mut entries = schedule.exercises;
        #[allow(clippy::cast_possible_truncation)]
        entries.push(ScheduleExercise {
            exercise_id,
            order: entries.len() as u32 + 1,
        });
        log_on_error!(
            self.repository.replace_schedule_exercises(schedule.id, entries),
            "update",
            "schedule"
        )
    }

    async fn remove_exercise_from_day(
        &self,
        id: ScheduleID,
        exercise_id: ExerciseID,
    ) -> Result<WeeklySchedule, UpdateError> {
        let schedule = self
            .repository
            .read_schedule_by_id(id)
            .await
            .map_err(UpdateError::from)?;
        if !schedule.exercises.iter().any(|e| e.exercise_id == exercise_id) {
            return Err(UpdateError::NotFound);
        }
        let entries = renumber(
            schedule
                .exercises
                .into_iter()
                .filter(|e| e.exercise_id != exercise_id)
                .collect(),
        );
        log_on_error!(
            self.repository.replace_schedule_exercises(id, entries),
            "update",
            "schedule"
        )
    }

    async fn reorder_day(
        &self,
        day: DayOfWeek,
        exercise_ids: Vec<ExerciseID>,
    ) -> Result<WeeklySchedule, UpdateError> {
        let schedule = self
            .repository
            .read_schedule(day)
            .await
            .map_err(UpdateError::from)?;
        let current = schedule
            .exercises
            .iter()
            .map(|e| e.exercise_id)
            .collect::<BTreeSet<_>>();
        let requested = exercise_ids.iter().copied().collect::<BTreeSet<_>>();
        if current != requested || requested.len() != exercise_ids.len() {
            return Err(UpdateError::Validation(ValidationError::Invalid {
                field: "exercise_ids",
                message: "must be a permutation of the day's scheduled exercises".to_string(),
            }));
        }
        #[allow(clippy::cast_possible_truncation)]
        let entries = exercise_ids
            .iter()
            .enumerate()
            .map(|(i, exercise_id)| ScheduleExercise {
                exercise_id: *exercise_id,
                order: i as u32 + 1,
            })
            .collect();
        log_on_error!(
            self.repository.replace_schedule_exercises(schedule.id, entries),
            "reorder",
            "schedule"
        )
    }

    async fn day_plan(&self, day: DayOfWeek) -> Result<DayPlan, ReadError> {
        let schedule = self.repository.read_schedule(day).await?;
        let mut exercises = Vec::with_capacity(schedule.exercises.len());
        for entry in &schedule.exercises {
            match self.repository.read_exercise(entry.exercise_id).await {
                Ok(exercise) if !exercise.is_deleted() => exercises.push(exercise),
                Ok(_) => {}
                Err(ReadError::NotFound) => {
                    warn!(
                        "scheduled exercise {} no longer exists, skipping",
                        *entry.exercise_id
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Ok(DayPlan {
            schedule_id: schedule.id,
            day: schedule.day,
            name: schedule.name,
            exercises,
        })
    }

    async fn weekly_plan(&self) -> Result<Vec<DayPlan>, ReadError> {
        let mut plans = Vec::with_capacity(7);
        for day in DayOfWeek::iter() {
            match self.day_plan(*day).await {
                Ok(plan) => plans.push(plan),
                Err(ReadError::NotFound) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(plans)
    }

    async fn schedule_status(&self) -> Result<ScheduleStatus, ReadError> {
        let schedules = self.repository.read_schedules().await?;
        #[allow(clippy::cast_possible_truncation)]
        Ok(ScheduleStatus {
            initialized: schedules.len() == 7,
            days: schedules.len() as u32,
        })
    }

    async fn swap_days(&self, day_a: DayOfWeek, day_b: DayOfWeek) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository.swap_schedule_days(day_a, day_b),
            "swap",
            "schedule days"
        )
    }
}

impl<R: WorkoutRepository + ExerciseRepository> WorkoutService for Service<R> {
    async fn save_workout(
        &self,
        user_id: UserID,
        date: chrono::NaiveDate,
        day: DayOfWeek,
        entries: Vec<WorkoutEntry>,
    ) -> Result<WorkoutLog, CreateError> {
        let mut exercises: Vec<WorkoutExercise> = Vec::new();
        for entry in entries {
            let sets = completed_sets(&entry.sets)?;
            if sets.is_empty() {
                continue;
            }
            let exercise = self
                .repository
                .read_exercise(entry.exercise_id)
                .await
                .map_err(CreateError::from)?;
            if exercise.is_deleted() {
                return Err(CreateError::Conflict(format!(
                    "exercise {} is deleted",
                    exercise.name
                )));
            }
            let now = Utc::now();
            let (is_replaced, original_exercise_id, replacement_exercise_id) =
                if entry.is_replaced {
                    (
                        true,
                        entry.original_exercise_id.unwrap_or(exercise.id),
                        Some(exercise.id),
                    )
                } else {
                    (false, exercise.id, None)
                };
            #[allow(clippy::cast_possible_truncation)]
            exercises.push(WorkoutExercise {
                id: WorkoutExerciseID::new(),
                order: exercises.len() as u32 + 1,
                is_custom: !exercise.is_global(),
                is_replaced,
                replaced_at: is_replaced.then_some(now),
                original_exercise_id,
                replacement_exercise_id,
                snapshot: Some(ExerciseSnapshot::of(&exercise, now)),
                sets,
            });
        }
        let log = WorkoutLog {
            id: WorkoutLogID::new(),
            user_id,
            date,
            day,
            exercises,
        };
        log_on_error!(
            self.repository.create_workout_log(log),
            "create",
            "workout log"
        )
    }

    async fn edit_workout(&self, user_id: UserID, edit: WorkoutEdit) -> Result<(), UpdateError> {
        match edit {
            WorkoutEdit::EditSets {
                workout_exercise_id,
                sets,
            } => {
                let (_, owner, _) = self
                    .repository
                    .read_workout_exercise(workout_exercise_id)
                    .await
                    .map_err(UpdateError::from)?;
                if owner != user_id {
                    return Err(UpdateError::Forbidden);
                }
                let sets = completed_sets(&sets)?;
                self.repository
                    .replace_sets(workout_exercise_id, sets)
                    .await?;
                info!(
                    "workout edit: user {} replaced sets of workout exercise {}",
                    *user_id, *workout_exercise_id
                );
            }
            WorkoutEdit::AddExercise {
                workout_log_id,
                exercise_id,
                sets,
            } => {
                let log = self
                    .repository
                    .read_workout_log(workout_log_id)
                    .await
                    .map_err(UpdateError::from)?;
                if log.user_id != user_id {
                    return Err(UpdateError::Forbidden);
                }
                let sets = completed_sets(&sets)?;
                if sets.is_empty() {
                    return Err(UpdateError::Validation(ValidationError::Invalid {
                        field: "sets",
                        message: "at least one completed set is required".to_string(),
                    }));
                }
                let exercise = self
                    .repository
                    .read_exercise(exercise_id)
                    .await
                    .map_err(UpdateError::from)?;
                if exercise.is_deleted() {
                    return Err(UpdateError::Conflict(format!(
                        "exercise {} is deleted",
                        exercise.name
                    )));
                }
                let now = Utc::now();
                #[allow(clippy::cast_possible_truncation)]
                let workout_exercise = WorkoutExercise {
                    id: WorkoutExerciseID::new(),
                    order: log.exercises.len() as u32 + 1,
                    is_custom: !exercise.is_global(),
                    is_replaced: false,
                    replaced_at: None,
                    original_exercise_id: exercise.id,
                    replacement_exercise_id: None,
                    snapshot: Some(ExerciseSnapshot::of(&exercise, now)),
                    sets,
                };
                self.repository
                    .upsert_workout_exercise(workout_log_id, workout_exercise)
                    .await?;
                info!(
                    "workout edit: user {} added exercise {} to workout log {}",
                    *user_id, *exercise_id, *workout_log_id
                );
            }
            WorkoutEdit::RemoveExercise {
                workout_exercise_id,
            } => {
                let (_, owner, _) = self
                    .repository
                    .read_workout_exercise(workout_exercise_id)
                    .await
                    .map_err(UpdateError::from)?;
                if owner != user_id {
                    return Err(UpdateError::Forbidden);
                }
                self.repository
                    .remove_workout_exercise(workout_exercise_id)
                    .await?;
                info!(
                    "workout edit: user {} removed workout exercise {}",
                    *user_id, *workout_exercise_id
                );
            }
            WorkoutEdit::DeleteWorkout { workout_log_id } => {
                let log = self
                    .repository
                    .read_workout_log(workout_log_id)
                    .await
                    .map_err(UpdateError::from)?;
                if log.user_id != user_id {
                    return Err(UpdateError::Forbidden);
                }
                self.repository.delete_workout_log(workout_log_id).await?;
                info!(
                    "workout edit: user {} deleted workout log {}",
                    *user_id, *workout_log_id
                );
            }
        }
        Ok(())
    }

    async fn workout_history(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError> {
        let mut logs = log_on_error!(
            self.repository.read_workout_logs(user_id),
            "get",
            "workout logs"
        )?;
        for log in &mut logs {
            let mut resolved = Vec::with_capacity(log.exercises.len());
            for mut exercise in std::mem::take(&mut log.exercises) {
                if exercise.snapshot.is_none() {
                    // Row predates the snapshot pattern: fall back to the
                    // live exercise, or drop the row if that is gone too.
                    match self
                        .repository
                        .read_exercise(exercise.active_exercise_id())
                        .await
                    {
                        Ok(live) => {
                            exercise.snapshot = Some(ExerciseSnapshot::of(&live, Utc::now()));
                        }
                        Err(ReadError::NotFound) => {
                            warn!(
                                "dropping workout exercise {}: no snapshot and live exercise missing",
                                *exercise.id
                            );
                            continue;
                        }
                        Err(err) => return Err(err),
                    }
                }
                resolved.push(exercise);
            }
            log.exercises = resolved;
        }
        Ok(logs)
    }
}

impl<R: WorkoutRepository + ExerciseRepository> AnalyticsService for Service<R> {
    async fn analytics_report(
        &self,
        user_id: UserID,
        filter: AnalyticsFilter,
    ) -> Result<AnalyticsReport, ReadError> {
        let logs = self.workout_history(user_id).await?;
        let logs = analytics::apply_filter(logs, &filter);
        Ok(AnalyticsReport {
            weight_progress: analytics::weight_progress(&logs),
            volume_trend: analytics::volume_trend(&logs),
            muscle_group_distribution: analytics::muscle_group_distribution(&logs),
            frequency_trend: analytics::frequency_trend(&logs),
            personal_records: analytics::personal_records(&logs),
            summary: analytics::summary(&logs),
        })
    }

    async fn workout_streak(&self, user_id: UserID) -> Result<Streak, ReadError> {
        let logs = log_on_error!(
            self.repository.read_workout_logs(user_id),
            "get",
            "workout logs"
        )?;
        Ok(analytics::streak(&logs, Local::now().date_naive()))
    }
}

impl<R: WorkoutRepository + UserRepository> LeaderboardService for Service<R> {
    async fn exercise_leaderboard(
        &self,
        exercise: &str,
        limit: usize,
    ) -> Result<Vec<crate::LeaderboardEntry>, ReadError> {
        let rows = log_on_error!(
            self.repository.read_all_workout_exercises(),
            "get",
            "workout exercises"
        )?;
        let names = self
            .repository
            .read_users()
            .await?
            .into_iter()
            .map(|user| (user.id, user.name.as_ref().to_string()))
            .collect();
        Ok(leaderboard::exercise_leaderboard(
            &rows, &names, exercise, limit,
        ))
    }

    async fn top_exercises(
        &self,
        limit: usize,
    ) -> Result<Vec<crate::ExerciseOverview>, ReadError> {
        let rows = log_on_error!(
            self.repository.read_all_workout_exercises(),
            "get",
            "workout exercises"
        )?;
        Ok(leaderboard::top_exercises(&rows, limit))
    }
}
