use liftlog_domain::{
    CreateError, DayOfWeek, DeleteError, ExerciseSet, ReadError, Reps, StorageError, UpdateError,
    UserID, WeightKg, WorkoutExercise, WorkoutExerciseID, WorkoutLog, WorkoutLogID,
    WorkoutRepository, is_valid_snapshot,
};
use log::warn;
use sqlx::{Row, Sqlite, Transaction, sqlite::SqliteRow};

use crate::{Database, db_err, parse_date, parse_datetime, parse_uuid};

const WORKOUT_EXERCISE_COLUMNS: &str = "id, workout_log_id, exercise_order, is_custom, \
     is_replaced, replaced_at, original_exercise_id, replacement_exercise_id, exercise_snapshot";

impl WorkoutRepository for Database {
    async fn create_workout_log(&self, log: WorkoutLog) -> Result<WorkoutLog, CreateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        sqlx::query(
            "INSERT INTO workout_logs (id, user_id, date, day_of_week) VALUES (?, ?, ?, ?)",
        )
        .bind((*log.id).to_string())
        .bind((*log.user_id).to_string())
        .bind(log.date.to_string())
        .bind(i64::from(u8::from(log.day)))
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        for exercise in &log.exercises {
            insert_workout_exercise(&mut tx, log.id, exercise, exercise.order)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(log)
    }

    async fn read_workout_logs(&self, user_id: UserID) -> Result<Vec<WorkoutLog>, ReadError> {
        let rows = sqlx::query(
            "SELECT id, user_id, date, day_of_week FROM workout_logs \
             WHERE user_id = ? ORDER BY date DESC, rowid DESC",
        )
        .bind((*user_id).to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        let mut logs = Vec::with_capacity(rows.len());
        for row in &rows {
            logs.push(self.assemble_log(row).await?);
        }
        Ok(logs)
    }

    async fn read_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLog, ReadError> {
        let row = sqlx::query(
            "SELECT id, user_id, date, day_of_week FROM workout_logs WHERE id = ?",
        )
        .bind((*id).to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;
        match row {
            Some(row) => self.assemble_log(&row).await,
            None => Err(ReadError::NotFound),
        }
    }

    async fn read_workout_exercise(
        &self,
        id: WorkoutExerciseID,
    ) -> Result<(WorkoutLogID, UserID, WorkoutExercise), ReadError> {
        let row = sqlx::query(&format!(
            "SELECT we.{}, wl.user_id AS owner_id FROM workout_exercises we \
             JOIN workout_logs wl ON wl.id = we.workout_log_id WHERE we.id = ?",
            WORKOUT_EXERCISE_COLUMNS.replace(", ", ", we.")
        ))
        .bind((*id).to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;
        let Some(row) = row else {
            return Err(ReadError::NotFound);
        };
        let log_id: String = row.get("workout_log_id");
        let owner_id: String = row.get("owner_id");
        let sets = self.fetch_sets(&row.get::<String, _>("id")).await?;
        let exercise = row_to_workout_exercise(&row, sets)?;
        Ok((
            parse_uuid(&log_id)?.into(),
            parse_uuid(&owner_id)?.into(),
            exercise,
        ))
    }

    async fn replace_sets(
        &self,
        id: WorkoutExerciseID,
        sets: Vec<ExerciseSet>,
    ) -> Result<(), UpdateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;
        let exists = sqlx::query("SELECT 1 FROM workout_exercises WHERE id = ?")
            .bind((*id).to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        if exists.is_none() {
            return Err(UpdateError::NotFound);
        }
        sqlx::query("DELETE FROM exercise_sets WHERE workout_exercise_id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        insert_sets(&mut tx, id, &sets).await.map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn upsert_workout_exercise(
        &self,
        log_id: WorkoutLogID,
        exercise: WorkoutExercise,
    ) -> Result<(), UpdateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        let existing = sqlx::query(
            "SELECT id FROM workout_exercises \
             WHERE workout_log_id = ? AND original_exercise_id = ?",
        )
        .bind((*log_id).to_string())
        .bind((*exercise.original_exercise_id).to_string())
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        if let Some(row) = existing {
            // Same exercise already logged: converge by replacing its sets.
            let existing_id: WorkoutExerciseID = parse_uuid(&row.get::<String, _>("id"))?.into();
            sqlx::query("DELETE FROM exercise_sets WHERE workout_exercise_id = ?")
                .bind((*existing_id).to_string())
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
            insert_sets(&mut tx, existing_id, &exercise.sets)
                .await
                .map_err(db_err)?;
        } else {
            let order: (i64,) = sqlx::query_as(
                "SELECT COALESCE(MAX(exercise_order), 0) + 1 FROM workout_exercises \
                 WHERE workout_log_id = ?",
            )
            .bind((*log_id).to_string())
            .fetch_one(&mut *tx)
            .await
            .map_err(db_err)?;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            insert_workout_exercise(&mut tx, log_id, &exercise, order.0 as u32)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn remove_workout_exercise(&self, id: WorkoutExerciseID) -> Result<(), DeleteError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        let row = sqlx::query("SELECT workout_log_id FROM workout_exercises WHERE id = ?")
            .bind((*id).to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        let Some(row) = row else {
            return Err(DeleteError::NotFound);
        };
        let log_id: String = row.get("workout_log_id");

        sqlx::query("DELETE FROM exercise_sets WHERE workout_exercise_id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("DELETE FROM workout_exercises WHERE id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        // Keep the remaining exercises densely numbered.
        let remaining = sqlx::query(
            "SELECT id FROM workout_exercises WHERE workout_log_id = ? ORDER BY exercise_order",
        )
        .bind(&log_id)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?;
        for (i, row) in remaining.iter().enumerate() {
            #[allow(clippy::cast_possible_wrap)]
            sqlx::query("UPDATE workout_exercises SET exercise_order = ? WHERE id = ?")
                .bind(i as i64 + 1)
                .bind(row.get::<String, _>("id"))
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn delete_workout_log(&self, id: WorkoutLogID) -> Result<WorkoutLogID, DeleteError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        let exists = sqlx::query("SELECT 1 FROM workout_logs WHERE id = ?")
            .bind((*id).to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        if exists.is_none() {
            return Err(DeleteError::NotFound);
        }

        sqlx::query(
            "DELETE FROM exercise_sets WHERE workout_exercise_id IN \
             (SELECT id FROM workout_exercises WHERE workout_log_id = ?)",
        )
        .bind((*id).to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
        sqlx::query("DELETE FROM workout_exercises WHERE workout_log_id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("DELETE FROM workout_logs WHERE id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(id)
    }

    async fn read_all_workout_exercises(
        &self,
    ) -> Result<Vec<(UserID, WorkoutExercise)>, ReadError> {
        let rows = sqlx::query(&format!(
            "SELECT we.{}, wl.user_id AS owner_id FROM workout_exercises we \
             JOIN workout_logs wl ON wl.id = we.workout_log_id",
            WORKOUT_EXERCISE_COLUMNS.replace(", ", ", we.")
        ))
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        let mut result = Vec::with_capacity(rows.len());
        for row in &rows {
            let owner_id: String = row.get("owner_id");
            let sets = self.fetch_sets(&row.get::<String, _>("id")).await?;
            result.push((
                parse_uuid(&owner_id)?.into(),
                row_to_workout_exercise(row, sets)?,
            ));
        }
        Ok(result)
    }
}

impl Database {
    async fn assemble_log(&self, row: &SqliteRow) -> Result<WorkoutLog, ReadError> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let date: String = row.get("date");
        let day_of_week: i64 = row.get("day_of_week");

        let exercise_rows = sqlx::query(&format!(
            "SELECT {WORKOUT_EXERCISE_COLUMNS} FROM workout_exercises \
             WHERE workout_log_id = ? ORDER BY exercise_order"
        ))
        .bind(&id)
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        let mut exercises = Vec::with_capacity(exercise_rows.len());
        for exercise_row in &exercise_rows {
            let sets = self.fetch_sets(&exercise_row.get::<String, _>("id")).await?;
            exercises.push(row_to_workout_exercise(exercise_row, sets)?);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(WorkoutLog {
            id: parse_uuid(&id)?.into(),
            user_id: parse_uuid(&user_id)?.into(),
            date: parse_date(&date)?,
            day: DayOfWeek::new(day_of_week as u8)
                .map_err(|e| StorageError::Other(Box::new(e)))?,
            exercises,
        })
    }

    async fn fetch_sets(&self, workout_exercise_id: &str) -> Result<Vec<ExerciseSet>, ReadError> {
        let rows = sqlx::query(
            "SELECT set_number, reps, weight_kg FROM exercise_sets \
             WHERE workout_exercise_id = ? ORDER BY set_number",
        )
        .bind(workout_exercise_id)
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        Ok(rows
            .iter()
            .map(row_to_set)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

async fn insert_workout_exercise(
    tx: &mut Transaction<'_, Sqlite>,
    log_id: WorkoutLogID,
    exercise: &WorkoutExercise,
    order: u32,
) -> Result<(), sqlx::Error> {
    let snapshot = exercise
        .snapshot
        .as_ref()
        .and_then(|s| serde_json::to_string(s).ok());
    sqlx::query(
        "INSERT INTO workout_exercises (id, workout_log_id, exercise_order, is_custom, \
         is_replaced, replaced_at, original_exercise_id, replacement_exercise_id, \
         exercise_snapshot) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind((*exercise.id).to_string())
    .bind((*log_id).to_string())
    .bind(i64::from(order))
    .bind(exercise.is_custom)
    .bind(exercise.is_replaced)
    .bind(exercise.replaced_at.map(|at| at.to_rfc3339()))
    .bind((*exercise.original_exercise_id).to_string())
    .bind(exercise.replacement_exercise_id.map(|id| (*id).to_string()))
    .bind(snapshot)
    .execute(&mut **tx)
    .await?;
    insert_sets(tx, exercise.id, &exercise.sets).await?;
    Ok(())
}

async fn insert_sets(
    tx: &mut Transaction<'_, Sqlite>,
    workout_exercise_id: WorkoutExerciseID,
    sets: &[ExerciseSet],
) -> Result<(), sqlx::Error> {
    for set in sets {
        sqlx::query(
            "INSERT INTO exercise_sets (workout_exercise_id, set_number, reps, weight_kg) \
             VALUES (?, ?, ?, ?)",
        )
        .bind((*workout_exercise_id).to_string())
        .bind(i64::from(set.number))
        .bind(i64::from(u32::from(set.reps)))
        .bind(f64::from(f32::from(set.weight)))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

fn row_to_set(row: &SqliteRow) -> Result<ExerciseSet, StorageError> {
    let number: i64 = row.get("set_number");
    let reps: i64 = row.get("reps");
    let weight: f64 = row.get("weight_kg");
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    Ok(ExerciseSet {
        number: number as u32,
        reps: Reps::new(reps as u32).map_err(|e| StorageError::Other(Box::new(e)))?,
        weight: WeightKg::new(weight as f32).map_err(|e| StorageError::Other(Box::new(e)))?,
    })
}

fn row_to_workout_exercise(
    row: &SqliteRow,
    sets: Vec<ExerciseSet>,
) -> Result<WorkoutExercise, StorageError> {
    let id: String = row.get("id");
    let order: i64 = row.get("exercise_order");
    let is_custom: bool = row.get("is_custom");
    let is_replaced: bool = row.get("is_replaced");
    let replaced_at: Option<String> = row.get("replaced_at");
    let original_exercise_id: String = row.get("original_exercise_id");
    let replacement_exercise_id: Option<String> = row.get("replacement_exercise_id");
    let snapshot_json: Option<String> = row.get("exercise_snapshot");

    // An unreadable snapshot downgrades the row to the pre-snapshot fallback
    // path instead of failing the whole read.
    let snapshot = snapshot_json.and_then(|text| match serde_json::from_str(&text) {
        Ok(value) if is_valid_snapshot(&value) => serde_json::from_value(value).ok(),
        _ => {
            warn!("invalid exercise snapshot on workout exercise {id}, ignoring");
            None
        }
    });

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(WorkoutExercise {
        id: parse_uuid(&id)?.into(),
        order: order as u32,
        is_custom,
        is_replaced,
        replaced_at: replaced_at.map(|at| parse_datetime(&at)).transpose()?,
        original_exercise_id: parse_uuid(&original_exercise_id)?.into(),
        replacement_exercise_id: replacement_exercise_id
            .map(|id| parse_uuid(&id))
            .transpose()?
            .map(Into::into),
        snapshot,
        sets,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};
    use liftlog_domain::{
        ExerciseRepository, ExerciseService, ExerciseSnapshot, MuscleGroup, Service, SetEntry,
        UserID, WorkoutEdit, WorkoutEntry, WorkoutService,
    };
    use pretty_assertions::assert_eq;

    use crate::tests::{create_exercise, setup_db};

    use super::*;

    fn lifter() -> UserID {
        2.into()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(exercise_id: liftlog_domain::ExerciseID, sets: &[(u32, f32)]) -> WorkoutEntry {
        WorkoutEntry {
            exercise_id,
            is_replaced: false,
            original_exercise_id: None,
            sets: sets
                .iter()
                .map(|(reps, weight_kg)| SetEntry {
                    reps: *reps,
                    weight_kg: *weight_kg,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_save_workout_filters_incomplete_sets() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;
        let row = create_exercise(&db, "Row", MuscleGroup::Back).await;

        let day = DayOfWeek::new(0).unwrap();
        let log = service
            .save_workout(
                lifter(),
                date(2024, 5, 6),
                day,
                vec![
                    entry(bench.id, &[(10, 50.0), (0, 60.0)]),
                    entry(row.id, &[(0, 40.0)]),
                ],
            )
            .await
            .unwrap();

        // The all-incomplete exercise is dropped, the qualifying set kept.
        let read = db.read_workout_log(log.id).await.unwrap();
        assert_eq!(read.exercises.len(), 1);
        assert_eq!(read.exercises[0].original_exercise_id, bench.id);
        assert_eq!(read.exercises[0].sets.len(), 1);
        assert_eq!(u32::from(read.exercises[0].sets[0].reps), 10);
    }

    #[tokio::test]
    async fn test_snapshot_survives_catalog_edits() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let day = DayOfWeek::new(0).unwrap();
        service
            .save_workout(
                lifter(),
                date(2024, 5, 6),
                day,
                vec![entry(bench.id, &[(10, 50.0)])],
            )
            .await
            .unwrap();

        service
            .update_exercise(
                bench.id,
                liftlog_domain::ExerciseUpdate {
                    name: Some(liftlog_domain::Name::new("Paused Bench Press").unwrap()),
                    muscle_group: Some(MuscleGroup::Triceps),
                    ..liftlog_domain::ExerciseUpdate::default()
                },
                crate::tests::admin(),
            )
            .await
            .unwrap();

        let history = service.workout_history(lifter()).await.unwrap();
        let snapshot: &ExerciseSnapshot = history[0].exercises[0].snapshot.as_ref().unwrap();
        assert_eq!(snapshot.name.as_ref(), "Bench Press");
        assert_eq!(snapshot.muscle_group, MuscleGroup::Chest);
    }

    #[tokio::test]
    async fn test_delete_policy_soft_deletes_referenced_exercise() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;
        let squat = create_exercise(&db, "Squat", MuscleGroup::Quads).await;

        service
            .save_workout(
                lifter(),
                date(2024, 5, 6),
                DayOfWeek::new(0).unwrap(),
                vec![entry(bench.id, &[(10, 50.0)])],
            )
            .await
            .unwrap();

        let referenced = service
            .delete_exercise(bench.id, crate::tests::admin())
            .await
            .unwrap();
        assert!(matches!(
            referenced,
            liftlog_domain::ExerciseDeletion::Soft { .. }
        ));
        assert!(db.read_exercise(bench.id).await.unwrap().is_deleted());

        let unreferenced = service
            .delete_exercise(squat.id, crate::tests::admin())
            .await
            .unwrap();
        assert!(matches!(unreferenced, liftlog_domain::ExerciseDeletion::Hard));
        assert!(matches!(
            db.read_exercise(squat.id).await,
            Err(ReadError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_workout_logs_are_newest_first() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        for day in [date(2024, 5, 6), date(2024, 5, 8), date(2024, 5, 7)] {
            service
                .save_workout(
                    lifter(),
                    day,
                    day.weekday().into(),
                    vec![entry(bench.id, &[(10, 50.0)])],
                )
                .await
                .unwrap();
        }

        let logs = db.read_workout_logs(lifter()).await.unwrap();
        assert_eq!(
            logs.iter().map(|l| l.date).collect::<Vec<_>>(),
            vec![date(2024, 5, 8), date(2024, 5, 7), date(2024, 5, 6)]
        );
    }

    #[tokio::test]
    async fn test_add_exercise_edit_is_idempotent() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;
        let row = create_exercise(&db, "Row", MuscleGroup::Back).await;

        let log = service
            .save_workout(
                lifter(),
                date(2024, 5, 6),
                DayOfWeek::new(0).unwrap(),
                vec![entry(bench.id, &[(10, 50.0)])],
            )
            .await
            .unwrap();

        let edit = WorkoutEdit::AddExercise {
            workout_log_id: log.id,
            exercise_id: row.id,
            sets: vec![SetEntry {
                reps: 10,
                weight_kg: 40.0,
            }],
        };
        service.edit_workout(lifter(), edit.clone()).await.unwrap();
        service.edit_workout(lifter(), edit).await.unwrap();

        let read = db.read_workout_log(log.id).await.unwrap();
        assert_eq!(read.exercises.len(), 2);
        assert_eq!(read.exercises[1].original_exercise_id, row.id);
        assert_eq!(read.exercises[1].sets.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_exercise_renumbers_densely() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;
        let row = create_exercise(&db, "Row", MuscleGroup::Back).await;
        let squat = create_exercise(&db, "Squat", MuscleGroup::Quads).await;

        let log = service
            .save_workout(
                lifter(),
                date(2024, 5, 6),
                DayOfWeek::new(0).unwrap(),
                vec![
                    entry(bench.id, &[(10, 50.0)]),
                    entry(row.id, &[(10, 40.0)]),
                    entry(squat.id, &[(5, 100.0)]),
                ],
            )
            .await
            .unwrap();

        let middle = db.read_workout_log(log.id).await.unwrap().exercises[1].id;
        service
            .edit_workout(
                lifter(),
                WorkoutEdit::RemoveExercise {
                    workout_exercise_id: middle,
                },
            )
            .await
            .unwrap();

        let read = db.read_workout_log(log.id).await.unwrap();
        assert_eq!(
            read.exercises
                .iter()
                .map(|e| (e.original_exercise_id, e.order))
                .collect::<Vec<_>>(),
            vec![(bench.id, 1), (squat.id, 2)]
        );
    }

    #[tokio::test]
    async fn test_delete_workout_cascades() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let log = service
            .save_workout(
                lifter(),
                date(2024, 5, 6),
                DayOfWeek::new(0).unwrap(),
                vec![entry(bench.id, &[(10, 50.0)])],
            )
            .await
            .unwrap();

        service
            .edit_workout(
                lifter(),
                WorkoutEdit::DeleteWorkout {
                    workout_log_id: log.id,
                },
            )
            .await
            .unwrap();
        assert!(matches!(
            db.read_workout_log(log.id).await,
            Err(ReadError::NotFound)
        ));
        assert!(db.read_all_workout_exercises().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_of_foreign_workout_is_forbidden() {
        let (db, _dir) = setup_db().await;
        let service = Service::new(db.clone());
        let bench = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let log = service
            .save_workout(
                lifter(),
                date(2024, 5, 6),
                DayOfWeek::new(0).unwrap(),
                vec![entry(bench.id, &[(10, 50.0)])],
            )
            .await
            .unwrap();

        let other_user: UserID = 3.into();
        let result = service
            .edit_workout(
                other_user,
                WorkoutEdit::DeleteWorkout {
                    workout_log_id: log.id,
                },
            )
            .await;
        assert!(matches!(result, Err(UpdateError::Forbidden)));
    }
}
