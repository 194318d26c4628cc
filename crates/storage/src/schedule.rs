use liftlog_domain::{
    CreateError, DayOfWeek, Name, ReadError, ScheduleExercise, ScheduleID, ScheduleRepository,
    StorageError, UpdateError, WeeklySchedule,
};
use sqlx::{Row, Sqlite, Transaction, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{Database, db_err, parse_uuid};

impl ScheduleRepository for Database {
    async fn read_schedules(&self) -> Result<Vec<WeeklySchedule>, ReadError> {
        let rows = sqlx::query(
            "SELECT id, day_of_week, name FROM weekly_schedules ORDER BY day_of_week",
        )
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        let mut schedules = Vec::with_capacity(rows.len());
        for row in &rows {
            schedules.push(self.assemble_schedule(row).await?);
        }
        Ok(schedules)
    }

    async fn read_schedule(&self, day: DayOfWeek) -> Result<WeeklySchedule, ReadError> {
        let row = sqlx::query(
            "SELECT id, day_of_week, name FROM weekly_schedules WHERE day_of_week = ?",
        )
        .bind(i64::from(u8::from(day)))
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;
        match row {
            Some(row) => self.assemble_schedule(&row).await,
            None => Err(ReadError::NotFound),
        }
    }

    async fn read_schedule_by_id(&self, id: ScheduleID) -> Result<WeeklySchedule, ReadError> {
        let row = sqlx::query("SELECT id, day_of_week, name FROM weekly_schedules WHERE id = ?")
            .bind((*id).to_string())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err)?;
        match row {
            Some(row) => self.assemble_schedule(&row).await,
            None => Err(ReadError::NotFound),
        }
    }

    async fn initialize_schedules(&self) -> Result<Vec<WeeklySchedule>, CreateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;
        for day in DayOfWeek::iter() {
            sqlx::query(
                "INSERT OR IGNORE INTO weekly_schedules (id, day_of_week, name) VALUES (?, ?, ?)",
            )
            .bind(Uuid::new_v4().to_string())
            .bind(i64::from(u8::from(*day)))
            .bind(day.name())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }
        tx.commit().await.map_err(db_err)?;
        Ok(self.read_schedules().await?)
    }

    async fn rename_schedule(
        &self,
        id: ScheduleID,
        name: Name,
    ) -> Result<WeeklySchedule, UpdateError> {
        let result = sqlx::query("UPDATE weekly_schedules SET name = ? WHERE id = ?")
            .bind(name.as_ref())
            .bind((*id).to_string())
            .execute(self.pool())
            .await
            .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(UpdateError::NotFound);
        }
        Ok(self.read_schedule_by_id(id).await?)
    }

    async fn replace_schedule_exercises(
        &self,
        id: ScheduleID,
        entries: Vec<ScheduleExercise>,
    ) -> Result<WeeklySchedule, UpdateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;
        let exists = sqlx::query("SELECT 1 FROM weekly_schedules WHERE id = ?")
            .bind((*id).to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;
        if exists.is_none() {
            return Err(UpdateError::NotFound);
        }

        sqlx::query("DELETE FROM schedule_exercises WHERE schedule_id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        insert_entries(&mut tx, id, &entries).await.map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(self.read_schedule_by_id(id).await?)
    }

    async fn swap_schedule_days(
        &self,
        day_a: DayOfWeek,
        day_b: DayOfWeek,
    ) -> Result<(), UpdateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        // Both day rows must exist before anything is touched.
        let Some(a) = fetch_day(&mut tx, day_a).await.map_err(db_err)? else {
            return Err(UpdateError::NotFound);
        };
        let Some(b) = fetch_day(&mut tx, day_b).await.map_err(db_err)? else {
            return Err(UpdateError::NotFound);
        };

        let entries_a = fetch_entries(&mut tx, &a.0).await.map_err(db_err)?;
        let entries_b = fetch_entries(&mut tx, &b.0).await.map_err(db_err)?;

        sqlx::query("DELETE FROM schedule_exercises WHERE schedule_id IN (?, ?)")
            .bind(&a.0)
            .bind(&b.0)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        sqlx::query("UPDATE weekly_schedules SET name = ? WHERE id = ?")
            .bind(&b.1)
            .bind(&a.0)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("UPDATE weekly_schedules SET name = ? WHERE id = ?")
            .bind(&a.1)
            .bind(&b.0)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        let a_id = ScheduleID::from(parse_uuid(&a.0)?);
        let b_id = ScheduleID::from(parse_uuid(&b.0)?);
        insert_entries(&mut tx, a_id, &entries_b).await.map_err(db_err)?;
        insert_entries(&mut tx, b_id, &entries_a).await.map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(())
    }
}

impl Database {
    async fn assemble_schedule(&self, row: &SqliteRow) -> Result<WeeklySchedule, ReadError> {
        let id: String = row.get("id");
        let day_of_week: i64 = row.get("day_of_week");
        let name: String = row.get("name");

        let entries = sqlx::query(
            "SELECT exercise_id, exercise_order FROM schedule_exercises \
             WHERE schedule_id = ? ORDER BY exercise_order",
        )
        .bind(&id)
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        let exercises = entries
            .iter()
            .map(row_to_entry)
            .collect::<Result<Vec<_>, _>>()?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(WeeklySchedule {
            id: parse_uuid(&id)?.into(),
            day: DayOfWeek::new(day_of_week as u8)
                .map_err(|e| StorageError::Other(Box::new(e)))?,
            name: Name::new(&name).map_err(|e| StorageError::Other(Box::new(e)))?,
            exercises,
        })
    }
}

fn row_to_entry(row: &SqliteRow) -> Result<ScheduleExercise, StorageError> {
    let exercise_id: String = row.get("exercise_id");
    let order: i64 = row.get("exercise_order");
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(ScheduleExercise {
        exercise_id: parse_uuid(&exercise_id)?.into(),
        order: order as u32,
    })
}

async fn fetch_day(
    tx: &mut Transaction<'_, Sqlite>,
    day: DayOfWeek,
) -> Result<Option<(String, String)>, sqlx::Error> {
    let row = sqlx::query("SELECT id, name FROM weekly_schedules WHERE day_of_week = ?")
        .bind(i64::from(u8::from(day)))
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row.map(|row| (row.get("id"), row.get("name"))))
}

async fn fetch_entries(
    tx: &mut Transaction<'_, Sqlite>,
    schedule_id: &str,
) -> Result<Vec<ScheduleExercise>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT exercise_id, exercise_order FROM schedule_exercises \
         WHERE schedule_id = ? ORDER BY exercise_order",
    )
    .bind(schedule_id)
    .fetch_all(&mut **tx)
    .await?;
    rows.iter()
        .map(|row| row_to_entry(row).map_err(|e| sqlx::Error::Decode(format!("{e}").into())))
        .collect()
}

async fn insert_entries(
    tx: &mut Transaction<'_, Sqlite>,
    schedule_id: ScheduleID,
    entries: &[ScheduleExercise],
) -> Result<(), sqlx::Error> {
    for entry in entries {
        sqlx::query(
            "INSERT INTO schedule_exercises (schedule_id, exercise_id, exercise_order) \
             VALUES (?, ?, ?)",
        )
        .bind((*schedule_id).to_string())
        .bind((*entry.exercise_id).to_string())
        .bind(i64::from(entry.order))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Rewrites a day's order values as a dense 1..N sequence, preserving the
/// current relative order.
pub(crate) async fn renumber_day(
    tx: &mut Transaction<'_, Sqlite>,
    schedule_id: &str,
) -> Result<(), sqlx::Error> {
    let rows = sqlx::query(
        "SELECT exercise_id FROM schedule_exercises WHERE schedule_id = ? ORDER BY exercise_order",
    )
    .bind(schedule_id)
    .fetch_all(&mut **tx)
    .await?;
    for (i, row) in rows.iter().enumerate() {
        #[allow(clippy::cast_possible_wrap)]
        sqlx::query(
            "UPDATE schedule_exercises SET exercise_order = ? \
             WHERE schedule_id = ? AND exercise_id = ?",
        )
        .bind(i as i64 + 1)
        .bind(schedule_id)
        .bind(row.get::<String, _>("exercise_id"))
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
