//! Catalog repository. Every mutation pairs its data change with exactly one
//! change-log row inside the same transaction.

use chrono::Utc;
use liftlog_domain::{
    ChangeType, CreateError, DeleteError, Deletion, Exercise, ExerciseChangeLog, ExerciseID,
    ExerciseRepository, ExerciseUsage, Name, ReadError, StorageError, UpdateError, UserID,
};
use sqlx::{Row, Sqlite, Transaction, sqlite::SqliteRow};

use crate::{Database, db_err, parse_datetime, parse_uuid};

const EXERCISE_COLUMNS: &str = "id, name, description, muscle_group, equipment, video_url, \
     owner_id, links, is_deleted, deleted_at, deleted_by, created_at, updated_at";

impl ExerciseRepository for Database {
    async fn read_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError> {
        let rows = sqlx::query(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises \
             WHERE is_deleted = 0 AND (owner_id IS NULL OR owner_id = ?) ORDER BY name"
        ))
        .bind((*user_id).to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        Ok(rows
            .iter()
            .map(row_to_exercise)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn read_global_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        let rows = sqlx::query(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises \
             WHERE is_deleted = 0 AND owner_id IS NULL ORDER BY name"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        Ok(rows
            .iter()
            .map(row_to_exercise)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn read_user_exercises(&self, user_id: UserID) -> Result<Vec<Exercise>, ReadError> {
        let rows = sqlx::query(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises \
             WHERE is_deleted = 0 AND owner_id = ? ORDER BY name"
        ))
        .bind((*user_id).to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        Ok(rows
            .iter()
            .map(row_to_exercise)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn read_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError> {
        let row = sqlx::query(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?"
        ))
        .bind((*id).to_string())
        .fetch_optional(self.pool())
        .await
        .map_err(db_err)?;
        match row {
            Some(row) => Ok(row_to_exercise(&row)?),
            None => Err(ReadError::NotFound),
        }
    }

    async fn create_exercise(
        &self,
        exercise: Exercise,
        actor: UserID,
    ) -> Result<Exercise, CreateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        if name_in_scope_exists(&mut tx, &exercise, None).await.map_err(db_err)? {
            return Err(CreateError::Conflict(format!(
                "an exercise named {} already exists",
                exercise.name
            )));
        }

        sqlx::query(
            "INSERT INTO exercises (id, name, description, muscle_group, equipment, video_url, \
             owner_id, links, is_deleted, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?)",
        )
        .bind((*exercise.id).to_string())
        .bind(exercise.name.as_ref())
        .bind(&exercise.description)
        .bind(exercise.muscle_group.to_string())
        .bind(exercise.equipment.to_string())
        .bind(&exercise.video_url)
        .bind(exercise.owner.map(|o| (*o).to_string()))
        .bind(serde_json::to_string(&exercise.links).unwrap_or_else(|_| "[]".to_string()))
        .bind(exercise.created_at.to_rfc3339())
        .bind(exercise.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        insert_change_log(
            &mut tx,
            exercise.id,
            actor,
            ChangeType::Create,
            None,
            Some(exercise_audit_json(&exercise)),
        )
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(exercise)
    }

    async fn update_exercise(
        &self,
        exercise: Exercise,
        actor: UserID,
    ) -> Result<Exercise, UpdateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        let Some(old) = fetch_exercise(&mut tx, exercise.id).await.map_err(db_err)? else {
            return Err(UpdateError::NotFound);
        };
        if name_in_scope_exists(&mut tx, &exercise, Some(exercise.id))
            .await
            .map_err(db_err)?
        {
            return Err(UpdateError::Conflict(format!(
                "an exercise named {} already exists",
                exercise.name
            )));
        }

        sqlx::query(
            "UPDATE exercises SET name = ?, description = ?, muscle_group = ?, equipment = ?, \
             video_url = ?, links = ?, updated_at = ? WHERE id = ?",
        )
        .bind(exercise.name.as_ref())
        .bind(&exercise.description)
        .bind(exercise.muscle_group.to_string())
        .bind(exercise.equipment.to_string())
        .bind(&exercise.video_url)
        .bind(serde_json::to_string(&exercise.links).unwrap_or_else(|_| "[]".to_string()))
        .bind(exercise.updated_at.to_rfc3339())
        .bind((*exercise.id).to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        insert_change_log(
            &mut tx,
            exercise.id,
            actor,
            ChangeType::Update,
            Some(exercise_audit_json(&old)),
            Some(exercise_audit_json(&exercise)),
        )
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(exercise)
    }

    async fn soft_delete_exercise(
        &self,
        id: ExerciseID,
        actor: UserID,
    ) -> Result<Exercise, DeleteError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        let Some(old) = fetch_exercise(&mut tx, id).await.map_err(db_err)? else {
            return Err(DeleteError::NotFound);
        };
        if old.is_deleted() {
            return Err(DeleteError::Conflict("exercise is already deleted".to_string()));
        }

        let deletion = Deletion {
            at: Utc::now(),
            by: actor,
        };
        sqlx::query(
            "UPDATE exercises SET is_deleted = 1, deleted_at = ?, deleted_by = ? WHERE id = ?",
        )
        .bind(deletion.at.to_rfc3339())
        .bind((*deletion.by).to_string())
        .bind((*id).to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let mut updated = old.clone();
        updated.deleted = Some(deletion);

        insert_change_log(
            &mut tx,
            id,
            actor,
            ChangeType::Delete,
            Some(exercise_audit_json(&old)),
            Some(exercise_audit_json(&updated)),
        )
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(updated)
    }

    async fn hard_delete_exercise(
        &self,
        id: ExerciseID,
        actor: UserID,
    ) -> Result<ExerciseID, DeleteError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        let Some(old) = fetch_exercise(&mut tx, id).await.map_err(db_err)? else {
            return Err(DeleteError::NotFound);
        };

        // Remove dangling schedule assignments, keeping each day's order
        // values dense.
        let schedule_ids = sqlx::query(
            "SELECT schedule_id FROM schedule_exercises WHERE exercise_id = ?",
        )
        .bind((*id).to_string())
        .fetch_all(&mut *tx)
        .await
        .map_err(db_err)?
        .iter()
        .map(|row| row.get::<String, _>("schedule_id"))
        .collect::<Vec<_>>();
        sqlx::query("DELETE FROM schedule_exercises WHERE exercise_id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        for schedule_id in schedule_ids {
            crate::schedule::renumber_day(&mut tx, &schedule_id)
                .await
                .map_err(db_err)?;
        }

        sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind((*id).to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;

        insert_change_log(
            &mut tx,
            id,
            actor,
            ChangeType::Delete,
            Some(exercise_audit_json(&old)),
            None,
        )
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(id)
    }

    async fn restore_exercise(
        &self,
        id: ExerciseID,
        actor: UserID,
    ) -> Result<Exercise, UpdateError> {
        let mut tx = self.pool().begin().await.map_err(db_err)?;

        let Some(old) = fetch_exercise(&mut tx, id).await.map_err(db_err)? else {
            return Err(UpdateError::NotFound);
        };
        if !old.is_deleted() {
            return Err(UpdateError::Conflict("exercise is not deleted".to_string()));
        }
        if name_in_scope_exists(&mut tx, &old, Some(id)).await.map_err(db_err)? {
            return Err(UpdateError::Conflict(format!(
                "an exercise named {} already exists",
                old.name
            )));
        }

        sqlx::query(
            "UPDATE exercises SET is_deleted = 0, deleted_at = NULL, deleted_by = NULL \
             WHERE id = ?",
        )
        .bind((*id).to_string())
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        let mut restored = old.clone();
        restored.deleted = None;

        insert_change_log(
            &mut tx,
            id,
            actor,
            ChangeType::Restore,
            Some(exercise_audit_json(&old)),
            Some(exercise_audit_json(&restored)),
        )
        .await
        .map_err(db_err)?;

        tx.commit().await.map_err(db_err)?;
        Ok(restored)
    }

    async fn exercise_usage(&self, id: ExerciseID) -> Result<ExerciseUsage, ReadError> {
        let as_original: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM workout_exercises WHERE original_exercise_id = ?",
        )
        .bind((*id).to_string())
        .fetch_one(self.pool())
        .await
        .map_err(db_err)?;
        let as_replacement: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM workout_exercises WHERE replacement_exercise_id = ?",
        )
        .bind((*id).to_string())
        .fetch_one(self.pool())
        .await
        .map_err(db_err)?;
        #[allow(clippy::cast_sign_loss)]
        Ok(ExerciseUsage {
            as_original: as_original.0 as u64,
            as_replacement: as_replacement.0 as u64,
        })
    }

    async fn read_change_log(&self, id: ExerciseID) -> Result<Vec<ExerciseChangeLog>, ReadError> {
        let rows = sqlx::query(
            "SELECT exercise_id, actor_id, change_type, old_data, new_data, changed_at \
             FROM exercise_change_log WHERE exercise_id = ? ORDER BY id",
        )
        .bind((*id).to_string())
        .fetch_all(self.pool())
        .await
        .map_err(db_err)?;
        Ok(rows
            .iter()
            .map(row_to_change_log)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

async fn fetch_exercise(
    tx: &mut Transaction<'_, Sqlite>,
    id: ExerciseID,
) -> Result<Option<Exercise>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?"
    ))
    .bind((*id).to_string())
    .fetch_optional(&mut **tx)
    .await?;
    match row {
        Some(row) => Ok(Some(row_to_exercise(&row).map_err(|e| {
            sqlx::Error::Decode(format!("{e}").into())
        })?)),
        None => Ok(None),
    }
}

async fn name_in_scope_exists(
    tx: &mut Transaction<'_, Sqlite>,
    exercise: &Exercise,
    exclude: Option<ExerciseID>,
) -> Result<bool, sqlx::Error> {
    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM exercises \
         WHERE name = ?1 AND is_deleted = 0 \
         AND COALESCE(owner_id, '') = COALESCE(?2, '') \
         AND id != COALESCE(?3, '')",
    )
    .bind(exercise.name.as_ref())
    .bind(exercise.owner.map(|o| (*o).to_string()))
    .bind(exclude.map(|e| (*e).to_string()))
    .fetch_one(&mut **tx)
    .await?;
    Ok(count.0 > 0)
}

pub(crate) async fn insert_change_log(
    tx: &mut Transaction<'_, Sqlite>,
    exercise_id: ExerciseID,
    actor: UserID,
    change: ChangeType,
    old_data: Option<serde_json::Value>,
    new_data: Option<serde_json::Value>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO exercise_change_log \
         (exercise_id, actor_id, change_type, old_data, new_data, changed_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind((*exercise_id).to_string())
    .bind((*actor).to_string())
    .bind(change.to_string())
    .bind(old_data.map(|v| v.to_string()))
    .bind(new_data.map(|v| v.to_string()))
    .bind(Utc::now().to_rfc3339())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub(crate) fn exercise_audit_json(exercise: &Exercise) -> serde_json::Value {
    serde_json::json!({
        "name": exercise.name.as_ref(),
        "description": exercise.description,
        "muscle_group": exercise.muscle_group.to_string(),
        "equipment": exercise.equipment.to_string(),
        "video_url": exercise.video_url,
        "owner": exercise.owner.map(|o| (*o).to_string()),
        "links": exercise.links,
        "is_deleted": exercise.is_deleted(),
    })
}

pub(crate) fn row_to_exercise(row: &SqliteRow) -> Result<Exercise, StorageError> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let description: Option<String> = row.get("description");
    let muscle_group: String = row.get("muscle_group");
    let equipment: String = row.get("equipment");
    let video_url: Option<String> = row.get("video_url");
    let owner_id: Option<String> = row.get("owner_id");
    let links: String = row.get("links");
    let is_deleted: bool = row.get("is_deleted");
    let deleted_at: Option<String> = row.get("deleted_at");
    let deleted_by: Option<String> = row.get("deleted_by");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    let deleted = if is_deleted {
        Some(Deletion {
            at: parse_datetime(&deleted_at.unwrap_or_default())?,
            by: parse_uuid(&deleted_by.unwrap_or_default())?.into(),
        })
    } else {
        None
    };

    Ok(Exercise {
        id: parse_uuid(&id)?.into(),
        name: Name::new(&name).map_err(|e| StorageError::Other(Box::new(e)))?,
        description,
        muscle_group: muscle_group
            .parse()
            .map_err(|e: strum::ParseError| StorageError::Other(Box::new(e)))?,
        equipment: equipment
            .parse()
            .map_err(|e: strum::ParseError| StorageError::Other(Box::new(e)))?,
        video_url,
        owner: owner_id.map(|o| parse_uuid(&o)).transpose()?.map(Into::into),
        links: serde_json::from_str(&links).unwrap_or_default(),
        deleted,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

fn row_to_change_log(row: &SqliteRow) -> Result<ExerciseChangeLog, StorageError> {
    let exercise_id: String = row.get("exercise_id");
    let actor_id: String = row.get("actor_id");
    let change_type: String = row.get("change_type");
    let old_data: Option<String> = row.get("old_data");
    let new_data: Option<String> = row.get("new_data");
    let changed_at: String = row.get("changed_at");

    Ok(ExerciseChangeLog {
        exercise_id: parse_uuid(&exercise_id)?.into(),
        actor: parse_uuid(&actor_id)?.into(),
        change: change_type
            .parse()
            .map_err(|e: strum::ParseError| StorageError::Other(Box::new(e)))?,
        old_data: old_data
            .map(|v| serde_json::from_str(&v))
            .transpose()
            .map_err(|e| StorageError::Other(Box::new(e)))?,
        new_data: new_data
            .map(|v| serde_json::from_str(&v))
            .transpose()
            .map_err(|e| StorageError::Other(Box::new(e)))?,
        changed_at: parse_datetime(&changed_at)?,
    })
}

#[cfg(test)]
mod tests {
    use liftlog_domain::{ChangeType, ExerciseUpdate, MuscleGroup, Name};
    use pretty_assertions::assert_eq;

    use crate::tests::{admin, create_exercise, draft, setup_db};

    use super::*;

    #[tokio::test]
    async fn test_create_and_read() {
        let (db, _dir) = setup_db().await;
        let exercise = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let read = db.read_exercise(exercise.id).await.unwrap();
        assert_eq!(read, exercise);

        let all = db.read_exercises(admin()).await.unwrap();
        assert_eq!(all, vec![exercise]);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name_in_scope() {
        let (db, _dir) = setup_db().await;
        create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let result = db
            .create_exercise(
                draft("Bench Press", MuscleGroup::Chest).into_exercise(Utc::now()),
                admin(),
            )
            .await;
        assert!(matches!(result, Err(CreateError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_same_name_allowed_in_different_scope() {
        let (db, _dir) = setup_db().await;
        create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let mut custom = draft("Bench Press", MuscleGroup::Chest);
        custom.owner = Some(2.into());
        assert!(
            db.create_exercise(custom.into_exercise(Utc::now()), admin())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_update_appends_change_log() {
        let (db, _dir) = setup_db().await;
        let mut exercise = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        exercise.apply(
            ExerciseUpdate {
                name: Some(Name::new("Incline Bench Press").unwrap()),
                ..ExerciseUpdate::default()
            },
            Utc::now(),
        );
        db.update_exercise(exercise.clone(), admin()).await.unwrap();

        let log = db.read_change_log(exercise.id).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].change, ChangeType::Create);
        assert_eq!(log[0].old_data, None);
        assert_eq!(log[1].change, ChangeType::Update);
        assert_eq!(
            log[1].old_data.as_ref().unwrap()["name"],
            serde_json::json!("Bench Press")
        );
        assert_eq!(
            log[1].new_data.as_ref().unwrap()["name"],
            serde_json::json!("Incline Bench Press")
        );
    }

    #[tokio::test]
    async fn test_hard_delete_removes_row_and_logs() {
        let (db, _dir) = setup_db().await;
        let exercise = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        db.hard_delete_exercise(exercise.id, admin()).await.unwrap();
        assert!(matches!(
            db.read_exercise(exercise.id).await,
            Err(ReadError::NotFound)
        ));

        let log = db.read_change_log(exercise.id).await.unwrap();
        assert_eq!(log.last().unwrap().change, ChangeType::Delete);
        assert_eq!(log.last().unwrap().new_data, None);
    }

    #[tokio::test]
    async fn test_soft_delete_and_restore() {
        let (db, _dir) = setup_db().await;
        let exercise = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let deleted = db.soft_delete_exercise(exercise.id, admin()).await.unwrap();
        assert!(deleted.is_deleted());
        assert!(matches!(
            db.soft_delete_exercise(exercise.id, admin()).await,
            Err(DeleteError::Conflict(_))
        ));

        // Soft-deleted exercises disappear from listings but stay readable.
        assert_eq!(db.read_exercises(admin()).await.unwrap(), vec![]);
        assert!(db.read_exercise(exercise.id).await.unwrap().is_deleted());

        let restored = db.restore_exercise(exercise.id, admin()).await.unwrap();
        assert!(!restored.is_deleted());
        assert!(matches!(
            db.restore_exercise(exercise.id, admin()).await,
            Err(UpdateError::Conflict(_))
        ));

        let log = db.read_change_log(exercise.id).await.unwrap();
        assert_eq!(
            log.iter().map(|l| l.change).collect::<Vec<_>>(),
            vec![
                ChangeType::Create,
                ChangeType::Delete,
                ChangeType::Restore
            ]
        );
    }

    #[tokio::test]
    async fn test_usage_of_unreferenced_exercise_is_empty() {
        let (db, _dir) = setup_db().await;
        let exercise = create_exercise(&db, "Bench Press", MuscleGroup::Chest).await;

        let usage = db.exercise_usage(exercise.id).await.unwrap();
        assert!(!usage.is_used());
    }
}
