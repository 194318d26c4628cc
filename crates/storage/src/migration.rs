//! One-time backfill of exercise snapshots onto workout exercises that
//! predate the snapshot pattern. Operational tooling, not part of the
//! request-time core; exposed through the `liftlog-migrate` binary.

use chrono::Utc;
use liftlog_domain::{ExerciseSnapshot, StorageError};
use log::warn;
use sqlx::Row;

use crate::{Database, db_err, exercises::row_to_exercise};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackfillReport {
    pub backfilled: u64,
    /// Rows whose exercise no longer exists; these stay without a snapshot
    /// and are dropped from aggregation at read time.
    pub skipped: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotCoverage {
    pub total: u64,
    pub missing: u64,
}

/// Embeds a snapshot into every workout exercise that has none, preferring
/// the replacement exercise when one was logged. The whole backfill is one
/// transaction; touched rows are recorded so it can be rolled back.
pub async fn backfill_snapshots(db: &Database) -> Result<BackfillReport, StorageError> {
    let mut tx = db.pool().begin().await.map_err(db_err)?;

    let candidates = sqlx::query(
        "SELECT id, is_replaced, original_exercise_id, replacement_exercise_id \
         FROM workout_exercises WHERE exercise_snapshot IS NULL",
    )
    .fetch_all(&mut *tx)
    .await
    .map_err(db_err)?;

    let mut report = BackfillReport {
        backfilled: 0,
        skipped: 0,
    };

    for candidate in &candidates {
        let id: String = candidate.get("id");
        let is_replaced: bool = candidate.get("is_replaced");
        let original: String = candidate.get("original_exercise_id");
        let replacement: Option<String> = candidate.get("replacement_exercise_id");

        let target = if is_replaced {
            replacement.unwrap_or(original)
        } else {
            original
        };
        let row = sqlx::query(
            "SELECT id, name, description, muscle_group, equipment, video_url, owner_id, \
             links, is_deleted, deleted_at, deleted_by, created_at, updated_at \
             FROM exercises WHERE id = ?",
        )
        .bind(&target)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;

        let Some(row) = row else {
            warn!("workout exercise {id}: exercise {target} is gone, leaving row unmigrated");
            report.skipped += 1;
            continue;
        };
        let exercise = row_to_exercise(&row)?;
        let snapshot = ExerciseSnapshot::of(&exercise, Utc::now());

        sqlx::query("UPDATE workout_exercises SET exercise_snapshot = ? WHERE id = ?")
            .bind(serde_json::to_string(&snapshot).map_err(|e| StorageError::Other(Box::new(e)))?)
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        sqlx::query("INSERT OR IGNORE INTO snapshot_backfill (workout_exercise_id) VALUES (?)")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        report.backfilled += 1;
    }

    tx.commit().await.map_err(db_err)?;
    Ok(report)
}

/// Reports how many workout exercises still lack a snapshot.
pub async fn verify_snapshots(db: &Database) -> Result<SnapshotCoverage, StorageError> {
    let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workout_exercises")
        .fetch_one(db.pool())
        .await
        .map_err(db_err)?;
    let missing: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM workout_exercises WHERE exercise_snapshot IS NULL",
    )
    .fetch_one(db.pool())
    .await
    .map_err(db_err)?;
    #[allow(clippy::cast_sign_loss)]
    Ok(SnapshotCoverage {
        total: total.0 as u64,
        missing: missing.0 as u64,
    })
}

/// Removes exactly the snapshots written by `backfill_snapshots`. Intended
/// for testing the migration; snapshots written at logging time are left
/// untouched.
pub async fn rollback_backfill(db: &Database) -> Result<u64, StorageError> {
    let mut tx = db.pool().begin().await.map_err(db_err)?;
    let result = sqlx::query(
        "UPDATE workout_exercises SET exercise_snapshot = NULL WHERE id IN \
         (SELECT workout_exercise_id FROM snapshot_backfill)",
    )
    .execute(&mut *tx)
    .await
    .map_err(db_err)?;
    sqlx::query("DELETE FROM snapshot_backfill")
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;
    tx.commit().await.map_err(db_err)?;
    Ok(result.rows_affected())
}
