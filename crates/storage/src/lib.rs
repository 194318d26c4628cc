#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! SQLite persistence for the liftlog domain repositories.
//!
//! Every multi-row mutation runs inside one transaction; durability and
//! isolation are delegated to SQLite. Catalog mutations additionally append
//! their change-log row within the same transaction.

pub mod exercises;
pub mod migration;
pub mod schedule;
pub mod schema;
pub mod users;
pub mod workouts;

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use liftlog_domain::StorageError;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::Other(Box::new(e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(db_err)?;

        sqlx::query(schema::SCHEMA)
            .execute(&pool)
            .await
            .map_err(db_err)?;

        info!("database initialized at {}", path.display());
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

pub(crate) fn db_err(err: sqlx::Error) -> StorageError {
    StorageError::Database(Box::new(err))
}

pub(crate) fn parse_uuid(value: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(value).map_err(|e| StorageError::Other(Box::new(e)))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, StorageError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| StorageError::Other(Box::new(e)))
}

pub(crate) fn parse_datetime(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Other(Box::new(e)))
}
