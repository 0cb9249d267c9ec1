/// SQLite implementation of the metrics and profile stores
///
/// This module handles all SQL queries and the conversion between rows
/// and domain types.

use std::path::PathBuf;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{Gender, HealthMetricRecord, MetricId, MetricReading, UserId, UserProfile};
use crate::storage::{migrations, DateOrder, MetricsStore, ProfileStore, StorageError};

const METRIC_COLUMNS: &str = "id, user_id, recorded_on, logged_at, weight_kg, blood_pressure,
    heart_rate, sleep_hours, steps, calories_burned";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// both `MetricsStore` and `ProfileStore`.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Create a storage instance backed by a private in-memory database
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    /// Convert a `health_metrics` row selected with `METRIC_COLUMNS`
    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<HealthMetricRecord> {
        let id_str: String = row.get(0)?;
        let id = MetricId::from_string(&id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(0, "Invalid UUID".to_string(), rusqlite::types::Type::Text)
        })?;

        let user_id_str: String = row.get(1)?;
        let user_id = UserId::parse(&user_id_str).map_err(|_| {
            rusqlite::Error::InvalidColumnType(1, "Invalid user ID".to_string(), rusqlite::types::Type::Text)
        })?;

        let recorded_on: NaiveDate = row.get(2)?;
        let logged_at: DateTime<Utc> = row.get(3)?;

        let reading = MetricReading {
            weight_kg: row.get(4)?,
            blood_pressure: row.get(5)?,
            heart_rate: row.get(6)?,
            sleep_hours: row.get(7)?,
            steps: row.get(8)?,
            calories_burned: row.get(9)?,
        };

        Ok(HealthMetricRecord::from_existing(id, user_id, recorded_on, logged_at, reading))
    }

    /// Map a unique-index violation onto a duplicate record error
    fn map_insert_error(err: rusqlite::Error, record: &HealthMetricRecord) -> StorageError {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StorageError::DuplicateRecord {
                    user_id: record.user_id.to_string(),
                    date: record.recorded_on.to_string(),
                }
            }
            _ => StorageError::Query(err),
        }
    }
}

impl MetricsStore for SqliteStorage {
    fn insert_metric(&self, record: &HealthMetricRecord) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT INTO health_metrics (
                    id, user_id, recorded_on, logged_at, weight_kg, blood_pressure,
                    heart_rate, sleep_hours, steps, calories_burned
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    record.id.to_string(),
                    record.user_id.as_str(),
                    record.recorded_on,
                    record.logged_at,
                    record.weight_kg,
                    record.blood_pressure,
                    record.heart_rate,
                    record.sleep_hours,
                    record.steps,
                    record.calories_burned
                ],
            )
            .map_err(|e| Self::map_insert_error(e, record))?;

        tracing::debug!("Stored metrics for {} on {}", record.user_id, record.recorded_on);
        Ok(())
    }

    fn fetch_recent_metrics(
        &self,
        user_id: &UserId,
        limit: u32,
        order: DateOrder,
    ) -> Result<Vec<HealthMetricRecord>, StorageError> {
        let newest_first = format!(
            "SELECT {} FROM health_metrics WHERE user_id = ?1
             ORDER BY recorded_on DESC LIMIT ?2",
            METRIC_COLUMNS
        );
        let sql = match order {
            DateOrder::NewestFirst => newest_first,
            // Same window, flipped
            DateOrder::OldestFirst => format!(
                "SELECT {} FROM ({}) ORDER BY recorded_on ASC",
                METRIC_COLUMNS, newest_first
            ),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let record_iter = stmt.query_map(params![user_id.as_str(), limit], Self::row_to_record)?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }

        tracing::debug!("Fetched {} metric records for {}", records.len(), user_id);
        Ok(records)
    }
}

impl ProfileStore for SqliteStorage {
    fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO user_profiles (user_id, date_of_birth, gender, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE SET
                date_of_birth = excluded.date_of_birth,
                gender = excluded.gender,
                updated_at = excluded.updated_at",
            params![
                profile.user_id.as_str(),
                profile.date_of_birth,
                profile.gender.map(|g| g.as_str()),
                Utc::now()
            ],
        )?;

        tracing::debug!("Saved profile for {}", profile.user_id);
        Ok(())
    }

    fn fetch_user_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT date_of_birth, gender FROM user_profiles WHERE user_id = ?1",
                params![user_id.as_str()],
                |row| {
                    let date_of_birth: NaiveDate = row.get(0)?;
                    let gender: Option<String> = row.get(1)?;
                    Ok((date_of_birth, gender))
                },
            )
            .optional()?;

        let Some((date_of_birth, gender)) = row else {
            return Ok(None);
        };

        let gender = gender
            .map(|g| g.parse::<Gender>())
            .transpose()
            .map_err(|e| StorageError::CorruptRow(format!("user_profiles.gender for {}: {}", user_id, e)))?;

        Ok(Some(UserProfile::from_existing(user_id.clone(), date_of_birth, gender)))
    }
}
