/// Schema versioning for the metrics database

use std::cmp::Ordering;

use rusqlite::{Connection, OptionalExtension};
use crate::storage::StorageError;

/// Schema version this build writes
const CURRENT_VERSION: i32 = 1;

/// Bring the schema up to `CURRENT_VERSION`
///
/// Safe to call on every open. Pending migrations run in one transaction,
/// so a failure leaves the previous version in place.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);")?;

    let found = get_current_version(conn)?;
    match found.cmp(&CURRENT_VERSION) {
        Ordering::Equal => Ok(()),
        Ordering::Greater => Err(StorageError::Migration(format!(
            "database is at schema version {} but this build only knows {}",
            found, CURRENT_VERSION
        ))),
        Ordering::Less => {
            let tx = conn.unchecked_transaction()?;
            for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > found) {
                tx.execute_batch(sql)
                    .map_err(|e| StorageError::Migration(format!("v{} failed: {}", version, e)))?;
                tracing::info!("Applied schema migration v{}", version);
            }
            set_version(&tx, CURRENT_VERSION)?;
            tx.commit()?;
            Ok(())
        }
    }
}

/// Schema version recorded in the database, 0 when none is
fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0)
        })
        .optional()?
        .flatten();

    Ok(version.unwrap_or(0))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Ordered (version, SQL) pairs; the last entry's version is `CURRENT_VERSION`
const MIGRATIONS: &[(i32, &str)] = &[(1, MIGRATION_V1)];

/// Profiles and one metric snapshot per user per day
const MIGRATION_V1: &str = "
    CREATE TABLE IF NOT EXISTS user_profiles (
        user_id TEXT PRIMARY KEY,
        date_of_birth TEXT NOT NULL,
        gender TEXT,
        updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS health_metrics (
        id TEXT PRIMARY KEY,
        user_id TEXT NOT NULL,
        recorded_on TEXT NOT NULL,
        logged_at TEXT NOT NULL,
        weight_kg REAL NOT NULL CHECK (weight_kg >= 0),
        blood_pressure REAL NOT NULL CHECK (blood_pressure >= 0),
        heart_rate INTEGER NOT NULL CHECK (heart_rate >= 0),
        sleep_hours REAL NOT NULL CHECK (sleep_hours >= 0),
        steps INTEGER NOT NULL CHECK (steps >= 0),
        calories_burned INTEGER NOT NULL CHECK (calories_burned >= 0)
    );

    CREATE INDEX IF NOT EXISTS idx_health_metrics_user_recorded
        ON health_metrics (user_id, recorded_on DESC);

    CREATE UNIQUE INDEX IF NOT EXISTS idx_health_metrics_unique_day
        ON health_metrics (user_id, recorded_on);
";
