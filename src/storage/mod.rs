/// Storage layer for health metric records and user profiles
///
/// The analysis core only ever talks to the `MetricsStore` and
/// `ProfileStore` traits. `SqliteStorage` is the implementation the MCP
/// server runs with.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{HealthMetricRecord, UserId, UserProfile};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Corrupt row: {0}")]
    CorruptRow(String),

    #[error("Duplicate record: user {user_id} already has metrics for {date}")]
    DuplicateRecord { user_id: String, date: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Order in which recent records are returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    NewestFirst,
    OldestFirst,
}

/// Source of a user's metric history
pub trait MetricsStore {
    /// Store a new daily snapshot
    fn insert_metric(&self, record: &HealthMetricRecord) -> Result<(), StorageError>;

    /// Get the `limit` most recent records for a user, in the requested order
    fn fetch_recent_metrics(
        &self,
        user_id: &UserId,
        limit: u32,
        order: DateOrder,
    ) -> Result<Vec<HealthMetricRecord>, StorageError>;
}

/// Source of user profiles
pub trait ProfileStore {
    /// Create or replace a user's profile
    fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    /// Get a user's profile; a missing profile is `None`, not an error
    fn fetch_user_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError>;
}
