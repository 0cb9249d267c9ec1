/// Domain module containing the health data types and their validation
///
/// This module defines the entities the analysis core consumes
/// (HealthMetricRecord, UserProfile) and the rules that keep them valid
/// before they ever reach an insight or risk calculation.

pub mod metric;
pub mod profile;
pub mod types;

// Re-export public types for easy access
pub use metric::*;
pub use profile::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid value: {message}")]
    InvalidValue { message: String },
}
