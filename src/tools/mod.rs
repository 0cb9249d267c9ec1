/// MCP tools for health metrics and analysis
///
/// Each tool validates its arguments at the boundary, talks to the stores
/// through their traits and returns a serializable response with a
/// human-readable `message`.

pub mod insights;
pub mod metrics;
pub mod profile;
pub mod risk;

// Re-export tool functions for easy access
pub use insights::*;
pub use metrics::*;
pub use profile::*;
pub use risk::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::DomainError;
use crate::storage::StorageError;

/// Errors a tool call can produce
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Parse a YYYY-MM-DD argument
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ToolError::InvalidArguments(format!(
            "{} must be a date in YYYY-MM-DD format, got '{}'",
            field, value
        ))
    })
}
