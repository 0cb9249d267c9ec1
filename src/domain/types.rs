/// Core identifier and enum types used throughout the domain layer
///
/// This module defines the ID types and the Gender enum that are shared by
/// HealthMetricRecord, UserProfile and the storage layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::DomainError;

/// Identifier of a user owned by the surrounding service
///
/// User accounts live outside this crate, so the ID is an opaque string
/// rather than a UUID we generate ourselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Parse and validate a user ID coming from a tool call or the database
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidUserId(
                "User ID cannot be empty".to_string()
            ));
        }

        if trimmed.len() > 64 {
            return Err(DomainError::InvalidUserId(
                "User ID cannot be longer than 64 characters".to_string()
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the raw ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a single metric record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricId(pub Uuid);

impl MetricId {
    /// Generate a new random metric ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a metric ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for MetricId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender as recorded on the user profile
///
/// Risk scoring does not use this yet; it is stored so the profile round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Lowercase name used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(DomainError::Validation {
                message: format!("Invalid gender '{}'. Valid options: male, female, other", other),
            }),
        }
    }
}
