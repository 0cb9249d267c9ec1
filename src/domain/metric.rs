/// HealthMetricRecord entity for a single day's measurements
///
/// This module defines the daily snapshot that the insight and risk
/// calculations run over, along with its validation rules.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, MetricId, UserId};

/// Raw numeric values for one day, before they are attached to a user and date
///
/// Tool calls and tests build one of these and hand it to
/// `HealthMetricRecord::new`, which validates every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricReading {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Systolic-equivalent blood pressure (single value, mmHg)
    pub blood_pressure: f64,
    /// Resting heart rate in beats per minute
    pub heart_rate: u32,
    /// Sleep duration in hours
    pub sleep_hours: f64,
    /// Step count for the day
    pub steps: u32,
    /// Calories burned for the day
    pub calories_burned: u32,
}

/// One user's health measurement snapshot for a calendar day
///
/// Records are immutable once stored. Analysis expects them ordered
/// newest first, which is how the metrics store returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetricRecord {
    /// Unique identifier for this record
    pub id: MetricId,
    /// Owner of the record
    pub user_id: UserId,
    /// Which day the measurements describe
    pub recorded_on: NaiveDate,
    /// When this record was logged
    pub logged_at: DateTime<Utc>,
    pub weight_kg: f64,
    pub blood_pressure: f64,
    pub heart_rate: u32,
    pub sleep_hours: f64,
    pub steps: u32,
    pub calories_burned: u32,
}

impl HealthMetricRecord {
    /// Create a new record with validation
    ///
    /// The logged_at timestamp is set to the current time.
    pub fn new(
        user_id: UserId,
        recorded_on: NaiveDate,
        reading: MetricReading,
    ) -> Result<Self, DomainError> {
        Self::validate_recorded_on(&recorded_on)?;
        Self::validate_reading(&reading)?;

        Ok(Self::from_existing(
            MetricId::new(),
            user_id,
            recorded_on,
            Utc::now(),
            reading,
        ))
    }

    /// Create a record from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated.
    pub fn from_existing(
        id: MetricId,
        user_id: UserId,
        recorded_on: NaiveDate,
        logged_at: DateTime<Utc>,
        reading: MetricReading,
    ) -> Self {
        Self {
            id,
            user_id,
            recorded_on,
            logged_at,
            weight_kg: reading.weight_kg,
            blood_pressure: reading.blood_pressure,
            heart_rate: reading.heart_rate,
            sleep_hours: reading.sleep_hours,
            steps: reading.steps,
            calories_burned: reading.calories_burned,
        }
    }

    /// The numeric values of this record
    pub fn reading(&self) -> MetricReading {
        MetricReading {
            weight_kg: self.weight_kg,
            blood_pressure: self.blood_pressure,
            heart_rate: self.heart_rate,
            sleep_hours: self.sleep_hours,
            steps: self.steps,
            calories_burned: self.calories_burned,
        }
    }

    // Validation helper methods

    /// Snapshots describe days that already happened
    fn validate_recorded_on(date: &NaiveDate) -> Result<(), DomainError> {
        let today = Utc::now().date_naive();

        if *date > today {
            return Err(DomainError::InvalidDate(
                "Cannot record metrics for future dates".to_string()
            ));
        }

        Ok(())
    }

    /// All numeric fields must be non-negative; floats must also be finite
    fn validate_reading(reading: &MetricReading) -> Result<(), DomainError> {
        Self::validate_measure("Weight", reading.weight_kg)?;
        Self::validate_measure("Blood pressure", reading.blood_pressure)?;
        Self::validate_measure("Sleep hours", reading.sleep_hours)?;

        if reading.sleep_hours > 24.0 {
            return Err(DomainError::InvalidValue {
                message: "Sleep hours cannot exceed 24".to_string()
            });
        }

        Ok(())
    }

    fn validate_measure(label: &str, value: f64) -> Result<(), DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidValue {
                message: format!("{} must be a finite number", label)
            });
        }
        if value < 0.0 {
            return Err(DomainError::InvalidValue {
                message: format!("{} cannot be negative", label)
            });
        }
        Ok(())
    }
}
