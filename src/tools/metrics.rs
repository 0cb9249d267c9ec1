/// Tools for logging and listing daily metric snapshots
///
/// This module implements the metric_log and metric_history MCP tools.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::INSIGHT_WINDOW;
use crate::domain::{HealthMetricRecord, MetricReading, UserId};
use crate::storage::{DateOrder, MetricsStore};
use crate::tools::{parse_date, ToolError};

/// Parameters for logging one day's metrics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMetricParams {
    /// User the measurements belong to
    pub user_id: String,
    /// Day measured (YYYY-MM-DD, optional - defaults to today)
    pub date: Option<String>,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Blood pressure (systolic, mmHg)
    pub blood_pressure: f64,
    /// Resting heart rate in bpm
    pub heart_rate: u32,
    /// Hours slept
    pub sleep_hours: f64,
    /// Step count
    pub steps: u32,
    /// Calories burned
    pub calories_burned: u32,
}

/// Response from logging metrics
#[derive(Debug, Serialize)]
pub struct LogMetricResponse {
    pub success: bool,
    pub record: HealthMetricRecord,
    pub message: String,
}

/// Validate and store a day's metrics
pub fn log_metric<S: MetricsStore + ?Sized>(
    store: &S,
    params: LogMetricParams,
) -> Result<LogMetricResponse, ToolError> {
    let user_id = UserId::parse(&params.user_id)?;
    let recorded_on = match params.date.as_deref() {
        Some(date) => parse_date("date", date)?,
        None => Utc::now().date_naive(),
    };

    let reading = MetricReading {
        weight_kg: params.weight_kg,
        blood_pressure: params.blood_pressure,
        heart_rate: params.heart_rate,
        sleep_hours: params.sleep_hours,
        steps: params.steps,
        calories_burned: params.calories_burned,
    };

    let record = HealthMetricRecord::new(user_id, recorded_on, reading)?;
    store.insert_metric(&record)?;

    let message = format!(
        "✅ Logged metrics for {} on {}: {:.1} kg, BP {:.0}, {:.1} h sleep, {} steps",
        record.user_id, record.recorded_on, record.weight_kg,
        record.blood_pressure, record.sleep_hours, record.steps
    );

    Ok(LogMetricResponse {
        success: true,
        record,
        message,
    })
}

/// Parameters for listing recent metrics
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MetricHistoryParams {
    /// User whose history to list
    pub user_id: String,
    /// How many recent days to return (1-30, default 7)
    pub limit: Option<u32>,
    /// Return the window oldest first instead of newest first
    pub oldest_first: Option<bool>,
}

/// Response from listing metrics
#[derive(Debug, Serialize)]
pub struct MetricHistoryResponse {
    pub records: Vec<HealthMetricRecord>,
    pub message: String,
}

/// List a user's most recent records
pub fn metric_history<S: MetricsStore + ?Sized>(
    store: &S,
    params: MetricHistoryParams,
) -> Result<MetricHistoryResponse, ToolError> {
    let user_id = UserId::parse(&params.user_id)?;

    let limit = params.limit.unwrap_or(7);
    if limit == 0 || limit > INSIGHT_WINDOW {
        return Err(ToolError::InvalidArguments(format!(
            "limit must be between 1 and {}, got {}",
            INSIGHT_WINDOW, limit
        )));
    }

    let order = if params.oldest_first.unwrap_or(false) {
        DateOrder::OldestFirst
    } else {
        DateOrder::NewestFirst
    };

    let records = store.fetch_recent_metrics(&user_id, limit, order)?;

    let message = if records.is_empty() {
        format!("No metrics recorded for {} yet.", user_id)
    } else {
        let lines = records
            .iter()
            .map(|r| {
                format!(
                    "📅 {} | ⚖️ {:.1} kg | 🩺 BP {:.0} | ❤️ {} bpm | 😴 {:.1} h | 👟 {} steps | 🔥 {} kcal",
                    r.recorded_on, r.weight_kg, r.blood_pressure, r.heart_rate,
                    r.sleep_hours, r.steps, r.calories_burned
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("📋 Last {} day(s) for {}\n\n{}", records.len(), user_id, lines)
    };

    Ok(MetricHistoryResponse { records, message })
}
