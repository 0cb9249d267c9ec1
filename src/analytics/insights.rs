/// Trend and status insights over a user's recent metric records
///
/// Everything in here is a pure function of the records passed in. The
/// caller fetches up to `INSIGHT_WINDOW` records, newest first.

use serde::{Deserialize, Serialize};
use crate::domain::HealthMetricRecord;

/// How many records the caller should fetch for insight generation
pub const INSIGHT_WINDOW: u32 = 30;

/// Records needed before a weight trend is reported
pub const WEIGHT_TREND_WINDOW: usize = 7;

/// Weight change (kg) across the trend window that triggers a recommendation
const WEIGHT_CHANGE_ALERT_KG: f64 = 2.0;

pub const RECOMMEND_WEIGHT_GAIN: &str =
    "Consider adjusting your diet and increasing physical activity to manage weight gain";
pub const RECOMMEND_WEIGHT_LOSS: &str =
    "Ensure you're maintaining a balanced diet with adequate nutrition";
pub const RECOMMEND_BLOOD_PRESSURE: &str =
    "Consider consulting with a healthcare provider about your blood pressure";
pub const RECOMMEND_SLEEP: &str =
    "Aim for 7-9 hours of sleep per night for optimal health";

/// Direction of weight change across the trend window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Trend::Increasing
        } else if change < 0.0 {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }
}

/// Classification of the average blood pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureStatus {
    Normal,
    Elevated,
    High,
}

impl BloodPressureStatus {
    fn classify(average: f64) -> Self {
        if average < 120.0 {
            BloodPressureStatus::Normal
        } else if average < 140.0 {
            BloodPressureStatus::Elevated
        } else {
            BloodPressureStatus::High
        }
    }
}

/// Classification of the average nightly sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Good,
    Fair,
    Poor,
}

impl SleepQuality {
    fn classify(average_hours: f64) -> Self {
        if average_hours >= 7.0 {
            SleepQuality::Good
        } else if average_hours >= 6.0 {
            SleepQuality::Fair
        } else {
            SleepQuality::Poor
        }
    }
}

/// A derived trend or status summary, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Insight {
    /// Average weight over the trend window and the newest-minus-oldest change
    Weight { value: f64, change: f64, trend: Trend },
    /// Average blood pressure over every supplied record
    BloodPressure { value: f64, status: BloodPressureStatus },
    /// Average sleep hours over every supplied record
    Sleep { value: f64, status: SleepQuality },
}

impl Insight {
    /// The type tag as it appears in serialized output
    pub fn kind(&self) -> &'static str {
        match self {
            Insight::Weight { .. } => "weight",
            Insight::BloodPressure { .. } => "blood_pressure",
            Insight::Sleep { .. } => "sleep",
        }
    }
}

/// Insights plus the recommendations they triggered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub insights: Vec<Insight>,
    pub recommendations: Vec<String>,
}

/// Compute insights from records ordered newest first
///
/// Output order is always weight (when at least seven records exist),
/// blood pressure, sleep. An empty slice yields an empty report.
pub fn compute_insights(records: &[HealthMetricRecord]) -> InsightReport {
    let mut report = InsightReport::default();

    if records.is_empty() {
        return report;
    }

    if records.len() >= WEIGHT_TREND_WINDOW {
        let window = &records[..WEIGHT_TREND_WINDOW];
        let value = average(window.iter().map(|r| r.weight_kg));
        let change = window[0].weight_kg - window[WEIGHT_TREND_WINDOW - 1].weight_kg;
        let trend = Trend::from_change(change);

        report.insights.push(Insight::Weight { value, change, trend });

        if change.abs() > WEIGHT_CHANGE_ALERT_KG {
            let advice = match trend {
                Trend::Increasing => RECOMMEND_WEIGHT_GAIN,
                _ => RECOMMEND_WEIGHT_LOSS,
            };
            report.recommendations.push(advice.to_string());
        }
    }

    let avg_pressure = average(records.iter().map(|r| r.blood_pressure));
    let pressure_status = BloodPressureStatus::classify(avg_pressure);
    report.insights.push(Insight::BloodPressure {
        value: avg_pressure,
        status: pressure_status,
    });
    if pressure_status == BloodPressureStatus::High {
        report.recommendations.push(RECOMMEND_BLOOD_PRESSURE.to_string());
    }

    let avg_sleep = average(records.iter().map(|r| r.sleep_hours));
    report.insights.push(Insight::Sleep {
        value: avg_sleep,
        status: SleepQuality::classify(avg_sleep),
    });
    if avg_sleep < 7.0 {
        report.recommendations.push(RECOMMEND_SLEEP.to_string());
    }

    tracing::debug!(
        "Computed {} insights and {} recommendations from {} records",
        report.insights.len(),
        report.recommendations.len(),
        records.len()
    );

    report
}

/// Arithmetic mean; callers guarantee at least one value
pub(crate) fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
