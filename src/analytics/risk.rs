/// Additive cardiometabolic risk scoring
///
/// Four factors contribute integer points: age, blood pressure, BMI and
/// activity. The total picks the tier. Like the insight engine this is a
/// pure function of the profile and records handed in.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::insights::average;
use crate::domain::{HealthMetricRecord, UserProfile};

/// How many of the newest records feed the risk score
pub const RISK_WINDOW: u32 = 7;

/// Height assumed for every user when deriving BMI, in meters
///
/// No per-user height is modeled, so BMI is only an approximation.
pub const ASSUMED_HEIGHT_M: f64 = 1.70;

pub const RISK_RECOMMEND_BLOOD_PRESSURE: &str =
    "Consult with a healthcare provider about blood pressure management";
pub const RISK_RECOMMEND_WEIGHT: &str =
    "Consider working with a nutritionist to reach a healthy weight";
pub const RISK_RECOMMEND_ACTIVITY: &str =
    "Increase daily physical activity to at least 7,500 steps";

/// Overall risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Not enough data to score
    Unknown,
}

impl RiskLevel {
    /// Tier for a total score
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 6 => RiskLevel::High,
            s if s >= 3 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }
}

/// Which part of the profile or metrics raised a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Age,
    BloodPressure,
    Weight,
    Activity,
}

impl FactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::Age => "age",
            FactorKind::BloodPressure => "blood_pressure",
            FactorKind::Weight => "weight",
            FactorKind::Activity => "activity",
        }
    }
}

/// Severity of a single factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorLevel {
    Medium,
    High,
}

/// One contributing element of the risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: FactorKind,
    pub level: FactorLevel,
    pub description: String,
}

impl RiskFactor {
    fn new(factor: FactorKind, level: FactorLevel, description: impl Into<String>) -> Self {
        Self {
            factor,
            level,
            description: description.into(),
        }
    }
}

/// Result of scoring one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub factors: Vec<RiskFactor>,
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    /// Assessment returned when there is no profile or no data
    pub fn unknown() -> Self {
        Self {
            risk_level: RiskLevel::Unknown,
            risk_score: 0,
            factors: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Check whether a factor of the given kind was raised
    pub fn has_factor(&self, kind: FactorKind) -> bool {
        self.factors.iter().any(|f| f.factor == kind)
    }
}

/// Score a user against today's date
///
/// `records` should be the newest `RISK_WINDOW` records; anything beyond
/// that is ignored.
pub fn compute_risk_assessment(
    profile: Option<&UserProfile>,
    records: &[HealthMetricRecord],
) -> RiskAssessment {
    compute_risk_assessment_on(profile, records, Utc::now().date_naive())
}

/// Score a user as of the given day
pub fn compute_risk_assessment_on(
    profile: Option<&UserProfile>,
    records: &[HealthMetricRecord],
    today: NaiveDate,
) -> RiskAssessment {
    let profile = match profile {
        Some(profile) if !records.is_empty() => profile,
        _ => return RiskAssessment::unknown(),
    };

    let window = &records[..records.len().min(RISK_WINDOW as usize)];
    let mut score = 0;
    let mut factors = Vec::new();
    let mut recommendations = Vec::new();

    // Age
    let age = profile.age_on(today);
    if age > 65 {
        factors.push(RiskFactor::new(
            FactorKind::Age,
            FactorLevel::High,
            format!("Age {} increases risk for multiple conditions", age),
        ));
        score += 3;
    } else if age > 45 {
        factors.push(RiskFactor::new(
            FactorKind::Age,
            FactorLevel::Medium,
            format!("Age {} moderately increases risk", age),
        ));
        score += 1;
    }

    // Blood pressure
    let avg_pressure = average(window.iter().map(|r| r.blood_pressure));
    if avg_pressure >= 140.0 {
        factors.push(RiskFactor::new(
            FactorKind::BloodPressure,
            FactorLevel::High,
            "High blood pressure significantly increases cardiovascular risk",
        ));
        recommendations.push(RISK_RECOMMEND_BLOOD_PRESSURE.to_string());
        score += 3;
    } else if avg_pressure >= 130.0 {
        factors.push(RiskFactor::new(
            FactorKind::BloodPressure,
            FactorLevel::Medium,
            "Elevated blood pressure",
        ));
        score += 1;
    }

    // BMI
    let bmi = average(window.iter().map(|r| r.weight_kg)) / (ASSUMED_HEIGHT_M * ASSUMED_HEIGHT_M);
    if bmi >= 30.0 {
        factors.push(RiskFactor::new(FactorKind::Weight, FactorLevel::High, "Obesity"));
        recommendations.push(RISK_RECOMMEND_WEIGHT.to_string());
        score += 2;
    } else if bmi >= 25.0 {
        factors.push(RiskFactor::new(FactorKind::Weight, FactorLevel::Medium, "Overweight"));
        score += 1;
    }

    // Activity
    let avg_steps = average(window.iter().map(|r| f64::from(r.steps)));
    if avg_steps < 5000.0 {
        factors.push(RiskFactor::new(
            FactorKind::Activity,
            FactorLevel::High,
            "Low physical activity increases risk for multiple conditions",
        ));
        recommendations.push(RISK_RECOMMEND_ACTIVITY.to_string());
        score += 2;
    } else if avg_steps < 7500.0 {
        factors.push(RiskFactor::new(
            FactorKind::Activity,
            FactorLevel::Medium,
            "Moderate physical activity",
        ));
        score += 1;
    }

    tracing::debug!(
        "Risk score {} (age {}, bp {:.1}, bmi {:.1}, steps {:.0})",
        score, age, avg_pressure, bmi, avg_steps
    );

    RiskAssessment {
        risk_level: RiskLevel::from_score(score),
        risk_score: score,
        factors,
        recommendations,
    }
}
