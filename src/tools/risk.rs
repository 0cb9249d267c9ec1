/// Tools for risk assessment and risk factor reference
///
/// This module implements the risk_assessment, risk_compare and
/// risk_factors MCP tools.

use chrono::{Duration, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    risk_factor_catalog, suggest_interventions, AnalyticsEngine, Intervention, RiskAssessment,
    RiskFactorInfo, RiskLevel, RISK_WINDOW,
};
use crate::domain::{HealthMetricRecord, MetricReading, UserId};
use crate::storage::{MetricsStore, ProfileStore};
use crate::tools::ToolError;

/// Parameters for a risk assessment
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RiskAssessmentParams {
    /// User to assess
    pub user_id: String,
}

/// Response from a risk assessment
#[derive(Debug, Serialize)]
pub struct RiskAssessmentResponse {
    #[serde(flatten)]
    pub assessment: RiskAssessment,
    pub interventions: Vec<Intervention>,
    pub message: String,
}

/// Score a user's risk and suggest interventions for what was found
pub fn get_risk_assessment<S: MetricsStore + ProfileStore + ?Sized>(
    engine: &AnalyticsEngine,
    store: &S,
    params: RiskAssessmentParams,
) -> Result<RiskAssessmentResponse, ToolError> {
    let user_id = UserId::parse(&params.user_id)?;
    let assessment = engine.risk_assessment(store, store, &user_id)?;
    let interventions = suggest_interventions(&assessment);
    let message = render_assessment(&user_id, &assessment, &interventions);

    Ok(RiskAssessmentResponse {
        assessment,
        interventions,
        message,
    })
}

fn render_assessment(
    user_id: &UserId,
    assessment: &RiskAssessment,
    interventions: &[Intervention],
) -> String {
    if assessment.risk_level == RiskLevel::Unknown {
        return format!(
            "❔ Risk for {} is unknown. A profile with date of birth and at least one day of metrics is needed.",
            user_id
        );
    }

    let mut lines = vec![format!(
        "🛡️ **Risk Assessment** for {}: {} (score {})",
        user_id,
        assessment.risk_level.as_str(),
        assessment.risk_score
    )];

    if assessment.factors.is_empty() {
        lines.push("No risk factors found. Keep it up!".to_string());
    } else {
        lines.push(String::new());
        lines.extend(assessment.factors.iter().map(|f| {
            format!("- {} ({:?}): {}", f.factor.as_str(), f.level, f.description)
        }));
    }

    if !assessment.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("📝 **Recommendations**".to_string());
        lines.extend(assessment.recommendations.iter().map(|r| format!("- {}", r)));
    }

    if !interventions.is_empty() {
        lines.push(String::new());
        lines.push("🎯 **Suggested Interventions**".to_string());
        lines.extend(interventions.iter().map(|i| {
            format!("- {}: {} (expected: {}, in {})", i.name, i.description, i.expected_benefit, i.time_to_effect)
        }));
    }

    lines.join("\n")
}

/// Most scenarios a single comparison may carry
pub const MAX_SCENARIOS: usize = 10;

/// A hypothetical set of daily readings to score
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RiskScenario {
    /// Label for the scenario (optional - defaults to "Scenario N")
    pub name: Option<String>,
    /// Daily readings, newest first (1 to 7)
    pub readings: Vec<MetricReading>,
}

/// Parameters for comparing risk under several scenarios
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CompareRisksParams {
    /// User whose profile the scenarios are scored against
    pub user_id: String,
    /// Scenarios to score, in the order results should be returned
    pub scenarios: Vec<RiskScenario>,
}

/// Result for one scenario: an assessment, or why it could not be scored
#[derive(Debug, Serialize)]
pub struct ScenarioOutcome {
    pub scenario_id: usize,
    pub scenario_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RiskAssessment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response from a scenario comparison
#[derive(Debug, Serialize)]
pub struct CompareRisksResponse {
    pub scenarios: Vec<ScenarioOutcome>,
    pub total_scenarios: usize,
    pub message: String,
}

/// Score each scenario against the user's stored profile
///
/// A scenario with invalid readings gets an error entry; the others are
/// still scored.
pub fn compare_risk_scenarios<S: ProfileStore + ?Sized>(
    engine: &AnalyticsEngine,
    store: &S,
    params: CompareRisksParams,
) -> Result<CompareRisksResponse, ToolError> {
    let user_id = UserId::parse(&params.user_id)?;

    if params.scenarios.is_empty() || params.scenarios.len() > MAX_SCENARIOS {
        return Err(ToolError::InvalidArguments(format!(
            "scenarios must contain between 1 and {} entries, got {}",
            MAX_SCENARIOS,
            params.scenarios.len()
        )));
    }

    let today = Utc::now().date_naive();
    let built: Vec<Result<Vec<HealthMetricRecord>, String>> = params
        .scenarios
        .iter()
        .map(|scenario| scenario_records(&user_id, today, &scenario.readings))
        .collect();

    let valid: Vec<Vec<HealthMetricRecord>> = built
        .iter()
        .filter_map(|records| records.as_ref().ok().cloned())
        .collect();
    let mut assessments = engine.compare_scenarios(store, &user_id, &valid)?.into_iter();

    let scenarios: Vec<ScenarioOutcome> = params
        .scenarios
        .into_iter()
        .zip(built)
        .enumerate()
        .map(|(scenario_id, (scenario, records))| {
            let scenario_name = scenario
                .name
                .unwrap_or_else(|| format!("Scenario {}", scenario_id + 1));
            let (result, error) = match records {
                Ok(_) => (assessments.next(), None),
                Err(e) => (None, Some(e)),
            };
            ScenarioOutcome {
                scenario_id,
                scenario_name,
                result,
                error,
            }
        })
        .collect();

    let message = render_comparison(&user_id, &scenarios);

    Ok(CompareRisksResponse {
        total_scenarios: scenarios.len(),
        scenarios,
        message,
    })
}

/// Date readings backwards from today so they pass the same checks as logged ones
fn scenario_records(
    user_id: &UserId,
    today: NaiveDate,
    readings: &[MetricReading],
) -> Result<Vec<HealthMetricRecord>, String> {
    if readings.is_empty() || readings.len() > RISK_WINDOW as usize {
        return Err(format!(
            "a scenario needs between 1 and {} readings, got {}",
            RISK_WINDOW,
            readings.len()
        ));
    }

    readings
        .iter()
        .enumerate()
        .map(|(offset, reading)| {
            HealthMetricRecord::new(user_id.clone(), today - Duration::days(offset as i64), *reading)
                .map_err(|e| e.to_string())
        })
        .collect()
}

fn render_comparison(user_id: &UserId, scenarios: &[ScenarioOutcome]) -> String {
    let mut lines = vec![format!("⚖️ **Risk Scenarios** for {}", user_id), String::new()];

    lines.extend(scenarios.iter().map(|s| match (&s.result, &s.error) {
        (Some(a), _) => format!("- {}: {} (score {})", s.scenario_name, a.risk_level.as_str(), a.risk_score),
        (None, Some(e)) => format!("- {}: ❌ {}", s.scenario_name, e),
        (None, None) => format!("- {}: not scored", s.scenario_name),
    }));

    lines.join("\n")
}

/// Response listing the risk factor catalog
#[derive(Debug, Serialize)]
pub struct RiskFactorsResponse {
    pub risk_factors: Vec<RiskFactorInfo>,
    pub total_factors: usize,
    pub message: String,
}

/// Describe the factors that feed the risk score
pub fn get_risk_factors() -> RiskFactorsResponse {
    let risk_factors = risk_factor_catalog();
    let message = risk_factors
        .iter()
        .map(|f| {
            format!(
                "📌 {}{}\n   {}. {}",
                f.name.as_str(),
                if f.modifiable { "" } else { " (non-modifiable)" },
                f.description,
                f.impact
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    RiskFactorsResponse {
        total_factors: risk_factors.len(),
        risk_factors,
        message,
    }
}
