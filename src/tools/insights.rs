/// Tool for health insights and recommendations
///
/// This module implements the health_insights MCP tool that turns a user's
/// recent metrics into trend and status summaries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsEngine, Insight, InsightReport};
use crate::domain::UserId;
use crate::storage::MetricsStore;
use crate::tools::ToolError;

/// Parameters for generating insights
#[derive(Debug, Deserialize, JsonSchema)]
pub struct InsightsParams {
    /// User to analyze
    pub user_id: String,
}

/// Response from generating insights
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    #[serde(flatten)]
    pub report: InsightReport,
    pub message: String,
}

/// Analyze a user's recent metrics
pub fn get_health_insights<S: MetricsStore + ?Sized>(
    engine: &AnalyticsEngine,
    store: &S,
    params: InsightsParams,
) -> Result<InsightsResponse, ToolError> {
    let user_id = UserId::parse(&params.user_id)?;
    let report = engine.health_insights(store, &user_id)?;
    let message = render_report(&user_id, &report);

    Ok(InsightsResponse { report, message })
}

fn render_report(user_id: &UserId, report: &InsightReport) -> String {
    if report.insights.is_empty() {
        return format!("No metrics recorded for {} yet. Log a few days to get insights!", user_id);
    }

    let mut lines = vec![format!("💡 **Health Insights** for {}", user_id), String::new()];

    for insight in &report.insights {
        lines.push(match insight {
            Insight::Weight { value, change, trend } => format!(
                "⚖️ Weight: {:.1} kg average over 7 days, {:+.1} kg ({:?})",
                value, change, trend
            ),
            Insight::BloodPressure { value, status } => {
                format!("🩺 Blood pressure: {:.0} average ({:?})", value, status)
            }
            Insight::Sleep { value, status } => {
                format!("😴 Sleep: {:.1} h average ({:?})", value, status)
            }
        });
    }

    if !report.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("📝 **Recommendations**".to_string());
        lines.extend(report.recommendations.iter().map(|r| format!("- {}", r)));
    }

    lines.join("\n")
}
