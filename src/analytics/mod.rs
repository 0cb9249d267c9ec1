/// Analytics for health metrics: insights, risk scoring and interventions
///
/// The calculations in `insights` and `risk` are pure functions. The
/// `AnalyticsEngine` is the thin layer that pulls the right window of
/// data out of the injected stores and hands it to them.

pub mod insights;
pub mod interventions;
pub mod risk;

pub use insights::*;
pub use interventions::*;
pub use risk::*;

use crate::domain::{HealthMetricRecord, UserId};
use crate::storage::{DateOrder, MetricsStore, ProfileStore, StorageError};

/// Analytics engine that connects the stores to the pure calculations
///
/// Store failures propagate untouched; nothing here retries or masks them.
#[derive(Debug, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self
    }

    /// Fetch the newest `INSIGHT_WINDOW` records and compute insights
    pub fn health_insights<M: MetricsStore + ?Sized>(
        &self,
        metrics: &M,
        user_id: &UserId,
    ) -> Result<InsightReport, StorageError> {
        let records = metrics.fetch_recent_metrics(user_id, INSIGHT_WINDOW, DateOrder::NewestFirst)?;
        tracing::debug!("Generating insights for {} from {} records", user_id, records.len());

        Ok(compute_insights(&records))
    }

    /// Fetch the profile and newest `RISK_WINDOW` records and score them
    pub fn risk_assessment<M, P>(
        &self,
        metrics: &M,
        profiles: &P,
        user_id: &UserId,
    ) -> Result<RiskAssessment, StorageError>
    where
        M: MetricsStore + ?Sized,
        P: ProfileStore + ?Sized,
    {
        let profile = profiles.fetch_user_profile(user_id)?;
        let records = metrics.fetch_recent_metrics(user_id, RISK_WINDOW, DateOrder::NewestFirst)?;

        if profile.is_none() {
            tracing::debug!("No profile for {}, risk assessment will be unknown", user_id);
        }

        Ok(compute_risk_assessment(profile.as_ref(), &records))
    }

    /// Score several hypothetical record sets against the user's stored profile
    ///
    /// Results come back in the same order as `scenarios`. Each set is
    /// scored exactly as real records would be.
    pub fn compare_scenarios<P: ProfileStore + ?Sized>(
        &self,
        profiles: &P,
        user_id: &UserId,
        scenarios: &[Vec<HealthMetricRecord>],
    ) -> Result<Vec<RiskAssessment>, StorageError> {
        let profile = profiles.fetch_user_profile(user_id)?;
        tracing::debug!("Comparing {} scenarios for {}", scenarios.len(), user_id);

        Ok(scenarios
            .iter()
            .map(|records| compute_risk_assessment(profile.as_ref(), records))
            .collect())
    }
}
