/// Public library interface for the Health Insights MCP server
///
/// This module exports the analysis core, the storage adapter and the
/// server that wires them to the MCP tool surface.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod tools;
pub mod config;
pub mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{DateOrder, MetricsStore, ProfileStore, SqliteStorage, StorageError};
pub use analytics::{
    compute_insights, compute_risk_assessment, compute_risk_assessment_on, risk_factor_catalog,
    suggest_interventions, AnalyticsEngine, BloodPressureStatus, Difficulty, FactorKind,
    FactorLevel, Insight, InsightReport, Intervention, InterventionKind, RiskAssessment,
    RiskFactor, RiskFactorInfo, RiskLevel, SleepQuality, Trend, ASSUMED_HEIGHT_M,
    INSIGHT_WINDOW, RISK_WINDOW,
};
pub use tools::ToolError;

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Health insights server behind the MCP tools
///
/// Owns the SQLite adapter that plays the metrics and profile stores, and
/// the analytics engine that reads through them.
pub struct HealthInsightsServer {
    storage: SqliteStorage,
    analytics: AnalyticsEngine,
}

impl HealthInsightsServer {
    /// Create a server backed by the database at `db_path`
    ///
    /// The schema is created or migrated on open.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Health Insights server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Ok(Self::with_storage(storage))
    }

    /// Create a server over an already opened storage
    pub fn with_storage(storage: SqliteStorage) -> Self {
        Self {
            storage,
            analytics: AnalyticsEngine::new(),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Returns once stdin is closed.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the analytics engine (useful for testing)
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
