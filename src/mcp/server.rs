/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls against the health insights server
/// 3. Sends JSON-RPC responses to stdout

use std::time::Instant;

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HealthInsightsServer, ServerError};

/// MCP server that handles communication with the client
pub struct McpServer {
    /// The underlying health insights server
    health: HealthInsightsServer,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(health: HealthInsightsServer) -> Self {
        Self { health }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications.
    pub fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        // Echo the id when one can be recovered from a malformed request
        let raw_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(req) => req,
            Err(e) => {
                warn!("Rejected malformed JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    raw_id,
                    error_codes::INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                    None,
                ));
            }
        };

        let started = Instant::now();
        let method = request.method.clone();
        let response = self.handle_request(request);
        info!("Handled {} in {:.3}s", method, started.elapsed().as_secs_f64());

        response
    }

    /// Handle a JSON-RPC request
    fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = match request.id {
            Some(id) => id,
            None => {
                debug!("Notification '{}' needs no response", request.method);
                return None;
            }
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => to_response(id, &ToolsListResult { tools: tool_definitions() }),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    /// Handle MCP initialization request
    fn handle_initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        match &params.client_info {
            Some(client) => info!(
                "MCP client connected: {} {} (protocol {})",
                client.name, client.version, params.protocol_version
            ),
            None => info!("MCP client connected"),
        }

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Health Insights MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    /// Handle tools/call request
    fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = self.call_tool(&tool_params.name, tool_params.arguments);
        to_response(id, &result)
    }

    /// Dispatch a tool by name
    fn call_tool(&self, name: &str, args: Map<String, Value>) -> ToolCallResult {
        let storage = self.health.storage();
        let engine = self.health.analytics();

        let outcome = match name {
            "metric_log" => parse_args(args)
                .and_then(|p| tools::log_metric(storage, p))
                .map(|r| (r.message.clone(), serde_json::to_value(&r.record))),
            "metric_history" => parse_args(args)
                .and_then(|p| tools::metric_history(storage, p))
                .map(|r| (r.message.clone(), serde_json::to_value(&r.records))),
            "profile_set" => parse_args(args)
                .and_then(|p| tools::set_profile(storage, p))
                .map(|r| (r.message.clone(), serde_json::to_value(&r.profile))),
            "health_insights" => parse_args(args)
                .and_then(|p| tools::get_health_insights(engine, storage, p))
                .map(|r| (r.message.clone(), serde_json::to_value(&r))),
            "risk_assessment" => parse_args(args)
                .and_then(|p| tools::get_risk_assessment(engine, storage, p))
                .map(|r| (r.message.clone(), serde_json::to_value(&r))),
            "risk_compare" => parse_args(args)
                .and_then(|p| tools::compare_risk_scenarios(engine, storage, p))
                .map(|r| (r.message.clone(), serde_json::to_value(&r))),
            "risk_factors" => {
                let r = tools::get_risk_factors();
                Ok((r.message.clone(), serde_json::to_value(&r)))
            }
            _ => return ToolCallResult::error(format!("Unknown tool: {}", name)),
        };

        match outcome {
            Ok((message, Ok(data))) => ToolCallResult::with_data(message, &strip_message(data)),
            Ok((message, Err(e))) => {
                warn!("Failed to serialize {} payload: {}", name, e);
                ToolCallResult::success(message)
            }
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                ToolCallResult::error(e.to_string())
            }
        }
    }
}

/// Deserialize tool arguments into the tool's parameter struct
fn parse_args<T: DeserializeOwned>(args: Map<String, Value>) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(args)).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// The readable message is already the first content item
fn strip_message(mut data: Value) -> Value {
    if let Value::Object(map) = &mut data {
        map.remove("message");
    }
    data
}

fn to_response<T: Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(
            id,
            error_codes::INTERNAL_ERROR,
            format!("Failed to serialize result: {}", e),
            None,
        ),
    }
}

fn tool<T: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::to_value(schema_for!(T))
            .unwrap_or_else(|_| json!({"type": "object"})),
    }
}

/// Every tool this server exposes
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        tool::<tools::LogMetricParams>(
            "metric_log",
            "Log one day's health metrics (weight, blood pressure, heart rate, sleep, steps, calories)",
        ),
        tool::<tools::MetricHistoryParams>(
            "metric_history",
            "List a user's most recent daily health metrics",
        ),
        tool::<tools::SetProfileParams>(
            "profile_set",
            "Set the date of birth and gender used for risk assessment",
        ),
        tool::<tools::InsightsParams>(
            "health_insights",
            "Weight trend, blood pressure and sleep insights with recommendations from the last 30 days",
        ),
        tool::<tools::RiskAssessmentParams>(
            "risk_assessment",
            "Cardiometabolic risk score, contributing factors, recommendations and interventions",
        ),
        tool::<tools::CompareRisksParams>(
            "risk_compare",
            "Score several hypothetical sets of daily readings against the user's profile",
        ),
        ToolDefinition {
            name: "risk_factors".to_string(),
            description: "Describe the risk factors used in risk assessment".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        },
    ]
}
