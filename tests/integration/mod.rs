/// Integration tests for the Health Insights MCP server
use serde_json::{json, Value};
use tempfile::{NamedTempFile, TempDir};

use health_insights_mcp::mcp::McpServer;
use health_insights_mcp::*;

mod server_workflow;
mod storage_persistence;

/// Open a server over a fresh temporary database
async fn test_server() -> (McpServer, NamedTempFile) {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let server = HealthInsightsServer::new(temp_file.path().to_path_buf())
        .await
        .expect("Failed to create server");
    (McpServer::new(server), temp_file)
}

/// Send one request line and return the serialized response
fn send(server: &mut McpServer, request: Value) -> Option<Value> {
    server
        .process_line(&request.to_string())
        .map(|response| serde_json::to_value(response).unwrap())
}

/// Call a tool and return (is_error, summary text, JSON payload if any)
fn call_tool(server: &mut McpServer, name: &str, arguments: Value) -> (bool, String, Option<Value>) {
    let response = send(
        server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {"name": name, "arguments": arguments}
        }),
    )
    .expect("tools/call must be answered");

    let result = &response["result"];
    let content = result["content"].as_array().unwrap();
    let text = content[0]["text"].as_str().unwrap().to_string();
    let data = content
        .get(1)
        .map(|c| serde_json::from_str(c["text"].as_str().unwrap()).unwrap());

    (result["isError"].as_bool().unwrap(), text, data)
}

fn metric_args(user_id: &str, date: &str, weight_kg: f64, blood_pressure: f64, steps: u32) -> Value {
    json!({
        "user_id": user_id,
        "date": date,
        "weight_kg": weight_kg,
        "blood_pressure": blood_pressure,
        "heart_rate": 70,
        "sleep_hours": 7.5,
        "steps": steps,
        "calories_burned": 2100
    })
}
