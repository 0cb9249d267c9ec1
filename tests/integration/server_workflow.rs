use super::*;

#[tokio::test]
async fn test_initialize_and_list_tools() {
    let (mut server, _temp) = test_server().await;

    let response = send(
        &mut server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "clientInfo": {"name": "test-client", "version": "0.1"}
            }
        }),
    )
    .unwrap();
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(response["result"]["serverInfo"]["name"], "Health Insights MCP");

    let ack = send(
        &mut server,
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    );
    assert!(ack.is_none());

    let response = send(&mut server, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).unwrap();
    let names: Vec<_> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "metric_log",
            "metric_history",
            "profile_set",
            "health_insights",
            "risk_assessment",
            "risk_compare",
            "risk_factors"
        ]
    );
    assert!(response["result"]["tools"][0]["inputSchema"].is_object());
}

#[tokio::test]
async fn test_protocol_errors() {
    let (mut server, _temp) = test_server().await;

    let response = serde_json::to_value(server.process_line("{not json").unwrap()).unwrap();
    assert_eq!(response["error"]["code"], -32700);

    let response = send(&mut server, json!({"jsonrpc": "2.0", "id": 7, "method": "habits/list"})).unwrap();
    assert_eq!(response["id"], 7);
    assert_eq!(response["error"]["code"], -32601);

    let response = send(&mut server, json!({"jsonrpc": "2.0", "id": 8, "method": "tools/call"})).unwrap();
    assert_eq!(response["error"]["code"], -32602);

    assert!(server.process_line("   \n").is_none());
}

#[tokio::test]
async fn test_json_that_is_not_a_request() {
    let (mut server, _temp) = test_server().await;

    let response = send(&mut server, json!({"jsonrpc": "2.0", "id": 4})).unwrap();
    assert_eq!(response["error"]["code"], -32600);
    assert_eq!(response["id"], 4);

    let response = send(&mut server, json!([1, 2, 3])).unwrap();
    assert_eq!(response["error"]["code"], -32600);
    assert_eq!(response["id"], Value::Null);
}

#[tokio::test]
async fn test_null_id_gets_a_response() {
    let (mut server, _temp) = test_server().await;

    let response = send(&mut server, json!({"jsonrpc": "2.0", "id": null, "method": "ping"}))
        .expect("a request with a null id must be answered");
    assert_eq!(response["id"], Value::Null);
    assert_eq!(response["result"], json!({}));

    let ignored = send(&mut server, json!({"jsonrpc": "2.0", "method": "ping"}));
    assert!(ignored.is_none());
}

#[tokio::test]
async fn test_tools_work_without_initialized_notification() {
    let (mut server, _temp) = test_server().await;

    let (is_error, _, data) = call_tool(&mut server, "health_insights", json!({"user_id": "zoe"}));
    assert!(!is_error);
    assert_eq!(data.unwrap()["insights"], json!([]));
}

#[tokio::test]
async fn test_bad_tool_arguments_are_tool_errors() {
    let (mut server, _temp) = test_server().await;

    let (is_error, text, _) = call_tool(&mut server, "metric_log", json!({"user_id": "alice"}));
    assert!(is_error);
    assert!(text.starts_with("Error: Invalid arguments"));

    let (is_error, _, _) = call_tool(
        &mut server,
        "metric_log",
        metric_args("alice", "2024-13-01", 70.0, 120.0, 8000),
    );
    assert!(is_error);

    let (is_error, text, _) = call_tool(&mut server, "workout_log", json!({}));
    assert!(is_error);
    assert!(text.contains("Unknown tool"));
}

#[tokio::test]
async fn test_log_metrics_and_get_insights() {
    let (mut server, _temp) = test_server().await;

    let weights = [72.0, 72.0, 72.0, 72.0, 72.0, 72.0, 70.0];
    for (i, weight) in weights.iter().enumerate() {
        let date = format!("2024-03-{:02}", 20 - i);
        let (is_error, text, _) = call_tool(
            &mut server,
            "metric_log",
            metric_args("alice", &date, *weight, 118.0, 9000),
        );
        assert!(!is_error, "{}", text);
    }

    let (is_error, _, _) = call_tool(
        &mut server,
        "metric_log",
        metric_args("alice", "2024-03-20", 71.0, 118.0, 9000),
    );
    assert!(is_error, "second snapshot for the same day must be rejected");

    let (is_error, _, data) = call_tool(&mut server, "health_insights", json!({"user_id": "alice"}));
    assert!(!is_error);
    let data = data.unwrap();
    assert_eq!(data["insights"][0]["type"], "weight");
    assert_eq!(data["insights"][0]["change"], 2.0);
    assert_eq!(data["insights"][0]["trend"], "increasing");
    assert_eq!(data["insights"][1]["status"], "normal");
    assert_eq!(data["recommendations"], json!([]));
    assert!(data.get("message").is_none());

    let (_, _, data) = call_tool(
        &mut server,
        "metric_history",
        json!({"user_id": "alice", "limit": 3, "oldest_first": true}),
    );
    let dates: Vec<_> = data
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["recorded_on"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2024-03-18", "2024-03-19", "2024-03-20"]);
}

#[tokio::test]
async fn test_risk_assessment_workflow() {
    let (mut server, _temp) = test_server().await;

    let (_, text, data) = call_tool(&mut server, "risk_assessment", json!({"user_id": "bob"}));
    assert!(text.contains("unknown"));
    assert_eq!(data.unwrap()["risk_level"], "unknown");

    let (is_error, _, _) = call_tool(
        &mut server,
        "profile_set",
        json!({"user_id": "bob", "date_of_birth": "1995-06-01", "gender": "male"}),
    );
    assert!(!is_error);

    for day in 1..=7 {
        let date = format!("2024-04-{:02}", day);
        call_tool(&mut server, "metric_log", metric_args("bob", &date, 64.0, 145.0, 4000));
    }

    let (is_error, _, data) = call_tool(&mut server, "risk_assessment", json!({"user_id": "bob"}));
    assert!(!is_error);
    let data = data.unwrap();
    assert_eq!(data["risk_score"], 5);
    assert_eq!(data["risk_level"], "medium");
    assert_eq!(data["factors"][0]["factor"], "blood_pressure");
    assert_eq!(data["factors"][1]["factor"], "activity");
    assert_eq!(data["interventions"][0]["name"], "DASH Diet");
    assert_eq!(data["interventions"][1]["name"], "Progressive Walking Program");

    let (_, _, data) = call_tool(&mut server, "risk_factors", json!({}));
    assert_eq!(data.unwrap()["total_factors"], 4);
}

#[tokio::test]
async fn test_risk_compare_workflow() {
    let (mut server, _temp) = test_server().await;

    call_tool(
        &mut server,
        "profile_set",
        json!({"user_id": "cara", "date_of_birth": "1994-02-10"}),
    );

    let day = |blood_pressure: f64, steps: u32| {
        json!({
            "weight_kg": 88.0,
            "blood_pressure": blood_pressure,
            "heart_rate": 72,
            "sleep_hours": 7.0,
            "steps": steps,
            "calories_burned": 2000
        })
    };

    let (is_error, text, data) = call_tool(
        &mut server,
        "risk_compare",
        json!({
            "user_id": "cara",
            "scenarios": [
                {"name": "today", "readings": [day(142.0, 4500), day(138.0, 4800)]},
                {"name": "after DASH and walking", "readings": [day(125.0, 8000)]},
                {"readings": [day(125.0, 8000), day(125.0, 8000), day(125.0, 8000), day(125.0, 8000),
                              day(125.0, 8000), day(125.0, 8000), day(125.0, 8000), day(125.0, 8000)]}
            ]
        }),
    );
    assert!(!is_error, "{}", text);

    let data = data.unwrap();
    assert_eq!(data["total_scenarios"], 3);
    // bp 140 (+3), bmi ~30.4 (+2), steps 4650 (+2)
    assert_eq!(data["scenarios"][0]["result"]["risk_score"], 7);
    assert_eq!(data["scenarios"][0]["result"]["risk_level"], "high");
    // only bmi remains
    assert_eq!(data["scenarios"][1]["result"]["risk_score"], 2);
    assert_eq!(data["scenarios"][2]["scenario_name"], "Scenario 3");
    assert!(data["scenarios"][2]["error"].is_string());

    let (is_error, _, _) = call_tool(&mut server, "risk_compare", json!({"user_id": "cara", "scenarios": []}));
    assert!(is_error);
}
