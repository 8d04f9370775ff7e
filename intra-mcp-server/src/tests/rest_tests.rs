use axum::{extract::Json, http::StatusCode};
use serde_json::{json, Value};
use tokio_test::block_on;

use super::{bundle, go_bundle};
use crate::rest::{analyze, mcp_get, mcp_post, AnalyzeRequest, JsonRpcRequest};

fn rpc(method: &str, params: Option<Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: json!(1),
        method: method.to_string(),
        params,
    }
}

fn response_value(req: JsonRpcRequest) -> Value {
    let Json(response) = block_on(mcp_post(Json(req)));
    serde_json::to_value(response).unwrap()
}

#[test]
fn get_mcp_is_not_allowed() {
    let (status, _) = block_on(mcp_get());
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn initialize_echoes_protocol_version() {
    let value = response_value(rpc(
        "initialize",
        Some(json!({ "protocolVersion": "2025-03-26" })),
    ));
    assert_eq!(value["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(value["result"]["serverInfo"]["name"], "intra-mcp-server");
}

#[test]
fn initialize_without_params_is_invalid() {
    let value = response_value(rpc("initialize", None));
    assert_eq!(value["error"]["code"], -32602);
}

#[test]
fn wrong_jsonrpc_version_is_rejected() {
    let mut req = rpc("tools/list", None);
    req.jsonrpc = "1.0".to_string();
    let value = response_value(req);
    assert_eq!(value["error"]["code"], -32600);
}

#[test]
fn tools_list_names_all_tools() {
    let value = response_value(rpc("tools/list", None));
    let tools = value["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 4);
    assert!(tools.iter().any(|t| t["name"] == "generate_dockerfile"));
}

#[test]
fn tools_call_runs_analysis() {
    let value = response_value(rpc(
        "tools/call",
        Some(json!({
            "name": "generate_dockerfile",
            "arguments": { "bundle": go_bundle() }
        })),
    ));
    let text = value["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("FROM golang:1.21"));
}

#[test]
fn unknown_method_is_reported() {
    let value = response_value(rpc("resources/list", None));
    assert_eq!(value["error"]["code"], -32601);
}

#[test]
fn analyze_endpoint_returns_result() {
    let (status, Json(body)) = block_on(analyze(Json(AnalyzeRequest {
        bundle: go_bundle(),
        allow_empty: false,
    })));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["languageVersion"]["name"], "Go");
}

#[test]
fn analyze_endpoint_maps_errors_to_status_codes() {
    let (status, Json(body)) = block_on(analyze(Json(AnalyzeRequest {
        bundle: "no anchor here".to_string(),
        allow_empty: false,
    })));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Repository Files"));

    let (status, _) = block_on(analyze(Json(AnalyzeRequest {
        bundle: bundle(&[]),
        allow_empty: false,
    })));
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = block_on(analyze(Json(AnalyzeRequest {
        bundle: bundle(&[]),
        allow_empty: true,
    })));
    assert_eq!(status, StatusCode::OK);
}
