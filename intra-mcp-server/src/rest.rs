// src/rest.rs

use axum::{
    extract::Json,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use futures::future::{BoxFuture, FutureExt};
use intra_cli::analyzer::{analyze_bundle, analyze_bundle_strict};
use intra_cli::error::{AnalysisError, IntraError};
use rust_mcp_sdk::schema::CallToolRequestParams;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::tools::ServerTools;

/// JSON-RPC 2.0 request envelope
#[derive(Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

/// JSON-RPC 2.0 error object
#[derive(Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC 2.0 response envelope
#[derive(Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Option<Value>, code: i64, message: &str) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Body of `POST /analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub bundle: String,
    #[serde(default)]
    pub allow_empty: bool,
}

pub fn router() -> Router {
    Router::new()
        .route("/mcp", get(mcp_get).post(mcp_post))
        .route("/analyze", post(analyze))
}

/// GET /mcp → 405 Method Not Allowed (we don’t do SSE here)
pub async fn mcp_get() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "")
}

/// POST /mcp → JSON-RPC handler, boxed to ensure `Send`
pub fn mcp_post(Json(req): Json<JsonRpcRequest>) -> BoxFuture<'static, Json<JsonRpcResponse>> {
    async move {
        let id = Some(req.id.clone());

        // Must be JSON-RPC 2.0
        if req.jsonrpc != "2.0" {
            return Json(JsonRpcResponse::failure(id, -32600, "Invalid Request"));
        }

        let response = match req.method.as_str() {
            // --- initialize handshake ---
            "initialize" => {
                #[derive(Deserialize)]
                struct InitParams {
                    #[serde(rename = "protocolVersion")]
                    protocol_version: String,
                }
                match req
                    .params
                    .and_then(|p| serde_json::from_value::<InitParams>(p).ok())
                {
                    Some(p) => JsonRpcResponse::success(
                        id,
                        json!({
                            "protocolVersion": p.protocol_version,
                            "capabilities": { "tools": {} },
                            "serverInfo": {
                                "name": "intra-mcp-server",
                                "version": env!("CARGO_PKG_VERSION")
                            }
                        }),
                    ),
                    None => JsonRpcResponse::failure(id, -32602, "Invalid params for initialize"),
                }
            }

            // --- list tools ---
            "tools/list" => {
                let list = ServerTools::tools()
                    .into_iter()
                    .filter_map(|t| serde_json::to_value(t).ok())
                    .collect::<Vec<_>>();
                JsonRpcResponse::success(id, json!({ "tools": list }))
            }

            // --- call a tool ---
            "tools/call" => {
                let Some(params_val) = req.params else {
                    return Json(JsonRpcResponse::failure(id, -32602, "Missing params for tools/call"));
                };

                let params_typed: CallToolRequestParams = match serde_json::from_value(params_val) {
                    Ok(p) => p,
                    Err(_) => {
                        return Json(JsonRpcResponse::failure(id, -32602, "Invalid params for tools/call"))
                    }
                };

                let result_json = match ServerTools::try_from(params_typed) {
                    Err(e) => json!({ "error": e.to_string() }),
                    Ok(tool_call) => match tool_call.call() {
                        Ok(res) => serde_json::to_value(res).unwrap_or_else(
                            |e| json!({ "error": format!("Serialization error: {}", e) }),
                        ),
                        Err(e) => json!({ "error": e.to_string() }),
                    },
                };

                JsonRpcResponse::success(id, result_json)
            }

            // --- unknown method ---
            _ => JsonRpcResponse::failure(id, -32601, "Method not found"),
        };

        Json(response)
    }
    .boxed()
}

/// POST /analyze → the analysis result as camelCase JSON
pub async fn analyze(Json(req): Json<AnalyzeRequest>) -> (StatusCode, Json<Value>) {
    let outcome = if req.allow_empty {
        analyze_bundle(&req.bundle)
    } else {
        analyze_bundle_strict(&req.bundle)
    };

    match outcome {
        Ok(result) => match serde_json::to_value(&result) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => error_body(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
        },
        Err(e) => {
            tracing::warn!("Bundle analysis failed: {}", e);
            error_body(status_for(&e), &e.to_string())
        }
    }
}

fn status_for(err: &IntraError) -> StatusCode {
    match err {
        IntraError::Analysis(AnalysisError::Format(_)) => StatusCode::BAD_REQUEST,
        IntraError::Analysis(AnalysisError::NoFilesParsed) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}
