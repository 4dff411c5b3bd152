use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

use crate::agents::CAPABILITY_REGISTRY;

/// Agent orchestration is declared but not built. The response lists the
/// registered capabilities so clients can see what the surface will cover.
pub async fn agent_chat(_body: Option<Json<Value>>) -> (StatusCode, Json<Value>) {
    let capabilities: Vec<Value> = CAPABILITY_REGISTRY
        .iter()
        .map(|def| json!({
            "name": def.name,
            "description": def.description,
        }))
        .collect();

    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({
            "status": "not_implemented",
            "detail": "Agent orchestration is not implemented",
            "capabilities": capabilities,
        })),
    )
}
