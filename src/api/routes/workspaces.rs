use axum::{http::StatusCode, Json};
use serde_json::Value;

use crate::agents::{self, CapabilityName, ToolOutcome};

pub async fn discover_workspaces(body: Option<Json<Value>>) -> (StatusCode, Json<ToolOutcome>) {
    let input = body.map(|Json(v)| v).unwrap_or(Value::Null);
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(agents::invoke(CapabilityName::DiscoverWorkspaces, &input)),
    )
}
