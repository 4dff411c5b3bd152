use axum::{http::StatusCode, Json};
use serde_json::Value;

use crate::agents::{self, CapabilityName, ToolOutcome};
use crate::api::models::ValidateQueryRequest;
use crate::kql::{self, ValidationResult};

/// Lexical pre-check only; never fails, always returns a structured verdict.
pub async fn validate_query(Json(req): Json<ValidateQueryRequest>) -> Json<ValidationResult> {
    Json(kql::validate_syntax(&req.query))
}

pub async fn execute_query(body: Option<Json<Value>>) -> (StatusCode, Json<ToolOutcome>) {
    let input = body.map(|Json(v)| v).unwrap_or(Value::Null);
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(agents::invoke(CapabilityName::ExecuteQuery, &input)),
    )
}
