use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::CopilotError;

impl IntoResponse for CopilotError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            // Dependency never initialized: deployment config must be fixed
            CopilotError::Config(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            // Upstream call failed: surface the upstream text, no retry here
            _ => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        (status, Json(json!({"error": message}))).into_response()
    }
}
