use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "kql-copilot",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "KQL assistant backend ready",
        "openai_configured": state.chat_client.is_some(),
    }))
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "KQL Copilot backend",
        "version": env!("CARGO_PKG_VERSION"),
        "health": "/health",
        "config": "/api/config",
    }))
}
