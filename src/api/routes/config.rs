use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::api::AppState;

pub async fn get_config(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "environment": state.settings.cloud_environment,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "openai_configured": state.chat_client.is_some(),
        "deployment": state.settings.deployment,
    }))
}
