pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Settings;
use crate::errors::CopilotError;
use crate::llm::{AzureOpenAiClient, ChatClient};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    /// Built once at startup; `None` when the upstream endpoint or credential
    /// is missing, in which case `/api/chat` answers 503.
    pub chat_client: Option<Arc<dyn ChatClient>>,
}

pub fn create_app_state(settings: Settings) -> Result<AppState, CopilotError> {
    let chat_client: Option<Arc<dyn ChatClient>> = match (&settings.endpoint, &settings.api_key) {
        (Some(endpoint), Some(api_key)) => {
            let client = AzureOpenAiClient::new(
                endpoint,
                &settings.deployment,
                api_key,
                Duration::from_secs(settings.upstream_timeout_secs),
            )?;
            info!(deployment = %settings.deployment, "Azure OpenAI client configured");
            Some(Arc::new(client))
        }
        _ => {
            warn!("Azure OpenAI client not configured; /api/chat will return 503");
            None
        }
    };

    Ok(AppState {
        settings: Arc::new(settings),
        chat_client,
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(routes::health::health_check))
        .route("/", axum::routing::get(routes::health::root))
        .route("/api/config", axum::routing::get(routes::config::get_config))
        .route("/api/chat", axum::routing::post(routes::chat::post_chat))
        .route("/api/query/validate", axum::routing::post(routes::query::validate_query))
        .route("/api/query/execute", axum::routing::post(routes::query::execute_query))
        .route("/api/workspaces/discover", axum::routing::post(routes::workspaces::discover_workspaces))
        .route("/api/agent", axum::routing::post(routes::agent::agent_chat))
        // Allow-all CORS, matching the original deployment posture
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
