use tracing::info;

use crate::agents;
use crate::api;
use crate::cli::commands::ServeArgs;
use crate::config::Settings;
use crate::errors::CopilotError;

pub async fn handle_serve(args: ServeArgs) -> Result<(), CopilotError> {
    agents::validate_registry()?;

    let mut settings = Settings::from_env();
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(timeout) = args.timeout {
        settings.upstream_timeout_secs = timeout;
    }

    info!(host = %args.host, port = settings.port, "Starting API server");

    let port = settings.port;
    let state = api::create_app_state(settings)?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", args.host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| CopilotError::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
