use axum::{extract::State, Json};
use tracing::debug;

use crate::api::models::{ChatRequest, ChatResponse};
use crate::api::AppState;
use crate::errors::CopilotError;
use crate::llm::ChatOptions;

/// Forward an ordered conversation to the configured upstream model and
/// reshape the first completion plus its token counters. No retries; an
/// upstream failure surfaces as-is to the caller.
pub async fn post_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, CopilotError> {
    let client = state.chat_client.as_ref().ok_or_else(|| {
        CopilotError::Config(
            "Azure OpenAI is not configured. Set AZURE_OPENAI_ENDPOINT and AZURE_OPENAI_API_KEY."
                .to_string(),
        )
    })?;

    let options = ChatOptions {
        temperature: req.temperature,
        max_tokens: req.max_tokens,
    };

    debug!(messages = req.messages.len(), "Forwarding chat request");
    let completion = client.chat(&req.messages, &options).await?;

    Ok(Json(ChatResponse {
        message: completion.content,
        usage: completion.usage,
    }))
}
