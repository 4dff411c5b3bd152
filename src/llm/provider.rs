use async_trait::async_trait;

use crate::errors::CopilotError;

use super::types::{ChatCompletion, ChatMessage, ChatOptions};

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Forward an ordered conversation to the upstream model and return the
    /// first completion. Message order is preserved as given.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<ChatCompletion, CopilotError>;

    /// Deployment identifier for logging and the config endpoint.
    fn deployment_name(&self) -> &str;
}
