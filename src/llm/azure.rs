use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::CopilotError;

use super::provider::ChatClient;
use super::types::{ChatCompletion, ChatMessage, ChatOptions, TokenUsage};

const API_VERSION: &str = "2024-12-01-preview";

/// Azure OpenAI chat-completions client. The deployment name is part of the
/// request path, not the body.
pub struct AzureOpenAiClient {
    client: Client,
    endpoint: String,
    deployment: String,
    api_key: String,
}

impl AzureOpenAiClient {
    pub fn new(
        endpoint: &str,
        deployment: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, CopilotError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CopilotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            deployment: deployment.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, API_VERSION
        )
    }
}

#[async_trait]
impl ChatClient for AzureOpenAiClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<ChatCompletion, CopilotError> {
        let body = json!({
            "messages": messages,
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });

        let resp = self.client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CopilotError::Network(format!("Azure OpenAI request failed: {}", e)))?;

        let status = resp.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(CopilotError::Upstream("Invalid Azure OpenAI API key".into()));
        }
        if status.as_u16() == 429 {
            return Err(CopilotError::Upstream("Azure OpenAI rate limit or quota exceeded".into()));
        }

        let data: Value = resp.json().await
            .map_err(|e| CopilotError::Upstream(format!("Failed to parse Azure OpenAI response: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(CopilotError::Upstream(
                error["message"].as_str().unwrap_or("Unknown upstream error").to_string(),
            ));
        }

        let content = data["choices"][0]["message"]["content"].as_str()
            .ok_or_else(|| CopilotError::Upstream("No content in Azure OpenAI response".into()))?
            .to_string();

        let usage = match (
            data["usage"]["prompt_tokens"].as_u64(),
            data["usage"]["completion_tokens"].as_u64(),
            data["usage"]["total_tokens"].as_u64(),
        ) {
            (Some(prompt_tokens), Some(completion_tokens), Some(total_tokens)) => Some(TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens,
            }),
            _ => None,
        };

        Ok(ChatCompletion { content, usage })
    }

    fn deployment_name(&self) -> &str {
        &self.deployment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_strips_trailing_slash() {
        let client = AzureOpenAiClient::new(
            "https://example.openai.azure.us/",
            "gpt-4o-mini",
            "key",
            Duration::from_secs(5),
        ).unwrap();

        assert_eq!(
            client.completions_url(),
            format!(
                "https://example.openai.azure.us/openai/deployments/gpt-4o-mini/chat/completions?api-version={}",
                API_VERSION
            )
        );
    }
}
