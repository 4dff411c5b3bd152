pub mod azure;
pub mod provider;
pub mod types;

pub use azure::AzureOpenAiClient;
pub use provider::ChatClient;
pub use types::{ChatCompletion, ChatMessage, ChatOptions, TokenUsage};
