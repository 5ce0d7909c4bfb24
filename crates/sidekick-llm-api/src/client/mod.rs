use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sidekick_types::{Message, ToolDefinition};

use crate::LlmError;

pub mod openai;

/// LLM client trait - the interface the chat orchestrator depends on
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion call; `tools` is left out of the request when empty
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolDefinition>,
    ) -> Result<LlmResponse, LlmError>;
}

/// LLM response structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub message: Message,
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}
