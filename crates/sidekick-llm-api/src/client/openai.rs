use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sidekick_logging::{log_request, log_response};
use sidekick_types::{Message, ToolDefinition};

use super::{LlmClient, LlmResponse, TokenUsage};
use crate::{normalize_api_url, LlmError};

/// Chat API request structure
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolDefinition],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

fn no_tools(tools: &&[ToolDefinition]) -> bool {
    tools.is_empty()
}

/// Chat API response structure
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

/// Choice structure within chat response
#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// OpenAI-compatible chat completion client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    model: String,
    api_url: String,
    verbose: bool,
    client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, api_url: &str) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            api_url: normalize_api_url(api_url),
            verbose: false,
            client: reqwest::Client::new(),
        }
    }

    /// Dump every request and response to the console
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Vec<ToolDefinition>,
    ) -> Result<LlmResponse, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages: &messages,
            tools: &tools,
            tool_choice: (!tools.is_empty()).then_some("auto"),
        };

        log_request(&self.api_url, &request, &self.api_key, self.verbose);
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            tools = tools.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log_response(status, &body, self.verbose);

        if !status.is_success() {
            tracing::warn!(%status, "completion API returned an error");
            return Err(LlmError::from_response(status, &body));
        }

        let completion: CompletionResponse = serde_json::from_str(&body)?;
        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or(LlmError::EmptyResponse)?;

        Ok(LlmResponse {
            message,
            usage: completion.usage,
        })
    }
}
