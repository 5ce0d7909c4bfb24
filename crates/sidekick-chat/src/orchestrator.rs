use sidekick_llm_api::{LlmClient, LlmResponse};
use sidekick_tools::{ToolParameters, ToolRegistry};
use sidekick_types::{
    ChatRequest, ChatResponse, Message, ToolCall, ToolResult, DEFAULT_SYSTEM_PROMPT,
    NO_REPLY_FALLBACK,
};
use std::sync::Arc;

use crate::ChatError;

/// Runs one request/response cycle against the model
#[derive(Clone)]
pub struct ChatOrchestrator {
    client: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
}

impl ChatOrchestrator {
    pub fn new(client: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            client,
            tools,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// `[system, ...history, user]`
    pub fn build_transcript(&self, request: &ChatRequest) -> Vec<Message> {
        let mut transcript = Vec::with_capacity(request.history.len() + 2);
        transcript.push(Message::system(self.system_prompt.clone()));
        transcript.extend(request.history.iter().cloned().map(Message::from));
        transcript.push(Message::user(request.message.clone()));
        transcript
    }

    #[tracing::instrument(skip_all, fields(history = request.history.len()))]
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, ChatError> {
        request.check()?;

        let mut transcript = self.build_transcript(&request);
        let first = self
            .client
            .chat(transcript.clone(), self.tools.openai_definitions())
            .await?;
        record_usage("initial", &first);
        let assistant = first.message;

        if !assistant.has_tool_calls() {
            return Ok(ChatResponse {
                answer: answer_text(&assistant),
                used_tools: Vec::new(),
            });
        }

        let calls = assistant.requested_tool_calls();
        tracing::info!(calls = calls.len(), "model requested tool calls");
        let results = self.run_tool_calls(calls).await;
        let used_tools: Vec<String> = calls
            .iter()
            .map(|call| call.function.name.clone())
            .filter(|name| !name.is_empty())
            .collect();

        // The assistant message must precede its results unchanged, ids included
        transcript.push(assistant);
        transcript.extend(results.into_iter().map(Message::from));

        // Tools are not redeclared: a request gets a single tool round trip
        let second = self.client.chat(transcript, Vec::new()).await?;
        record_usage("tool_followup", &second);

        Ok(ChatResponse {
            answer: answer_text(&second.message),
            used_tools,
        })
    }

    /// Execute a batch of tool calls, one result per call in call order
    pub async fn run_tool_calls(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut results = Vec::with_capacity(calls.len());
        for call in calls {
            let name = &call.function.name;
            tracing::debug!(tool = %name, id = %call.id, "executing tool call");

            let params = ToolParameters::from_json_or_empty(&call.function.arguments);
            let content = self.tools.execute_tool(name, params).await;
            results.push(ToolResult {
                tool_call_id: call.id.clone(),
                name: name.clone(),
                content,
            });
        }
        results
    }
}

fn record_usage(call: &'static str, response: &LlmResponse) {
    if let Some(usage) = &response.usage {
        tracing::debug!(
            call,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "completion token usage"
        );
    }
}

fn answer_text(message: &Message) -> String {
    message.text().unwrap_or(NO_REPLY_FALLBACK).to_string()
}
