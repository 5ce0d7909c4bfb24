//! Core types and structures for sidekick
//!
//! This crate provides the wire and domain types shared by every sidekick crate:
//! the chat transcript model spoken with the completion API and the inbound and
//! outbound bodies of the `/api/chat` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

// ============================================================================
// Constants
// ============================================================================

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Persona sent as the system message of every transcript
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a practical AI sidekick. You explain things in simple language \
    and call the available tools whenever you need up-to-date information.";

/// Answer returned when the model replies without any text
pub const NO_REPLY_FALLBACK: &str = "(no reply content)";

// ============================================================================
// Message Types
// ============================================================================

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// Message structure for the chat completion API
///
/// `content` stays `None` when the model answers with tool calls only, and
/// provider specific fields land in `extra`, so an assistant message can be
/// sent back exactly as it was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// Fields this crate does not model, e.g. `refusal`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
            extra: Map::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Tool calls requested by this message, empty when there are none
    pub fn requested_tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or(&[])
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.requested_tool_calls().is_empty()
    }

    /// Text content, treating an empty string like a missing one
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref().filter(|content| !content.is_empty())
    }
}

impl From<HistoryEntry> for Message {
    fn from(entry: HistoryEntry) -> Self {
        Self::new(entry.role.into(), entry.content)
    }
}

impl From<ToolResult> for Message {
    fn from(result: ToolResult) -> Self {
        Self {
            role: Role::Tool,
            content: Some(result.content),
            tool_calls: None,
            tool_call_id: Some(result.tool_call_id),
            name: Some(result.name),
            extra: Map::new(),
        }
    }
}

fn function_type() -> String {
    "function".to_string()
}

/// Tool call structure emitted by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub tool_type: String,
    pub function: FunctionCall,
    /// Provider extensions that must come back untouched, e.g. `extra_content`
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tool_type: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
            extra: Map::new(),
        }
    }
}

/// Function call structure within a tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    /// JSON-encoded argument object, exactly as produced by the model
    #[serde(default)]
    pub arguments: String,
}

/// Tool declaration advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDef,
}

impl ToolDefinition {
    pub fn function(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            tool_type: function_type(),
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// Function definition within a tool declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    /// JSON schema of the argument object
    pub parameters: Value,
}

/// Output of one executed tool call, correlated by the call id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub name: String,
    pub content: String,
}

// ============================================================================
// Endpoint Types
// ============================================================================

/// Roles accepted in client supplied history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
    System,
}

impl From<HistoryRole> for Role {
    fn from(role: HistoryRole) -> Self {
        match role {
            HistoryRole::User => Role::User,
            HistoryRole::Assistant => Role::Assistant,
            HistoryRole::System => Role::System,
        }
    }
}

/// One earlier turn of the conversation sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    /// Check the request against the endpoint schema
    pub fn check(&self) -> Result<(), ValidationError> {
        self.validate().map_err(ValidationError::from)
    }
}

/// Successful response of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    pub used_tools: Vec<String>,
}

// ============================================================================
// Errors
// ============================================================================

/// Malformed inbound request, naming the offending field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let message = field_errors
                    .iter()
                    .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "is invalid".to_string());
                (field.to_string(), message)
            })
            .collect();
        // Deterministic pick when several fields fail
        fields.sort();

        match fields.into_iter().next() {
            Some((field, message)) => ValidationError { field, message },
            None => ValidationError::new("body", "is invalid"),
        }
    }
}
