use reqwest::StatusCode;
use serde_json::Value;

/// Failure of a call to the completion API
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion API error {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("failed to parse completion response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("completion response contained no choices")]
    EmptyResponse,
}

impl LlmError {
    /// Build an API error, preferring the provider's own error message over the raw body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = extract_error_message(body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.trim().to_string()
            }
        });
        LlmError::Api { status, message }
    }
}

// OpenAI format: { "error": { "message": "...", "type": "...", "code": "..." } }
fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("error")? {
        Value::String(message) => Some(message.clone()),
        error => error.get("message")?.as_str().map(str::to_string),
    }
}
