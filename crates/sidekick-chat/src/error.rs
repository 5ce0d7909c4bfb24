use sidekick_llm_api::LlmError;
use sidekick_types::ValidationError;

/// Failure that aborts a chat request
///
/// Tool problems never show up here; they reach the model as tool output.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] LlmError),
}
