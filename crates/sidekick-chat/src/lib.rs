//! Conversation handling for sidekick
//!
//! This crate turns one inbound chat request into the final answer: it builds
//! the transcript, asks the model, runs any tool calls the model requests and
//! asks the model again with the tool output.

mod error;
mod orchestrator;

pub use error::ChatError;
pub use orchestrator::ChatOrchestrator;
