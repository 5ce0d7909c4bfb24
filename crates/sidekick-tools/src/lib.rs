//! Tools the model may call during a chat turn
//!
//! A tool declares a JSON schema for the model and executes against parsed
//! arguments. Execution never fails as a Rust error: whatever happens is turned
//! into text the model can read.

pub mod tool;
pub mod tool_registry;
pub mod wikipedia;

pub use tool::{ParameterDefinition, Tool, ToolOutput, ToolParameters};
pub use tool_registry::{ToolKind, ToolRegistry};
pub use wikipedia::{SearchWikipediaTool, WikipediaClient, WIKIPEDIA_API_URL};
