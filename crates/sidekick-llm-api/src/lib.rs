//! # sidekick-llm-api
//!
//! Client side of the chat completion API used by sidekick.
//!
//! - **`LlmClient`**: the seam the chat orchestrator talks to, so tests can
//!   script model replies without a network.
//! - **`OpenAiClient`**: OpenAI-compatible implementation over `reqwest`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sidekick_llm_api::{LlmClient, OpenAiClient, OPENAI_API_URL};
//! use sidekick_types::Message;
//!
//! # async fn run() -> Result<(), sidekick_llm_api::LlmError> {
//! let client = OpenAiClient::new("sk-...", "gpt-4o-mini", OPENAI_API_URL);
//! let response = client.chat(vec![Message::user("Hello!")], vec![]).await?;
//! println!("{}", response.message.text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{openai::OpenAiClient, LlmClient, LlmResponse, TokenUsage};
pub use config::{normalize_api_url, OPENAI_API_URL};
pub use error::LlmError;
