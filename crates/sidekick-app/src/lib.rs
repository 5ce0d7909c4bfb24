//! Sidekick server: a chat endpoint in front of a completion API, with
//! Wikipedia lookups available to the model as a tool.

pub mod app;
pub mod cli;
pub mod config;
pub mod web;

pub use app::{build_orchestrator, init_tracing, run_web_server};
pub use cli::Cli;
pub use config::{AppConfig, ClientConfig, ServerConfig};
