use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use sidekick_chat::ChatOrchestrator;
use sidekick_llm_api::OpenAiClient;
use sidekick_tools::{ToolRegistry, WikipediaClient};

use crate::config::{AppConfig, ClientConfig};
use crate::web::{AppState, WebServer};

/// Install the global tracing subscriber; `RUST_LOG` overrides the default level.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Already installed when embedded or under test
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Wire the completion client and the tool registry into an orchestrator
pub fn build_orchestrator(config: &ClientConfig) -> ChatOrchestrator {
    let client = OpenAiClient::new(&config.api_key, &config.model, &config.api_url)
        .with_verbose(config.verbose);
    let registry = ToolRegistry::with_defaults(WikipediaClient::new(&config.wikipedia_url));

    tracing::info!(
        model = %client.model(),
        api_url = %client.api_url(),
        tools = ?registry.tool_names(),
        "chat client configured"
    );

    let orchestrator = ChatOrchestrator::new(Arc::new(client), Arc::new(registry));
    match &config.system_prompt {
        Some(prompt) => orchestrator.with_system_prompt(prompt),
        None => orchestrator,
    }
}

pub async fn run_web_server(config: AppConfig) -> Result<()> {
    let state = AppState::new(build_orchestrator(&config.client));
    WebServer::new(config.server, state).start().await
}
