use clap::Parser;
use std::path::PathBuf;

use sidekick_llm_api::OPENAI_API_URL;
use sidekick_tools::WIKIPEDIA_API_URL;
use sidekick_types::DEFAULT_MODEL;

/// CLI arguments for the sidekick server
///
/// Every option falls back to an environment variable, and a `.env` file in
/// the working directory is loaded before parsing.
#[derive(Parser, Debug, Clone)]
#[command(name = "sidekick-server")]
#[command(about = "Sidekick - chat relay with Wikipedia lookups")]
#[command(version)]
pub struct Cli {
    /// API key for the chat completion API
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat completion endpoint (a bare host gets /v1/chat/completions appended)
    #[arg(long, env = "OPENAI_BASE_URL", default_value = OPENAI_API_URL)]
    pub api_url: String,

    /// Model identifier sent with every completion request
    #[arg(long, env = "SIDEKICK_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "SIDEKICK_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Directory served as static files, skipped when missing
    #[arg(long, env = "SIDEKICK_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Base URL of the Wikipedia REST API
    #[arg(long, env = "SIDEKICK_WIKIPEDIA_URL", default_value = WIKIPEDIA_API_URL)]
    pub wikipedia_url: String,

    /// Replace the default assistant persona
    #[arg(long, env = "SIDEKICK_SYSTEM_PROMPT")]
    pub system_prompt: Option<String>,

    /// Dump completion requests and responses to stdout
    #[arg(short, long, env = "SIDEKICK_VERBOSE")]
    pub verbose: bool,
}
