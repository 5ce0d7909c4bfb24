use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::Cli;

/// Settings for the outbound clients and the orchestrator
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub wikipedia_url: String,
    pub system_prompt: Option<String>,
    pub verbose: bool,
}

/// Settings for the HTTP listener
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub public_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Resolve the parsed CLI into runtime configuration.
    ///
    /// Fails when no API key was supplied or the bind address is invalid.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let api_key = match cli.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => bail!("OPENAI_API_KEY is not set. Use --api-key or set OPENAI_API_KEY in the environment or .env"),
        };

        let bind_addr: SocketAddr = format!("{}:{}", cli.bind, cli.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", cli.bind, cli.port))?;

        let system_prompt = cli
            .system_prompt
            .as_ref()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            client: ClientConfig {
                api_key,
                api_url: cli.api_url.clone(),
                model: cli.model.clone(),
                wikipedia_url: cli.wikipedia_url.clone(),
                system_prompt,
                verbose: cli.verbose,
            },
            server: ServerConfig {
                bind_addr,
                public_dir: cli.public_dir.clone(),
            },
        })
    }
}
