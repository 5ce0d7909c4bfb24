use anyhow::Result;
use clap::Parser;

use sidekick::{init_tracing, run_web_server, AppConfig, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::from_cli(&cli)?;
    run_web_server(config).await
}
