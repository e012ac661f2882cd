//! relay CLI: run the Telegram bot. Config from env and optional CLI args.

use anyhow::Result;
use clap::Parser;
use relay_bot::run_bot;
use relay_cli::{load_config, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
    }
}
