//! ccpeer - chaincode install CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccpeer_cli::cmd;
use ccpeer_cli::{ChaincodeCommands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chaincode { command } => match command {
            ChaincodeCommands::Install(args) => cmd::install::install(args, cli.quiet).await,
        },
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
