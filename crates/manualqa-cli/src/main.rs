//! Manualqa CLI
//!
//! Ask questions of indexed equipment manuals.

use anyhow::Result;
use clap::Parser;
use manualqa_core::ManualQaError;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<ManualQaError>()
            .map(ManualQaError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask(args) => commands::ask::run(args, cli.format).await,
        Commands::Style(args) => commands::style::run(args, cli.format),
        Commands::Retrieve(args) => commands::retrieve::run(args, cli.format).await,
        Commands::Config(args) => commands::config::run(args, cli.format),
        Commands::Mcp(args) => {
            let config = commands::load_config()?;
            let pipeline = commands::build_pipeline(&config, &args)?;
            manualqa_mcp::start_server(&pipeline).await
        }
    }
}
