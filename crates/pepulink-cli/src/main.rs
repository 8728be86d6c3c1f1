//! PEPULink CLI - Spending insights for the PEPULink wallet
//!
//! Usage:
//!   pepulink analyze                   Show the spending analysis
//!   pepulink insights                  Show insight findings
//!   pepulink ask "any tips?"           One-shot assistant reply
//!   pepulink chat                      Interactive assistant
//!   pepulink serve --port 3000         Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    if let Commands::Config = cli.command {
        return commands::cmd_config(cli.config.as_deref());
    }

    let session = commands::Session::open(cli.data.as_deref(), cli.config.as_deref(), cli.as_of)?;

    match cli.command {
        Commands::Analyze { json } => commands::cmd_analyze(&session, json),
        Commands::Insights { json, limit } => commands::cmd_insights(&session, json, limit),
        Commands::Ask { message, json } => commands::cmd_ask(&session, &message.join(" "), json),
        Commands::Chat { think_ms } => commands::cmd_chat(&session, think_ms).await,
        Commands::Transactions { limit, category } => {
            commands::cmd_transactions(&session, limit, category.as_deref())
        }
        Commands::Serve {
            port,
            host,
            allow_origins,
        } => commands::cmd_serve(session, &host, port, allow_origins).await,
        Commands::Config => Ok(()),
    }
}
