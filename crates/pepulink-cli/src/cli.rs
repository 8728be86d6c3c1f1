//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// PEPULink - Spending insights for your wallet
#[derive(Parser)]
#[command(name = "pepulink")]
#[command(about = "Spending analytics and assistant for the PEPULink wallet", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Transaction file (.json or .csv)
    ///
    /// Without it, the built-in demo dataset is used, shifted so its latest
    /// purchase falls on the as-of date.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Config file (overrides PEPULINK_CONFIG and the data-dir override)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Date to treat as today, YYYY-MM-DD (defaults to the local date)
    #[arg(long, global = true)]
    pub as_of: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the spending analysis
    Analyze {
        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show insight findings, most severe first
    Insights {
        /// Print findings as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of findings to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Ask the assistant a single question
    Ask {
        /// The question (quotes optional)
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,

        /// Print the structured reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chat with the assistant interactively (type 'quit' to leave)
    Chat {
        /// Pause before each reply, in milliseconds
        #[arg(long, default_value = "0")]
        think_ms: u64,
    },

    /// List loaded transactions, newest first
    Transactions {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show the effective configuration and where it came from
    Config,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allow_origins: Vec<String>,
    },
}
