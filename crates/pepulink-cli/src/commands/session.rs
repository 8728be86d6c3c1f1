//! Shared session setup
//!
//! Every command except `config` runs against a [`Session`]: the loaded
//! transactions, the effective configuration and the as-of date.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use pepulink_core::{
    import::load_file, sample, Config, SpendingAnalysis, SpendingAnalyzer, Transaction,
};
use tracing::{debug, info};

/// Loaded data plus settings for one CLI invocation
pub struct Session {
    pub transactions: Vec<Transaction>,
    pub config: Config,
    pub as_of: NaiveDate,
    /// The as-of date the user pinned with `--as-of`, if any
    pub pinned_as_of: Option<NaiveDate>,
}

impl Session {
    /// Load config and transactions for a command
    pub fn open(data: Option<&Path>, config: Option<&Path>, as_of: Option<NaiveDate>) -> Result<Self> {
        let config = load_config(config)?;
        let today = as_of.unwrap_or_else(|| Local::now().date_naive());

        let transactions = match data {
            Some(path) => load_file(path)
                .with_context(|| format!("Failed to load transactions from {}", path.display()))?,
            None => {
                debug!("No --data given, using the demo dataset");
                sample::transactions_ending(today)
            }
        };

        info!("Loaded {} transactions", transactions.len());

        Ok(Self {
            transactions,
            config,
            as_of: today,
            pinned_as_of: as_of,
        })
    }

    pub fn analyzer(&self) -> SpendingAnalyzer {
        SpendingAnalyzer::with_config(self.config.analysis.clone())
    }

    pub fn analysis(&self) -> SpendingAnalysis {
        self.analyzer().analyze_as_of(&self.transactions, self.as_of)
    }
}

/// Load the config from `--config`, else `PEPULINK_CONFIG`, else the override
/// file, else embedded defaults
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load(Some(p)),
        None => Config::from_env(),
    };
    config.context("Failed to load configuration")
}
