//! Insights configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path (`--config` or `PEPULINK_CONFIG`), otherwise the
//!    override in the data dir (~/.local/share/pepulink/config/pepulink.toml)
//!    when it exists
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/pepulink.toml");

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PEPULINK_CONFIG";

/// Parameters of the spending pattern analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub anomaly_sigma: f64,
    pub trend_window: usize,
    pub projection_days: u32,
    pub min_confidence: f64,
    pub max_confidence: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            anomaly_sigma: 2.0,
            trend_window: 10,
            projection_days: 30,
            min_confidence: 60.0,
            max_confidence: 95.0,
        }
    }
}

/// Keyword lists per assistant intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentKeywords {
    pub tips: Vec<String>,
    pub prediction: Vec<String>,
    pub anomaly: Vec<String>,
    pub optimization: Vec<String>,
    pub analysis: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for IntentKeywords {
    fn default() -> Self {
        Self {
            tips: words(&["tip", "advice", "suggest", "recommend"]),
            prediction: words(&["predict", "forecast", "future", "next month", "projection"]),
            anomaly: words(&["unusual", "anomal", "strange", "suspicious", "weird", "outlier"]),
            optimization: words(&["optimi", "save", "saving", "reduce", "cut back", "budget"]),
            analysis: words(&[
                "analy",
                "pattern",
                "breakdown",
                "spending",
                "where does my money",
            ]),
        }
    }
}

/// Assistant reply settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub tips_reduction_percent: f64,
    pub optimization_share_threshold: f64,
    pub optimization_reduction_percent: f64,
    pub keywords: IntentKeywords,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            tips_reduction_percent: 20.0,
            optimization_share_threshold: 25.0,
            optimization_reduction_percent: 15.0,
            keywords: IntentKeywords::default(),
        }
    }
}

/// Insight finding thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightsConfig {
    pub concentration_threshold: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget: Option<f64>,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            concentration_threshold: 40.0,
            monthly_budget: None,
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub assistant: AssistantConfig,
    pub insights: InsightsConfig,
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded defaults
    pub fn embedded() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Load configuration (explicit path, then override location, then defaults)
    ///
    /// An explicit path that does not exist is an error. A missing override in
    /// the data dir silently falls back to the embedded defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_file(path);
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            return Self::load_file(&path);
        }

        tracing::debug!("No config override found, using embedded defaults");
        Self::embedded()
    }

    /// Load configuration honoring the `PEPULINK_CONFIG` environment variable
    pub fn from_env() -> Result<Self> {
        let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load(explicit.as_deref())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Loaded config override");
        Self::from_toml(&content)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    fn validate(&self) -> Result<()> {
        let a = &self.analysis;
        let s = &self.assistant;
        let i = &self.insights;
        for (key, value) in [
            ("analysis.min_confidence", a.min_confidence),
            ("analysis.max_confidence", a.max_confidence),
            ("assistant.tips_reduction_percent", s.tips_reduction_percent),
            ("assistant.optimization_share_threshold", s.optimization_share_threshold),
            ("assistant.optimization_reduction_percent", s.optimization_reduction_percent),
            ("insights.concentration_threshold", i.concentration_threshold),
            ("insights.monthly_budget", i.monthly_budget.unwrap_or(0.0)),
        ] {
            if !value.is_finite() {
                return Err(Error::Config(format!("{} must be a finite number", key)));
            }
        }

        if !(a.anomaly_sigma.is_finite() && a.anomaly_sigma > 0.0) {
            return Err(Error::Config("analysis.anomaly_sigma must be positive".into()));
        }
        if a.trend_window == 0 {
            return Err(Error::Config("analysis.trend_window must be at least 1".into()));
        }
        if a.projection_days == 0 {
            return Err(Error::Config(
                "analysis.projection_days must be at least 1".into(),
            ));
        }
        if a.min_confidence > a.max_confidence {
            return Err(Error::Config(
                "analysis.min_confidence must not exceed max_confidence".into(),
            ));
        }
        if let Some(budget) = self.insights.monthly_budget {
            if budget <= 0.0 {
                return Err(Error::Config("insights.monthly_budget must be positive".into()));
            }
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pepulink").join("config").join("pepulink.toml"))
}
