//! PEPULink Core Library
//!
//! Shared functionality for the PEPULink wallet's insight features:
//! - Transaction records and shape validation
//! - Spending pattern analytics (category, time-of-week, anomalies, trend)
//! - Assistant intent matching and reply generation
//! - Insight findings for the dashboard
//! - JSON/CSV transaction loading and the built-in mock dataset
//! - Layered TOML configuration

pub mod analytics;
pub mod assistant;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod sample;

pub use analytics::{analyze_spending_patterns, SpendingAnalysis, SpendingAnalyzer};
pub use assistant::{Assistant, AssistantResponse, Intent, IntentMatcher, Reply};
pub use config::{AnalysisConfig, AssistantConfig, Config, InsightsConfig};
pub use error::{Error, Result};
pub use insights::{AnalysisContext, Finding, Insight, InsightEngine, InsightType, Severity};
pub use models::{RawTransaction, Transaction};
