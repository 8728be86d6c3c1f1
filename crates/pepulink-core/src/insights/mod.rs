//! Insight Engine - Proactive Spending Insights
//!
//! The Insight Engine turns a spending analysis into the insight cards shown
//! on the wallet dashboard. Each analyzer looks at one aspect and emits zero
//! or more findings, ranked by severity.
//!
//! ## Core Insight Types
//!
//! - **Category Concentration** - One category dominates spending
//! - **Unusual Transaction** - Purchases far outside the usual range
//! - **Spending Forecast** - Month-end projection vs budget
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pepulink_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new(&analysis, &config.insights, as_of);
//! let findings = engine.analyze_all(&ctx);
//! ```

pub mod category_concentration;
pub mod engine;
pub mod spending_forecast;
pub mod types;
pub mod unusual_transaction;

pub use category_concentration::CategoryConcentrationInsight;
pub use engine::{AnalysisContext, Insight, InsightEngine};
pub use spending_forecast::SpendingForecastInsight;
pub use types::{
    ConcentrationData, Finding, InsightType, Severity, SpendingForecastData,
    UnusualTransactionData,
};
pub use unusual_transaction::UnusualTransactionInsight;
