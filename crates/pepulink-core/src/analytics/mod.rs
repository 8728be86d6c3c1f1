//! Spending Analytics
//!
//! Descriptive statistics over a list of transactions:
//!
//! - **Time-based trends** - totals per weekday and hour, with peaks
//! - **Category preferences** - totals, shares, frequency and averages
//! - **Anomalies** - amounts more than 2 standard deviations from the mean
//! - **Prediction** - naive window trend and month-to-date projection
//!
//! Everything here is pure and synchronous. Empty input produces a zeroed
//! summary rather than an error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pepulink_core::analytics::SpendingAnalyzer;
//!
//! let analysis = SpendingAnalyzer::new().analyze(&transactions);
//! println!("{:?}", analysis.top_category());
//! ```

pub mod patterns;
pub mod stats;
pub mod types;

pub use patterns::{
    analyze_spending_patterns, category_preferences, detect_anomalies, month_to_date_total,
    time_based_trends, trend_delta, SpendingAnalyzer,
};
pub use types::{
    usual_range, weekday_name, AnomalySummary, CategorySummary, Prediction, SpendingAnalysis,
    TimeBasedTrends, TrendDirection, SEASONALITY_NONE,
};
