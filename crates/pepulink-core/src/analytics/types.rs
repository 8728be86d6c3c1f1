//! Summary types produced by the spending analyzer

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// Seasonality is not modelled; every analysis reports this value
pub const SEASONALITY_NONE: &str = "none detected";

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Name for a Sunday-based weekday index
pub fn weekday_name(index: u32) -> &'static str {
    WEEKDAY_NAMES.get(index as usize).copied().unwrap_or("Unknown")
}

/// Spending totals bucketed by weekday and hour of day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBasedTrends {
    /// Sunday = 0 through Saturday = 6; only weekdays with spending appear
    pub weekday_totals: BTreeMap<u32, f64>,
    /// Hour 0-23; only hours with spending appear
    pub hourly_totals: BTreeMap<u32, f64>,
    /// Weekday with the highest total (lowest index wins ties)
    pub peak_weekday: Option<u32>,
    /// Hour with the highest total (lowest hour wins ties)
    pub peak_hour: Option<u32>,
}

impl TimeBasedTrends {
    pub fn peak_weekday_name(&self) -> Option<&'static str> {
        self.peak_weekday.map(weekday_name)
    }
}

/// Spending aggregated per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub amount: f64,
    /// Share of total spending, one decimal place
    pub percentage: f64,
    /// Number of transactions
    pub frequency: usize,
    /// Two decimal places
    pub avg_transaction: f64,
}

/// Transactions far from the mean amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalySummary {
    pub anomalous_transactions: Vec<Transaction>,
    pub mean: f64,
    pub standard_deviation: f64,
    /// mean + sigma * standard_deviation
    pub threshold: f64,
    /// mean - sigma * standard_deviation; amounts below it are unusually small
    pub lower_threshold: f64,
}

impl AnomalySummary {
    /// Whether a positive amount can fall below the usual range
    pub fn has_lower_bound(&self) -> bool {
        self.lower_threshold > 0.0
    }

    /// "$34.08 to $147.92", or "above $147.92" when nothing can be too small
    pub fn usual_range(&self) -> String {
        usual_range(self.lower_threshold, self.threshold)
    }
}

/// Human-readable usual amount range for a pair of anomaly bounds
pub fn usual_range(lower: f64, upper: f64) -> String {
    if lower > 0.0 {
        format!("${:.2} to ${:.2}", lower, upper)
    } else {
        format!("up to ${:.2}", upper)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trend and month-end projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub trend_direction: TrendDirection,
    /// Absolute difference between the two trend windows
    pub trend_magnitude: f64,
    /// Spending in the current month up to the as-of date
    pub month_to_date_spending: f64,
    pub projected_monthly_spending: f64,
    /// Heuristic percentage, not a statistical confidence interval
    pub confidence_level: f64,
}

/// Full result of a spending analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub transaction_count: usize,
    pub total_amount: f64,
    pub time_based_trends: TimeBasedTrends,
    /// Largest category first
    pub category_preferences: Vec<CategorySummary>,
    pub anomalies: AnomalySummary,
    pub seasonality: String,
    pub prediction: Prediction,
}

impl SpendingAnalysis {
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    pub fn top_category(&self) -> Option<&CategorySummary> {
        self.category_preferences.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(0), "Sunday");
        assert_eq!(weekday_name(6), "Saturday");
        assert_eq!(weekday_name(9), "Unknown");
    }

    #[test]
    fn test_usual_range_text() {
        assert_eq!(usual_range(34.08, 147.92), "$34.08 to $147.92");
        assert_eq!(usual_range(-264.8, 429.08), "up to $429.08");
    }

    #[test]
    fn test_trend_direction_serialization() {
        let json = serde_json::to_string(&TrendDirection::Increasing).unwrap();
        assert_eq!(json, "\"increasing\"");
        assert_eq!(TrendDirection::Decreasing.to_string(), "decreasing");
    }
}
