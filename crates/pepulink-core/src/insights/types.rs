//! Core types for the Insight Engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analytics::TrendDirection;

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// One category dominates spending
    CategoryConcentration,
    /// Individual transactions far outside the usual range
    UnusualTransaction,
    /// Month-end spending projection
    SpendingForecast,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::CategoryConcentration => "category_concentration",
            InsightType::UnusualTransaction => "unusual_transaction",
            InsightType::SpendingForecast => "spending_forecast",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category_concentration" => Ok(InsightType::CategoryConcentration),
            "unusual_transaction" => Ok(InsightType::UnusualTransaction),
            "spending_forecast" => Ok(InsightType::SpendingForecast),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// Severity level of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Attention,
    /// Should be addressed soon
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Attention => "attention",
            Severity::Warning => "warning",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Severity::Info => 1,
            Severity::Attention => 2,
            Severity::Warning => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "attention" => Ok(Severity::Attention),
            "warning" => Ok(Severity::Warning),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A finding produced by an insight analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Type of insight that generated this finding
    pub insight_type: InsightType,
    /// Unique key for deduplication (e.g., "unusual:tx-12")
    pub key: String,
    /// How urgent/important this finding is
    pub severity: Severity,
    /// Short title for the card
    pub title: String,
    /// One-line summary
    pub summary: String,
    /// Optional longer explanation with details
    pub detail: Option<String>,
    /// Insight-specific structured data
    pub data: serde_json::Value,
    /// When this finding was detected
    pub detected_at: DateTime<Utc>,
    /// Optional expiration (e.g., forecast only valid until end of month)
    pub expires_at: Option<DateTime<Utc>>,
}

impl Finding {
    /// Create a new finding with the current timestamp
    pub fn new(
        insight_type: InsightType,
        key: impl Into<String>,
        severity: Severity,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            insight_type,
            key: key.into(),
            severity,
            title: title.into(),
            summary: summary.into(),
            detail: None,
            data: serde_json::Value::Null,
            detected_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Add optional detail text
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Set expiration time
    pub fn with_expiration(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Data for the category concentration insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentrationData {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub frequency: usize,
    pub threshold: f64,
}

/// Data for the unusual transaction insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusualTransactionData {
    pub transaction_id: String,
    pub merchant: String,
    pub category: String,
    pub amount: f64,
    pub mean: f64,
    pub threshold: f64,
    pub lower_threshold: f64,
    /// The amount is unusually small rather than unusually large
    pub below_usual: bool,
}

/// Data for the spending forecast insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingForecastData {
    pub month_to_date: f64,
    pub projected: f64,
    pub trend_direction: TrendDirection,
    pub trend_magnitude: f64,
    pub confidence_level: f64,
    pub monthly_budget: Option<f64>,
}
