//! Spending Forecast Insight
//!
//! Projects month-end spending from the month-to-date total and compares it
//! with the optional monthly budget.

use chrono::{Datelike, NaiveDate};

use crate::analytics::TrendDirection;
use crate::error::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType, Severity, SpendingForecastData};

/// Insight that forecasts this month's total spending
pub struct SpendingForecastInsight;

impl SpendingForecastInsight {
    pub fn new() -> Self {
        Self
    }

    /// Last calendar day of the month containing `date`
    fn month_end(date: NaiveDate) -> NaiveDate {
        let (year, month) = if date.month() == 12 {
            (date.year() + 1, 1)
        } else {
            (date.year(), date.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(date)
    }
}

impl Default for SpendingForecastInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for SpendingForecastInsight {
    fn id(&self) -> InsightType {
        InsightType::SpendingForecast
    }

    fn name(&self) -> &'static str {
        "Spending Forecast"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        if ctx.analysis.is_empty() {
            return Ok(vec![]);
        }

        let prediction = &ctx.analysis.prediction;
        let budget = ctx.config.monthly_budget;
        let over_budget = budget.is_some_and(|b| prediction.projected_monthly_spending > b);
        let increasing = prediction.trend_direction == TrendDirection::Increasing;

        let severity = match (over_budget, increasing) {
            (true, true) => Severity::Warning,
            (true, false) => Severity::Attention,
            _ => Severity::Info,
        };

        let data = SpendingForecastData {
            month_to_date: prediction.month_to_date_spending,
            projected: prediction.projected_monthly_spending,
            trend_direction: prediction.trend_direction,
            trend_magnitude: prediction.trend_magnitude,
            confidence_level: prediction.confidence_level,
            monthly_budget: budget,
        };

        let summary = match budget {
            Some(b) if over_budget => format!(
                "On pace for ${:.0}, ${:.0} over your ${:.0} budget",
                prediction.projected_monthly_spending,
                prediction.projected_monthly_spending - b,
                b
            ),
            Some(b) => format!(
                "On pace for ${:.0} of your ${:.0} budget",
                prediction.projected_monthly_spending, b
            ),
            None => format!(
                "${:.0} spent so far, on pace for ${:.0}",
                prediction.month_to_date_spending, prediction.projected_monthly_spending
            ),
        };

        let key = format!("forecast:{}", ctx.as_of.format("%Y-%m"));
        let expires_at = Self::month_end(ctx.as_of)
            .and_hms_opt(23, 59, 59)
            .map(|dt| dt.and_utc());

        let mut finding = Finding::new(
            InsightType::SpendingForecast,
            key,
            severity,
            format!("{} Spending Forecast", ctx.as_of.format("%B")),
            summary,
        )
        .with_detail(format!(
            "Recent spending is {} by ${:.2} ({:.0}% confidence)",
            prediction.trend_direction, prediction.trend_magnitude, prediction.confidence_level
        ))
        .with_data(serde_json::to_value(&data)?);

        if let Some(expires_at) = expires_at {
            finding = finding.with_expiration(expires_at);
        }

        Ok(vec![finding])
    }
}
