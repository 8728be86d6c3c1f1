//! Spending pattern analyzer

use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDate};

use crate::config::AnalysisConfig;
use crate::models::Transaction;

use super::stats::{self, round_to};
use super::types::{
    AnomalySummary, CategorySummary, Prediction, SpendingAnalysis, TimeBasedTrends,
    TrendDirection, SEASONALITY_NONE,
};

/// Analyze with default settings as of today's local date
pub fn analyze_spending_patterns(transactions: &[Transaction]) -> SpendingAnalysis {
    SpendingAnalyzer::new().analyze(transactions)
}

/// Computes [`SpendingAnalysis`] summaries from a transaction list
///
/// The analyzer holds only configuration; every call recomputes from the
/// slice it is given.
#[derive(Debug, Clone, Default)]
pub struct SpendingAnalyzer {
    config: AnalysisConfig,
}

impl SpendingAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze as of today's local date
    pub fn analyze(&self, transactions: &[Transaction]) -> SpendingAnalysis {
        self.analyze_as_of(transactions, Local::now().date_naive())
    }

    /// Analyze treating `as_of` as "today" for the month-to-date projection
    pub fn analyze_as_of(&self, transactions: &[Transaction], as_of: NaiveDate) -> SpendingAnalysis {
        let amounts: Vec<f64> = transactions.iter().map(|t| t.amount).collect();
        let total_amount = stats::sum(&amounts);

        let analysis = SpendingAnalysis {
            transaction_count: transactions.len(),
            total_amount: round_to(total_amount, 2),
            time_based_trends: time_based_trends(transactions),
            category_preferences: category_preferences(transactions),
            anomalies: detect_anomalies(transactions, self.config.anomaly_sigma),
            seasonality: SEASONALITY_NONE.to_string(),
            prediction: self.predict(transactions, &amounts, as_of),
        };

        tracing::debug!(
            transactions = analysis.transaction_count,
            categories = analysis.category_preferences.len(),
            anomalies = analysis.anomalies.anomalous_transactions.len(),
            trend = analysis.prediction.trend_direction.as_str(),
            "Spending analysis complete"
        );

        analysis
    }

    fn predict(&self, transactions: &[Transaction], amounts: &[f64], as_of: NaiveDate) -> Prediction {
        let delta = trend_delta(transactions, self.config.trend_window);
        let trend_direction = if delta > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };

        let month_to_date = month_to_date_total(transactions, as_of);
        let projected = month_to_date * self.config.projection_days as f64 / as_of.day() as f64;

        Prediction {
            trend_direction,
            trend_magnitude: round_to(delta.abs(), 2),
            month_to_date_spending: round_to(month_to_date, 2),
            projected_monthly_spending: round_to(projected, 2),
            confidence_level: self.confidence(amounts),
        }
    }

    /// `(1 - CV) * 100` rounded to a whole percent and clamped to the
    /// configured bounds. No data (or a zero mean) yields the lower bound.
    fn confidence(&self, amounts: &[f64]) -> f64 {
        let min = self.config.min_confidence;
        let max = self.config.max_confidence;
        match stats::coefficient_of_variation(amounts) {
            Some(cv) => ((1.0 - cv) * 100.0).round().clamp(min, max),
            None => min,
        }
    }
}

/// Bucket spending by weekday and hour and find the peaks
pub fn time_based_trends(transactions: &[Transaction]) -> TimeBasedTrends {
    let mut weekday_totals: BTreeMap<u32, f64> = BTreeMap::new();
    let mut hourly_totals: BTreeMap<u32, f64> = BTreeMap::new();

    for tx in transactions {
        *weekday_totals.entry(tx.weekday()).or_insert(0.0) += tx.amount;
        *hourly_totals.entry(tx.hour()).or_insert(0.0) += tx.amount;
    }

    TimeBasedTrends {
        peak_weekday: peak_key(&weekday_totals),
        peak_hour: peak_key(&hourly_totals),
        weekday_totals,
        hourly_totals,
    }
}

/// Key with the largest value; ascending iteration plus a strict comparison
/// means the lowest key wins a tie
fn peak_key(buckets: &BTreeMap<u32, f64>) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;
    for (&key, &amount) in buckets {
        match best {
            Some((_, best_amount)) if amount <= best_amount => {}
            _ => best = Some((key, amount)),
        }
    }
    best.map(|(key, _)| key)
}

/// Per-category totals, largest first (ties by category name)
pub fn category_preferences(transactions: &[Transaction]) -> Vec<CategorySummary> {
    let total: f64 = transactions.iter().map(|t| t.amount).sum();

    let mut by_category: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for tx in transactions {
        let entry = by_category.entry(tx.category.as_str()).or_insert((0.0, 0));
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut summaries: Vec<(f64, CategorySummary)> = by_category
        .into_iter()
        .map(|(category, (amount, frequency))| {
            let summary = CategorySummary {
                category: category.to_string(),
                amount: round_to(amount, 2),
                percentage: if total > 0.0 {
                    round_to(amount / total * 100.0, 1)
                } else {
                    0.0
                },
                frequency,
                avg_transaction: round_to(amount / frequency as f64, 2),
            };
            (amount, summary)
        })
        .collect();

    // Order on the unrounded sums; BTreeMap already yields names in ascending
    // order and a stable sort keeps it for equal sums
    summaries.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    summaries.into_iter().map(|(_, summary)| summary).collect()
}

/// Flag transactions more than `sigma` population standard deviations from the
/// mean, in either direction
pub fn detect_anomalies(transactions: &[Transaction], sigma: f64) -> AnomalySummary {
    let amounts: Vec<f64> = transactions.iter().map(|t| t.amount).collect();
    let mean = stats::mean(&amounts);
    let standard_deviation = stats::population_std_dev(&amounts);
    let limit = sigma * standard_deviation;

    let anomalous_transactions = transactions
        .iter()
        .filter(|t| (t.amount - mean).abs() > limit)
        .cloned()
        .collect();

    AnomalySummary {
        anomalous_transactions,
        mean,
        standard_deviation,
        threshold: mean + limit,
        lower_threshold: mean - limit,
    }
}

/// Sum of the latest `window` transactions minus the sum of the `window`
/// before them, in date order. Zero for fewer than two transactions.
pub fn trend_delta(transactions: &[Transaction], window: usize) -> f64 {
    let n = transactions.len();
    if n < 2 {
        return 0.0;
    }

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date);

    let recent_start = n - window.min(n);
    let previous_start = n - (window * 2).min(n);

    let recent: f64 = sorted[recent_start..].iter().map(|t| t.amount).sum();
    let previous: f64 = sorted[previous_start..recent_start]
        .iter()
        .map(|t| t.amount)
        .sum();

    recent - previous
}

/// Spending in the month of `as_of`, up to and including `as_of`
pub fn month_to_date_total(transactions: &[Transaction], as_of: NaiveDate) -> f64 {
    transactions
        .iter()
        .filter(|t| {
            let day = t.day();
            day.year() == as_of.year() && day.month() == as_of.month() && day <= as_of
        })
        .map(|t| t.amount)
        .sum()
}
