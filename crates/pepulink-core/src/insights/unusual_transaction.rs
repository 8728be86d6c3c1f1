//! Unusual Transaction Insight
//!
//! Surfaces each transaction the analyzer marked as an anomaly.

use crate::analytics::stats::round_to;
use crate::error::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{Finding, InsightType, Severity, UnusualTransactionData};

/// Insight that reports anomalous transactions
pub struct UnusualTransactionInsight {
    /// Amount relative to the threshold at which a finding becomes a warning
    warning_multiple: f64,
}

impl UnusualTransactionInsight {
    pub fn new() -> Self {
        Self {
            warning_multiple: 2.0,
        }
    }
}

impl Default for UnusualTransactionInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for UnusualTransactionInsight {
    fn id(&self) -> InsightType {
        InsightType::UnusualTransaction
    }

    fn name(&self) -> &'static str {
        "Unusual Transaction"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let anomalies = &ctx.analysis.anomalies;
        let mut findings = Vec::with_capacity(anomalies.anomalous_transactions.len());

        for tx in &anomalies.anomalous_transactions {
            let below_usual = tx.amount < anomalies.mean;
            let severity = if tx.amount >= anomalies.threshold * self.warning_multiple {
                Severity::Warning
            } else {
                Severity::Attention
            };

            let data = UnusualTransactionData {
                transaction_id: tx.id.clone(),
                merchant: tx.merchant.clone(),
                category: tx.category.clone(),
                amount: tx.amount,
                mean: round_to(anomalies.mean, 2),
                threshold: round_to(anomalies.threshold, 2),
                lower_threshold: round_to(anomalies.lower_threshold, 2),
                below_usual,
            };

            let finding = Finding::new(
                InsightType::UnusualTransaction,
                format!("unusual:{}", tx.id),
                severity,
                format!(
                    "Unusually {} {} charge",
                    if below_usual { "small" } else { "large" },
                    tx.category
                ),
                format!(
                    "${:.2} at {} on {}",
                    tx.amount,
                    tx.merchant,
                    tx.date.format("%b %-d")
                ),
            )
            .with_detail(format!(
                "Your typical purchase is ${:.2}; the usual range is {}.",
                anomalies.mean,
                anomalies.usual_range()
            ))
            .with_data(serde_json::to_value(&data)?);

            findings.push(finding);
        }

        Ok(findings)
    }
}
