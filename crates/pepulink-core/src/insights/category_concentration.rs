//! Category Concentration Insight
//!
//! Flags when a single category takes a large share of total spending.

use crate::error::Result;

use super::engine::{AnalysisContext, Insight};
use super::types::{ConcentrationData, Finding, InsightType, Severity};

/// Insight that flags a dominant spending category
pub struct CategoryConcentrationInsight {
    /// Share at which the finding becomes a warning (default 60%)
    warning_share: f64,
}

impl CategoryConcentrationInsight {
    pub fn new() -> Self {
        Self {
            warning_share: 60.0,
        }
    }
}

impl Default for CategoryConcentrationInsight {
    fn default() -> Self {
        Self::new()
    }
}

impl Insight for CategoryConcentrationInsight {
    fn id(&self) -> InsightType {
        InsightType::CategoryConcentration
    }

    fn name(&self) -> &'static str {
        "Category Concentration"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>> {
        let threshold = ctx.config.concentration_threshold;

        let Some(top) = ctx.analysis.top_category() else {
            return Ok(vec![]);
        };
        // A single category is trivially 100%
        if ctx.analysis.category_preferences.len() < 2 || top.percentage < threshold {
            return Ok(vec![]);
        }

        let severity = if top.percentage >= self.warning_share {
            Severity::Warning
        } else {
            Severity::Attention
        };

        let data = ConcentrationData {
            category: top.category.clone(),
            amount: top.amount,
            percentage: top.percentage,
            frequency: top.frequency,
            threshold,
        };

        let key = format!(
            "concentration:{}:{}",
            top.category.to_lowercase().replace(' ', "_"),
            ctx.as_of.format("%Y-%m")
        );

        let finding = Finding::new(
            InsightType::CategoryConcentration,
            key,
            severity,
            format!("{} is {:.0}% of your spending", top.category, top.percentage),
            format!(
                "${:.2} across {} purchase{} (avg ${:.2})",
                top.amount,
                top.frequency,
                if top.frequency == 1 { "" } else { "s" },
                top.avg_transaction
            ),
        )
        .with_data(serde_json::to_value(&data)?);

        Ok(vec![finding])
    }
}
