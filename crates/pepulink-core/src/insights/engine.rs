//! Insight Engine - runs insight analyzers over a spending analysis

use chrono::NaiveDate;

use crate::analytics::SpendingAnalysis;
use crate::config::InsightsConfig;
use crate::Result;

use super::types::{Finding, InsightType};
use super::{CategoryConcentrationInsight, SpendingForecastInsight, UnusualTransactionInsight};

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    /// Precomputed spending analysis
    pub analysis: &'a SpendingAnalysis,
    /// Thresholds
    pub config: &'a InsightsConfig,
    /// Date treated as "today"
    pub as_of: NaiveDate,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(analysis: &'a SpendingAnalysis, config: &'a InsightsConfig, as_of: NaiveDate) -> Self {
        Self {
            analysis,
            config,
            as_of,
        }
    }
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze data and produce findings
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Finding>>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with built-in insight types
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(CategoryConcentrationInsight::new()));
        engine.register(Box::new(UnusualTransactionInsight::new()));
        engine.register(Box::new(SpendingForecastInsight::new()));

        engine
    }

    /// Create an engine with no analyzers registered
    pub fn empty() -> Self {
        Self { insights: vec![] }
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all insight analyzers and collect findings
    ///
    /// A failing analyzer is logged and skipped.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Finding> {
        let mut all_findings = vec![];

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(findings) => {
                    tracing::debug!(
                        insight = insight.id().as_str(),
                        count = findings.len(),
                        "Insight analysis complete"
                    );
                    all_findings.extend(findings);
                }
                Err(e) => {
                    tracing::warn!(
                        insight = insight.id().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        // Sort by severity (highest first), then by key for a stable order
        all_findings.sort_by(|a, b| {
            b.severity
                .priority()
                .cmp(&a.severity.priority())
                .then_with(|| a.key.cmp(&b.key))
        });

        all_findings
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.insights.iter().map(|i| i.id()).collect()
    }
}
