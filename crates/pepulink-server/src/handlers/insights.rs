//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use pepulink_core::{AnalysisContext, Finding, InsightType, Severity};

/// Query parameters for listing insights
#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    /// Filter by insight type
    pub insight_type: Option<String>,
    /// Only findings at or above this severity
    pub min_severity: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/insights - Findings for the loaded dataset, most severe first
pub async fn list_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightQuery>,
) -> Result<Json<Vec<Finding>>, AppError> {
    let insight_type = params
        .insight_type
        .as_deref()
        .map(|s| s.parse::<InsightType>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;
    let min_severity = params
        .min_severity
        .as_deref()
        .map(|s| s.parse::<Severity>())
        .transpose()
        .map_err(|e| AppError::bad_request(&e))?;

    let analysis = state.analysis();
    let ctx = AnalysisContext::new(&analysis, &state.settings.insights, state.as_of());
    let mut findings = state.engine.analyze_all(&ctx);

    if let Some(insight_type) = insight_type {
        findings.retain(|f| f.insight_type == insight_type);
    }
    if let Some(min) = min_severity {
        findings.retain(|f| f.severity.priority() >= min.priority());
    }
    if let Some(limit) = params.limit {
        findings.truncate(limit);
    }

    Ok(Json(findings))
}
