//! Spending analysis handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use crate::{AppError, AppState};
use pepulink_core::{import::validate_all, Error, RawTransaction, SpendingAnalysis};

/// Request body for analyzing caller-supplied transactions
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub transactions: Vec<RawTransaction>,
}

/// GET /api/analysis - Analysis of the loaded dataset
pub async fn get_analysis(State(state): State<Arc<AppState>>) -> Json<SpendingAnalysis> {
    Json(state.analysis())
}

/// POST /api/analysis - Analyze the posted transactions
///
/// Records go through the same validation as file imports; the first bad
/// record is reported with its position.
pub async fn analyze_transactions(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<SpendingAnalysis>, AppError> {
    let transactions = match validate_all(req.transactions) {
        Ok(txs) => txs,
        Err(Error::InvalidData(msg)) => return Err(AppError::bad_request(&msg)),
        Err(e) => return Err(e.into()),
    };

    debug!(count = transactions.len(), "Analyzing posted transactions");
    Ok(Json(state.analyze(&transactions)))
}
