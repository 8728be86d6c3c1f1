//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use pepulink_core::Transaction;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    /// Exact category match (case-insensitive)
    pub category: Option<String>,
}

fn default_limit() -> usize {
    100
}

/// GET /api/transactions - Loaded transactions, newest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    if params.limit == 0 || params.limit > MAX_PAGE_LIMIT {
        return Err(AppError::bad_request(&format!(
            "limit must be between 1 and {}",
            MAX_PAGE_LIMIT
        )));
    }

    let mut transactions: Vec<&Transaction> = state
        .transactions
        .iter()
        .filter(|t| match &params.category {
            Some(category) => t.category.eq_ignore_ascii_case(category),
            None => true,
        })
        .collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    let page = transactions
        .into_iter()
        .skip(params.offset)
        .take(params.limit)
        .cloned()
        .collect();

    Ok(Json(page))
}
