//! Chat assistant handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{AppError, AppState, MAX_MESSAGE_LEN};
use pepulink_core::AssistantResponse;

/// Request body for a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /api/chat - Reply to a message about the loaded dataset
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<AssistantResponse>, AppError> {
    if req.message.len() > MAX_MESSAGE_LEN {
        return Err(AppError::bad_request(&format!(
            "message exceeds {} bytes",
            MAX_MESSAGE_LEN
        )));
    }

    let analysis = state.analysis();
    Ok(Json(state.assistant.respond(&req.message, &analysis)))
}
