//! PEPULink Insights Server
//!
//! Axum-based REST API serving spending analysis, insight findings and the
//! chat assistant over a dataset loaded at startup.
//!
//! Security features:
//! - Restrictive CORS policy
//! - Input validation (message length, record shape, pagination limits)
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use pepulink_core::{
    Assistant, Config, InsightEngine, SpendingAnalysis, SpendingAnalyzer, Transaction,
};

mod handlers;

/// Maximum chat message size in bytes
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Everything the server answers questions about
#[derive(Clone)]
pub struct Dataset {
    pub transactions: Vec<Transaction>,
    pub config: Config,
    /// Fixed "today"; `None` uses the local date at request time
    pub as_of: Option<NaiveDate>,
}

/// Shared application state
///
/// Built once at startup and never mutated.
pub struct AppState {
    pub transactions: Vec<Transaction>,
    pub settings: Config,
    pub analyzer: SpendingAnalyzer,
    pub assistant: Assistant,
    pub engine: InsightEngine,
    as_of: Option<NaiveDate>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            analyzer: SpendingAnalyzer::with_config(dataset.config.analysis.clone()),
            assistant: Assistant::new(dataset.config.assistant.clone()),
            engine: InsightEngine::new(),
            transactions: dataset.transactions,
            settings: dataset.config,
            as_of: dataset.as_of,
        }
    }

    /// Date treated as "today" for projections
    pub fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Analysis of the loaded dataset
    pub fn analysis(&self) -> SpendingAnalysis {
        self.analyze(&self.transactions)
    }

    /// Analysis of an arbitrary transaction list with the server's settings
    pub fn analyze(&self, transactions: &[Transaction]) -> SpendingAnalysis {
        self.analyzer.analyze_as_of(transactions, self.as_of())
    }
}

/// Create the application router
pub fn create_router(dataset: Dataset, config: ServerConfig) -> Router {
    let state = Arc::new(AppState::new(dataset));
    info!(
        "Serving {} transactions ({} insight analyzers)",
        state.transactions.len(),
        state.engine.insight_types().len()
    );

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/transactions", get(handlers::list_transactions))
        .route(
            "/analysis",
            get(handlers::get_analysis).post(handlers::analyze_transactions),
        )
        .route("/insights", get(handlers::list_insights))
        .route("/chat", post(handlers::chat));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ))
}

/// Start the server
pub async fn serve(
    dataset: Dataset,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let app = create_router(dataset, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
