//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use pepulink_core::{import::parse_json, sample};
use tower::ServiceExt;

fn demo_transactions() -> Vec<Transaction> {
    parse_json(
        r#"[
        {"id": 1, "amount": 45.50, "category": "Dining", "date": "2024-01-15T19:30:00", "merchant": "Olive Garden"},
        {"id": 2, "amount": 120.00, "category": "Shopping", "date": "2024-01-14T15:00:00", "merchant": "Target"},
        {"id": 3, "amount": 28.75, "category": "Transport", "date": "2024-01-13T08:00:00", "merchant": "Uber"}
    ]"#
        .as_bytes(),
    )
    .unwrap()
}

fn setup_app(transactions: Vec<Transaction>) -> Router {
    let dataset = Dataset {
        transactions,
        config: Config::default(),
        as_of: NaiveDate::from_ymd_opt(2024, 1, 15),
    };
    create_router(dataset, ServerConfig::default())
}

fn setup_test_app() -> Router {
    setup_app(demo_transactions())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// ========== State ==========

#[test]
fn test_state_built_from_dataset_alone() {
    let state = AppState::new(Dataset {
        transactions: demo_transactions(),
        config: Config::default(),
        as_of: NaiveDate::from_ymd_opt(2024, 1, 15),
    });

    assert_eq!(state.transactions.len(), 3);
    assert_eq!(state.as_of(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(state.analysis().total_amount, 194.25);
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let response = setup_test_app().oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["transactions"], 3);
}

// ========== Transactions ==========

#[tokio::test]
async fn test_list_transactions_newest_first() {
    let response = setup_test_app()
        .oneshot(get("/api/transactions"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let txs = json.as_array().unwrap();
    assert_eq!(txs.len(), 3);
    assert_eq!(txs[0]["merchant"], "Olive Garden");
    assert_eq!(txs[2]["merchant"], "Uber");
}

#[tokio::test]
async fn test_list_transactions_filters_and_pages() {
    let response = setup_test_app()
        .oneshot(get("/api/transactions?category=shopping"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], "2");

    let response = setup_test_app()
        .oneshot(get("/api/transactions?limit=1&offset=1"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["merchant"], "Target");
}

#[tokio::test]
async fn test_list_transactions_rejects_huge_limit() {
    let response = setup_test_app()
        .oneshot(get("/api/transactions?limit=5000"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Analysis ==========

#[tokio::test]
async fn test_get_analysis() {
    let response = setup_test_app()
        .oneshot(get("/api/analysis"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["transaction_count"], 3);
    assert_eq!(json["category_preferences"][0]["category"], "Shopping");
    assert_eq!(json["category_preferences"][0]["percentage"], 61.8);
    assert_eq!(json["seasonality"], "none detected");
    assert_eq!(json["prediction"]["trend_direction"], "increasing");
}

#[tokio::test]
async fn test_post_analysis() {
    let body = serde_json::json!({
        "transactions": [
            {"amount": 10.0, "category": "Dining", "date": "2024-01-02", "merchant": "Cafe"},
            {"amount": 30.0, "category": "Groceries", "date": "2024-01-03", "merchant": "Market"}
        ]
    });

    let response = setup_test_app()
        .oneshot(post_json("/api/analysis", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["transaction_count"], 2);
    assert_eq!(json["total_amount"], 40.0);
    assert_eq!(json["category_preferences"][0]["category"], "Groceries");
}

#[tokio::test]
async fn test_post_analysis_empty_list() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/analysis",
            serde_json::json!({ "transactions": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["transaction_count"], 0);
    assert_eq!(json["prediction"]["confidence_level"], 60.0);
}

#[tokio::test]
async fn test_post_analysis_rejects_invalid_record() {
    let body = serde_json::json!({
        "transactions": [
            {"amount": 10.0, "category": "Dining", "date": "2024-01-02", "merchant": "Cafe"},
            {"amount": -4.0, "category": "Dining", "date": "2024-01-03", "merchant": "Cafe"}
        ]
    });

    let response = setup_test_app()
        .oneshot(post_json("/api/analysis", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("row 1"));
}

// ========== Insights ==========

#[tokio::test]
async fn test_list_insights() {
    let response = setup_test_app()
        .oneshot(get("/api/insights"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let findings = json.as_array().unwrap();
    assert!(findings
        .iter()
        .any(|f| f["insight_type"] == "category_concentration"));
    assert!(findings
        .iter()
        .any(|f| f["insight_type"] == "spending_forecast"));
}

#[tokio::test]
async fn test_list_insights_filtered() {
    let response = setup_test_app()
        .oneshot(get("/api/insights?insight_type=spending_forecast"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let findings = json.as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["key"], "forecast:2024-01");

    let response = setup_test_app()
        .oneshot(get("/api/insights?min_severity=warning"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .all(|f| f["severity"] == "warning"));
}

#[tokio::test]
async fn test_list_insights_unknown_type() {
    let response = setup_test_app()
        .oneshot(get("/api/insights?insight_type=bogus"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sample_insights_flag_outlier() {
    let as_of = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
    let dataset = Dataset {
        transactions: sample::transactions_ending(as_of),
        config: Config::default(),
        as_of: Some(as_of),
    };
    let app = create_router(dataset, ServerConfig::default());

    let response = app
        .oneshot(get("/api/insights?insight_type=unusual_transaction"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let findings = json.as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["data"]["merchant"], "Best Buy");
}

// ========== Chat ==========

#[tokio::test]
async fn test_chat_analysis_intent() {
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({ "message": "Analyze my spending patterns" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["intent"], "analysis");
    assert_eq!(json["reply"]["kind"], "analysis");
    assert!(json["text"].as_str().unwrap().contains("Shopping"));
}

#[tokio::test]
async fn test_chat_empty_message_gets_help() {
    let response = setup_test_app()
        .oneshot(post_json("/api/chat", serde_json::json!({ "message": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["intent"], "default");
    assert_eq!(json["reply"]["kind"], "help");
}

#[tokio::test]
async fn test_chat_without_data() {
    let response = setup_app(vec![])
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({ "message": "any tips?" }),
        ))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["intent"], "tips");
    assert_eq!(json["reply"]["kind"], "no_data");
}

#[tokio::test]
async fn test_chat_rejects_long_message() {
    let message = "a".repeat(MAX_MESSAGE_LEN + 1);
    let response = setup_test_app()
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({ "message": message }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("4096"));
}
