//! Integration tests for the Gemini insight client against a local stub.

use rust_decimal::Decimal;

use bharatcart_admin::insights::{InsightClient, InsightError, InsightReport};
use bharatcart_admin::services::DashboardStats;
use bharatcart_integration_tests::{
    StubServer, TEST_API_KEY, gemini_reply, insights_config, unreachable_base_url,
};

fn stats() -> DashboardStats {
    DashboardStats {
        total_revenue: Decimal::new(52_499, 0),
        total_orders: 5,
        total_customers: 4,
        active_products: 6,
        revenue_growth: Decimal::new(125, 1),
        order_growth: Decimal::new(82, 1),
        customer_growth: Decimal::new(41, 1),
        product_growth: Decimal::new(24, 1),
    }
}

fn report_json() -> serde_json::Value {
    serde_json::json!({
        "summary": "Festive demand is lifting ethnic wear.",
        "recommendations": [
            "Bundle sarees with matching accessories.",
            "Restock Kolhapuri Chappals before Diwali.",
            "Run a WhatsApp campaign for repeat buyers."
        ],
        "trendingCategories": ["Ethnic Wear", "Home Decor", "Wellness"]
    })
}

// =============================================================================
// Success path
// =============================================================================

#[tokio::test]
async fn test_valid_reply_is_returned() {
    let server = StubServer::start(200, gemini_reply(&report_json()))
        .await
        .expect("stub");
    let client = InsightClient::new(&insights_config(server.base_url())).expect("client");

    let report = client.try_get_insights(&stats()).await.expect("report");
    assert_eq!(report.summary, "Festive demand is lifting ethnic wear.");
    assert_eq!(report.recommendations.len(), 3);
    assert_eq!(report.trending_categories[0], "Ethnic Wear");

    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert!(
        request
            .request_line
            .starts_with("POST /v1beta/models/gemini-3-flash-preview:generateContent ")
    );
    assert_eq!(request.header("x-goog-api-key"), Some(TEST_API_KEY));

    let body: serde_json::Value = serde_json::from_str(&request.body).expect("request json");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .expect("prompt text");
    assert!(prompt.contains("Total Revenue: \u{20b9}52499"));
    assert!(prompt.contains("Active Products: 6"));
}

// =============================================================================
// Failure paths all end in the fallback
// =============================================================================

#[tokio::test]
async fn test_unreachable_endpoint_falls_back() {
    let base_url = unreachable_base_url().await.expect("probe port");
    let client = InsightClient::new(&insights_config(base_url)).expect("client");

    assert!(matches!(
        client.try_get_insights(&stats()).await,
        Err(InsightError::Http(_))
    ));
    assert_eq!(client.get_insights(&stats()).await, InsightReport::fallback());
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let body = r#"{"error":{"code":403,"message":"API key not valid.","status":"PERMISSION_DENIED"}}"#;
    let server = StubServer::start(403, body).await.expect("stub");
    let client = InsightClient::new(&insights_config(server.base_url())).expect("client");

    let err = client.try_get_insights(&stats()).await.unwrap_err();
    assert!(matches!(
        err,
        InsightError::Api { status: 403, ref message } if message == "API key not valid."
    ));
    assert_eq!(client.get_insights(&stats()).await, InsightReport::fallback());
}

#[tokio::test]
async fn test_empty_reply_falls_back() {
    let server = StubServer::start(200, r#"{"candidates":[]}"#)
        .await
        .expect("stub");
    let client = InsightClient::new(&insights_config(server.base_url())).expect("client");

    assert!(matches!(
        client.try_get_insights(&stats()).await,
        Err(InsightError::EmptyReply)
    ));
    assert_eq!(client.get_insights(&stats()).await, InsightReport::fallback());
}

#[tokio::test]
async fn test_non_json_text_falls_back() {
    let reply = serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "Sales look great!" }] } }]
    })
    .to_string();
    let server = StubServer::start(200, reply).await.expect("stub");
    let client = InsightClient::new(&insights_config(server.base_url())).expect("client");

    assert!(matches!(
        client.try_get_insights(&stats()).await,
        Err(InsightError::Parse(_))
    ));
    assert_eq!(client.get_insights(&stats()).await, InsightReport::fallback());
}

#[tokio::test]
async fn test_schema_violation_falls_back() {
    let mut report = report_json();
    report["recommendations"] = serde_json::json!([]);
    let server = StubServer::start(200, gemini_reply(&report))
        .await
        .expect("stub");
    let client = InsightClient::new(&insights_config(server.base_url())).expect("client");

    assert!(matches!(
        client.try_get_insights(&stats()).await,
        Err(InsightError::Schema(_))
    ));
    assert_eq!(client.get_insights(&stats()).await, InsightReport::fallback());
}
