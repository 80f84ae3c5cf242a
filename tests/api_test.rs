//! REST API tests: routes, status codes and response envelope

use alloy_primitives::{address, Address};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use ruster_guard::api::{create_router, handlers::AppState};
use ruster_guard::providers::mock::{StaticChainReader, StaticFetcher};
use ruster_guard::{Chain, ChainReader, ScanConfig, TokenScanner};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

const TOKEN: Address = address!("1111111111111111111111111111111111111111");

fn app() -> Router {
    let config = ScanConfig::default();
    let factory = config.chain(Chain::Eth).unwrap().factory;
    let reader: Arc<dyn ChainReader> = Arc::new(
        StaticChainReader::new()
            .with_owner(TOKEN, Address::ZERO)
            .with_factory(factory),
    );
    let readers: HashMap<Chain, Arc<dyn ChainReader>> =
        Chain::ALL.into_iter().map(|c| (c, reader.clone())).collect();
    let fetcher = StaticFetcher::json(json!({ "summary": { "risk": "low" } }));
    let scanner = Arc::new(TokenScanner::new(config, readers, Arc::new(fetcher)));
    create_router(Arc::new(AppState::new(scanner)))
}

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    assert!(response.headers().contains_key("x-request-id"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_scan(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/scan")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    for uri in ["/health", "/v1/health"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = call(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["chains"], json!(["eth", "bsc"]));
    }
}

#[tokio::test]
async fn test_scan_returns_verdict() {
    let request = post_scan(json!({ "tokenAddress": TOKEN.to_string(), "chain": "eth" }));
    let (status, body) = call(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    // No pool on the mocked factory
    assert_eq!(body["data"]["overall"], "red");
    let checks = body["data"]["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 3);
    assert_eq!(checks[0]["id"], "owner-renounced");
    assert!(checks[0].get("explanation").is_none());
}

#[tokio::test]
async fn test_scan_with_mode_renders_explanations() {
    let request = post_scan(json!({
        "tokenAddress": TOKEN.to_string(),
        "chain": "bsc",
        "mode": "beginner"
    }));
    let (status, body) = call(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    for check in body["data"]["checks"].as_array().unwrap() {
        let explanation = check["explanation"].as_str().unwrap();
        assert!(explanation.contains("Technical details:"));
    }
}

#[tokio::test]
async fn test_invalid_address_is_400() {
    let request = post_scan(json!({ "tokenAddress": "0xdeadbeef", "chain": "eth" }));
    let (status, body) = call(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "TOKEN_INVALID_ADDRESS");
}

#[tokio::test]
async fn test_unsupported_chain_is_400() {
    let request = post_scan(json!({ "tokenAddress": TOKEN.to_string(), "chain": "solana" }));
    let (status, body) = call(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "CFG_UNSUPPORTED_CHAIN");
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let request = post_scan(json!({ "address": "0x00" }));
    let (status, body) = call(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "API_BAD_REQUEST");
}
