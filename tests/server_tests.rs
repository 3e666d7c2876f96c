//! # Server Tests
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use canteen_receipt::config::LayoutConfig;
use canteen_receipt::server::{self, AppState, ServerConfig};
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let layout = LayoutConfig::default().load().unwrap();
    server::router(Arc::new(AppState::new(ServerConfig::default(), layout)))
}

fn fixture(name: &str) -> Value {
    let json = fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap();
    serde_json::from_str(&json).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.starts_with("ok"));
    assert!(body.contains("listening on 127.0.0.1:8080"));
}

#[tokio::test]
async fn test_template_for_delivery_order() {
    let request = json!({
        "order": fixture("order_delivery.json"),
        "orderTime": "2024-10-26 11:32"
    });
    let response = app()
        .oneshot(post_json("/api/order/template", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let value: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(value["printData"]["orderNum"], "45");
    assert_eq!(value["printData"]["time"], "2024-10-26 11:32");
    assert_eq!(value["printData"]["userNum"], "8000");
    assert!(value["template"]["panels"][0]["paperFooter"].as_f64().unwrap() >= 220.0);
}

#[tokio::test]
async fn test_template_derives_order_time() {
    let request = json!({ "order": fixture("order_pickup.json") });
    let response = app()
        .oneshot(post_json("/api/order/template", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let value: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(value["printData"]["time"], "2024-10-26 08:05");
    assert!(value["printData"].get("addr").is_none());
}

#[tokio::test]
async fn test_template_rejects_missing_order_num() {
    let mut order = fixture("order_pickup.json");
    order.as_object_mut().unwrap().remove("orderNum");

    let response = app()
        .oneshot(post_json("/api/order/template", &json!({ "order": order })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let value: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(value["success"], false);
    assert!(value["error"].as_str().unwrap().contains("order number"));
}

#[tokio::test]
async fn test_preview_is_plain_text() {
    let request = json!({ "order": fixture("order_pickup.json") });
    let response = app()
        .oneshot(post_json("/api/order/preview", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("【堂食】"));
}
