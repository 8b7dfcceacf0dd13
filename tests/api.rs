use std::num::NonZeroU64;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use storefront_pager::{api, state::State, viewport::BudgetPolicy};
use tower::ServiceExt;

fn app() -> Router {
    api::app(State {
        budgets: BudgetPolicy::default(),
        default_page_size: NonZeroU64::new(15).unwrap(),
    })
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn get_json(uri: &str) -> Value {
    let (status, body) = get(uri).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
    serde_json::from_slice(&body).unwrap()
}

fn window(body: &Value) -> Vec<u64> {
    body["data"]["window"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    assert_eq!(get_json("/api/v1/health").await, json!({ "data": "ok" }));
}

#[tokio::test]
async fn default_page_size_and_budget() {
    let body = get_json("/api/v1/pagination?total_items=47").await;
    assert_eq!(body["data"]["total_pages"], 4);
    assert_eq!(body["data"]["current_page"], 1);
    assert_eq!(window(&body), vec![1, 2, 3, 4]);

    let first = &body["data"]["buttons"][0];
    assert_eq!(first["kind"], "first");
    assert_eq!(first["is_disabled"], true);
}

#[tokio::test]
async fn viewport_width_selects_budget() {
    let wide = get_json(
        "/api/v1/pagination?total_items=500&items_per_page=20&current_page=13&viewport_width=1440",
    )
    .await;
    assert_eq!(window(&wide), (8..18u64).collect::<Vec<_>>());

    let narrow = get_json(
        "/api/v1/pagination?total_items=500&items_per_page=20&current_page=13&viewport_width=375",
    )
    .await;
    assert_eq!(window(&narrow), vec![11, 12, 13, 14, 15]);
}

#[tokio::test]
async fn explicit_budget_wins_and_end_is_anchored() {
    let body = get_json(
        "/api/v1/pagination?total_items=500&items_per_page=20&current_page=25&budget=5&viewport_width=1440",
    )
    .await;
    assert_eq!(window(&body), vec![21, 22, 23, 24, 25]);

    let buttons = body["data"]["buttons"].as_array().unwrap();
    let last = &buttons[buttons.len() - 1];
    assert_eq!(last["kind"], "last");
    assert_eq!(last["is_disabled"], true);
}

#[tokio::test]
async fn out_of_range_page_is_clamped() {
    let body =
        get_json("/api/v1/pagination?total_items=100&items_per_page=10&current_page=-3").await;
    assert_eq!(body["data"]["current_page"], 1);
}

#[tokio::test]
async fn empty_listing_has_no_controls() {
    let body = get_json("/api/v1/pagination?total_items=0&items_per_page=20").await;
    assert_eq!(body, json!({ "data": null }));
}

#[tokio::test]
async fn non_positive_page_size_is_bad_request() {
    let (status, body) = get("/api/v1/pagination?total_items=10&items_per_page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8_lossy(&body).contains("items_per_page"));
}

#[tokio::test]
async fn malformed_query_is_bad_request() {
    let (status, _) = get("/api/v1/pagination?total_items=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn goto_clamps_and_reports_change() {
    let body = get_json(
        "/api/v1/pagination/goto?total_items=500&items_per_page=20&current_page=3&requested_page=99",
    )
    .await;
    assert_eq!(body, json!({ "data": { "page": 25, "changed": true } }));

    let same = get_json(
        "/api/v1/pagination/goto?total_items=500&items_per_page=20&current_page=3&requested_page=3",
    )
    .await;
    assert_eq!(same["data"]["changed"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get("/api/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
