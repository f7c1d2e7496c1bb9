#![cfg(feature = "http_api")]

use allocation_view::{Allocation, Percentage, ViewConfig, http_api};
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tower::util::ServiceExt;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn seed() -> Vec<Allocation> {
    vec![
        Allocation::new(
            "a1",
            "E",
            "Eve",
            "Apollo",
            d(2024, 3, 1),
            d(2024, 3, 10),
            Percentage::from_whole(50),
        ),
        Allocation::new(
            "a2",
            "E",
            "Eve",
            "Gemini",
            d(2024, 3, 5),
            d(2024, 3, 15),
            Percentage::from_whole(60),
        ),
    ]
}

fn new_router() -> axum::Router {
    let state = http_api::AppState::new(seed(), ViewConfig::default());
    http_api::router(state)
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = get_json(new_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn day_endpoint_classifies_over_allocation() {
    let (status, body) = get_json(new_router(), "/days/2024-03-07").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-03-07");
    assert_eq!(body["aggregates"][0]["state"], "over");
    assert_eq!(body["aggregates"][0]["total_percentage"], 110.0);
    assert_eq!(body["aggregates"][0]["allocations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn calendar_and_navigation() {
    let app = new_router();
    let (status, body) = get_json(app.clone(), "/calendar?date=2024-02-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["month_label"], "February 2024");
    assert_eq!(body["days"].as_array().unwrap().len(), 29);

    let (_, next) = get_json(app.clone(), "/calendar/next?date=2024-01-31").await;
    assert_eq!(next["date"], "2024-02-29");
    let (_, prev) = get_json(app, "/calendar/prev?date=2024-03-31").await;
    assert_eq!(prev["date"], "2024-02-29");
}

#[tokio::test]
async fn weeks_endpoint_honors_count_and_anchor() {
    let (status, body) = get_json(new_router(), "/weeks?now=2024-03-15&count=1").await;
    assert_eq!(status, StatusCode::OK);
    let windows = body.as_array().unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0]["start"], "2024-03-10");
    assert_eq!(windows[0]["end"], "2024-03-16");
    assert_eq!(windows[0]["allocations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_dates_are_bad_requests() {
    let (status, body) = get_json(new_router(), "/days/not-a-date").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn replacing_allocations_reports_issues() {
    let app = new_router();
    let payload = json!([
        {"id": "b1", "employee_id": "F", "employee_name": "Fay", "project_name": "Apollo",
         "start_date": "2024-03-09", "end_date": "2024-03-01", "allocation_percentage": 100}
    ]);
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/allocations")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["issues"][0]["kind"], "malformed_interval");

    let (_, listed) = get_json(app, "/allocations").await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], "b1");
}

#[tokio::test]
async fn oversized_and_unparsable_week_counts_are_bad_requests() {
    let app = new_router();
    let (status, body) = get_json(app.clone(), "/weeks?now=2024-03-15&count=100000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert!(body["message"].as_str().unwrap().contains("exceeds the maximum"));

    let (status, body) = get_json(app, "/weeks?count=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn malformed_json_body_is_a_json_bad_request() {
    let app = new_router();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/allocations")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_request");

    let (_, listed) = get_json(app, "/allocations").await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}
