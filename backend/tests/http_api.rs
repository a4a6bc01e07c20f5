//! Router-level tests for the REST API.

#![cfg(feature = "http-server")]

mod support;

use axum::{
    body::{to_bytes, Body, BodyDataStream},
    http::{Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

use flight_delays::http::{create_router, AppState};

fn app() -> Router {
    create_router(AppState::new(support::three_flight_dataset()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Next `snapshot` event on an SSE body, skipping keep-alive comments.
async fn next_snapshot(frames: &mut BodyDataStream) -> Value {
    loop {
        let frame = tokio::time::timeout(Duration::from_secs(5), frames.next())
            .await
            .expect("stream stalled")
            .expect("stream ended")
            .unwrap();
        let text = String::from_utf8(frame.to_vec()).unwrap();
        if let Some(event) = text.strip_prefix("event: snapshot\n") {
            let data = event.trim_end().strip_prefix("data: ").unwrap();
            return serde_json::from_str(data).unwrap();
        }
    }
}

#[tokio::test]
async fn test_health_reports_record_count() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"], 3);
}

#[tokio::test]
async fn test_options_follow_state_selection() {
    let app = app();

    let (_, body) = send(&app, "GET", "/v1/options", None).await;
    assert_eq!(body["states"], json!(["CA", "TX"]));
    assert_eq!(body["cities"], json!(["Austin", "LA", "SF"]));
    assert_eq!(body["months"].as_array().unwrap().len(), 12);

    let (status, _) = send(
        &app,
        "PUT",
        "/v1/selection/states",
        Some(json!({"states": ["CA"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/v1/options", None).await;
    assert_eq!(body["cities"], json!(["LA", "SF"]));
}

#[tokio::test]
async fn test_selection_updates_table_and_chart() {
    let app = app();

    let (status, snapshot) = send(
        &app,
        "PUT",
        "/v1/selection/min-delay",
        Some(json!({"min_delay": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["generation"], 1);
    assert_eq!(snapshot["row_count"], 2);

    let (_, table) = send(&app, "GET", "/v1/view/table", None).await;
    assert_eq!(table["generation"], 1);
    assert_eq!(table["total"], 2);
    assert_eq!(table["columns"][1], "DATE_FLIGHT");
    assert_eq!(table["rows"][0]["flight_number"], "101");
    assert_eq!(table["rows"][0]["date"], "2015-01-01");

    let (_, chart) = send(&app, "GET", "/v1/view/chart", None).await;
    assert_eq!(chart["chart"]["status"], "ready");
    assert_eq!(chart["chart"]["axes"]["y_range"], json!({"min": -5, "max": 70}));
}

#[tokio::test]
async fn test_invalid_month_range_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        "PUT",
        "/v1/selection/months",
        Some(json!({"min_month": 10, "max_month": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_SELECTION");

    let (_, selection) = send(&app, "GET", "/v1/selection", None).await;
    assert_eq!(
        selection["months"],
        json!({"min_month": 1, "max_month": 12})
    );
    let (_, view) = send(&app, "GET", "/v1/view", None).await;
    assert_eq!(view["generation"], 0);
}

#[tokio::test]
async fn test_out_of_range_month_input_is_rejected() {
    let app = app();

    for body in [
        json!({"min_month": -1, "max_month": 3}),
        json!({"min_month": 1, "max_month": 4294967296_i64}),
        json!({"min_month": "march", "max_month": 3}),
    ] {
        let (status, error) = send(&app, "PUT", "/v1/selection/months", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "INVALID_SELECTION");
    }

    let (_, view) = send(&app, "GET", "/v1/view", None).await;
    assert_eq!(view["generation"], 0);
}

#[tokio::test]
async fn test_stream_sends_snapshot_per_publish() {
    let app = app();
    let request = Request::builder()
        .uri("/v1/view/stream")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mut frames = response.into_body().into_data_stream();

    let first = next_snapshot(&mut frames).await;
    assert_eq!(first["generation"], 0);
    assert_eq!(first["row_count"], 3);

    let (status, _) = send(
        &app,
        "PUT",
        "/v1/selection/states",
        Some(json!({"states": ["TX"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let second = next_snapshot(&mut frames).await;
    assert_eq!(second["generation"], 1);
    assert_eq!(second["row_count"], 1);
}

#[tokio::test]
async fn test_empty_view_reports_no_data() {
    let app = app();
    send(
        &app,
        "PUT",
        "/v1/selection/states",
        Some(json!({"states": ["CA"]})),
    )
    .await;
    let (status, snapshot) = send(
        &app,
        "PUT",
        "/v1/selection/months",
        Some(json!({"min_month": 4, "max_month": 12})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["row_count"], 0);
    assert_eq!(snapshot["chart"], json!({"status": "no_data"}));
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let app = app();
    send(
        &app,
        "PUT",
        "/v1/selection/cities",
        Some(json!({"cities": ["Austin"]})),
    )
    .await;

    let (status, snapshot) = send(&app, "POST", "/v1/selection/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["row_count"], 3);
    assert_eq!(snapshot["selection"]["cities"], json!([]));
    assert_eq!(snapshot["selection"]["min_delay"], Value::Null);
}
