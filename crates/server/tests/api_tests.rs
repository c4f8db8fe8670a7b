use std::fs::File;
use std::io::BufReader;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use forecast_facade::telemetry::parse_log;
use forecast_facade::{ForecastConfig, ForecastService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{router, AccessLog, AppState};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(ForecastService::new(ForecastConfig::default()), 2);
    router(state, Duration::from_secs(30))
}

fn post_forecast(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/forecast")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_index_endpoint() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Hello, World!");
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "alive");
    assert_eq!(json["models"].as_array().unwrap().len(), 10);
    assert_eq!(json["models"][0], "AutoARIMA");
}

#[tokio::test]
async fn test_forecast_named_model() {
    let payload = json!({"model": "naive", "horizon": 2, "series": [1.0, 2.0, 3.0]});
    let (status, body) = send(app(), post_forecast(payload.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["model"], "Naive");
    assert_eq!(json["predictions"], json!([3.0, 3.0]));
}

#[tokio::test]
async fn test_forecast_automatic_selection() {
    let series: Vec<f64> = (1..=10).map(|x| x as f64).collect();
    let payload = json!({"model": "cv", "horizon": 3, "series": series});
    let (status, body) = send(app(), post_forecast(payload.to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["model"], "AutoARIMA");
    assert_eq!(json["predictions"], json!([11.0, 12.0, 13.0]));
}

#[tokio::test]
async fn test_forecast_client_errors() {
    let cases = [
        ("{not json".to_string(), "invalid_input"),
        (json!({"model": "naive", "series": [1.0]}).to_string(), "invalid_input"),
        (
            json!({"model": "nope", "horizon": 1, "series": [1.0, 2.0]}).to_string(),
            "unknown_model",
        ),
        (
            json!({"model": "cv", "horizon": 4, "series": [1.0, 2.0]}).to_string(),
            "insufficient_data",
        ),
    ];

    for (payload, kind) in cases {
        let (status, body) = send(app(), post_forecast(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", kind);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["kind"], kind);
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_forecast_model_failure_is_server_error() {
    // Default window of seven cannot be filled by two points
    let payload = json!({"model": "WindowAverage", "horizon": 2, "series": [1.0, 2.0]});
    let (status, body) = send(app(), post_forecast(payload.to_string())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["kind"], "forecast_failed");
}

#[tokio::test]
async fn test_access_log_records_every_forecast_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("access.log");
    let state = AppState::new(ForecastService::new(ForecastConfig::default()), 1)
        .with_access_log(AccessLog::open(&path).unwrap());
    let app = router(state, Duration::from_secs(30));

    let good = json!({"model": "cross validation", "horizon": 2, "series": [1.0, 2.0, 3.0, 4.0, 5.0]});
    let (status, _) = send(app.clone(), post_forecast(good.to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let bad = json!({"model": "nope", "horizon": 1, "series": [1.0]});
    let (status, _) = send(app.clone(), post_forecast(bad.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app, post_forecast("garbage")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let records = parse_log(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].endpoint, "forecast");
    assert_eq!(records[0].data_length, 5);
    assert_eq!(records[0].horizon, 2);
    assert_eq!(records[0].request_model, "cross_validation");
    assert_ne!(records[0].response_model, "none");

    assert_eq!(records[1].request_model, "nope");
    assert_eq!(records[1].response_model, "none");

    assert_eq!(records[2].data_length, 0);
    assert_eq!(records[2].request_model, "none");
}

#[tokio::test]
async fn test_timed_out_forecast_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("access.log");
    let state = AppState::new(ForecastService::new(ForecastConfig::default()), 1)
        .with_access_log(AccessLog::open(&path).unwrap());
    let app = router(state, Duration::ZERO);

    let series: Vec<f64> = (0..2_000)
        .map(|i| 100.0 + 10.0 * (i as f64 * 0.3).sin() + 0.01 * i as f64)
        .collect();
    let payload = json!({"model": "cv", "horizon": 10, "series": series});
    let (status, body) = send(app, post_forecast(payload.to_string())).await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["kind"], "timeout");

    let records = parse_log(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].request_model, "cv");
    assert_eq!(records[0].data_length, 2_000);
    assert_eq!(records[0].horizon, 10);
    assert_eq!(records[0].response_model, "none");
}
