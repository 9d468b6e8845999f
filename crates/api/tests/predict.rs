//! End-to-end tests for the prediction routes

use api::{create_router, serve, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use feature_engine::FEATURE_NAMES;
use inference_engine::{InferenceEngine, InferenceError, Predictor};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

const SAMPLE: [f64; 8] = [8.3, 41.0, 6.98, 1.02, 2332.0, 4.11, 37.88, -122.23];

fn shipped_engine() -> InferenceEngine {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/linear_regression_model.json");
    InferenceEngine::load(path).unwrap()
}

fn app() -> Router {
    create_router(Arc::new(AppState::new(shipped_engine())))
}

fn named_body() -> Value {
    let map = FEATURE_NAMES
        .iter()
        .zip(SAMPLE)
        .map(|(name, value)| (name.to_string(), json!(value)))
        .collect();
    Value::Object(map)
}

async fn post_raw(app: Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    post_raw(app, body.to_string()).await
}

#[tokio::test]
async fn test_array_format() {
    let (status, body) = post(app(), json!({ "features": SAMPLE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"], json!(SAMPLE));
    assert!(body["PredictedPrice"].is_f64());
}

#[tokio::test]
async fn test_all_shapes_agree() {
    let app = app();
    let (array_status, array) = post(app.clone(), json!({ "features": SAMPLE })).await;
    let (named_status, named) = post(app.clone(), named_body()).await;
    let (batch_status, batch) = post(app, json!({ "data": [named_body()] })).await;

    assert_eq!(array_status, StatusCode::OK);
    assert_eq!(named_status, StatusCode::OK);
    assert_eq!(batch_status, StatusCode::OK);
    assert!(array["PredictedPrice"].is_f64());
    assert_eq!(array["PredictedPrice"], named["PredictedPrice"]);
    assert_eq!(named, batch);
}

#[tokio::test]
async fn test_large_batch_envelope_is_accepted() {
    let records = vec![named_body(); 20_000];
    let body = json!({ "data": records }).to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let (status, body) = post_raw(app(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"], json!(SAMPLE));
}

#[tokio::test]
async fn test_missing_longitude() {
    let mut body = named_body();
    body.as_object_mut().unwrap().remove("Longitude");

    let (status, body) = post(app(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required feature: Longitude");
}

#[tokio::test]
async fn test_features_not_a_list() {
    let (status, body) = post(app(), json!({ "features": "not-a-list" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_json() {
    let (status, body) = post_raw(app(), "{\"features\": [8.3, 41.0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid input format or prediction error:"));
}

#[tokio::test]
async fn test_wrong_value_type() {
    let mut body = named_body();
    body["MedInc"] = json!("high");

    let (status, body) = post(app(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("MedInc"));
}

#[tokio::test]
async fn test_wrong_vector_length() {
    let (status, body) = post(app(), json!({ "features": [1.0, 2.0, 3.0] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("expected 8"));
}

#[tokio::test]
async fn test_content_type_is_not_required() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .body(Body::from(json!({ "features": SAMPLE }).to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let app = app();
    let (_, first) = post(app.clone(), json!({ "features": SAMPLE })).await;
    for _ in 0..5 {
        let (_, again) = post(app.clone(), json!({ "features": SAMPLE })).await;
        assert_eq!(again["PredictedPrice"], first["PredictedPrice"]);
    }
}

#[derive(Debug)]
struct FailingPredictor;

impl Predictor for FailingPredictor {
    fn predict(&self, _features: &[f64]) -> Result<f64, InferenceError> {
        Err(InferenceError::InferenceFailed("solver exploded".to_string()))
    }

    fn input_dimension(&self) -> usize {
        FEATURE_NAMES.len()
    }
}

#[tokio::test]
async fn test_predictor_failure_is_client_error() {
    let engine = InferenceEngine::with_predictor(Arc::new(FailingPredictor));
    let app = create_router(Arc::new(AppState::new(engine)));

    let (status, body) = post(app, json!({ "features": SAMPLE })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("solver exploded"));
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"]["input_dimension"], 8);
    assert_eq!(body["feature_names"][7], "Longitude");
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, Arc::new(AppState::new(shipped_engine()))));

    let response = reqwest::Client::new()
        .post(format!("http://{}/predict", addr))
        .json(&json!({ "data": [named_body()] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["features"], json!(SAMPLE));
}
