//! Health Route

use axum::{extract::State, Json};
use feature_engine::FEATURE_NAMES;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::AppState;

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelStatus,
    pub feature_names: Vec<String>,
}

/// Loaded model details
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStatus {
    pub path: Option<String>,
    pub input_dimension: usize,
}

/// Health check handler
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelStatus {
            path: state
                .engine
                .model_path()
                .map(|p| p.display().to_string()),
            input_dimension: state.engine.input_dimension(),
        },
        feature_names: FEATURE_NAMES.iter().map(|n| n.to_string()).collect(),
    })
}
