//! API Error Mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feature_engine::FeatureError;
use inference_engine::InferenceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request-level failures surfaced to the caller
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required feature: {0}")]
    MissingFeature(&'static str),

    /// Anything else that went wrong while decoding or predicting
    #[error("invalid input format or prediction error: {0}")]
    InvalidInput(String),

    #[error("metrics recorder is not installed")]
    MetricsDisabled,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFeature(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::MetricsDisabled => StatusCode::NOT_FOUND,
        }
    }

    /// Metric label for the failure kind
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::MissingFeature(_) => "missing_feature",
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::MetricsDisabled => "metrics_disabled",
        }
    }
}

impl From<FeatureError> for ApiError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::MissingFeature { name } => ApiError::MissingFeature(name),
            FeatureError::InvalidInput(detail) => ApiError::InvalidInput(detail),
        }
    }
}

impl From<InferenceError> for ApiError {
    fn from(err: InferenceError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
