//! Prediction Route

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use feature_engine::{FeatureVector, PredictionRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{ApiError, AppState};

/// Successful prediction body
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Feature vector the model was run on
    pub features: FeatureVector,
    #[serde(rename = "PredictedPrice")]
    pub predicted_price: f64,
}

/// Predict a price from one of the accepted body shapes.
///
/// The body is taken as raw bytes, so a missing or non-JSON `Content-Type`
/// is accepted and malformed JSON or an unreadable body is still answered
/// with the JSON error shape.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let outcome = body
        .map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))
        .and_then(|body| run_prediction(&state, &body));

    match &outcome {
        Ok(response) => {
            metrics::counter!("predictions_total", "outcome" => "ok").increment(1);
            debug!("Predicted price {:.4}", response.predicted_price);
        }
        Err(e) => {
            metrics::counter!("predictions_total", "outcome" => e.outcome()).increment(1);
            warn!("Rejected prediction request: {}", e);
        }
    }

    outcome.map(Json)
}

fn run_prediction(state: &AppState, body: &[u8]) -> Result<PredictionResponse, ApiError> {
    let request = PredictionRequest::from_slice(body)?;
    debug!("Decoded {} request", request.shape());

    let features = request.into_features();
    let result = state.engine.predict(&features)?;
    metrics::histogram!("prediction_latency_seconds").record(result.latency_us as f64 / 1e6);

    Ok(PredictionResponse {
        features,
        predicted_price: result.prediction,
    })
}
