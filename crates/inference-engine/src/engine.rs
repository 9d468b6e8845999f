//! Inference Engine Implementation

use feature_engine::FeatureVector;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::loader::load_model;
use crate::{InferenceError, Predictor};

/// Result of inference operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceResult {
    /// Predicted price
    pub prediction: f64,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Read-only handle on the loaded model, cheap to clone
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    predictor: Arc<dyn Predictor>,
    /// Artifact the model was loaded from, if any
    model_path: Option<PathBuf>,
}

impl InferenceEngine {
    /// Load the model artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let predictor = load_model(path)?;
        info!(
            "Inference engine ready: {} ({} features)",
            path.display(),
            predictor.input_dimension()
        );

        Ok(Self {
            predictor,
            model_path: Some(path.to_path_buf()),
        })
    }

    /// Wrap an already constructed predictor
    pub fn with_predictor(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            model_path: None,
        }
    }

    /// Run inference on a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<InferenceResult, InferenceError> {
        let expected = self.predictor.input_dimension();
        if features.len() != expected {
            return Err(InferenceError::InvalidInputShape {
                expected,
                actual: features.len(),
            });
        }

        let start = Instant::now();
        let prediction = self.predictor.predict(features.values())?;
        let latency_us = start.elapsed().as_micros() as u64;

        if !prediction.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "model produced non-finite value {}",
                prediction
            )));
        }

        debug!("Inference completed in {}us: {:.4}", latency_us, prediction);
        Ok(InferenceResult {
            prediction,
            latency_us,
        })
    }

    pub fn input_dimension(&self) -> usize {
        self.predictor.input_dimension()
    }

    /// Get model path
    pub fn model_path(&self) -> Option<&Path> {
        self.model_path.as_deref()
    }
}
