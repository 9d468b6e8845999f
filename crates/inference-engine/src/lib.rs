//! Inference Engine
//!
//! Loads the trained price model once at startup and exposes it as a
//! read-only [`Predictor`] shared by every request.

mod engine;
mod linear;
mod loader;
mod onnx;

pub use engine::{InferenceEngine, InferenceResult};
pub use linear::LinearModel;
pub use loader::{load_model, ModelFormat};
pub use onnx::OnnxModel;

use std::fmt::Debug;
use thiserror::Error;

/// Errors during model loading and inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model artifact not found: {path}")]
    ModelNotFound { path: String },
    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
}

/// A loaded model mapping one feature vector to a scalar prediction.
///
/// Implementations are immutable after loading and shared across request
/// handlers without locking.
pub trait Predictor: Debug + Send + Sync {
    /// Run the model on one feature vector
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;

    /// Number of features the model expects
    fn input_dimension(&self) -> usize;
}
