//! Linear Regression Model

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::{InferenceError, Predictor};

/// Ordinary least squares model stored as JSON.
///
/// ```json
/// {"coefficients": [0.43, 0.009, ...], "intercept": -36.9}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// One weight per feature, in training order
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Feature names recorded at training time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
            feature_names: None,
        }
    }

    /// Read a JSON artifact and check it against the expected feature order
    pub fn from_path(path: &Path, expected_names: &[&str]) -> Result<Self, InferenceError> {
        let bytes = std::fs::read(path)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;
        let model: Self = serde_json::from_slice(&bytes)
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e)))?;

        model.validate(expected_names)?;
        info!(
            "Loaded linear model: {} coefficients, intercept={:.4}",
            model.coefficients.len(),
            model.intercept
        );
        Ok(model)
    }

    fn validate(&self, expected_names: &[&str]) -> Result<(), InferenceError> {
        if self.coefficients.len() != expected_names.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "model has {} coefficients, expected {}",
                self.coefficients.len(),
                expected_names.len()
            )));
        }

        if let Some(names) = &self.feature_names {
            if !names.iter().map(String::as_str).eq(expected_names.iter().copied()) {
                return Err(InferenceError::ModelLoadError(format!(
                    "model feature order {:?} does not match {:?}",
                    names, expected_names
                )));
            }
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::InvalidInputShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.intercept + dot)
    }

    fn input_dimension(&self) -> usize {
        self.coefficients.len()
    }
}
