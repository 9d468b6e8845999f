//! ONNX Model via tract

use std::fmt;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

use crate::{InferenceError, Predictor};

type RunnablePlan = TypedRunnableModel<TypedModel>;

/// Regression model exported to ONNX (e.g. with skl2onnx).
///
/// The graph is optimized for a single `f32 [1, input_dimension]` input;
/// the first element of the first output is the prediction.
pub struct OnnxModel {
    plan: RunnablePlan,
    input_dimension: usize,
}

impl OnnxModel {
    /// Load and optimize an ONNX graph
    pub fn from_path(path: &Path, input_dimension: usize) -> Result<Self, InferenceError> {
        let load_err =
            |e: TractError| InferenceError::ModelLoadError(format!("{}: {:#}", path.display(), e));

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, input_dimension]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(load_err)?;

        info!("Loaded ONNX model from {} ({} inputs)", path.display(), input_dimension);
        Ok(Self {
            plan,
            input_dimension,
        })
    }

    fn run(&self, features: &[f64]) -> TractResult<Option<f32>> {
        let input: Vec<f32> = features.iter().map(|&x| x as f32).collect();
        let tensor = Tensor::from_shape(&[1, features.len()], &input)?;
        let outputs = self.plan.run(tvec!(tensor.into()))?;
        let first = outputs[0].to_array_view::<f32>()?.iter().next().copied();
        Ok(first)
    }
}

impl fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input_dimension", &self.input_dimension)
            .finish_non_exhaustive()
    }
}

impl Predictor for OnnxModel {
    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.input_dimension {
            return Err(InferenceError::InvalidInputShape {
                expected: self.input_dimension,
                actual: features.len(),
            });
        }

        self.run(features)
            .map_err(|e| InferenceError::InferenceFailed(format!("{:#}", e)))?
            .map(f64::from)
            .ok_or_else(|| InferenceError::InferenceFailed("model produced no output".to_string()))
    }

    fn input_dimension(&self) -> usize {
        self.input_dimension
    }
}
