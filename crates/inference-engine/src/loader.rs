//! Model Artifact Loader

use std::path::Path;
use std::sync::Arc;
use tracing::info;

use feature_engine::FEATURE_NAMES;

use crate::linear::LinearModel;
use crate::onnx::OnnxModel;
use crate::{InferenceError, Predictor};

/// Supported artifact encodings, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// `.json` linear regression parameters
    LinearJson,
    /// `.onnx` graph executed with tract
    Onnx,
}

impl ModelFormat {
    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self, InferenceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::LinearJson),
            Some("onnx") => Ok(Self::Onnx),
            _ => Err(InferenceError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFormat::LinearJson => "linear-json",
            ModelFormat::Onnx => "onnx",
        }
    }
}

/// Load the model artifact at `path`.
///
/// A missing file is reported as [`InferenceError::ModelNotFound`] so the
/// caller can refuse to start serving.
pub fn load_model(path: impl AsRef<Path>) -> Result<Arc<dyn Predictor>, InferenceError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(InferenceError::ModelNotFound {
            path: path.display().to_string(),
        });
    }

    let format = ModelFormat::from_path(path)?;
    info!("Loading {} model from {}", format.as_str(), path.display());

    let predictor: Arc<dyn Predictor> = match format {
        ModelFormat::LinearJson => Arc::new(LinearModel::from_path(path, &FEATURE_NAMES)?),
        ModelFormat::Onnx => Arc::new(OnnxModel::from_path(path, FEATURE_NAMES.len())?),
    };
    Ok(predictor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linear_regression_model.json");

        let err = load_model(&path).unwrap_err();
        assert!(matches!(err, InferenceError::ModelNotFound { .. }));
        assert!(err.to_string().contains("linear_regression_model.json"));
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ModelFormat::from_path(Path::new("model.JSON")).unwrap(),
            ModelFormat::LinearJson
        );
        assert_eq!(
            ModelFormat::from_path(Path::new("dir/model.onnx")).unwrap(),
            ModelFormat::Onnx
        );
        assert!(ModelFormat::from_path(Path::new("model.pkl")).is_err());
        assert!(ModelFormat::from_path(Path::new("model")).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let mut file = tempfile::Builder::new().suffix(".pkl").tempfile().unwrap();
        file.write_all(b"\x80\x04").unwrap();

        let err = load_model(file.path()).unwrap_err();
        assert!(matches!(err, InferenceError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_loads_linear_artifact() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"coefficients": [1, 1, 1, 1, 1, 1, 1, 1], "intercept": 0.5}}"#
        )
        .unwrap();

        let predictor = load_model(file.path()).unwrap();
        assert_eq!(predictor.input_dimension(), 8);
        assert_eq!(predictor.predict(&[1.0; 8]).unwrap(), 8.5);
    }
}
