//! Feature Vector Assembly

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::FeatureError;

/// Number of features the housing model was trained on
pub const FEATURE_DIMENSION: usize = 8;

/// Feature names in training order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// Ordered feature values handed to the model.
///
/// Values submitted in array form are kept exactly as given, so the length
/// is only checked once the vector reaches the inference engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Wrap raw values without reordering
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Assemble a vector from a name -> value mapping in training order.
    ///
    /// Unknown keys are ignored. The first absent name (in training order)
    /// is reported as [`FeatureError::MissingFeature`].
    pub fn from_named(map: &Map<String, Value>) -> Result<Self, FeatureError> {
        let mut values = Vec::with_capacity(FEATURE_DIMENSION);
        for name in FEATURE_NAMES {
            let value = map
                .get(name)
                .ok_or(FeatureError::MissingFeature { name })?;
            values.push(number(name, value)?);
        }
        Ok(Self { values })
    }

    /// Raw values in model order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Convert one JSON value into a feature number
pub(crate) fn number(field: &str, value: &Value) -> Result<f64, FeatureError> {
    value.as_f64().ok_or_else(|| {
        FeatureError::InvalidInput(format!("{field} must be a number, got {value}"))
    })
}
