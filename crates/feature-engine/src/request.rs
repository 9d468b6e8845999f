//! Prediction Request Decoding
//!
//! Three body shapes are accepted. They are tried in a fixed order and a
//! shape that does not structurally match falls through to the next one:
//!
//! 1. `{"data": [<payload>, ...]}`: only the first element is used
//! 2. `{"features": [f1, ..., f8]}`: values used in the order given
//! 3. `{"MedInc": f1, ..., "Longitude": f8}`: values picked by name

use serde_json::{Map, Value};
use tracing::debug;

use crate::features::{number, FeatureVector};
use crate::FeatureError;

/// A decoded prediction request
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionRequest {
    /// Batch envelope wrapping the first submitted record
    Batch(Box<PredictionRequest>),
    /// Positional `features` array
    Array(FeatureVector),
    /// Name -> value mapping
    Named(FeatureVector),
}

impl PredictionRequest {
    /// Decode a raw request body
    pub fn from_slice(body: &[u8]) -> Result<Self, FeatureError> {
        let payload: Value = serde_json::from_slice(body)
            .map_err(|e| FeatureError::InvalidInput(e.to_string()))?;
        Self::from_value(payload)
    }

    /// Decode an already parsed JSON payload
    pub fn from_value(payload: Value) -> Result<Self, FeatureError> {
        match payload {
            Value::Object(mut map) => {
                if let Some(first) = take_first_record(&mut map) {
                    debug!("Unwrapping batch envelope");
                    let record = Self::from_record(first)?;
                    return Ok(Self::Batch(Box::new(record)));
                }
                Self::from_map(map)
            }
            other => Err(not_an_object(&other)),
        }
    }

    /// Decode a single record; batch envelopes are not unwrapped again
    fn from_record(record: Value) -> Result<Self, FeatureError> {
        match record {
            Value::Object(map) => Self::from_map(map),
            other => Err(not_an_object(&other)),
        }
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, FeatureError> {
        if let Some(Value::Array(items)) = map.get("features") {
            let values = items
                .iter()
                .enumerate()
                .map(|(idx, item)| number(&format!("features[{idx}]"), item))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Self::Array(FeatureVector::new(values)));
        }

        FeatureVector::from_named(&map).map(Self::Named)
    }

    /// The feature vector to hand to the model
    pub fn features(&self) -> &FeatureVector {
        match self {
            Self::Batch(inner) => inner.features(),
            Self::Array(features) | Self::Named(features) => features,
        }
    }

    pub fn into_features(self) -> FeatureVector {
        match self {
            Self::Batch(inner) => inner.into_features(),
            Self::Array(features) | Self::Named(features) => features,
        }
    }

    /// Short label for the submitted shape, used in logs
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Batch(_) => "batch",
            Self::Array(_) => "array",
            Self::Named(_) => "named",
        }
    }
}

/// Pull the first element out of a non-empty `data` array
fn take_first_record(map: &mut Map<String, Value>) -> Option<Value> {
    match map.get_mut("data") {
        Some(Value::Array(items)) if !items.is_empty() => Some(items.swap_remove(0)),
        _ => None,
    }
}

fn not_an_object(value: &Value) -> FeatureError {
    let kind = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    FeatureError::InvalidInput(format!("expected a JSON object, got {kind}"))
}
