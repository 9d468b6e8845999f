//! Feature Error Types

use thiserror::Error;

/// Errors while turning a request body into a feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// A named feature is absent from an object-format payload
    #[error("missing required feature: {name}")]
    MissingFeature { name: &'static str },

    /// Malformed JSON, wrong value types or an unusable payload shape
    #[error("{0}")]
    InvalidInput(String),
}
