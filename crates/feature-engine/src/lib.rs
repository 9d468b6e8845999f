//! Feature Engine
//!
//! Decodes prediction request bodies into the ordered feature vector the
//! housing price model consumes.

mod error;
mod features;
mod request;

pub use error::FeatureError;
pub use features::{FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
pub use request::PredictionRequest;
