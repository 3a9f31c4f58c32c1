//! Classifier port: Trait for the pre-trained risk model.
//!
//! The model is an opaque, externally-owned artifact. This crate only
//! consumes its one capability: given a six-field record in the model's
//! schema, return an integer risk code in {1, 2, 3}. Any concrete model
//! (decision tree, gradient boosting, ...) is an interchangeable adapter
//! behind this trait.

use crate::domain::ModelRecord;

/// Errors from model inference.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    /// The model invocation itself failed.
    #[error("Model inference failed: {0}")]
    ModelFailure(String),

    /// The model returned a code outside {1, 2, 3}.
    #[error("Model returned invalid risk code {0} (expected 1, 2 or 3)")]
    InvalidCode(i64),

    /// The model asked for a feature this crate's schema does not carry.
    #[error("Model references unknown feature '{0}'")]
    UnknownFeature(String),
}

/// Trait for risk classification over a fixed six-feature schema.
pub trait RiskClassifier: Send + Sync {
    /// Predict a risk code for a single record.
    ///
    /// # Errors
    /// Returns [`InferenceError`] if the model fails; implementations must
    /// not coerce failures into a default code.
    fn predict(&self, record: &ModelRecord) -> Result<i64, InferenceError>;
}
