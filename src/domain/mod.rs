//! Domain layer: Core business types.
//!
//! Pure Rust types with no external collaborators: patient records, the
//! closed risk-level set, prediction inputs and the model feature schema.

mod prediction;
mod record;

pub use prediction::{ModelRecord, PredictionInput, RiskAssessment, MODEL_FEATURE_NAMES};
pub use record::{NumericField, PatientRecord, RiskLevel};
