//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the analytics pipeline and external systems (dataset storage,
//! the pre-trained model).

mod classifier;
mod dataset;

pub use classifier::{InferenceError, RiskClassifier};
pub use dataset::DatasetSource;
