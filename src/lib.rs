//! # Gravida
//!
//! Maternal health risk dashboard for the terminal.
//!
//! This crate provides:
//! - Range filtering and descriptive statistics over a maternal health dataset
//! - Auto-generated clinical narratives (outliers, distribution shape,
//!   correlations, population alerts)
//! - Pregnancy risk prediction via a pre-trained decision-tree model
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (PatientRecord, RiskLevel, PredictionInput)
//! - `ports`: Trait definitions for external collaborators (dataset, model)
//! - `adapters`: Concrete implementations (CSV file, exported decision tree)
//! - `application`: The analytics pipeline (filter, aggregate, narrative,
//!   predictor) and its orchestration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{PatientRecord, PredictionInput, RiskAssessment, RiskLevel};

/// Result type for Gravida operations
pub type Result<T> = std::result::Result<T, GravidaError>;

/// Main error type for Gravida
#[derive(Debug, thiserror::Error)]
pub enum GravidaError {
    #[error("Dataset load failed: {0}")]
    Dataset(#[from] adapters::DatasetError),

    #[error("Model load failed: {0}")]
    Model(#[from] adapters::ModelError),

    #[error("Invalid prediction input: {0}")]
    InvalidInput(String),

    #[error("Inference failed: {0}")]
    Inference(#[from] ports::InferenceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
