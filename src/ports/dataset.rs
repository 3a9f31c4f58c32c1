//! Dataset port: Trait for loading the tabular health dataset.
//!
//! The dataset is loaded once at startup and treated as immutable for the
//! lifetime of the process. Schema violations are a fatal startup error,
//! surfaced through the implementation's error type.

use crate::domain::PatientRecord;

/// Trait for dataset loading.
pub trait DatasetSource {
    /// Error type for load failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full dataset, preserving row order.
    ///
    /// # Errors
    /// Returns error if the backing file is missing, a column is absent,
    /// or a value cannot be parsed.
    fn load(&self) -> Result<Vec<PatientRecord>, Self::Error>;
}
