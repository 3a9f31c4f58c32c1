//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external artifacts:
//! - `csv`: dataset loading from the fixed-column CSV file
//! - `tree`: pre-trained decision-tree model exported as JSON
//! - `sanitize`: PII filtering for logs

pub mod csv;
pub mod sanitize;
pub mod tree;

pub use csv::{CsvDataset, DatasetError};
pub use tree::{ModelError, TreeModel};
