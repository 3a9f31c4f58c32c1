//! Application layer: the analytics pipeline and its orchestration.
//!
//! The pipeline runs filter -> aggregate -> narrative per interaction
//! cycle; prediction is a separate path from user input to the model.

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod narrative;
pub mod predictor;

pub use aggregate::AggregateSnapshot;
pub use dashboard::{DashboardReport, DashboardService, ReportData};
pub use filter::{filter, FieldRange, FilterCriteria, FilteredView};
pub use predictor::PredictionService;
