//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a medical-themed interface for:
//! - Population dashboard over the filtered dataset
//! - Auto-generated insights (outliers, distributions, correlations)
//! - Range filter controls
//! - Pregnancy risk prediction form

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::MaternalTheme;
