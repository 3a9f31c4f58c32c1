//! CSV adapter: Implementation of DatasetSource over a CSV file.
//!
//! The dataset is a fixed-column table:
//! `Age, SystolicBP, DiastolicBP, BS, BodyTemp, HeartRate, RiskLevel`.
//! A missing column, an unparseable numeric, or a risk label outside the
//! three-value set is a fatal load error; the dashboard never starts on a
//! malformed dataset.

use std::path::{Path, PathBuf};

use crate::domain::PatientRecord;
use crate::ports::DatasetSource;

/// Errors from dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    /// Missing column, unparseable value or unknown risk label.
    #[error("Dataset schema violation at row {row}: {message}")]
    Schema { row: usize, message: String },

    #[error("Dataset row {row} has invalid {field}: must be finite and non-negative")]
    InvalidValue { row: usize, field: &'static str },

    #[error("Dataset is empty")]
    Empty,
}

/// Dataset source backed by a CSV file on disk.
pub struct CsvDataset {
    path: PathBuf,
}

impl CsvDataset {
    /// Create a dataset source for the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvDataset {
    type Error = DatasetError;

    fn load(&self) -> Result<Vec<PatientRecord>, DatasetError> {
        if !self.path.exists() {
            return Err(DatasetError::NotFound(self.path.clone()));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();

        for (i, result) in reader.deserialize::<PatientRecord>().enumerate() {
            // Header is row 1; first data row is row 2.
            let row = i + 2;
            let record = result.map_err(|e| DatasetError::Schema {
                row,
                message: e.to_string(),
            })?;

            record
                .validate()
                .map_err(|field| DatasetError::InvalidValue { row, field })?;

            records.push(record);
        }

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        tracing::info!(
            "Loaded {} patient records from {:?}",
            records.len(),
            self.path
        );

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;
    use std::io::Write;

    const HEADER: &str = "Age,SystolicBP,DiastolicBP,BS,BodyTemp,HeartRate,RiskLevel\n";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
        file.write_all(content.as_bytes()).expect("Should write");
        file.flush().expect("Should flush");
        file
    }

    #[test]
    fn test_load_valid_dataset() {
        let file = write_csv(&format!(
            "{HEADER}25,130,80,15.0,98.0,86,high risk\n35,120,60,6.1,98.0,76,low risk\n"
        ));

        let records = CsvDataset::new(file.path()).load().expect("Should load");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, 25);
        assert_eq!(records[0].risk_level, RiskLevel::High);
        assert_eq!(records[1].bs, 6.1);
        assert_eq!(records[1].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_row_order_preserved() {
        let file = write_csv(&format!(
            "{HEADER}50,140,90,13.0,98.0,70,high risk\n20,90,60,6.0,98.0,70,low risk\n30,120,80,7.5,98.0,80,mid risk\n"
        ));

        let records = CsvDataset::new(file.path()).load().expect("Should load");
        let ages: Vec<u32> = records.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![50, 20, 30]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = CsvDataset::new("/nonexistent/maternal.csv").load();
        assert!(matches!(result, Err(DatasetError::NotFound(_))));
    }

    #[test]
    fn test_unknown_risk_label_rejected() {
        let file = write_csv(&format!("{HEADER}25,130,80,15.0,98.0,86,severe risk\n"));
        let result = CsvDataset::new(file.path()).load();
        assert!(matches!(result, Err(DatasetError::Schema { row: 2, .. })));
    }

    #[test]
    fn test_unparseable_numeric_rejected() {
        let file = write_csv(&format!("{HEADER}twenty,130,80,15.0,98.0,86,high risk\n"));
        let result = CsvDataset::new(file.path()).load();
        assert!(matches!(result, Err(DatasetError::Schema { .. })));
    }

    #[test]
    fn test_missing_column_rejected() {
        let file = write_csv("Age,SystolicBP,DiastolicBP,BS,BodyTemp,HeartRate\n25,130,80,15.0,98.0,86\n");
        let result = CsvDataset::new(file.path()).load();
        assert!(matches!(result, Err(DatasetError::Schema { .. })));
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let file = write_csv(HEADER);
        let result = CsvDataset::new(file.path()).load();
        assert!(matches!(result, Err(DatasetError::Empty)));
    }
}
