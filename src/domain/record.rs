//! Patient record types for maternal health risk analysis.
//!
//! One record per row of the maternal health dataset (Kaggle maternal
//! health risk data): six numeric vitals plus a categorical risk label.

use serde::{Deserialize, Serialize};

/// Pregnancy risk classification.
///
/// The dataset stores these as the literal strings `low risk`, `mid risk`
/// and `high risk`; the pre-trained model speaks integer codes {1, 2, 3}.
/// Both mappings are fixed and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low pregnancy risk
    #[serde(rename = "low risk")]
    Low,
    /// Moderate pregnancy risk, monitoring recommended
    #[serde(rename = "mid risk")]
    Mid,
    /// High pregnancy risk, intervention recommended
    #[serde(rename = "high risk")]
    High,
}

impl RiskLevel {
    /// All levels in display order (high → mid → low, as the source
    /// dashboard lists risk composition).
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Mid, RiskLevel::Low];

    /// Integer code used by the model and for correlation encoding.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Self::Low => 1,
            Self::Mid => 2,
            Self::High => 3,
        }
    }

    /// Inverse of [`code`](Self::code). `None` for codes outside {1, 2, 3}.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Low),
            2 => Some(Self::Mid),
            3 => Some(Self::High),
            _ => None,
        }
    }

    /// Dataset label for this level.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low risk",
            Self::Mid => "mid risk",
            Self::High => "high risk",
        }
    }

    /// Prediction result label ("Low Risk" / "Mid Risk" / "High Risk").
    #[must_use]
    pub fn display_label(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Mid => "Mid Risk",
            Self::High => "High Risk",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_label())
    }
}

/// One row of the maternal health dataset.
///
/// Field names mirror the CSV header exactly (`Age, SystolicBP, DiastolicBP,
/// BS, BodyTemp, HeartRate, RiskLevel`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years
    #[serde(rename = "Age")]
    pub age: u32,

    /// Systolic blood pressure in mmHg
    #[serde(rename = "SystolicBP")]
    pub systolic_bp: u32,

    /// Diastolic blood pressure in mmHg
    #[serde(rename = "DiastolicBP")]
    pub diastolic_bp: u32,

    /// Blood sugar in mmol/L
    #[serde(rename = "BS")]
    pub bs: f64,

    /// Body temperature in degrees
    #[serde(rename = "BodyTemp")]
    pub body_temp: f64,

    /// Heart rate in bpm
    #[serde(rename = "HeartRate")]
    pub heart_rate: u32,

    /// Assigned risk classification
    #[serde(rename = "RiskLevel")]
    pub risk_level: RiskLevel,
}

impl PatientRecord {
    /// Check that every numeric field is finite and non-negative.
    ///
    /// # Errors
    /// Returns the offending field name.
    pub fn validate(&self) -> Result<(), &'static str> {
        for field in NumericField::ALL {
            let v = field.value(self);
            if !v.is_finite() || v < 0.0 {
                return Err(field.name());
            }
        }
        Ok(())
    }
}

/// The six numeric dataset columns, in canonical order.
///
/// The order here is load-bearing: outlier ranking uses it for stable
/// tie-breaks, and the correlation matrix indexes rows/columns by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Age,
    SystolicBP,
    DiastolicBP,
    BS,
    BodyTemp,
    HeartRate,
}

impl NumericField {
    /// Canonical field order.
    pub const ALL: [NumericField; 6] = [
        NumericField::Age,
        NumericField::SystolicBP,
        NumericField::DiastolicBP,
        NumericField::BS,
        NumericField::BodyTemp,
        NumericField::HeartRate,
    ];

    /// Column name as it appears in the dataset.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::SystolicBP => "SystolicBP",
            Self::DiastolicBP => "DiastolicBP",
            Self::BS => "BS",
            Self::BodyTemp => "BodyTemp",
            Self::HeartRate => "HeartRate",
        }
    }

    /// Value of this field for a record, widened to f64.
    #[must_use]
    pub fn value(&self, record: &PatientRecord) -> f64 {
        match self {
            Self::Age => f64::from(record.age),
            Self::SystolicBP => f64::from(record.systolic_bp),
            Self::DiastolicBP => f64::from(record.diastolic_bp),
            Self::BS => record.bs,
            Self::BodyTemp => record.body_temp,
            Self::HeartRate => f64::from(record.heart_rate),
        }
    }

    /// Position in the canonical order.
    #[must_use]
    pub fn index(&self) -> usize {
        match self {
            Self::Age => 0,
            Self::SystolicBP => 1,
            Self::DiastolicBP => 2,
            Self::BS => 3,
            Self::BodyTemp => 4,
            Self::HeartRate => 5,
        }
    }
}

impl std::fmt::Display for NumericField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PatientRecord {
        PatientRecord {
            age: 25,
            systolic_bp: 120,
            diastolic_bp: 80,
            bs: 7.0,
            body_temp: 98.0,
            heart_rate: 76,
            risk_level: RiskLevel::Low,
        }
    }

    #[test]
    fn test_risk_code_roundtrip() {
        for level in RiskLevel::ALL {
            assert_eq!(RiskLevel::from_code(level.code()), Some(level));
        }
        assert_eq!(RiskLevel::from_code(0), None);
        assert_eq!(RiskLevel::from_code(4), None);
    }

    #[test]
    fn test_risk_labels() {
        assert_eq!(RiskLevel::Low.label(), "low risk");
        assert_eq!(RiskLevel::High.display_label(), "High Risk");
    }

    #[test]
    fn test_field_accessors_match_canonical_order() {
        let record = sample_record();
        let values: Vec<f64> = NumericField::ALL.iter().map(|f| f.value(&record)).collect();
        assert_eq!(values, vec![25.0, 120.0, 80.0, 7.0, 98.0, 76.0]);

        for (i, field) in NumericField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_record_validation() {
        assert!(sample_record().validate().is_ok());

        let mut bad = sample_record();
        bad.bs = f64::NAN;
        assert_eq!(bad.validate(), Err("BS"));
    }
}
