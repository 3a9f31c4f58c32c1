//! Prediction input and result types.
//!
//! The pre-trained model was fitted on a feature frame whose temperature
//! column is named `BodyTemp_C`, while the dataset column is `BodyTemp`.
//! That mismatch is part of the model contract and must be preserved.

use serde::{Deserialize, Serialize};

use super::record::RiskLevel;

/// Feature names in the exact order the pre-trained model expects.
pub const MODEL_FEATURE_NAMES: [&str; 6] = [
    "Age",
    "SystolicBP",
    "DiastolicBP",
    "BS",
    "HeartRate",
    "BodyTemp_C",
];

/// Six user-entered measurements for risk prediction.
///
/// Independent of the dataset; entered directly in the prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInput {
    /// Age in years (10-100)
    pub age: f64,
    /// Systolic blood pressure in mmHg (50-250)
    pub systolic_bp: f64,
    /// Diastolic blood pressure in mmHg (30-200)
    pub diastolic_bp: f64,
    /// Blood sugar in mmol/L (0-30)
    pub bs: f64,
    /// Heart rate in bpm (30-200)
    pub heart_rate: f64,
    /// Body temperature in °C (30-45)
    pub body_temp_c: f64,
}

impl PredictionInput {
    /// Validate that all measurements are within the declared bounds.
    ///
    /// # Errors
    /// Returns every violation as a message, one per field.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let checks: [(&str, f64, f64, f64); 6] = [
            ("Age", self.age, 10.0, 100.0),
            ("SystolicBP", self.systolic_bp, 50.0, 250.0),
            ("DiastolicBP", self.diastolic_bp, 30.0, 200.0),
            ("BS", self.bs, 0.0, 30.0),
            ("HeartRate", self.heart_rate, 30.0, 200.0),
            ("BodyTemp_C", self.body_temp_c, 30.0, 45.0),
        ];

        let mut errors = Vec::new();
        for (name, value, min, max) in checks {
            if !value.is_finite() || value < min || value > max {
                errors.push(format!("{name} {value} out of range [{min}, {max}]"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the single-row named record handed to the model.
    ///
    /// Values are ordered to match [`MODEL_FEATURE_NAMES`].
    #[must_use]
    pub fn to_model_record(&self) -> ModelRecord {
        ModelRecord {
            values: [
                self.age,
                self.systolic_bp,
                self.diastolic_bp,
                self.bs,
                self.heart_rate,
                self.body_temp_c,
            ],
        }
    }
}

/// A single-row feature record in the model's schema.
///
/// Exactly six named fields; nothing else ever reaches the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelRecord {
    values: [f64; 6],
}

impl ModelRecord {
    /// Feature names, in order.
    #[must_use]
    pub fn names(&self) -> &'static [&'static str; 6] {
        &MODEL_FEATURE_NAMES
    }

    /// Feature values, in [`MODEL_FEATURE_NAMES`] order.
    #[must_use]
    pub fn values(&self) -> &[f64; 6] {
        &self.values
    }

    /// Look up a feature value by its model-schema name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        MODEL_FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }
}

/// Outcome of a risk prediction: the mapped label plus a fixed advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Predicted risk category
    pub level: RiskLevel,
    /// Advisory message keyed by the predicted label
    pub advisory: &'static str,
}

impl RiskAssessment {
    /// Assessment for a predicted level, with its fixed advisory text.
    #[must_use]
    pub fn for_level(level: RiskLevel) -> Self {
        let advisory = match level {
            RiskLevel::High => {
                "You may be experiencing a high pregnancy risk condition. Please consult \
                 a medical professional immediately for proper diagnosis and treatment. \
                 Regular monitoring is strongly recommended."
            }
            RiskLevel::Mid => {
                "Your condition shows moderate risk indicators. It is recommended to \
                 monitor your health closely, maintain a balanced diet, and schedule \
                 routine check-ups with your healthcare provider."
            }
            RiskLevel::Low => {
                "You are in a very good condition. Eat well, stay active, and don't \
                 forget to visit your doctor regularly for check-ups!"
            }
        };
        Self { level, advisory }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> PredictionInput {
        PredictionInput {
            age: 25.0,
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            bs: 7.0,
            heart_rate: 80.0,
            body_temp_c: 37.0,
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_out_of_bounds_age_rejected() {
        let input = PredictionInput {
            age: 150.0,
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Age"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let input = PredictionInput {
            bs: f64::NAN,
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_model_record_schema() {
        let record = valid_input().to_model_record();
        assert_eq!(record.names(), &MODEL_FEATURE_NAMES);
        assert_eq!(record.values(), &[25.0, 120.0, 80.0, 7.0, 80.0, 37.0]);
        assert_eq!(record.get("BodyTemp_C"), Some(37.0));
        // Dataset naming must not leak into the model schema.
        assert_eq!(record.get("BodyTemp"), None);
    }

    #[test]
    fn test_assessment_advisory_per_level() {
        assert!(RiskAssessment::for_level(RiskLevel::High)
            .advisory
            .contains("consult"));
        assert!(RiskAssessment::for_level(RiskLevel::Low)
            .advisory
            .contains("good condition"));
    }
}
