//! Prediction service: validated input in, risk assessment out.
//!
//! The service is the only path from user-entered measurements to the
//! model. It enforces the input bounds before inference, hands the model a
//! record in its own schema (including the `BodyTemp_C` feature name), and
//! maps the returned integer code back to a risk category.

use crate::domain::{PredictionInput, RiskAssessment, RiskLevel};
use crate::ports::{InferenceError, RiskClassifier};
use crate::{GravidaError, Result};

/// Runs risk predictions against a pluggable classifier.
pub struct PredictionService<C> {
    classifier: C,
}

impl<C: RiskClassifier> PredictionService<C> {
    #[must_use]
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Validate, run inference, and map the predicted code to a category.
    ///
    /// # Errors
    /// - [`GravidaError::InvalidInput`] when any measurement is out of
    ///   bounds; the model is never consulted in that case.
    /// - [`GravidaError::Inference`] when the classifier fails or returns a
    ///   code outside {1, 2, 3}.
    pub fn predict(&self, input: &PredictionInput) -> Result<RiskAssessment> {
        input
            .validate()
            .map_err(|errors| GravidaError::InvalidInput(errors.join("; ")))?;

        let record = input.to_model_record();
        let code = self.classifier.predict(&record)?;
        let level = RiskLevel::from_code(code).ok_or(InferenceError::InvalidCode(code))?;

        tracing::info!(code, label = level.display_label(), "Prediction complete");
        Ok(RiskAssessment::for_level(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModelRecord, MODEL_FEATURE_NAMES};
    use std::sync::Mutex;

    /// Records every inference call and replays a fixed answer.
    struct StubClassifier {
        answer: std::result::Result<i64, InferenceError>,
        calls: Mutex<Vec<ModelRecord>>,
    }

    impl StubClassifier {
        fn returning(code: i64) -> Self {
            Self {
                answer: Ok(code),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: InferenceError) -> Self {
            Self {
                answer: Err(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl RiskClassifier for StubClassifier {
        fn predict(&self, record: &ModelRecord) -> std::result::Result<i64, InferenceError> {
            self.calls.lock().unwrap().push(*record);
            self.answer.clone()
        }
    }

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
    fn test_predict_maps_codes_to_levels() {
        for (code, level) in [(1, RiskLevel::Low), (2, RiskLevel::Mid), (3, RiskLevel::High)] {
            let service = PredictionService::new(StubClassifier::returning(code));
            let assessment = service.predict(&valid_input()).unwrap();
            assert_eq!(assessment.level, level);
            assert!(!assessment.advisory.is_empty());
        }
    }

    #[test]
    fn test_model_receives_exact_schema() {
        let service = PredictionService::new(StubClassifier::returning(1));
        service.predict(&valid_input()).unwrap();

        let calls = service.classifier.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let record = &calls[0];
        assert_eq!(record.names(), &MODEL_FEATURE_NAMES);
        assert_eq!(record.values(), &[25.0, 120.0, 80.0, 7.0, 80.0, 37.0]);
        assert_eq!(record.get("BodyTemp_C"), Some(37.0));
    }

    #[test]
    fn test_invalid_input_never_reaches_model() {
        let service = PredictionService::new(StubClassifier::returning(1));
        let input = PredictionInput {
            age: 150.0,
            ..valid_input()
        };

        let err = service.predict(&input).unwrap_err();
        assert!(matches!(err, GravidaError::InvalidInput(_)));
        assert!(err.to_string().contains("Age"));
        assert_eq!(service.classifier.call_count(), 0);
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        let service = PredictionService::new(StubClassifier::returning(7));
        let err = service.predict(&valid_input()).unwrap_err();
        assert!(matches!(
            err,
            GravidaError::Inference(InferenceError::InvalidCode(7))
        ));
    }

    #[test]
    fn test_inference_failure_surfaces() {
        let service = PredictionService::new(StubClassifier::failing(
            InferenceError::ModelFailure("traversal exceeded node count".into()),
        ));
        let err = service.predict(&valid_input()).unwrap_err();
        assert!(matches!(err, GravidaError::Inference(_)));
    }
}
