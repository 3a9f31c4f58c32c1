//! Tree adapter: Implementation of RiskClassifier over an exported
//! decision tree.
//!
//! The pre-trained classifier is a decision tree fitted offline and
//! exported by the training pipeline as JSON (node table plus the class
//! codes). The exact feature naming is load-bearing: the model was fitted
//! with a `BodyTemp_C` column, distinct from the dataset's `BodyTemp`, and
//! this adapter refuses to load a model whose schema disagrees.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{ModelRecord, MODEL_FEATURE_NAMES};
use crate::ports::{InferenceError, RiskClassifier};

/// Errors from model loading.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid model format: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Model schema mismatch: {0}")]
    Schema(String),
}

/// One node of the exported tree.
///
/// Interior nodes route `value <= threshold` to `left`, otherwise `right`.
/// Leaves carry `feature: -1` and a `class_index` into the `classes` table,
/// matching the structure written by the export script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: i64,
    #[serde(default)]
    pub threshold: f64,
    #[serde(default = "no_child")]
    pub left: i64,
    #[serde(default = "no_child")]
    pub right: i64,
    #[serde(default = "no_child")]
    pub class_index: i64,
}

fn no_child() -> i64 {
    -1
}

impl TreeNode {
    fn is_leaf(&self) -> bool {
        self.feature < 0
    }
}

/// Decision tree parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedTreeModel {
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub nodes: Vec<TreeNode>,
}

/// Decision-tree risk classifier loaded from an exported JSON file.
pub struct TreeModel {
    model: ExportedTreeModel,
}

impl TreeModel {
    /// Load and sanity-check an exported tree model.
    ///
    /// # Errors
    /// Returns error if the file is missing or malformed, a node index is
    /// out of range, or the feature schema does not match
    /// [`MODEL_FEATURE_NAMES`].
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let model: ExportedTreeModel = serde_json::from_str(&content)?;

        Self::validate(&model)?;

        tracing::info!(
            "Loaded risk model from {:?} ({} nodes, {} classes)",
            path,
            model.nodes.len(),
            model.classes.len()
        );

        Ok(Self { model })
    }

    /// Build a model from already-parsed parameters (used in tests).
    ///
    /// # Errors
    /// Same sanity checks as [`load`](Self::load).
    pub fn from_exported(model: ExportedTreeModel) -> Result<Self, ModelError> {
        Self::validate(&model)?;
        Ok(Self { model })
    }

    fn validate(model: &ExportedTreeModel) -> Result<(), ModelError> {
        if model.nodes.is_empty() {
            return Err(ModelError::Schema("model has no nodes".into()));
        }
        if model.classes.is_empty() {
            return Err(ModelError::Schema("model has no classes".into()));
        }

        // Every model feature must exist in this crate's schema, including
        // the BodyTemp_C naming.
        for name in &model.feature_names {
            if !MODEL_FEATURE_NAMES.contains(&name.as_str()) {
                return Err(ModelError::Schema(format!(
                    "unknown feature '{name}' (expected one of {MODEL_FEATURE_NAMES:?})"
                )));
            }
        }

        let n_nodes = model.nodes.len() as i64;
        let n_features = model.feature_names.len() as i64;
        let n_classes = model.classes.len() as i64;

        for (i, node) in model.nodes.iter().enumerate() {
            if node.is_leaf() {
                if node.class_index < 0 || node.class_index >= n_classes {
                    return Err(ModelError::Schema(format!(
                        "leaf {i} has class_index {} out of range",
                        node.class_index
                    )));
                }
            } else {
                if node.feature >= n_features {
                    return Err(ModelError::Schema(format!(
                        "node {i} references feature {} out of range",
                        node.feature
                    )));
                }
                if !node.threshold.is_finite() {
                    return Err(ModelError::Schema(format!(
                        "node {i} has non-finite threshold"
                    )));
                }
                if node.left < 0 || node.left >= n_nodes || node.right < 0 || node.right >= n_nodes
                {
                    return Err(ModelError::Schema(format!(
                        "node {i} has child index out of range"
                    )));
                }
            }
        }

        Ok(())
    }
}

impl RiskClassifier for TreeModel {
    fn predict(&self, record: &ModelRecord) -> Result<i64, InferenceError> {
        let mut index = 0usize;

        // Each step descends one level; a well-formed tree terminates well
        // before visiting every node once.
        for _ in 0..=self.model.nodes.len() {
            let node = &self.model.nodes[index];

            if node.is_leaf() {
                return Ok(self.model.classes[node.class_index as usize]);
            }

            let name = &self.model.feature_names[node.feature as usize];
            let value = record
                .get(name)
                .ok_or_else(|| InferenceError::UnknownFeature(name.clone()))?;

            index = if value <= node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }

        Err(InferenceError::ModelFailure(
            "tree traversal did not reach a leaf (cyclic node table)".into(),
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::PredictionInput;
    use std::io::Write;

    /// BS <= 7.95 and SystolicBP <= 135 -> low; BS <= 7.95 otherwise -> mid;
    /// BS > 7.95 -> high.
    pub(crate) fn sample_model() -> ExportedTreeModel {
        ExportedTreeModel {
            feature_names: MODEL_FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            classes: vec![1, 2, 3],
            nodes: vec![
                TreeNode {
                    feature: 3, // BS
                    threshold: 7.95,
                    left: 1,
                    right: 4,
                    class_index: -1,
                },
                TreeNode {
                    feature: 1, // SystolicBP
                    threshold: 135.0,
                    left: 2,
                    right: 3,
                    class_index: -1,
                },
                TreeNode {
                    feature: -1,
                    threshold: 0.0,
                    left: -1,
                    right: -1,
                    class_index: 0, // low
                },
                TreeNode {
                    feature: -1,
                    threshold: 0.0,
                    left: -1,
                    right: -1,
                    class_index: 1, // mid
                },
                TreeNode {
                    feature: -1,
                    threshold: 0.0,
                    left: -1,
                    right: -1,
                    class_index: 2, // high
                },
            ],
        }
    }

    fn record(bs: f64, systolic_bp: f64) -> ModelRecord {
        PredictionInput {
            age: 25.0,
            systolic_bp,
            diastolic_bp: 80.0,
            bs,
            heart_rate: 80.0,
            body_temp_c: 37.0,
        }
        .to_model_record()
    }

    #[test]
    fn test_tree_walk() {
        let model = TreeModel::from_exported(sample_model()).expect("Should validate");

        assert_eq!(model.predict(&record(6.0, 120.0)).unwrap(), 1);
        assert_eq!(model.predict(&record(6.0, 150.0)).unwrap(), 2);
        assert_eq!(model.predict(&record(13.0, 120.0)).unwrap(), 3);
    }

    #[test]
    fn test_threshold_boundary_goes_left() {
        let model = TreeModel::from_exported(sample_model()).expect("Should validate");
        // Exactly at the split: <= goes left.
        assert_eq!(model.predict(&record(7.95, 120.0)).unwrap(), 1);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Should create temp file");
        let json = serde_json::to_string(&sample_model()).expect("Should serialize");
        file.write_all(json.as_bytes()).expect("Should write");
        file.flush().expect("Should flush");

        let model = TreeModel::load(file.path()).expect("Should load");
        assert_eq!(model.predict(&record(13.0, 120.0)).unwrap(), 3);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = TreeModel::load(Path::new("/nonexistent/risk_tree.json"));
        assert!(matches!(result, Err(ModelError::NotFound(_))));
    }

    #[test]
    fn test_wrong_feature_name_rejected() {
        let mut exported = sample_model();
        // Dataset naming instead of the model schema.
        exported.feature_names[5] = "BodyTemp".to_string();
        let result = TreeModel::from_exported(exported);
        assert!(matches!(result, Err(ModelError::Schema(_))));
    }

    #[test]
    fn test_out_of_range_child_rejected() {
        let mut exported = sample_model();
        exported.nodes[0].right = 99;
        let result = TreeModel::from_exported(exported);
        assert!(matches!(result, Err(ModelError::Schema(_))));
    }

    #[test]
    fn test_cyclic_table_reports_failure() {
        let exported = ExportedTreeModel {
            feature_names: MODEL_FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            classes: vec![1],
            nodes: vec![TreeNode {
                feature: 0,
                threshold: 50.0,
                left: 0,
                right: 0,
                class_index: -1,
            }],
        };
        let model = TreeModel::from_exported(exported).expect("Structurally valid");
        let result = model.predict(&record(6.0, 120.0));
        assert!(matches!(result, Err(InferenceError::ModelFailure(_))));
    }
}
