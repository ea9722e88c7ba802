// ============================================================
// Layer 5 — Logistic Regression Model
// ============================================================
// The concrete binary classifier behind the BinaryClassifier
// trait. Deliberately small: three numeric features, a weight
// per feature, a bias, and the standardisation parameters
// captured at training time.
//
// Why store means/stds inside the artifact?
//   The trainer standardises features ((x - mean) / std) so the
//   gradient steps are well conditioned. Prediction must apply
//   the SAME transformation, so the parameters travel with the
//   weights. An artifact is self-contained: load it anywhere and
//   predict without the training data.
//
// The whole struct derives Serialize/Deserialize, so the
// production slot can persist it as plain JSON — readable,
// diffable and versionable.
//
// Reference: Rust Book §10 (Traits), serde documentation

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;
use crate::domain::traits::BinaryClassifier;

/// A trained logistic regression artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// One weight per feature column, in column order
    pub weights: Vec<f64>,

    /// Intercept term
    pub bias: f64,

    /// Per-feature mean captured from the training data
    pub means: Vec<f64>,

    /// Per-feature standard deviation from the training data
    /// (1.0 substituted for constant columns)
    pub stds: Vec<f64>,

    /// The feature columns this model expects, in order
    pub feature_columns: Vec<String>,
}

impl LogisticModel {
    /// The raw decision value w·x̂ + b for a standardised input.
    /// Positive means class 1 is more likely.
    pub fn decision(&self, features: &[f64]) -> f64 {
        let mut z = self.bias;
        for (i, &x) in features.iter().enumerate() {
            let scaled = (x - self.means[i]) / self.stds[i];
            z += self.weights[i] * scaled;
        }
        z
    }

    /// Internal consistency of the artifact: exactly one weight,
    /// mean and std per feature column. A hand-edited or
    /// truncated JSON file deserializes fine but fails here.
    pub fn is_consistent(&self) -> bool {
        let n = self.feature_columns.len();
        self.weights.len() == n && self.means.len() == n && self.stds.len() == n
    }

    /// Verify that a dataset's feature columns match this model.
    pub fn check_schema(&self, dataset_columns: &[String]) -> Result<(), PipelineError> {
        if dataset_columns != self.feature_columns.as_slice() {
            return Err(PipelineError::IncompatibleSchema {
                expected: self.feature_columns.clone(),
                found:    dataset_columns.to_vec(),
            });
        }
        Ok(())
    }
}

impl BinaryClassifier for LogisticModel {
    fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    fn predict(&self, features: &[f64]) -> u8 {
        // sigmoid(z) >= 0.5 exactly when z >= 0, so the
        // sigmoid itself never needs to be evaluated here
        if self.decision(features) >= 0.0 {
            1
        } else {
            0
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        vec![
            "lastmonth_activity".to_string(),
            "lastyear_activity".to_string(),
            "number_of_employees".to_string(),
        ]
    }

    fn hand_built_model() -> LogisticModel {
        LogisticModel {
            weights:         vec![1.0, 0.0, 0.0],
            bias:            0.0,
            means:           vec![10.0, 0.0, 0.0],
            stds:            vec![2.0, 1.0, 1.0],
            feature_columns: columns(),
        }
    }

    #[test]
    fn test_predict_thresholds_on_decision_sign() {
        let m = hand_built_model();
        // First feature above its mean → positive decision → 1
        assert_eq!(m.predict(&[14.0, 0.0, 0.0]), 1);
        // Below the mean → negative decision → 0
        assert_eq!(m.predict(&[6.0, 0.0, 0.0]), 0);
        // Exactly at the mean → decision 0.0 → class 1 boundary
        assert_eq!(m.predict(&[10.0, 0.0, 0.0]), 1);
    }

    #[test]
    fn test_schema_check_rejects_foreign_columns() {
        let m   = hand_built_model();
        let bad = vec!["clicks".to_string()];
        assert!(matches!(
            m.check_schema(&bad),
            Err(PipelineError::IncompatibleSchema { .. })
        ));
        assert!(m.check_schema(&columns()).is_ok());
    }

    #[test]
    fn test_consistency_check_catches_truncated_vectors() {
        let mut m = hand_built_model();
        assert!(m.is_consistent());

        m.weights.pop();
        assert!(!m.is_consistent());
    }

    #[test]
    fn test_json_roundtrip_preserves_artifact() {
        let m    = hand_built_model();
        let json = serde_json::to_string(&m).unwrap();
        let back: LogisticModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.weights, m.weights);
        assert_eq!(back.feature_columns, m.feature_columns);
    }
}
