// ============================================================
// Layer 5 — Scorer
// ============================================================
// Applies a trained classifier to a dataset and computes one
// scalar: the F1 score of the positive class (exited = 1).
//
//   precision = tp / (tp + fp)
//   recall    = tp / (tp + fn)
//   F1        = 2·p·r / (p + r)      (harmonic mean)
//
// Degenerate denominators yield 0.0 rather than NaN, so the
// score always lands in [0, 1].
//
// This is a pure function of (model, dataset) — no side effects,
// nothing written. The score only becomes durable state when a
// promotion records it alongside the model it belongs to; a
// score is meaningless without both coordinates.

use anyhow::{bail, Result};

use crate::domain::dataset::CanonicalDataset;
use crate::domain::traits::BinaryClassifier;

/// F1 of `model`'s predictions against the dataset's labels.
pub fn score(model: &dyn BinaryClassifier, dataset: &CanonicalDataset) -> Result<f64> {
    if dataset.is_empty() {
        bail!("cannot score against an empty dataset");
    }

    // The dataset must expose exactly the columns the model was
    // trained on — anything else is an IncompatibleSchema error
    let columns = dataset.feature_columns();
    if columns != model.feature_columns() {
        return Err(crate::domain::error::PipelineError::IncompatibleSchema {
            expected: model.feature_columns().to_vec(),
            found:    columns,
        }
        .into());
    }

    let preds  = model.predict_all(&dataset.features());
    let labels = dataset.labels();

    Ok(f1_score(&preds, &labels))
}

/// F1 over the positive class, given aligned prediction and
/// label vectors.
fn f1_score(preds: &[u8], labels: &[u8]) -> f64 {
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fn_ = 0usize;

    for (&p, &y) in preds.iter().zip(labels) {
        match (p, y) {
            (1, 1) => tp += 1,
            (1, 0) => fp += 1,
            (0, 1) => fn_ += 1,
            _ => {}
        }
    }

    let precision = if tp + fp == 0 { 0.0 } else { tp as f64 / (tp + fp) as f64 };
    let recall    = if tp + fn_ == 0 { 0.0 } else { tp as f64 / (tp + fn_) as f64 };

    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Record;

    /// Test double: predicts 1 exactly when lastmonth_activity
    /// is at or above a fixed threshold.
    struct ThresholdClassifier {
        threshold: f64,
        columns:   Vec<String>,
    }

    impl ThresholdClassifier {
        fn new(threshold: f64) -> Self {
            Self {
                threshold,
                columns: vec![
                    "lastmonth_activity".to_string(),
                    "lastyear_activity".to_string(),
                    "number_of_employees".to_string(),
                ],
            }
        }
    }

    impl BinaryClassifier for ThresholdClassifier {
        fn feature_columns(&self) -> &[String] {
            &self.columns
        }

        fn predict(&self, features: &[f64]) -> u8 {
            (features[0] >= self.threshold) as u8
        }
    }

    fn row(corp: &str, last_month: i64, y: u8) -> Record {
        Record {
            corporation:         corp.to_string(),
            lastmonth_activity:  last_month,
            lastyear_activity:   0,
            number_of_employees: 0,
            exited:              y,
        }
    }

    #[test]
    fn test_known_confusion_matrix() {
        // threshold 10 → preds: [1, 1, 1, 0] against labels
        // [1, 1, 0, 1] → tp=2, fp=1, fn=1 → p = r = 2/3 → F1 = 2/3
        let ds = CanonicalDataset::from_rows(vec![
            row("a", 12, 1),
            row("b", 15, 1),
            row("c", 11, 0),
            row("d", 3, 1),
        ]);
        let model = ThresholdClassifier::new(10.0);

        let f1 = score(&model, &ds).unwrap();
        assert!((f1 - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_predictions_score_one() {
        let ds = CanonicalDataset::from_rows(vec![row("a", 20, 1), row("b", 2, 0)]);
        let f1 = score(&ThresholdClassifier::new(10.0), &ds).unwrap();
        assert_eq!(f1, 1.0);
    }

    #[test]
    fn test_no_true_positives_scores_zero() {
        // Model never predicts 1, but positives exist → F1 = 0.0,
        // not NaN
        let ds = CanonicalDataset::from_rows(vec![row("a", 2, 1), row("b", 3, 1)]);
        let f1 = score(&ThresholdClassifier::new(100.0), &ds).unwrap();
        assert_eq!(f1, 0.0);
    }

    #[test]
    fn test_foreign_dataset_columns_rejected() {
        use crate::domain::error::PipelineError;

        struct AlienModel {
            columns: Vec<String>,
        }
        impl BinaryClassifier for AlienModel {
            fn feature_columns(&self) -> &[String] {
                &self.columns
            }
            fn predict(&self, _: &[f64]) -> u8 {
                0
            }
        }

        let ds = CanonicalDataset::from_rows(vec![row("a", 1, 0)]);
        let model = AlienModel { columns: vec!["clicks".to_string()] };

        let err = score(&model, &ds).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::IncompatibleSchema { .. })
        ));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let ds = CanonicalDataset::from_rows(Vec::new());
        assert!(score(&ThresholdClassifier::new(1.0), &ds).is_err());
    }
}
