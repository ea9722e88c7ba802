// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Traits are Rust's way of defining shared behaviour —
// similar to interfaces in Java or abstract classes in Python.
//
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - LogisticModel implements BinaryClassifier
//   - A future GradientBoostedModel could implement it too
//   - The scorer and orchestrator only see BinaryClassifier
//     and work with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::domain::dataset::CanonicalDataset;

// ─── BinaryClassifier ─────────────────────────────────────────────────────────
/// The pluggable classification capability the pipeline delegates
/// to. The orchestration core never looks inside the model — it
/// only asks it to predict and checks which columns it expects.
///
/// Implementations:
///   - LogisticModel (ml/model.rs) → logistic regression
pub trait BinaryClassifier {
    /// The feature columns this model was trained on, in order.
    /// Scoring refuses datasets whose columns differ.
    fn feature_columns(&self) -> &[String];

    /// Predict the label (0 or 1) for one feature vector.
    /// Deterministic: the same features always give the same label.
    fn predict(&self, features: &[f64]) -> u8;

    /// Predict a whole feature matrix, one label per row.
    fn predict_all(&self, rows: &[Vec<f64>]) -> Vec<u8> {
        rows.iter().map(|r| self.predict(r)).collect()
    }
}

// ─── DriftReporter ────────────────────────────────────────────────────────────
/// A downstream collaborator invoked after a successful promotion.
/// The orchestrator hands it the freshly promoted model and the
/// canonical dataset, logs the outcome, and moves on — reporter
/// failures never fail the run.
///
/// Implementations:
///   - ConfusionMatrixReporter (infra/reporter.rs)
pub trait DriftReporter {
    /// Produce whatever report this collaborator owns.
    fn report(&self, model: &dyn BinaryClassifier, dataset: &CanonicalDataset)
        -> Result<()>;
}
