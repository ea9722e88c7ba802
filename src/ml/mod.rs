// ============================================================
// Layer 5 — ML Layer
// ============================================================
// Everything that knows how a classifier actually works lives
// here, behind the BinaryClassifier trait from Layer 3. No
// other layer does model math.
//
// What's in this layer:
//
//   model.rs   — The logistic regression artifact
//                Weights, bias, standardisation parameters and
//                the expected feature columns, serialisable as
//                JSON for the production slot
//
//   trainer.rs — The training procedure
//                Seeded SGD on the log loss with L2 penalty.
//                Always a full retrain; deterministic for a
//                fixed seed and configuration
//
//   scorer.rs  — The performance metric
//                F1 of the positive class, a pure function of
//                (model, dataset)
//
// Reference: Rust Book §10 (Traits)

/// Logistic regression artifact — implements BinaryClassifier
pub mod model;

/// Full-retrain fitting procedure
pub mod trainer;

/// F1 scoring of a model against a dataset
pub mod scorer;
