// ============================================================
// Layer 2 — Pipeline Configuration
// ============================================================
// Every knob of a pipeline run, in one explicit value handed to
// the use cases at construction time. There is no global config
// and no file read at process start — the CLI builds this from
// its arguments and passes it down.
//
// Serialisable so a run's exact configuration can be captured
// alongside its artifacts if ever needed.
//
// Reference: Rust Book §5 (Structs), §7 (Modules)

use serde::{Deserialize, Serialize};

/// Which scalar metric scores are computed and compared with.
/// Both sides of a drift comparison always use the same one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Harmonic mean of precision and recall, positive class
    F1,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::F1 => write!(f, "f1"),
        }
    }
}

/// All configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory raw CSV files are dropped into
    pub source_dir: String,

    /// Directory holding finaldata.csv and ingestedfiles.txt
    pub ingest_dir: String,

    /// Directory holding the production slot
    pub production_dir: String,

    /// Lock file taken for the duration of a run
    pub lock_path: String,

    /// The performance metric scores are computed with
    pub metric: Metric,

    /// SGD step size
    pub learning_rate: f64,

    /// Full passes over the training data
    pub epochs: usize,

    /// L2 regularisation strength
    pub l2_penalty: f64,

    /// Seed for the trainer's shuffle — fixed seed, fixed model
    pub seed: u64,

    /// Upper bound on training wall time; exceeding it fails the
    /// run with TrainingTimeout
    pub training_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir:            "sourcedata".to_string(),
            ingest_dir:            "ingesteddata".to_string(),
            production_dir:        "production_deployment".to_string(),
            lock_path:             "pipeline.lock".to_string(),
            metric:                Metric::F1,
            learning_rate:         0.1,
            epochs:                200,
            l2_penalty:            1e-4,
            seed:                  0,
            training_timeout_secs: 300,
        }
    }
}
