// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands:
//   `run`    — one full drift-triggered pipeline run
//   `ingest` — ingestion only
//   `train`  — bootstrap training + initial deployment
//   `score`  — score the production model, print both scores
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::config::PipelineConfig;

/// The four top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: check sources, ingest, score,
    /// decide drift, and retrain + redeploy if needed
    Run(RunArgs),

    /// Merge new source files into the canonical dataset
    Ingest(IngestArgs),

    /// Train on the canonical dataset and deploy the result
    /// (fills an empty production slot)
    Train(TrainArgs),

    /// Score the production model against the canonical dataset
    Score(ScoreArgs),
}

/// All arguments for the `run` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory raw CSV files are dropped into
    #[arg(long, default_value = "sourcedata")]
    pub source_dir: String,

    /// Directory for the canonical dataset and manifest
    #[arg(long, default_value = "ingesteddata")]
    pub ingest_dir: String,

    /// Directory holding the production slot
    #[arg(long, default_value = "production_deployment")]
    pub production_dir: String,

    /// Lock file taken for the duration of the run
    #[arg(long, default_value = "pipeline.lock")]
    pub lock_path: String,

    /// SGD step size used when retraining
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Full passes over the training data
    #[arg(long, default_value_t = 200)]
    pub epochs: usize,

    /// L2 regularisation strength
    #[arg(long, default_value_t = 1e-4)]
    pub l2_penalty: f64,

    /// Trainer shuffle seed — same seed, same model
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Abort the run if training exceeds this many seconds
    #[arg(long, default_value_t = 300)]
    pub training_timeout_secs: u64,
}

/// Convert CLI RunArgs into the application-layer PipelineConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<RunArgs> for PipelineConfig {
    fn from(a: RunArgs) -> Self {
        PipelineConfig {
            source_dir:            a.source_dir,
            ingest_dir:            a.ingest_dir,
            production_dir:        a.production_dir,
            lock_path:             a.lock_path,
            learning_rate:         a.learning_rate,
            epochs:                a.epochs,
            l2_penalty:            a.l2_penalty,
            seed:                  a.seed,
            training_timeout_secs: a.training_timeout_secs,
            ..PipelineConfig::default()
        }
    }
}

/// All arguments for the `ingest` command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Directory raw CSV files are dropped into
    #[arg(long, default_value = "sourcedata")]
    pub source_dir: String,

    /// Directory for the canonical dataset and manifest
    #[arg(long, default_value = "ingesteddata")]
    pub ingest_dir: String,

    /// Lock file taken for the duration of the ingestion
    #[arg(long, default_value = "pipeline.lock")]
    pub lock_path: String,
}

impl From<IngestArgs> for PipelineConfig {
    fn from(a: IngestArgs) -> Self {
        PipelineConfig {
            source_dir: a.source_dir,
            ingest_dir: a.ingest_dir,
            lock_path:  a.lock_path,
            ..PipelineConfig::default()
        }
    }
}

/// All arguments for the `train` command
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory holding the canonical dataset to train on
    #[arg(long, default_value = "ingesteddata")]
    pub ingest_dir: String,

    /// Directory holding the production slot to fill
    #[arg(long, default_value = "production_deployment")]
    pub production_dir: String,

    /// Lock file taken for the duration of the training
    #[arg(long, default_value = "pipeline.lock")]
    pub lock_path: String,

    /// SGD step size
    #[arg(long, default_value_t = 0.1)]
    pub learning_rate: f64,

    /// Full passes over the training data
    #[arg(long, default_value_t = 200)]
    pub epochs: usize,

    /// L2 regularisation strength
    #[arg(long, default_value_t = 1e-4)]
    pub l2_penalty: f64,

    /// Trainer shuffle seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl From<TrainArgs> for PipelineConfig {
    fn from(a: TrainArgs) -> Self {
        PipelineConfig {
            ingest_dir:     a.ingest_dir,
            production_dir: a.production_dir,
            lock_path:      a.lock_path,
            learning_rate:  a.learning_rate,
            epochs:         a.epochs,
            l2_penalty:     a.l2_penalty,
            seed:           a.seed,
            ..PipelineConfig::default()
        }
    }
}

/// All arguments for the `score` command
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Directory holding the canonical dataset
    #[arg(long, default_value = "ingesteddata")]
    pub ingest_dir: String,

    /// Directory holding the production slot
    #[arg(long, default_value = "production_deployment")]
    pub production_dir: String,
}

impl From<ScoreArgs> for PipelineConfig {
    fn from(a: ScoreArgs) -> Self {
        PipelineConfig {
            ingest_dir:     a.ingest_dir,
            production_dir: a.production_dir,
            ..PipelineConfig::default()
        }
    }
}
