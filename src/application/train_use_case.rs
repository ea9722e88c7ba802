// ============================================================
// Layer 2 — TrainUseCase (bootstrap / initial deployment)
// ============================================================
// Fills an empty production slot so the orchestrator has a
// baseline to compare against. The drift pipeline itself only
// retrains a model that already exists; this use case is the
// step that creates the first one:
//
//   Step 1: Load the canonical dataset      (Layer 6 - infra)
//   Step 2: Train a fresh model             (Layer 5 - ml)
//   Step 3: Score it on the same dataset    (Layer 5 - ml)
//   Step 4: Promote model + score together  (Layer 6 - infra)
//
// Scoring on the training data is deliberate here: the recorded
// score is the baseline future runs compare FRESH data against,
// and at bootstrap time the canonical dataset is all there is.
//
// Holds the run lock — this mutates the production slot and the
// single-writer rule applies to it like to any promotion.

use anyhow::Result;

use crate::application::config::PipelineConfig;
use crate::infra::ingestion_store::IngestionStore;
use crate::infra::production_store::ProductionStore;
use crate::infra::run_lock::RunLock;
use crate::ml::{scorer, trainer};

/// Owns the config and runs the bootstrap training workflow.
pub struct TrainUseCase {
    config: PipelineConfig,
}

impl TrainUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Train on the canonical dataset and promote the result.
    /// Returns the recorded score.
    pub fn execute(&self) -> Result<f64> {
        let _lock = RunLock::acquire(&self.config.lock_path)?;

        // ── Step 1: Load the canonical dataset ────────────────────────────────
        let ingestion = IngestionStore::new(&self.config.ingest_dir);
        let dataset   = ingestion.load_dataset()?;
        let manifest  = ingestion.read_manifest()?;
        tracing::info!("Training on canonical dataset ({} rows)", dataset.len());

        // ── Step 2: Fit a fresh model ─────────────────────────────────────────
        let model = trainer::train(&dataset, &self.config)?;

        // ── Step 3: Score it — this becomes the drift baseline ────────────────
        let score = scorer::score(&model, &dataset)?;
        tracing::info!("Bootstrap model scored {} = {:.6}", self.config.metric, score);

        // ── Step 4: Promote artifact and score together ───────────────────────
        let production = ProductionStore::new(&self.config.production_dir);
        production.promote(&model, score, &manifest)?;

        Ok(score)
    }
}
