// ============================================================
// Layer 2 — ScoreUseCase
// ============================================================
// Scores the deployed production model against the current
// canonical dataset and reports both that fresh score and the
// recorded baseline, side by side.
//
// Read-only: scoring is a pure function of (model, dataset) and
// this use case records nothing. The recorded score changes only
// when a promotion replaces the whole slot.

use anyhow::Result;

use crate::application::config::PipelineConfig;
use crate::infra::ingestion_store::IngestionStore;
use crate::infra::production_store::ProductionStore;
use crate::ml::scorer;

/// The two coordinates of a drift comparison, for inspection.
#[derive(Debug, Clone, Copy)]
pub struct ScoreReport {
    /// The production model's score on the canonical dataset
    pub new_score: f64,

    /// The score recorded when that model was promoted
    pub recorded_score: f64,
}

/// Owns the config and runs the scoring workflow.
pub struct ScoreUseCase {
    config: PipelineConfig,
}

impl ScoreUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ScoreReport> {
        let dataset = IngestionStore::new(&self.config.ingest_dir).load_dataset()?;

        let production     = ProductionStore::new(&self.config.production_dir);
        let model          = production.get_production()?;
        let recorded_score = production.get_recorded_score()?;

        let new_score = scorer::score(&model, &dataset)?;
        tracing::info!(
            "Production model: {} = {:.6} on canonical dataset (recorded {:.6})",
            self.config.metric,
            new_score,
            recorded_score,
        );

        Ok(ScoreReport { new_score, recorded_score })
    }
}
