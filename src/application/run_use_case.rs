// ============================================================
// Layer 2 — RunUseCase (the orchestrator)
// ============================================================
// One end-to-end pipeline run as an explicit state machine:
//
//   Idle → CheckingSources → Ingesting → Scoring → DecidingDrift
//        → { Retraining → Promoting → Reporting } | Done
//
// Each state carries exactly the data its successor needs, so
// there is no bag of Options to unwrap — an impossible
// transition simply cannot be constructed. The run loop advances
// one state per step, logging and timing every transition
// (the in-process replacement for timing external scripts).
//
// Side-effect contract:
//   - CheckingSources and Scoring are read-only
//   - Ingesting persists the canonical dataset + manifest
//     (ingestion's own contracted side effect)
//   - Promoting is the ONLY state that mutates the production
//     slot, and does so atomically
//   - Reporting failures are logged and swallowed — the
//     promotion has already happened and must stand
//
// The whole run holds an exclusive lock; a second concurrent
// invocation fails fast with OrchestratorBusy. Terminal state
// Done is reached exactly once per invocation, and re-running
// with no new files is a safe no-op.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)
//            Rust Book §16 (Concurrency)

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::application::config::PipelineConfig;
use crate::application::ingest_use_case::{IngestUseCase, SourceCheck};
use crate::domain::dataset::CanonicalDataset;
use crate::domain::drift::{decide, DriftVerdict};
use crate::domain::error::PipelineError;
use crate::domain::manifest::IngestedFileManifest;
use crate::domain::traits::DriftReporter;
use crate::infra::production_store::ProductionStore;
use crate::infra::reporter::ConfusionMatrixReporter;
use crate::infra::run_lock::RunLock;
use crate::ml::model::LogisticModel;
use crate::ml::{scorer, trainer};

// ─── Run Outcome ──────────────────────────────────────────────────────────────
/// How a completed run ended. Every variant is a successful run;
/// failures surface as errors instead.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// No unseen source files — nothing to do
    NoNewData,

    /// Fresh data scored at or above the recorded baseline
    NoDrift { new_score: f64, recorded_score: f64 },

    /// Drift detected; a new model was trained and promoted
    Retrained {
        /// What the old model scored on the fresh data
        drifted_score: f64,
        /// The old model's recorded baseline
        recorded_score: f64,
        /// The new model's score, now recorded in the slot
        promoted_score: f64,
    },
}

// ─── State Machine ────────────────────────────────────────────────────────────
/// The orchestrator's states. Each variant owns the data the
/// next transition needs.
enum RunState {
    Idle,
    CheckingSources,
    Ingesting {
        check: SourceCheck,
    },
    Scoring {
        dataset:  CanonicalDataset,
        manifest: IngestedFileManifest,
    },
    DecidingDrift {
        dataset:        CanonicalDataset,
        manifest:       IngestedFileManifest,
        new_score:      f64,
        recorded_score: f64,
    },
    Retraining {
        dataset:        CanonicalDataset,
        manifest:       IngestedFileManifest,
        drifted_score:  f64,
        recorded_score: f64,
    },
    Promoting {
        dataset:        CanonicalDataset,
        manifest:       IngestedFileManifest,
        model:          LogisticModel,
        drifted_score:  f64,
        recorded_score: f64,
    },
    Reporting {
        dataset: CanonicalDataset,
        model:   LogisticModel,
        outcome: RunOutcome,
    },
    Done(RunOutcome),
}

impl RunState {
    fn name(&self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::CheckingSources => "CheckingSources",
            RunState::Ingesting { .. } => "Ingesting",
            RunState::Scoring { .. } => "Scoring",
            RunState::DecidingDrift { .. } => "DecidingDrift",
            RunState::Retraining { .. } => "Retraining",
            RunState::Promoting { .. } => "Promoting",
            RunState::Reporting { .. } => "Reporting",
            RunState::Done(_) => "Done",
        }
    }
}

// ─── RunUseCase ───────────────────────────────────────────────────────────────
/// Owns the config and drives one run to completion.
pub struct RunUseCase {
    config: PipelineConfig,
}

impl RunUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Execute one full pipeline run.
    pub fn execute(&self) -> Result<RunOutcome> {
        // Exclusive access for the whole run — released on every
        // exit path by the guard's Drop
        let _lock = RunLock::acquire(&self.config.lock_path)?;

        let mut state = RunState::Idle;

        loop {
            let from    = state.name();
            let started = Instant::now();

            let next = self.advance(state)?;

            tracing::info!(
                "{} → {} ({:.3}s)",
                from,
                next.name(),
                started.elapsed().as_secs_f64(),
            );

            match next {
                RunState::Done(outcome) => return Ok(outcome),
                other => state = other,
            }
        }
    }

    /// One transition of the state machine.
    fn advance(&self, state: RunState) -> Result<RunState> {
        match state {
            RunState::Idle => Ok(RunState::CheckingSources),

            // ── CheckingSources ───────────────────────────────────────────────
            RunState::CheckingSources => {
                let ingest = IngestUseCase::new(self.config.clone());
                let check  = ingest.check_sources()?;

                if check.new_files.is_empty() {
                    tracing::info!("No new source files — ending this run");
                    return Ok(RunState::Done(RunOutcome::NoNewData));
                }

                tracing::info!("New source files: {:?}", check.new_files);
                Ok(RunState::Ingesting { check })
            }

            // ── Ingesting ─────────────────────────────────────────────────────
            RunState::Ingesting { check } => {
                let ingest = IngestUseCase::new(self.config.clone());
                let (dataset, manifest) = ingest.merge_and_persist(&check)?;
                Ok(RunState::Scoring { dataset, manifest })
            }

            // ── Scoring ───────────────────────────────────────────────────────
            // The CURRENT production model against the fresh data
            RunState::Scoring { dataset, manifest } => {
                let store = ProductionStore::new(&self.config.production_dir);

                let production     = store.get_production()?;
                let recorded_score = store.get_recorded_score()?;
                let new_score      = scorer::score(&production, &dataset)?;

                tracing::info!(
                    "Production model scored {} = {:.6} on fresh data (recorded {:.6})",
                    self.config.metric,
                    new_score,
                    recorded_score,
                );

                Ok(RunState::DecidingDrift { dataset, manifest, new_score, recorded_score })
            }

            // ── DecidingDrift ─────────────────────────────────────────────────
            RunState::DecidingDrift { dataset, manifest, new_score, recorded_score } => {
                match decide(new_score, recorded_score) {
                    DriftVerdict::NoDrift => {
                        tracing::info!(
                            "No model drift ({:.6} >= {:.6}) — ending this run",
                            new_score,
                            recorded_score,
                        );
                        Ok(RunState::Done(RunOutcome::NoDrift { new_score, recorded_score }))
                    }
                    DriftVerdict::Drift => {
                        tracing::warn!(
                            "Model drift ({:.6} < {:.6}) — retraining",
                            new_score,
                            recorded_score,
                        );
                        Ok(RunState::Retraining {
                            dataset,
                            manifest,
                            drifted_score: new_score,
                            recorded_score,
                        })
                    }
                }
            }

            // ── Retraining ────────────────────────────────────────────────────
            RunState::Retraining { dataset, manifest, drifted_score, recorded_score } => {
                let model = self.train_with_timeout(dataset.clone())?;
                Ok(RunState::Promoting { dataset, manifest, model, drifted_score, recorded_score })
            }

            // ── Promoting ─────────────────────────────────────────────────────
            // The one state allowed to mutate the production slot
            RunState::Promoting { dataset, manifest, model, drifted_score, recorded_score } => {
                let promoted_score = scorer::score(&model, &dataset)?;

                let store = ProductionStore::new(&self.config.production_dir);
                store.promote(&model, promoted_score, &manifest)?;

                let outcome = RunOutcome::Retrained {
                    drifted_score,
                    recorded_score,
                    promoted_score,
                };
                Ok(RunState::Reporting { dataset, model, outcome })
            }

            // ── Reporting ─────────────────────────────────────────────────────
            RunState::Reporting { dataset, model, outcome } => {
                let reporter = ConfusionMatrixReporter::new(&self.config.production_dir);

                // Collaborator failures are logged, never fatal
                if let Err(e) = reporter.report(&model, &dataset) {
                    tracing::warn!("Reporting collaborator failed (non-fatal): {:#}", e);
                }

                Ok(RunState::Done(outcome))
            }

            RunState::Done(outcome) => Ok(RunState::Done(outcome)),
        }
    }

    /// Run the trainer on a worker thread, bounded by the
    /// configured timeout. On timeout the run fails with
    /// TrainingTimeout; the detached worker finishes in the
    /// background and its result is discarded (the trainer
    /// itself touches no durable state).
    fn train_with_timeout(&self, dataset: CanonicalDataset) -> Result<LogisticModel> {
        let timeout = Duration::from_secs(self.config.training_timeout_secs);
        let cfg     = self.config.clone();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(trainer::train(&dataset, &cfg));
        });

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(_) => {
                Err(PipelineError::TrainingTimeout(self.config.training_timeout_secs).into())
            }
        }
    }
}
