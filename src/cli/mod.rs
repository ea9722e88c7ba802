// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Four commands are supported:
//   1. `run`    — one full drift-triggered pipeline run
//   2. `ingest` — ingestion step on its own
//   3. `train`  — bootstrap training + initial deployment
//   4. `score`  — score the deployed model and print the result
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, IngestArgs, RunArgs, ScoreArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "attrition-pipeline",
    version = "0.1.0",
    about = "Ingest fresh client data, detect model drift, retrain and redeploy."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    /// The handlers are associated functions: moving the args out of
    /// `self.command` consumes the Cli, and nothing else of it is
    /// needed afterwards.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Run(args)    => Self::run_pipeline(args),
            Commands::Ingest(args) => Self::run_ingest(args),
            Commands::Train(args)  => Self::run_train(args),
            Commands::Score(args)  => Self::run_score(args),
        }
    }

    /// Handles the `run` subcommand — the full orchestrated run.
    fn run_pipeline(args: RunArgs) -> Result<()> {
        use crate::application::run_use_case::{RunOutcome, RunUseCase};

        let use_case = RunUseCase::new(args.into());
        let outcome  = use_case.execute()?;

        match outcome {
            RunOutcome::NoNewData => {
                println!("No new source files. Nothing to do.");
            }
            RunOutcome::NoDrift { new_score, recorded_score } => {
                println!(
                    "No model drift: {new_score:.6} >= {recorded_score:.6}. \
                     Production model kept."
                );
            }
            RunOutcome::Retrained { drifted_score, recorded_score, promoted_score } => {
                println!(
                    "Model drift detected ({drifted_score:.6} < {recorded_score:.6}). \
                     Retrained and promoted a new model (score {promoted_score:.6})."
                );
            }
        }
        Ok(())
    }

    /// Handles the `ingest` subcommand.
    fn run_ingest(args: IngestArgs) -> Result<()> {
        use crate::application::ingest_use_case::{IngestOutcome, IngestUseCase};
        use crate::infra::run_lock::RunLock;

        let config = crate::application::config::PipelineConfig::from(args);

        // Ingestion mutates durable state — same exclusion rule
        // as a full run
        let _lock = RunLock::acquire(&config.lock_path)?;

        let use_case = IngestUseCase::new(config);
        match use_case.execute()? {
            IngestOutcome::UpToDate => {
                println!("No new source files. Canonical dataset unchanged.");
            }
            IngestOutcome::Merged { dataset, new_files, .. } => {
                println!(
                    "Merged {} new file(s) into the canonical dataset ({} rows): {:?}",
                    new_files.len(),
                    dataset.len(),
                    new_files,
                );
            }
        }
        Ok(())
    }

    /// Handles the `train` subcommand — the bootstrap step.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        let use_case = TrainUseCase::new(args.into());
        let score    = use_case.execute()?;

        println!("Training complete. Deployed to production with score {score:.6}.");
        Ok(())
    }

    /// Handles the `score` subcommand.
    fn run_score(args: ScoreArgs) -> Result<()> {
        use crate::application::score_use_case::ScoreUseCase;

        let use_case = ScoreUseCase::new(args.into());
        let report   = use_case.execute()?;

        println!(
            "f1 on canonical dataset: {:.6} (recorded at promotion: {:.6})",
            report.new_score, report.recorded_score,
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["attrition-pipeline", "run", "--epochs", "10"]).unwrap();
        assert!(matches!(cli.command, Commands::Run(ref a) if a.epochs == 10));

        let cli = Cli::try_parse_from(["attrition-pipeline", "ingest"]).unwrap();
        assert!(matches!(cli.command, Commands::Ingest(_)));
    }

    #[test]
    fn test_run_dispatches_and_surfaces_use_case_errors() {
        // `score` against empty directories reaches the use case
        // and propagates its error back through run()
        let tmp = tempfile::tempdir().unwrap();
        let ingest = tmp.path().join("ingesteddata");
        let prod   = tmp.path().join("production");

        let cli = Cli::try_parse_from([
            "attrition-pipeline",
            "score",
            "--ingest-dir",
            ingest.to_str().unwrap(),
            "--production-dir",
            prod.to_str().unwrap(),
        ])
        .unwrap();

        assert!(cli.run().is_err());
    }
}
