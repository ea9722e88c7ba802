// ============================================================
// Layer 3 — Pipeline Error Taxonomy
// ============================================================
// Every failure mode the pipeline distinguishes, as a typed
// enum via thiserror. The rest of the crate propagates these
// through anyhow, so callers (and tests) can still downcast to
// match on a specific variant when they need to.
//
// Propagation rules:
//   - Anything before retraining aborts the run fail-closed:
//     no durable state has been touched yet.
//   - Promotion errors must leave the previous production
//     artifact/score pair intact (see infra/production_store).
//   - Reporting failures are the one kind that gets swallowed
//     and logged instead of surfaced.
//
// Reference: Rust Book §9 (Error Handling)

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The configured source directory does not exist. Fatal for
    /// the run — there is nothing to ingest from.
    #[error("source directory '{0}' does not exist")]
    SourceUnavailable(PathBuf),

    /// A source file's columns differ from the fixed schema.
    #[error(
        "schema mismatch in '{file}': expected columns {expected:?}, found {found:?}"
    )]
    SchemaMismatch {
        file:     String,
        expected: Vec<String>,
        found:    Vec<String>,
    },

    /// A row's label is outside {0, 1}. Caught at load time so a
    /// bad row never reaches training, scoring or reporting.
    #[error(
        "invalid label in '{file}': exited = {value} for '{corporation}', expected 0 or 1"
    )]
    InvalidLabel {
        file:        String,
        corporation: String,
        value:       u8,
    },

    /// The dataset's feature columns don't match what the model
    /// was trained on.
    #[error(
        "dataset feature columns {found:?} do not match the model's \
         expected columns {expected:?}"
    )]
    IncompatibleSchema {
        expected: Vec<String>,
        found:    Vec<String>,
    },

    /// The production slot is empty — the bootstrap case. Run the
    /// initial `train` step before `run`.
    #[error("no production model found in '{0}' — run the initial training step first")]
    NoProductionModel(PathBuf),

    /// Training exceeded the caller-supplied timeout. Fatal to
    /// this run, not to the system.
    #[error("training did not finish within {0} seconds")]
    TrainingTimeout(u64),

    /// Another orchestrator run holds the exclusion lock. Fail
    /// fast instead of blocking.
    #[error("another pipeline run is in progress (lock file '{0}' exists)")]
    OrchestratorBusy(PathBuf),

    /// An atomic write-temp-then-rename could not complete.
    #[error("atomic write to '{path}' failed")]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_diagnostic_context() {
        let e = PipelineError::SchemaMismatch {
            file:     "bad.csv".into(),
            expected: vec!["a".into()],
            found:    vec!["b".into()],
        };
        let msg = e.to_string();
        assert!(msg.contains("bad.csv"));
        assert!(msg.contains("\"a\""));
        assert!(msg.contains("\"b\""));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        // The rest of the crate propagates via anyhow — variants
        // must survive the round trip
        let err: anyhow::Error = PipelineError::TrainingTimeout(30).into();
        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::TrainingTimeout(30)) => {}
            other => panic!("unexpected: {:?}", other),
        }
    }
}
