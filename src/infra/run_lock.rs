// ============================================================
// Layer 6 — Run Lock
// ============================================================
// Mutual exclusion between orchestrator runs. Concurrent runs
// are not supported: both the ingestion state and the production
// slot are single-writer, so a second run must not even start.
//
// Mechanism: O_CREAT|O_EXCL via OpenOptions::create_new — the
// one filesystem operation that atomically "create this file,
// failing if it already exists". Whoever creates the lock file
// owns the run; everyone else fails fast with OrchestratorBusy
// instead of blocking.
//
// The lock is an RAII guard: dropping it deletes the file, so
// the lock releases on every exit path, including error returns
// and panics that unwind.
//
// A crashed process (no unwind) leaves the file behind; the
// operator removes it by hand, and the error message names the
// path for exactly that reason.
//
// Reference: Rust Book §15 (Drop and RAII)

use std::fs;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Result;

use crate::domain::error::PipelineError;

/// Exclusive ownership of one pipeline run. Held for the whole
/// run; released on drop.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Try to take the lock. Fails immediately with
    /// OrchestratorBusy when another run holds it.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => {
                tracing::debug!("Acquired run lock '{}'", path.display());
                Ok(Self { path })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                Err(PipelineError::OrchestratorBusy(path).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(
                "Could not release run lock '{}': {}",
                self.path.display(),
                e
            );
        } else {
            tracing::debug!("Released run lock '{}'", self.path.display());
        }
    }
}
