// ============================================================
// Layer 4 — Source Directory
// ============================================================
// Read-only view of the directory that raw CSV files arrive in.
//
// This component never writes anything. It answers two questions:
//   1. Which source files exist right now?
//   2. Given the manifest of already-ingested files, is there
//      anything new? (pure set difference)
//
// A missing source directory is fatal for the run — it means the
// pipeline is misconfigured or the share is down, and silently
// treating that as "no new data" would mask the outage.
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::error::PipelineError;
use crate::domain::manifest::IngestedFileManifest;

/// Read-only access to the raw data drop directory.
pub struct SourceDir {
    dir: PathBuf,
}

impl SourceDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// List the CSV file names currently present in the source
    /// directory. Non-CSV entries (readme files, subdirectories)
    /// are ignored.
    pub fn list_available(&self) -> Result<BTreeSet<String>> {
        if !self.dir.exists() {
            return Err(PipelineError::SourceUnavailable(self.dir.clone()).into());
        }

        let mut names = BTreeSet::new();

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read source directory '{}'", self.dir.display()))?
        {
            let entry = entry?;
            let path  = entry.path();

            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some("csv")
            {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.insert(name.to_string());
                }
            }
        }

        Ok(names)
    }

    /// Full path to one source file by its manifest identifier.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// True iff at least one available file is not in the manifest.
/// Pure set difference — no I/O, no side effects.
pub fn has_new_sources(
    available: &BTreeSet<String>,
    manifest:  &IngestedFileManifest,
) -> bool {
    available.iter().any(|name| !manifest.contains(name))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_file_detected() {
        // Scenario A: manifest = {f1.csv}, dir = {f1.csv, f2.csv}
        let manifest = IngestedFileManifest::parse("f1.csv");
        assert!(has_new_sources(&set(&["f1.csv", "f2.csv"]), &manifest));
    }

    #[test]
    fn test_unchanged_dir_has_nothing_new() {
        // Scenario D: source dir unchanged from manifest
        let manifest = IngestedFileManifest::parse("f1.csv,f2.csv");
        assert!(!has_new_sources(&set(&["f1.csv", "f2.csv"]), &manifest));
    }

    #[test]
    fn test_empty_dir_has_nothing_new() {
        assert!(!has_new_sources(&set(&[]), &IngestedFileManifest::empty()));
    }

    #[test]
    fn test_missing_directory_is_source_unavailable() {
        let src = SourceDir::new("/definitely/not/a/real/dir");
        let err = src.list_available().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::SourceUnavailable(_))
        ));
    }

    #[test]
    fn test_lists_only_csv_files() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["a.csv", "b.csv", "notes.txt"] {
            let mut f = File::create(tmp.path().join(name)).unwrap();
            writeln!(f, "x").unwrap();
        }

        let src = SourceDir::new(tmp.path());
        assert_eq!(src.list_available().unwrap(), set(&["a.csv", "b.csv"]));
    }
}
