// ============================================================
// Layer 6 — Atomic File Writes
// ============================================================
// The durable-put primitive every store in this crate uses:
// write the new contents to a temporary file in the SAME
// directory, then rename it over the destination.
//
// Why rename?
//   On the filesystems we target, rename within a directory is
//   atomic: a reader sees either the old file or the new file,
//   never a half-written one. Writing in place would expose
//   torn state to anything reading concurrently (e.g. a serving
//   process loading the production model).
//
// Two shapes are offered:
//   - write_atomic()  — stage + commit in one call, for a
//                       single independent file
//   - stage()/commit  — separate phases, so a store can stage
//                       SEVERAL files first and only then commit
//                       them back to back, shrinking the window
//                       in which related files disagree
//
// A staged file that is dropped without commit deletes its
// temporary and leaves the destination untouched.
//
// Reference: Rust Book §9 (Error Handling), §15 (Drop)

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::PipelineError;

/// A temporary file waiting to be renamed over its destination.
pub struct StagedFile {
    tmp:       PathBuf,
    dest:      PathBuf,
    committed: bool,
}

impl StagedFile {
    /// Rename the temporary over the destination, making the new
    /// contents visible in one step.
    pub fn commit(mut self) -> Result<(), PipelineError> {
        fs::rename(&self.tmp, &self.dest).map_err(|source| {
            PipelineError::PersistenceFailure { path: self.dest.clone(), source }
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        // Abandoned stage: remove the temporary, never the dest
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// Write `contents` to a temporary next to `dest`, ready to be
/// committed. The destination is not touched yet.
pub fn stage(dest: &Path, contents: &[u8]) -> Result<StagedFile, PipelineError> {
    let fail = |source| PipelineError::PersistenceFailure {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(fail)?;
        }
    }

    // Same directory as the destination so the rename never
    // crosses a filesystem boundary
    let mut name = dest
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    let tmp = dest.with_file_name(name);

    fs::write(&tmp, contents).map_err(fail)?;

    Ok(StagedFile { tmp, dest: dest.to_path_buf(), committed: false })
}

/// Stage and commit in one step.
pub fn write_atomic(dest: &Path, contents: &[u8]) -> Result<(), PipelineError> {
    stage(dest, contents)?.commit()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_and_overwrites() {
        let tmp  = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("data.txt");

        write_atomic(&dest, b"first").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "first");

        write_atomic(&dest, b"second").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");
    }

    #[test]
    fn test_no_temporary_left_behind_after_commit() {
        let tmp  = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("data.txt");

        write_atomic(&dest, b"contents").unwrap();

        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_abandoned_stage_leaves_destination_untouched() {
        let tmp  = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("data.txt");
        fs::write(&dest, "original").unwrap();

        {
            let _staged = stage(&dest, b"replacement").unwrap();
            // dropped without commit
        }

        assert_eq!(fs::read_to_string(&dest).unwrap(), "original");
        assert!(!dest.with_file_name("data.txt.tmp").exists());
    }

    #[test]
    fn test_parent_directories_are_created() {
        let tmp  = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("nested/deeper/data.txt");

        write_atomic(&dest, b"x").unwrap();
        assert!(dest.exists());
    }
}
