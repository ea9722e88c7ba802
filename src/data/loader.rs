// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Reads a single raw CSV file into typed Records.
//
// Before any row is parsed, the header is compared against the
// fixed schema. A file with foreign columns is a format error —
// it must NOT be silently skipped or partially merged, because
// a half-ingested file would poison the canonical dataset. The
// error names the offending file and the expected columns so
// the operator can fix the drop without re-running.
//
// The csv crate handles quoting/escaping; serde maps each row
// onto the Record struct by column position.
//
// Reference: Rust Book §9 (Error Handling)

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::error::PipelineError;
use crate::domain::record::{Record, ALL_COLUMNS};

/// Loads one source CSV file, enforcing the fixed schema.
pub struct CsvLoader;

impl CsvLoader {
    /// Read every record in `path`, validating the header first.
    pub fn load(path: &Path) -> Result<Vec<Record>> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;

        Self::validate_header(&mut reader, path)?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let record: Record = result
                .with_context(|| format!("Malformed row in '{}'", path.display()))?;

            // The label column is binary by contract; anything
            // else is a format error, not a value to carry along
            if record.exited > 1 {
                return Err(PipelineError::InvalidLabel {
                    file:        file_name(path),
                    corporation: record.corporation,
                    value:       record.exited,
                }
                .into());
            }

            rows.push(record);
        }

        tracing::debug!("Loaded {} rows from '{}'", rows.len(), path.display());
        Ok(rows)
    }

    /// Compare the file's header against the fixed schema.
    fn validate_header(reader: &mut csv::Reader<std::fs::File>, path: &Path) -> Result<()> {
        let header = reader
            .headers()
            .with_context(|| format!("Cannot read header of '{}'", path.display()))?;

        let found: Vec<String> = header.iter().map(str::to_string).collect();
        let expected: Vec<String> = ALL_COLUMNS.iter().map(|c| c.to_string()).collect();

        if found != expected {
            return Err(PipelineError::SchemaMismatch {
                file: file_name(path),
                expected,
                found,
            }
            .into());
        }

        Ok(())
    }
}

/// The bare file name for error messages, without its directory.
fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}
