// ============================================================
// Layer 6 — Ingestion Store
// ============================================================
// Owns the durable ingestion state: the canonical dataset and
// the manifest of source files merged into it.
//
// Files in the ingestion directory:
//   finaldata.csv      ← the canonical dataset, fully
//                        overwritten on every successful merge
//   ingestedfiles.txt  ← comma-joined manifest, superset of the
//                        previous manifest after every merge
//
// The two files must agree: a manifest that lists a file whose
// rows are missing from finaldata.csv would permanently skip
// that file's data. persist() therefore stages BOTH files first
// and only then commits, dataset before manifest. If a crash
// lands between the two renames the manifest under-reports what
// was merged, and the next run simply re-merges — the safe
// direction. The reverse order could lose data forever.
//
// Reference: Rust Book §9 (Error Handling)

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::loader::CsvLoader;
use crate::domain::dataset::CanonicalDataset;
use crate::domain::record::ALL_COLUMNS;
use crate::domain::manifest::IngestedFileManifest;
use crate::infra::atomic;

/// Persistence for the canonical dataset + manifest pair.
pub struct IngestionStore {
    dir: PathBuf,
}

impl IngestionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the canonical dataset file.
    pub fn dataset_path(&self) -> PathBuf {
        self.dir.join("finaldata.csv")
    }

    /// Path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join("ingestedfiles.txt")
    }

    /// Load the manifest recorded by previous runs. The empty
    /// manifest when no ingestion has happened yet.
    pub fn read_manifest(&self) -> Result<IngestedFileManifest> {
        let path = self.manifest_path();
        if !path.exists() {
            return Ok(IngestedFileManifest::empty());
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read manifest '{}'", path.display()))?;
        Ok(IngestedFileManifest::parse(&text))
    }

    /// Load the canonical dataset written by a previous merge.
    pub fn load_dataset(&self) -> Result<CanonicalDataset> {
        let path = self.dataset_path();
        let rows = CsvLoader::load(&path).with_context(|| {
            format!(
                "Cannot load canonical dataset '{}' — has ingestion run yet?",
                path.display()
            )
        })?;
        Ok(CanonicalDataset::from_rows(rows))
    }

    /// Persist the dataset and manifest together. Both become
    /// visible, or neither does.
    pub fn persist(
        &self,
        dataset:  &CanonicalDataset,
        manifest: &IngestedFileManifest,
    ) -> Result<()> {
        let csv_bytes = dataset_to_csv(dataset)?;

        // Stage both files before committing either
        let staged_dataset  = atomic::stage(&self.dataset_path(), &csv_bytes)?;
        let staged_manifest =
            atomic::stage(&self.manifest_path(), manifest.to_text().as_bytes())?;

        // Dataset first: a crash here leaves the manifest short,
        // which the next run repairs by re-merging
        staged_dataset.commit()?;
        staged_manifest.commit()?;

        tracing::info!(
            "Persisted canonical dataset ({} rows) and manifest ({} files) in '{}'",
            dataset.len(),
            manifest.len(),
            self.dir.display(),
        );
        Ok(())
    }
}

/// Render the dataset as CSV bytes, header included.
fn dataset_to_csv(dataset: &CanonicalDataset) -> Result<Vec<u8>> {
    // The header is written unconditionally: serde only emits it
    // with the first row, and a zero-row dataset must still
    // round-trip through load_dataset
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(&ALL_COLUMNS)
        .context("Cannot write dataset header")?;
    for row in dataset.rows() {
        writer.serialize(row).context("Cannot serialize dataset row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Cannot flush dataset CSV buffer: {e}"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::Record;

    fn row(corp: &str, a: i64) -> Record {
        Record {
            corporation:         corp.to_string(),
            lastmonth_activity:  a,
            lastyear_activity:   a * 10,
            number_of_employees: 7,
            exited:              (a % 2) as u8,
        }
    }

    #[test]
    fn test_missing_manifest_reads_as_empty() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = IngestionStore::new(tmp.path().join("ingested"));
        assert!(store.read_manifest().unwrap().is_empty());
    }

    #[test]
    fn test_persist_then_reload_roundtrip() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = IngestionStore::new(tmp.path());

        let dataset  = CanonicalDataset::from_rows(vec![row("acme", 3), row("zeta", 4)]);
        let mut manifest = IngestedFileManifest::empty();
        manifest.extend(vec!["f1.csv".to_string(), "f2.csv".to_string()]);

        store.persist(&dataset, &manifest).unwrap();

        assert_eq!(store.read_manifest().unwrap(), manifest);

        let reloaded = store.load_dataset().unwrap();
        assert_eq!(reloaded.len(), 2);
        let mut corps: Vec<_> =
            reloaded.rows().iter().map(|r| r.corporation.clone()).collect();
        corps.sort();
        assert_eq!(corps, vec!["acme", "zeta"]);
    }

    #[test]
    fn test_repersisting_same_state_changes_nothing() {
        // Idempotence: writing the identical pair twice leaves
        // identical durable state
        let tmp   = tempfile::tempdir().unwrap();
        let store = IngestionStore::new(tmp.path());

        let dataset  = CanonicalDataset::from_rows(vec![row("acme", 3)]);
        let manifest = IngestedFileManifest::parse("f1.csv");

        store.persist(&dataset, &manifest).unwrap();
        let first_csv      = fs::read_to_string(store.dataset_path()).unwrap();
        let first_manifest = fs::read_to_string(store.manifest_path()).unwrap();

        store.persist(&dataset, &manifest).unwrap();
        assert_eq!(fs::read_to_string(store.dataset_path()).unwrap(), first_csv);
        assert_eq!(
            fs::read_to_string(store.manifest_path()).unwrap(),
            first_manifest
        );
    }

    #[test]
    fn test_empty_dataset_roundtrips_with_header() {
        // Merging only header-only source files yields zero rows;
        // the persisted pair must stay loadable or the manifest
        // would durably point at an unreadable canonical file
        let tmp   = tempfile::tempdir().unwrap();
        let store = IngestionStore::new(tmp.path());

        let dataset  = CanonicalDataset::from_rows(Vec::new());
        let manifest = IngestedFileManifest::parse("headers_only.csv");
        store.persist(&dataset, &manifest).unwrap();

        assert!(store.read_manifest().unwrap().contains("headers_only.csv"));
        assert!(store.load_dataset().unwrap().is_empty());

        let text = fs::read_to_string(store.dataset_path()).unwrap();
        assert!(text.starts_with("corporation,"));
    }

    #[test]
    fn test_manifest_durable_form_is_comma_joined() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = IngestionStore::new(tmp.path());

        let dataset  = CanonicalDataset::from_rows(vec![row("acme", 3)]);
        let manifest = IngestedFileManifest::parse("f2.csv,f1.csv");
        store.persist(&dataset, &manifest).unwrap();

        let text = fs::read_to_string(store.manifest_path()).unwrap();
        assert_eq!(text, "f1.csv,f2.csv");
    }
}
