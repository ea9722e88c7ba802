// ============================================================
// Layer 2 — IngestUseCase
// ============================================================
// The ingestion workflow, in two halves the orchestrator can
// also drive separately as its CheckingSources and Ingesting
// states:
//
//   check_sources()     — list the drop directory, read the
//                         manifest, compute the set difference
//   merge_and_persist() — merge ALL available files into a
//                         fresh canonical dataset and persist
//                         it together with the grown manifest
//
// The canonical dataset is recreated from scratch (never
// patched), so re-reading already-ingested files is harmless:
// deduplication collapses their rows again. The manifest only
// gates WHETHER an ingestion run happens at all — identifiers
// already listed never trigger one again.
//
// Reference: Rust Book §13 (Iterators and Closures)

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;

use crate::application::config::PipelineConfig;
use crate::data::merger;
use crate::data::source::{has_new_sources, SourceDir};
use crate::domain::dataset::CanonicalDataset;
use crate::domain::manifest::IngestedFileManifest;
use crate::infra::ingestion_store::IngestionStore;

/// What CheckingSources found.
pub struct SourceCheck {
    /// Every CSV file currently in the drop directory
    pub available: BTreeSet<String>,

    /// The manifest recorded by previous runs
    pub manifest: IngestedFileManifest,

    /// Files present but not yet in the manifest
    pub new_files: Vec<String>,
}

/// The result of one ingestion attempt.
pub enum IngestOutcome {
    /// Nothing new in the drop directory — no-op, no mutation
    UpToDate,

    /// A fresh canonical dataset was merged and persisted
    Merged {
        dataset:   CanonicalDataset,
        manifest:  IngestedFileManifest,
        new_files: Vec<String>,
    },
}

/// Owns the config and runs the ingestion workflow.
pub struct IngestUseCase {
    config: PipelineConfig,
}

impl IngestUseCase {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// List available sources and diff them against the manifest.
    /// Read-only — fails with SourceUnavailable if the drop
    /// directory is missing.
    pub fn check_sources(&self) -> Result<SourceCheck> {
        let source = SourceDir::new(&self.config.source_dir);
        let store  = IngestionStore::new(&self.config.ingest_dir);

        let available = source.list_available()?;
        let manifest  = store.read_manifest()?;

        let new_files: Vec<String> = manifest
            .missing_from(&available)
            .into_iter()
            .cloned()
            .collect();

        tracing::info!(
            "{} source files available, {} new",
            available.len(),
            new_files.len()
        );

        Ok(SourceCheck { available, manifest, new_files })
    }

    /// Merge every available file into a fresh canonical dataset
    /// and persist it together with the extended manifest.
    pub fn merge_and_persist(
        &self,
        check: &SourceCheck,
    ) -> Result<(CanonicalDataset, IngestedFileManifest)> {
        let source = SourceDir::new(&self.config.source_dir);
        let store  = IngestionStore::new(&self.config.ingest_dir);

        let paths: Vec<PathBuf> = check
            .available
            .iter()
            .map(|name| source.file_path(name))
            .collect();

        let dataset = merger::merge(&paths)?;

        // Append-only: the new manifest is a superset of the old
        let mut manifest = check.manifest.clone();
        manifest.extend(check.available.iter().cloned());

        store.persist(&dataset, &manifest)?;

        Ok((dataset, manifest))
    }

    /// The full ingestion workflow: check, then merge if needed.
    pub fn execute(&self) -> Result<IngestOutcome> {
        let check = self.check_sources()?;

        if !has_new_sources(&check.available, &check.manifest) {
            tracing::info!("No new source files — ingestion is a no-op");
            return Ok(IngestOutcome::UpToDate);
        }

        let new_files = check.new_files.clone();
        let (dataset, manifest) = self.merge_and_persist(&check)?;

        Ok(IngestOutcome::Merged { dataset, manifest, new_files })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    const HEADER: &str =
        "corporation,lastmonth_activity,lastyear_activity,number_of_employees,exited\n";

    fn write_source(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), format!("{HEADER}{body}")).unwrap();
    }

    fn config(root: &Path) -> PipelineConfig {
        PipelineConfig {
            source_dir: root.join("sourcedata").to_string_lossy().into_owned(),
            ingest_dir: root.join("ingesteddata").to_string_lossy().into_owned(),
            ..PipelineConfig::default()
        }
    }

    fn setup(root: &Path) -> PipelineConfig {
        fs::create_dir_all(root.join("sourcedata")).unwrap();
        config(root)
    }

    #[test]
    fn test_first_ingestion_merges_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = setup(tmp.path());
        write_source(&tmp.path().join("sourcedata"), "f1.csv", "acme,10,120,50,1\n");
        write_source(&tmp.path().join("sourcedata"), "f2.csv", "zeta,3,40,12,0\n");

        let outcome = IngestUseCase::new(cfg.clone()).execute().unwrap();
        match outcome {
            IngestOutcome::Merged { dataset, manifest, new_files } => {
                assert_eq!(dataset.len(), 2);
                assert_eq!(manifest.to_text(), "f1.csv,f2.csv");
                assert_eq!(new_files, vec!["f1.csv", "f2.csv"]);
            }
            IngestOutcome::UpToDate => panic!("expected a merge"),
        }

        // Durable state landed
        let store = IngestionStore::new(&cfg.ingest_dir);
        assert_eq!(store.load_dataset().unwrap().len(), 2);
    }

    #[test]
    fn test_second_run_with_no_new_files_is_a_noop() {
        // Idempotence: no new files between runs → no change
        let tmp = tempfile::tempdir().unwrap();
        let cfg = setup(tmp.path());
        write_source(&tmp.path().join("sourcedata"), "f1.csv", "acme,10,120,50,1\n");

        let uc = IngestUseCase::new(cfg.clone());
        uc.execute().unwrap();

        let store      = IngestionStore::new(&cfg.ingest_dir);
        let before_csv = fs::read_to_string(store.dataset_path()).unwrap();
        let before_man = fs::read_to_string(store.manifest_path()).unwrap();

        assert!(matches!(uc.execute().unwrap(), IngestOutcome::UpToDate));

        assert_eq!(fs::read_to_string(store.dataset_path()).unwrap(), before_csv);
        assert_eq!(fs::read_to_string(store.manifest_path()).unwrap(), before_man);
    }

    #[test]
    fn test_new_file_extends_manifest_and_dataset() {
        // Scenario A: manifest = {f1.csv}, then f2.csv arrives
        let tmp = tempfile::tempdir().unwrap();
        let cfg = setup(tmp.path());
        let src = tmp.path().join("sourcedata");
        write_source(&src, "f1.csv", "acme,10,120,50,1\n");

        let uc = IngestUseCase::new(cfg);
        uc.execute().unwrap();

        write_source(&src, "f2.csv", "acme,10,120,50,1\nomni,7,90,33,1\n");

        let check = uc.check_sources().unwrap();
        assert_eq!(check.new_files, vec!["f2.csv"]);
        assert!(has_new_sources(&check.available, &check.manifest));

        match uc.execute().unwrap() {
            IngestOutcome::Merged { dataset, manifest, .. } => {
                // acme row deduplicates across f1 and f2
                assert_eq!(dataset.len(), 2);
                assert_eq!(manifest.to_text(), "f1.csv,f2.csv");
            }
            IngestOutcome::UpToDate => panic!("expected a merge"),
        }
    }

    #[test]
    fn test_missing_source_dir_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        // config points at a sourcedata dir that was never created
        let cfg = config(tmp.path());
        assert!(IngestUseCase::new(cfg).execute().is_err());
    }
}
