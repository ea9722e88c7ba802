// ============================================================
// Layer 6 — Production Store
// ============================================================
// The production slot: the single currently-deployed model and
// the metadata that belongs to it.
//
// Files in the production directory:
//   trainedmodel.json  ← the serialized LogisticModel artifact
//   latestscore.txt    ← its recorded score, textual form
//                        "f1_score = <float>"
//   ingestedfiles.txt  ← copy of the manifest the model was
//                        trained against
//
// Central invariant: the artifact and its recorded score are
// NEVER updated individually. promote() stages all three files
// first and only commits once every stage succeeded, so a
// failure mid-promotion leaves the previous artifact/score pair
// fully intact. The drift comparison depends on this — scoring
// a new dataset against model A while reading the score recorded
// for model B would make every verdict meaningless.
//
// Reference: Rust Book §9 (Error Handling)

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::domain::error::PipelineError;
use crate::domain::manifest::IngestedFileManifest;
use crate::infra::atomic;
use crate::ml::model::LogisticModel;

/// The prefix of the durable score record.
const SCORE_PREFIX: &str = "f1_score =";

/// Versioned holder of the production {model, score, manifest}.
pub struct ProductionStore {
    dir: PathBuf,
}

impl ProductionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join("trainedmodel.json")
    }

    pub fn score_path(&self) -> PathBuf {
        self.dir.join("latestscore.txt")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.join("ingestedfiles.txt")
    }

    /// Is any model deployed at all? False is the bootstrap case.
    pub fn has_production(&self) -> bool {
        self.model_path().exists() && self.score_path().exists()
    }

    /// Load the deployed model artifact.
    pub fn get_production(&self) -> Result<LogisticModel> {
        if !self.has_production() {
            return Err(PipelineError::NoProductionModel(self.dir.clone()).into());
        }

        let path = self.model_path();
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read model artifact '{}'", path.display()))?;
        let model: LogisticModel = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt model artifact '{}'", path.display()))?;

        // The file is human-readable JSON and can be hand-edited;
        // mismatched vector lengths must fail here with a
        // diagnostic, not panic at the first prediction
        if !model.is_consistent() {
            bail!(
                "Corrupt model artifact '{}': {} feature columns but \
                 {} weights, {} means, {} stds",
                path.display(),
                model.feature_columns.len(),
                model.weights.len(),
                model.means.len(),
                model.stds.len(),
            );
        }

        Ok(model)
    }

    /// The score recorded alongside the deployed model.
    pub fn get_recorded_score(&self) -> Result<f64> {
        if !self.has_production() {
            return Err(PipelineError::NoProductionModel(self.dir.clone()).into());
        }

        let path = self.score_path();
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read recorded score '{}'", path.display()))?;

        let value = text
            .trim()
            .strip_prefix(SCORE_PREFIX)
            .with_context(|| {
                format!(
                    "Recorded score '{}' is not in the form '{} <float>'",
                    path.display(),
                    SCORE_PREFIX
                )
            })?
            .trim();

        value
            .parse::<f64>()
            .with_context(|| format!("Cannot parse recorded score value '{value}'"))
    }

    /// The manifest copy recorded at the last promotion.
    pub fn get_recorded_manifest(&self) -> Result<IngestedFileManifest> {
        let path = self.manifest_path();
        if !path.exists() {
            return Ok(IngestedFileManifest::empty());
        }
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read manifest copy '{}'", path.display()))?;
        Ok(IngestedFileManifest::parse(&text))
    }

    /// Atomically replace the production slot: artifact, score,
    /// and manifest copy move together.
    pub fn promote(
        &self,
        model:    &LogisticModel,
        score:    f64,
        manifest: &IngestedFileManifest,
    ) -> Result<()> {
        let model_json = serde_json::to_string_pretty(model)
            .context("Cannot serialize model artifact")?;
        let score_text = format!("{SCORE_PREFIX} {score}");

        // Stage everything before committing anything — an error
        // in any stage leaves the previous slot untouched
        let staged_model    = atomic::stage(&self.model_path(), model_json.as_bytes())?;
        let staged_score    = atomic::stage(&self.score_path(), score_text.as_bytes())?;
        let staged_manifest =
            atomic::stage(&self.manifest_path(), manifest.to_text().as_bytes())?;

        staged_model.commit()?;
        staged_score.commit()?;
        staged_manifest.commit()?;

        tracing::info!(
            "Promoted new model to '{}' (recorded score {:.6})",
            self.dir.display(),
            score,
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn model(weights: Vec<f64>) -> LogisticModel {
        LogisticModel {
            weights,
            bias:  0.5,
            means: vec![0.0, 0.0, 0.0],
            stds:  vec![1.0, 1.0, 1.0],
            feature_columns: vec![
                "lastmonth_activity".to_string(),
                "lastyear_activity".to_string(),
                "number_of_employees".to_string(),
            ],
        }
    }

    #[test]
    fn test_empty_slot_is_no_production_model() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = ProductionStore::new(tmp.path().join("prod"));

        let err = store.get_production().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::NoProductionModel(_))
        ));
        assert!(store.get_recorded_score().is_err());
    }

    #[test]
    fn test_promotion_installs_artifact_and_score_together() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = ProductionStore::new(tmp.path());
        let m     = model(vec![1.0, 2.0, 3.0]);

        store.promote(&m, 0.9, &IngestedFileManifest::parse("f1.csv")).unwrap();

        // After promote(A, s): production == A and recorded == s,
        // always together
        assert_eq!(store.get_production().unwrap().weights, vec![1.0, 2.0, 3.0]);
        assert_eq!(store.get_recorded_score().unwrap(), 0.9);
        assert_eq!(
            store.get_recorded_manifest().unwrap(),
            IngestedFileManifest::parse("f1.csv")
        );
    }

    #[test]
    fn test_repromotion_replaces_the_whole_slot() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = ProductionStore::new(tmp.path());

        store
            .promote(&model(vec![1.0, 1.0, 1.0]), 0.8, &IngestedFileManifest::empty())
            .unwrap();
        store
            .promote(&model(vec![2.0, 2.0, 2.0]), 0.7, &IngestedFileManifest::parse("f2.csv"))
            .unwrap();

        assert_eq!(store.get_production().unwrap().weights, vec![2.0, 2.0, 2.0]);
        assert_eq!(store.get_recorded_score().unwrap(), 0.7);
    }

    #[test]
    fn test_truncated_artifact_is_rejected_with_diagnostic() {
        // A hand-edited artifact with a dropped weight must fail
        // the load, not panic later inside decision()
        let tmp   = tempfile::tempdir().unwrap();
        let store = ProductionStore::new(tmp.path());

        let mut broken = model(vec![1.0, 2.0, 3.0]);
        broken.weights.pop();
        fs::create_dir_all(tmp.path()).unwrap();
        fs::write(store.model_path(), serde_json::to_string(&broken).unwrap()).unwrap();
        fs::write(store.score_path(), "f1_score = 0.5").unwrap();

        let err = store.get_production().unwrap_err();
        assert!(err.to_string().contains("Corrupt model artifact"));
    }

    #[test]
    fn test_score_durable_form_is_f1_score_equals() {
        let tmp   = tempfile::tempdir().unwrap();
        let store = ProductionStore::new(tmp.path());

        store
            .promote(&model(vec![0.0; 3]), 0.5714285714285714, &IngestedFileManifest::empty())
            .unwrap();

        let text = fs::read_to_string(store.score_path()).unwrap();
        assert!(text.starts_with("f1_score = "));
        assert_eq!(store.get_recorded_score().unwrap(), 0.5714285714285714);
    }

    #[test]
    fn test_hand_written_score_file_parses() {
        // The file is human-readable and occasionally hand-edited
        let tmp   = tempfile::tempdir().unwrap();
        let store = ProductionStore::new(tmp.path());
        store.promote(&model(vec![0.0; 3]), 0.0, &IngestedFileManifest::empty()).unwrap();

        fs::write(store.score_path(), "f1_score =   0.25\n").unwrap();
        assert_eq!(store.get_recorded_score().unwrap(), 0.25);
    }
}
