// ============================================================
// Layer 6 — Confusion Matrix Reporter
// ============================================================
// The reporting collaborator the orchestrator notifies after a
// promotion. It evaluates the freshly promoted model against
// the canonical dataset and writes a 2×2 confusion matrix as a
// small CSV-shaped text file next to the production slot.
//
// Output file: confusion_matrix.txt
//
// Example:
//   ,actual_0,actual_1
//   predicted_0,41,3
//   predicted_1,2,54
//
// The orchestrator treats this component as fire-and-forget:
// a reporter error is logged and swallowed, never fatal to the
// run — the promotion has already happened and must stand.

use std::path::PathBuf;

use anyhow::Result;

use crate::domain::dataset::CanonicalDataset;
use crate::domain::traits::{BinaryClassifier, DriftReporter};
use crate::infra::atomic;

/// Writes a text confusion matrix for the deployed model.
pub struct ConfusionMatrixReporter {
    dir: PathBuf,
}

impl ConfusionMatrixReporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join("confusion_matrix.txt")
    }
}

impl DriftReporter for ConfusionMatrixReporter {
    fn report(
        &self,
        model:   &dyn BinaryClassifier,
        dataset: &CanonicalDataset,
    ) -> Result<()> {
        let preds  = model.predict_all(&dataset.features());
        let labels = dataset.labels();

        // cells[predicted][actual]. Labels are validated binary at
        // load time; clamp anyway — this collaborator must never
        // panic after a promotion
        let mut cells = [[0usize; 2]; 2];
        for (&p, &y) in preds.iter().zip(labels.iter()) {
            cells[p.min(1) as usize][y.min(1) as usize] += 1;
        }

        let text = format!(
            ",actual_0,actual_1\n\
             predicted_0,{},{}\n\
             predicted_1,{},{}\n",
            cells[0][0], cells[0][1], cells[1][0], cells[1][1],
        );

        let path = self.report_path();
        atomic::write_atomic(&path, text.as_bytes())?;

        tracing::info!("Wrote confusion matrix report to '{}'", path.display());
        Ok(())
    }
}
