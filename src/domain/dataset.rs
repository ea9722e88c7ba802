// ============================================================
// Layer 3 — Canonical Dataset
// ============================================================
// The deduplicated union of every ingested source file.
//
// Two rules govern this type:
//   1. Exact-duplicate rows (equal across all columns) collapse
//      to one. Construction enforces this, so a CanonicalDataset
//      can never hold duplicates.
//   2. Row order is NOT part of the contract. Consumers get the
//      same row *set* no matter which order the source files
//      were read in, and must not depend on the order.
//
// The dataset is rebuilt from scratch on every ingestion run
// that finds new files — it is never patched incrementally.
//
// Reference: Rust Book §8 (Collections)

use std::collections::HashSet;

use crate::domain::record::{Record, FEATURE_COLUMNS};

/// The deduplicated union of all ingested rows — the single
/// input to both scoring and training.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDataset {
    rows: Vec<Record>,
}

impl CanonicalDataset {
    /// Build a dataset from raw rows, collapsing exact duplicates.
    /// First occurrence wins; later copies are discarded.
    pub fn from_rows(rows: Vec<Record>) -> Self {
        let mut seen   = HashSet::new();
        let mut unique = Vec::new();

        for row in rows {
            // HashSet::insert returns false when the row was
            // already present — that is the duplicate case
            if seen.insert(row.clone()) {
                unique.push(row);
            }
        }

        Self { rows: unique }
    }

    /// All rows of the dataset. Order carries no meaning.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of (unique) rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The feature matrix: one f64 vector per row, identifier
    /// and label columns already dropped.
    pub fn features(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(Record::features).collect()
    }

    /// The label vector, aligned with `features()`.
    pub fn labels(&self) -> Vec<u8> {
        self.rows.iter().map(Record::label).collect()
    }

    /// Names of the feature columns this dataset exposes.
    /// Compared against the model's expected columns before
    /// scoring — a mismatch there is an IncompatibleSchema error.
    pub fn feature_columns(&self) -> Vec<String> {
        FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn row(corp: &str, a: i64) -> Record {
        Record {
            corporation:         corp.to_string(),
            lastmonth_activity:  a,
            lastyear_activity:   a * 10,
            number_of_employees: 5,
            exited:              0,
        }
    }

    #[test]
    fn test_exact_duplicates_collapse() {
        let ds = CanonicalDataset::from_rows(vec![
            row("acme", 1),
            row("acme", 1),
            row("zeta", 2),
        ]);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_same_set_regardless_of_order() {
        let forward  = CanonicalDataset::from_rows(vec![row("a", 1), row("b", 2)]);
        let backward = CanonicalDataset::from_rows(vec![row("b", 2), row("a", 1)]);

        let mut fwd: Vec<_> = forward.rows().to_vec();
        let mut bwd: Vec<_> = backward.rows().to_vec();
        fwd.sort_by(|l, r| l.corporation.cmp(&r.corporation));
        bwd.sort_by(|l, r| l.corporation.cmp(&r.corporation));
        assert_eq!(fwd, bwd);
    }

    #[test]
    fn test_features_and_labels_align() {
        let ds = CanonicalDataset::from_rows(vec![row("a", 3), row("b", 7)]);
        assert_eq!(ds.features().len(), ds.labels().len());
        assert_eq!(ds.features()[0], vec![3.0, 30.0, 5.0]);
    }
}
