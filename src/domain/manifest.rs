// ============================================================
// Layer 3 — Ingested File Manifest
// ============================================================
// The durable record of which source files have already been
// merged into the canonical dataset.
//
// Rules:
//   - Append-only: identifiers are added, never removed.
//     A file listed here is never re-merged.
//   - Durable form is a human-readable comma-joined list,
//     e.g. "dataset1.csv,dataset2.csv"
//   - Created empty on the very first run (no file on disk yet).
//
// A BTreeSet keeps the identifiers ordered, so the durable form
// is stable across runs and diffs cleanly.
//
// Reference: Rust Book §8 (Collections)

use std::collections::BTreeSet;

/// The set of source-file identifiers already merged into the
/// canonical dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestedFileManifest {
    ids: BTreeSet<String>,
}

impl IngestedFileManifest {
    /// The empty manifest — the state before any ingestion.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the durable comma-joined form. Whitespace around
    /// identifiers and empty segments are tolerated so a
    /// hand-edited file still loads.
    pub fn parse(text: &str) -> Self {
        let ids = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    /// Render the durable comma-joined form.
    pub fn to_text(&self) -> String {
        self.ids.iter().cloned().collect::<Vec<_>>().join(",")
    }

    /// Has this file already been merged?
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// The identifiers in `available` that are NOT yet in the
    /// manifest — the files a new ingestion run must merge.
    pub fn missing_from<'a>(&self, available: &'a BTreeSet<String>) -> Vec<&'a String> {
        available.iter().filter(|id| !self.ids.contains(*id)).collect()
    }

    /// Extend with newly merged identifiers. Append-only: the
    /// result is always a superset of the previous manifest.
    pub fn extend(&mut self, new_ids: impl IntoIterator<Item = String>) {
        self.ids.extend(new_ids);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate identifiers in their stable (sorted) order.
    pub fn ids(&self) -> impl Iterator<Item = &String> {
        self.ids.iter()
    }
}
