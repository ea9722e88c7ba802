// ============================================================
// Layer 4 — Ingestion Merger
// ============================================================
// Merges a set of raw CSV files into one deduplicated
// CanonicalDataset.
//
// Guarantees:
//   - Every file is schema-validated before its rows are used;
//     one bad file fails the whole merge (nothing partial).
//   - Exact-duplicate rows collapse to one, both within a file
//     and across files.
//   - The output row SET is the same no matter which order the
//     files are read in. Row order is not guaranteed stable and
//     downstream code must not depend on it.
//
// Persisting the merged result (and the updated manifest) is
// NOT this component's job — see infra/ingestion_store, which
// owns the atomic write of the pair.

use std::path::PathBuf;

use anyhow::Result;

use crate::data::loader::CsvLoader;
use crate::domain::dataset::CanonicalDataset;

/// Merge every file in `sources` into one deduplicated dataset.
pub fn merge(sources: &[PathBuf]) -> Result<CanonicalDataset> {
    let mut all_rows = Vec::new();

    for path in sources {
        let rows = CsvLoader::load(path)?;
        tracing::info!("Merging {} rows from '{}'", rows.len(), path.display());
        all_rows.extend(rows);
    }

    let dataset = CanonicalDataset::from_rows(all_rows);
    tracing::info!("Canonical dataset holds {} unique rows", dataset.len());

    Ok(dataset)
}
