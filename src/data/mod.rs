// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw CSV files in the
// source drop directory up to an in-memory CanonicalDataset.
//
// The pipeline flows in this order:
//
//   sourcedata/*.csv
//       │
//       ▼
//   SourceDir         → lists files, detects unseen ones
//       │
//       ▼
//   CsvLoader         → reads one file, validates the schema
//       │
//       ▼
//   merger            → concatenates files, drops duplicates
//       │
//       ▼
//   CanonicalDataset  → single input to scoring and training
//
// Each module is responsible for exactly one step.
// This makes each step independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Read-only listing of the raw data drop directory
pub mod source;

/// Single-file CSV reading with schema validation
pub mod loader;

/// Multi-file merge and full-row deduplication
pub mod merger;
