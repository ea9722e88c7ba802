// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// This is the heart of the application — pure Rust structs
// and traits that define the core concepts of the system.
//
// Rules for this layer:
//   - NO file I/O or network calls
//   - NO CSV parsing or model math
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no filesystem needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Think of this layer as the "dictionary" of the system —
// it defines what things ARE, not how they work.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One row of the fixed tabular schema
pub mod record;

// The deduplicated union of all ingested rows
pub mod dataset;

// The append-only record of already-ingested files
pub mod manifest;

// The drift verdict and the decision rule that produces it
pub mod drift;

// Core abstractions (traits) that other layers implement
pub mod traits;

// The typed failure taxonomy
pub mod error;
