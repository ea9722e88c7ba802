// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all durable state and cross-cutting concerns that
// don't belong in any specific business layer:
//
//   atomic.rs           — Write-temp-then-rename file writes.
//                         The single durable-put primitive both
//                         stores are built on.
//
//   ingestion_store.rs  — The canonical dataset + manifest pair
//                         (finaldata.csv, ingestedfiles.txt),
//                         persisted together or not at all.
//
//   production_store.rs — The production slot: model artifact,
//                         recorded score, manifest copy. Owns
//                         the atomic-promotion invariant.
//
//   run_lock.rs         — Lock-file mutual exclusion between
//                         orchestrator runs.
//
//   reporter.rs         — Confusion-matrix report written after
//                         a promotion (non-fatal collaborator).
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here:
//   - Prevents duplication across layers
//   - Makes it easy to swap implementations
//     (e.g. swap file stores for an object store)
//   - Keeps other layers focused on their core logic
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Atomic write-temp-then-rename primitives
pub mod atomic;

/// Canonical dataset + manifest persistence
pub mod ingestion_store;

/// The production model slot with atomic promotion
pub mod production_store;

/// Lock-file mutual exclusion for pipeline runs
pub mod run_lock;

/// Post-promotion confusion matrix report
pub mod reporter;
