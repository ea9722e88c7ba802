// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (a full pipeline run, an ingestion, a
// bootstrap training, a scoring check).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file format knowledge (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The explicit configuration value every use case receives
pub mod config;

// Source checking + merge + persist
pub mod ingest_use_case;

// The drift-triggered retraining orchestrator (state machine)
pub mod run_use_case;

// Bootstrap: train and fill an empty production slot
pub mod train_use_case;

// Read-only scoring of the deployed model
pub mod score_use_case;
