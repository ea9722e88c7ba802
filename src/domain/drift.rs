// ============================================================
// Layer 3 — Drift Decision Engine
// ============================================================
// Decides whether the production model has drifted, given:
//   - the score it just achieved on fresh data
//   - the score recorded for it when it was promoted
//
// Policy:
//   Drift    ⇔  new_score <  recorded_score
//   NoDrift  ⇔  new_score >= recorded_score
//
// Equal scores count as NoDrift: a no-op run is preferred over
// paying for an unnecessary retrain.
//
// Both scores must come from the SAME metric definition —
// comparing an F1 against, say, an accuracy is a caller error
// this function cannot detect.

/// The outcome of one drift check. Produced fresh on every run
/// and never persisted — it is a decision, not state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftVerdict {
    /// Fresh-data performance held up; end the run without mutation
    NoDrift,

    /// Performance dropped below the recorded baseline; retrain
    Drift,
}

/// Compare a freshly computed score against the recorded one.
pub fn decide(new_score: f64, recorded_score: f64) -> DriftVerdict {
    if new_score < recorded_score {
        DriftVerdict::Drift
    } else {
        DriftVerdict::NoDrift
    }
}
