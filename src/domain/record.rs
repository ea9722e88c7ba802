// ============================================================
// Layer 3 — Raw Record Domain Type
// ============================================================
// One row of the fixed tabular schema shared by every source
// file and by the canonical dataset.
//
// The schema is:
//   corporation          — identifier, dropped before training
//   lastmonth_activity   — feature
//   lastyear_activity    — feature
//   number_of_employees  — feature
//   exited               — binary label (0 = stayed, 1 = left)
//
// All columns are integers except the identifier, so the whole
// row derives Eq + Hash and two rows are duplicates exactly when
// every column matches. That full-row equality is what ingestion
// deduplicates on.
//
// Reference: Rust Book §5 (Structs), §10 (Derive Macros)

use serde::{Deserialize, Serialize};

/// The identifier column — carried through ingestion for
/// traceability, dropped before any training or scoring.
pub const ID_COLUMN: &str = "corporation";

/// The feature columns, in schema order.
pub const FEATURE_COLUMNS: [&str; 3] = [
    "lastmonth_activity",
    "lastyear_activity",
    "number_of_employees",
];

/// The binary label column.
pub const LABEL_COLUMN: &str = "exited";

/// Every column of the schema, in the order they appear in the
/// CSV header. A source file whose header differs from this is
/// a format error.
pub const ALL_COLUMNS: [&str; 5] = [
    "corporation",
    "lastmonth_activity",
    "lastyear_activity",
    "number_of_employees",
    "exited",
];

/// One raw row as read from a source CSV file.
/// Field order matters: serde writes the CSV header from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Which client this row describes — never used as a feature
    pub corporation: String,

    /// Activity count over the last month
    pub lastmonth_activity: i64,

    /// Activity count over the last year
    pub lastyear_activity: i64,

    /// Headcount at the client
    pub number_of_employees: i64,

    /// 1 if the client left, 0 if it stayed
    pub exited: u8,
}

impl Record {
    /// The feature vector for this row — the identifier and the
    /// label are dropped, everything else is cast to f64 for the
    /// classifier.
    pub fn features(&self) -> Vec<f64> {
        vec![
            self.lastmonth_activity as f64,
            self.lastyear_activity as f64,
            self.number_of_employees as f64,
        ]
    }

    /// The true label for this row.
    pub fn label(&self) -> u8 {
        self.exited
    }
}
