//! Per-rule evaluation results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::status::Status;

/// Result of evaluating one rule against one dataset.
///
/// The status is always derived from the violation count (or the rule's
/// own threshold comparison), never set independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResult {
    /// The rule's human-facing name.
    pub name: String,
    /// Rule kind identifier.
    #[serde(rename = "type")]
    pub kind: String,
    pub status: Status,
    /// Number of violating rows (or aggregate deficit).
    pub n_violations: usize,
    /// `n_violations / row_count`, 0.0 on an empty dataset.
    pub fraction_violations: f64,
    /// Parameters the rule was evaluated with, for audit and reports.
    pub details: Map<String, Value>,
    /// Indices of violating rows, so reports can sample any rule kind.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub violation_rows: Vec<usize>,
}

impl RuleResult {
    /// Result for a per-row rule: fails when any row violates.
    pub fn per_row(
        name: &str,
        kind: &str,
        violations: Vec<usize>,
        row_count: usize,
        details: Map<String, Value>,
    ) -> Self {
        let failed = !violations.is_empty();
        Self::with_status(name, kind, violations, row_count, failed, details)
    }

    /// Result for an aggregate rule whose verdict comes from its own
    /// threshold comparison rather than "any violation".
    pub fn with_status(
        name: &str,
        kind: &str,
        violations: Vec<usize>,
        row_count: usize,
        failed: bool,
        details: Map<String, Value>,
    ) -> Self {
        let n_violations = violations.len();
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            status: Status::from_failed(failed),
            n_violations,
            fraction_violations: fraction(n_violations, row_count),
            details,
            violation_rows: violations,
        }
    }
}

/// Violation fraction, defined as 0.0 when the dataset is empty.
pub(crate) fn fraction(n: usize, row_count: usize) -> f64 {
    if row_count == 0 {
        0.0
    } else {
        n as f64 / row_count as f64
    }
}
