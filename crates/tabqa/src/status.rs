//! Pass/fail verdict shared by schema and rule results.

use serde::{Deserialize, Serialize};

/// Outcome of a single check (schema validation or one rule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    /// Derive a status from a violation predicate.
    pub fn from_failed(failed: bool) -> Self {
        if failed {
            Status::Fail
        } else {
            Status::Pass
        }
    }

    /// Returns true if this is a failure.
    pub fn is_fail(&self) -> bool {
        matches!(self, Status::Fail)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pass => write!(f, "pass"),
            Status::Fail => write!(f, "fail"),
        }
    }
}
