//! Case reports
//!
//! Every shipped context produces a [`CaseReport`] tree mirroring the
//! sub-cases it ran.

use std::fmt;
use std::time::Duration;

/// Final state of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl Outcome {
    /// Derive the outcome from the two reporter flags; failure wins over skip
    pub fn from_flags(failed: bool, skipped: bool) -> Self {
        match (failed, skipped) {
            (true, _) => Outcome::Failed,
            (false, true) => Outcome::Skipped,
            (false, false) => Outcome::Passed,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Passed => write!(f, "PASS"),
            Outcome::Failed => write!(f, "FAIL"),
            Outcome::Skipped => write!(f, "SKIP"),
        }
    }
}

/// Result of one case and its sub-cases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// Full `/`-separated case name
    pub name: String,
    pub outcome: Outcome,
    /// Iterations the body was asked to perform, 1 for tests
    pub iterations: u64,
    /// Measured time, only set by benchmark contexts
    pub elapsed: Option<Duration>,
    pub logs: Vec<String>,
    pub children: Vec<CaseReport>,
}

impl CaseReport {
    /// Whether the case did not fail (skipped cases count as passed)
    pub fn passed(&self) -> bool {
        self.outcome != Outcome::Failed
    }

    /// Full names of the failing leaves below this case
    ///
    /// A failed case without failed children reports itself.
    pub fn failures(&self) -> Vec<String> {
        if self.outcome != Outcome::Failed {
            return Vec::new();
        }

        let nested: Vec<String> = self
            .children
            .iter()
            .flat_map(CaseReport::failures)
            .collect();

        if nested.is_empty() {
            vec![self.name.clone()]
        } else {
            nested
        }
    }

    /// Find a direct or nested child by full name
    pub fn find(&self, name: &str) -> Option<&CaseReport> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Mean time per iteration in nanoseconds
    pub fn ns_per_iter(&self) -> Option<f64> {
        self.elapsed
            .map(|elapsed| elapsed.as_nanos() as f64 / self.iterations.max(1) as f64)
    }
}
