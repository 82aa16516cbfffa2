//! Per-case bookkeeping shared by the shipped contexts

use std::time::Duration;

use crate::context::{guard, Abort, Cleanup, Exit};
use crate::names::SubNames;
use crate::report::{CaseReport, Outcome};

/// State of one running case
pub(crate) struct CaseState {
    name: String,
    failed: bool,
    skipped: bool,
    logs: Vec<String>,
    cleanups: Vec<Cleanup>,
    children: Vec<CaseReport>,
    sub_names: SubNames,
}

impl CaseState {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failed: false,
            skipped: false,
            logs: Vec::new(),
            cleanups: Vec::new(),
            children: Vec::new(),
            sub_names: SubNames::default(),
        }
    }

    /// Full name for the next sub-case called `name`
    ///
    /// Repeated names under this case are numbered, so every call hands out
    /// a distinct name.
    pub(crate) fn child_name(&mut self, name: &str) -> String {
        format!("{}/{}", self.name, self.sub_names.unique(name))
    }

    /// State for a sub-case of this case
    pub(crate) fn child(&mut self, name: &str) -> Self {
        Self::new(self.child_name(name))
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn log(&mut self, message: &str) {
        tracing::info!(case = %self.name, "{message}");
        self.logs.push(message.to_owned());
    }

    pub(crate) fn fail(&mut self) {
        self.failed = true;
    }

    pub(crate) fn failed(&self) -> bool {
        self.failed
    }

    pub(crate) fn mark_skipped(&mut self) {
        self.skipped = true;
    }

    pub(crate) fn skipped(&self) -> bool {
        self.skipped
    }

    pub(crate) fn push_cleanup(&mut self, cleanup: Cleanup) {
        self.cleanups.push(cleanup);
    }

    /// Record how a guarded body left
    pub(crate) fn absorb(&mut self, exit: Exit) {
        match exit {
            Exit::Returned => {}
            Exit::Aborted(Abort::Failed) => self.failed = true,
            Exit::Aborted(Abort::Skipped) => self.skipped = true,
            Exit::Panicked(message) => {
                tracing::error!(case = %self.name, panic = %message, "case panicked");
                self.logs.push(format!("panicked: {message}"));
                self.failed = true;
            }
        }
    }

    /// Run registered cleanups, last registered first
    pub(crate) fn run_cleanups(&mut self) {
        while let Some(cleanup) = self.cleanups.pop() {
            if let Exit::Panicked(message) = guard(cleanup) {
                tracing::error!(case = %self.name, panic = %message, "cleanup panicked");
                self.logs.push(format!("cleanup panicked: {message}"));
                self.failed = true;
            }
        }
    }

    /// Attach a finished sub-case, propagating its failure
    pub(crate) fn adopt(&mut self, child: CaseReport) {
        if child.outcome == Outcome::Failed {
            self.failed = true;
        }
        self.children.push(child);
    }

    /// Report for a sub-case that was never started
    pub(crate) fn not_run(full_name: String, iterations: u64, reason: &str) -> CaseReport {
        CaseReport {
            name: full_name,
            outcome: Outcome::Skipped,
            iterations,
            elapsed: None,
            logs: vec![reason.to_owned()],
            children: Vec::new(),
        }
    }

    /// Run cleanups and turn the state into a report
    pub(crate) fn finish(mut self, iterations: u64, elapsed: Option<Duration>) -> CaseReport {
        self.run_cleanups();

        let outcome = Outcome::from_flags(self.failed, self.skipped);
        match outcome {
            Outcome::Passed => tracing::debug!(case = %self.name, "--- PASS"),
            Outcome::Skipped => tracing::warn!(case = %self.name, "--- SKIP"),
            Outcome::Failed => tracing::error!(case = %self.name, "--- FAIL"),
        }

        CaseReport {
            name: std::mem::take(&mut self.name),
            outcome,
            iterations,
            elapsed,
            logs: std::mem::take(&mut self.logs),
            children: std::mem::take(&mut self.children),
        }
    }
}

impl Drop for CaseState {
    fn drop(&mut self) {
        self.run_cleanups();
    }
}
