//! In-process test context
//!
//! [`TestRun`] drives a case body from inside a plain `#[test]` function.
//! Sub-tests run synchronously, assertion panics inside a sub-test fail that
//! sub-test only, and [`TestRun::finish`] turns the whole tree into a
//! [`Result`] so the surrounding `#[test]` fails when any case did.
//!
//! ```rust
//! use testorbench::{TestRun, Tb};
//!
//! let report = TestRun::execute("arith", |tb: &mut Tb<'_>| {
//!     tb.run("add", |_| assert_eq!(2 + 2, 4));
//!     tb.run("mul", |tb| assert_eq!(tb.iterations(), 1));
//! })?;
//!
//! assert_eq!(report.children.len(), 2);
//! # Ok::<(), testorbench::Error>(())
//! ```

use crate::case::CaseState;
use crate::context::{guard, Abort, Cleanup, Reporter, TestContext};
use crate::error::{Error, Result};
use crate::report::CaseReport;
use crate::tb::Tb;

/// Test context backed by the calling thread
pub struct TestRun {
    state: CaseState,
}

impl TestRun {
    /// Root test context
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: CaseState::new(name),
        }
    }

    /// Run `body` as the root case and finish the run
    pub fn execute<F>(name: &str, body: F) -> Result<CaseReport>
    where
        F: FnOnce(&mut Tb<'_>),
    {
        let mut run = Self::new(name);
        let exit = guard(|| body(&mut Tb::from(&mut run)));
        run.state.absorb(exit);
        run.finish()
    }

    /// Run root cleanups and report the outcome
    pub fn finish(self) -> Result<CaseReport> {
        let report = self.state.finish(1, None);
        if report.passed() {
            Ok(report)
        } else {
            Err(Error::CaseFailed {
                name: report.name.clone(),
                failures: report.failures(),
            })
        }
    }
}

impl Reporter for TestRun {
    fn name(&self) -> &str {
        self.state.name()
    }

    fn log(&mut self, message: &str) {
        self.state.log(message);
    }

    fn fail(&mut self) {
        self.state.fail();
    }

    fn failed(&self) -> bool {
        self.state.failed()
    }

    fn skip_now(&mut self) -> ! {
        self.state.mark_skipped();
        std::panic::panic_any(Abort::Skipped)
    }

    fn skipped(&self) -> bool {
        self.state.skipped()
    }

    fn cleanup(&mut self, cleanup: Cleanup) {
        self.state.push_cleanup(cleanup);
    }
}

impl TestContext for TestRun {
    fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn TestContext)) -> bool {
        let mut child = Self {
            state: self.state.child(name),
        };
        tracing::debug!(case = %child.state.name(), "=== RUN");
        let exit = guard(|| body(&mut child));
        child.state.absorb(exit);

        let report = child.state.finish(1, None);
        let passed = report.passed();
        self.state.adopt(report);
        passed
    }
}
