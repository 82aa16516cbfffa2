//! Execution context interfaces
//!
//! These traits describe what a test-running framework hands to a case body.
//! [`Reporter`] is the capability shared by both modes, while [`TestContext`]
//! and [`BenchContext`] add the mode-specific parts. The unified handle in
//! [`crate::tb`] is written purely against these traits.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Closure registered through [`Reporter::cleanup`]
pub type Cleanup = Box<dyn FnOnce()>;

/// Unwind payload used to leave a case body early
///
/// [`Reporter::fail_now`] and [`Reporter::skip_now`] unwind with this value.
/// The context that spawned the body catches it and records the outcome
/// instead of treating it as a crash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Abort {
    /// The body called `fail_now` or `fatal`
    Failed,
    /// The body called `skip_now` or `skip`
    Skipped,
}

/// Base reporting capability of every execution context
pub trait Reporter {
    /// Full name of the running case, `/`-separated for sub-cases
    fn name(&self) -> &str;

    /// Record a log line for this case
    fn log(&mut self, message: &str);

    /// Mark the case failed but keep running
    fn fail(&mut self);

    /// Whether the case has been marked failed
    fn failed(&self) -> bool;

    /// Mark the case skipped and leave the body
    fn skip_now(&mut self) -> !;

    /// Whether the case has been marked skipped
    fn skipped(&self) -> bool;

    /// Register a closure to run when the case finishes
    ///
    /// Cleanups run in reverse registration order.
    fn cleanup(&mut self, cleanup: Cleanup);

    /// Log `message` and mark the case failed
    fn error(&mut self, message: &str) {
        self.log(message);
        self.fail();
    }

    /// Mark the case failed and leave the body
    fn fail_now(&mut self) -> ! {
        self.fail();
        panic::panic_any(Abort::Failed)
    }

    /// Log `message`, mark the case failed and leave the body
    fn fatal(&mut self, message: &str) -> ! {
        self.error(message);
        self.fail_now()
    }

    /// Log `reason` and skip the rest of the case
    fn skip(&mut self, reason: &str) -> ! {
        self.log(reason);
        self.skip_now()
    }
}

/// Context of a correctness test run
pub trait TestContext: Reporter {
    /// Run `body` as a named sub-test and report whether it passed
    fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn TestContext)) -> bool;
}

/// Context of a benchmark run
pub trait BenchContext: Reporter {
    /// Run `body` as a named sub-benchmark and report whether it passed
    fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn BenchContext)) -> bool;

    /// Number of iterations the body is expected to perform
    fn iterations(&self) -> u64;

    /// Zero the elapsed time so preceding setup is not measured
    fn reset_timer(&mut self);
}

/// How a guarded body left
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Exit {
    /// Body returned normally
    Returned,
    /// Body unwound with [`Abort`]
    Aborted(Abort),
    /// Body panicked with anything else, usually a failed assertion
    Panicked(String),
}

/// Run `body`, converting any unwind into an [`Exit`]
pub(crate) fn guard<F: FnOnce()>(body: F) -> Exit {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(()) => Exit::Returned,
        Err(payload) => classify(payload),
    }
}

fn classify(payload: Box<dyn Any + Send>) -> Exit {
    if let Some(abort) = payload.downcast_ref::<Abort>() {
        return Exit::Aborted(*abort);
    }

    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_owned());

    Exit::Panicked(message)
}
