//! Unified test handle
//!
//! [`Tb`] lets one body run either as a correctness test or as a benchmark.
//! It wraps exactly one framework context, chosen at construction, and
//! offers the union of both capability sets: benchmark-only capabilities
//! fall back to fixed defaults when the wrapped context is a test.
//!
//! | Capability       | Test context          | Benchmark context          |
//! |------------------|-----------------------|----------------------------|
//! | `run`            | nested test           | nested benchmark           |
//! | `iterations`     | always 1              | configured count           |
//! | `reset_timer`    | no-op                 | resets the timer           |
//! | `is_benchmark`   | false                 | true                       |
//! | [`Reporter`]     | passed through        | passed through             |
//!
//! The set of variants is closed: a handle can only ever be built from one
//! of the two context traits, so there is no "neither" case to guard
//! against at runtime.
//!
//! ```rust
//! use testorbench::{Bench, Reporter, Tb, TestRun};
//!
//! fn checksum_suite(tb: &mut Tb<'_>) {
//!     let input: Vec<u8> = (0..=255).collect();
//!     tb.reset_timer();
//!     for _ in 0..tb.iterations() {
//!         let sum: u32 = input.iter().map(|b| u32::from(*b)).sum();
//!         if sum != 32640 {
//!             tb.error("wrong checksum");
//!         }
//!     }
//! }
//!
//! let mut run = TestRun::new("checksum");
//! Tb::from(&mut run).run("bytes", checksum_suite);
//! run.finish()?;
//!
//! let mut bench = Bench::new("checksum", 1_000);
//! Tb::from(&mut bench).run("bytes", checksum_suite);
//! bench.finish()?;
//! # Ok::<(), testorbench::Error>(())
//! ```

use crate::context::{BenchContext, Cleanup, Reporter, TestContext};

/// Handle over either a test or a benchmark context
pub enum Tb<'a> {
    Test(&'a mut dyn TestContext),
    Bench(&'a mut dyn BenchContext),
}

/// Evaluate `$body` with `$ctx` bound to whichever context is wrapped
macro_rules! with_context {
    ($tb:expr, $ctx:ident => $body:expr) => {
        match $tb {
            Tb::Test($ctx) => $body,
            Tb::Bench($ctx) => $body,
        }
    };
}

impl<'a> Tb<'a> {
    /// Wrap a test context
    pub fn from_test(context: &'a mut dyn TestContext) -> Self {
        Tb::Test(context)
    }

    /// Wrap a benchmark context
    pub fn from_bench(context: &'a mut dyn BenchContext) -> Self {
        Tb::Bench(context)
    }

    /// Run `body` as a named sub-case and report whether it passed
    ///
    /// The nested handle wraps the same kind of context as `self`.
    pub fn run<F>(&mut self, name: &str, mut body: F) -> bool
    where
        F: FnMut(&mut Tb<'_>),
    {
        match self {
            Tb::Test(context) => context.run(name, &mut |nested| body(&mut Tb::Test(nested))),
            Tb::Bench(context) => context.run(name, &mut |nested| body(&mut Tb::Bench(nested))),
        }
    }

    /// Iterations the body should perform; always 1 for tests
    pub fn iterations(&self) -> u64 {
        match self {
            Tb::Test(_) => 1,
            Tb::Bench(context) => context.iterations(),
        }
    }

    /// Alias of [`Tb::iterations`]
    pub fn n(&self) -> u64 {
        self.iterations()
    }

    /// Exclude preceding setup from the measurement; no-op for tests
    pub fn reset_timer(&mut self) {
        if let Tb::Bench(context) = self {
            context.reset_timer();
        }
    }

    pub fn is_benchmark(&self) -> bool {
        matches!(self, Tb::Bench(_))
    }
}

impl Reporter for Tb<'_> {
    fn name(&self) -> &str {
        with_context!(self, context => context.name())
    }

    fn log(&mut self, message: &str) {
        with_context!(self, context => context.log(message))
    }

    fn fail(&mut self) {
        with_context!(self, context => context.fail())
    }

    fn failed(&self) -> bool {
        with_context!(self, context => context.failed())
    }

    fn skip_now(&mut self) -> ! {
        with_context!(self, context => context.skip_now())
    }

    fn skipped(&self) -> bool {
        with_context!(self, context => context.skipped())
    }

    fn cleanup(&mut self, cleanup: Cleanup) {
        with_context!(self, context => context.cleanup(cleanup))
    }

    fn error(&mut self, message: &str) {
        with_context!(self, context => context.error(message))
    }

    fn fail_now(&mut self) -> ! {
        with_context!(self, context => context.fail_now())
    }

    fn fatal(&mut self, message: &str) -> ! {
        with_context!(self, context => context.fatal(message))
    }

    fn skip(&mut self, reason: &str) -> ! {
        with_context!(self, context => context.skip(reason))
    }
}

impl<'a> From<&'a mut crate::TestRun> for Tb<'a> {
    fn from(context: &'a mut crate::TestRun) -> Self {
        Tb::Test(context)
    }
}

impl<'a> From<&'a mut crate::Bench> for Tb<'a> {
    fn from(context: &'a mut crate::Bench) -> Self {
        Tb::Bench(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bench, TestRun};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Test context that counts calls, for checking pass-through
    #[derive(Default)]
    struct Spy {
        logs: Vec<String>,
        failed: bool,
        cleanups: usize,
        runs: Vec<String>,
    }

    impl Reporter for Spy {
        fn name(&self) -> &str {
            "spy"
        }
        fn log(&mut self, message: &str) {
            self.logs.push(message.to_owned());
        }
        fn fail(&mut self) {
            self.failed = true;
        }
        fn failed(&self) -> bool {
            self.failed
        }
        fn skip_now(&mut self) -> ! {
            std::panic::panic_any(crate::Abort::Skipped)
        }
        fn skipped(&self) -> bool {
            false
        }
        fn cleanup(&mut self, _cleanup: Cleanup) {
            self.cleanups += 1;
        }
    }

    impl TestContext for Spy {
        fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn TestContext)) -> bool {
            self.runs.push(name.to_owned());
            let mut nested = Spy::default();
            body(&mut nested);
            !nested.failed
        }
    }

    /// **What is tested:** Fixed defaults of a test-variant handle
    /// **Why it is tested:** Shared bodies rely on iterations() == 1 and a harmless reset in test mode
    /// **Test conditions:** Handle over a TestRun; reset_timer called repeatedly
    /// **Expectations:** Not a benchmark, one iteration, reset has no effect on the run
    #[test]
    fn test_test_variant_defaults() {
        let mut run = TestRun::new("root");
        let mut tb = Tb::from(&mut run);

        assert!(!tb.is_benchmark());
        assert_eq!(tb.iterations(), 1);
        assert_eq!(tb.n(), 1);
        tb.reset_timer();
        tb.reset_timer();
        assert!(!tb.failed());

        let report = run.finish().unwrap();
        assert!(report.children.is_empty());
        assert_eq!(report.elapsed, None);
    }

    /// **What is tested:** Iteration count of a benchmark-variant handle
    /// **Why it is tested:** The body's loop bound must come from the benchmark
    /// **Test conditions:** Bench configured with 100 iterations
    /// **Expectations:** is_benchmark is true and iterations returns 100
    #[test]
    fn test_bench_variant_iterations() {
        let mut bench = Bench::new("root", 100);
        let tb = Tb::from(&mut bench);

        assert!(tb.is_benchmark());
        assert_eq!(tb.iterations(), 100);
    }

    /// **What is tested:** Variant preservation across sub-cases
    /// **Why it is tested:** Nested bodies must see the same mode as their parent
    /// **Test conditions:** run("child") from a test handle and from a bench handle
    /// **Expectations:** The nested handle matches the parent's variant, body runs once
    #[test]
    fn test_run_preserves_variant() {
        let calls = Cell::new(0);

        let mut run = TestRun::new("root");
        let passed = Tb::from(&mut run).run("child", |tb| {
            calls.set(calls.get() + 1);
            assert!(!tb.is_benchmark());
        });
        assert!(passed);
        assert_eq!(calls.get(), 1);

        let mut bench = Bench::new("root", 7);
        let passed = Tb::from(&mut bench).run("child", |tb| {
            calls.set(calls.get() + 1);
            assert!(tb.is_benchmark());
            assert_eq!(tb.iterations(), 7);
        });
        assert!(passed);
        assert_eq!(calls.get(), 2);
    }

    /// **What is tested:** Base capabilities are forwarded untouched
    /// **Why it is tested:** The handle must not intercept logging, failure or cleanup
    /// **Test conditions:** Handle over a spy context; log, error and cleanup calls
    /// **Expectations:** The spy records exactly what was sent
    #[test]
    fn test_reporter_pass_through() {
        let mut spy = Spy::default();
        {
            let mut tb = Tb::from_test(&mut spy);
            tb.log("hello");
            tb.error("broken");
            tb.cleanup(Box::new(|| {}));
            assert_eq!(tb.name(), "spy");
            assert!(tb.failed());
        }

        assert_eq!(spy.logs, vec!["hello".to_owned(), "broken".to_owned()]);
        assert!(spy.failed);
        assert_eq!(spy.cleanups, 1);
    }

    /// **What is tested:** Sub-case spawning goes through the wrapped context
    /// **Why it is tested:** Scheduling belongs to the framework, the handle only re-wraps
    /// **Test conditions:** Two nested run calls on a spy context
    /// **Expectations:** The spy sees the call, and the failure inside the child is reported back
    #[test]
    fn test_run_delegates_to_context() {
        let mut spy = Spy::default();
        let mut tb = Tb::from_test(&mut spy);

        assert!(tb.run("a", |_| {}));
        assert!(!tb.run("b", |tb| tb.fail()));

        assert_eq!(spy.runs, vec!["a".to_owned(), "b".to_owned()]);
    }

    /// **What is tested:** Cleanup registration through the handle on a real run
    /// **Why it is tested:** Shared bodies register teardown the same way in both modes
    /// **Test conditions:** Register a cleanup inside a test sub-case and a bench sub-case
    /// **Expectations:** Each cleanup runs once when its sub-case ends
    #[test]
    fn test_cleanup_in_both_modes() {
        let count = Rc::new(Cell::new(0));

        let mut run = TestRun::new("root");
        let counter = Rc::clone(&count);
        Tb::from(&mut run).run("child", move |tb| {
            let counter = Rc::clone(&counter);
            tb.cleanup(Box::new(move || counter.set(counter.get() + 1)));
        });
        assert_eq!(count.get(), 1);

        let mut bench = Bench::new("root", 3);
        let counter = Rc::clone(&count);
        Tb::from(&mut bench).run("child", move |tb| {
            let counter = Rc::clone(&counter);
            tb.cleanup(Box::new(move || counter.set(counter.get() + 1)));
        });
        assert_eq!(count.get(), 2);
    }
}
