//! Benchmark context backed by criterion
//!
//! [`CriterionBench`] stands for a group of benchmarks. Each sub-case becomes
//! one criterion benchmark named `group/sub-case`, measured with
//! [`criterion::Bencher::iter_custom`]: for every sample criterion asks for,
//! the body runs once inside a fresh [`Bench`] holding the sample's
//! iteration count, and that context's timer is what criterion records. A
//! `reset_timer` call in the body therefore drops setup from the sample.
//!
//! ```rust,no_run
//! use criterion::Criterion;
//! use testorbench::{CriterionBench, Tb};
//!
//! fn sum_suite(tb: &mut Tb<'_>) {
//!     let data: Vec<u64> = (0..1024).collect();
//!     tb.reset_timer();
//!     for _ in 0..tb.iterations() {
//!         std::hint::black_box(data.iter().sum::<u64>());
//!     }
//! }
//!
//! let mut criterion = Criterion::default();
//! CriterionBench::execute(&mut criterion, "sum", |tb| {
//!     tb.run("vec", sum_suite);
//! })?;
//! # Ok::<(), testorbench::Error>(())
//! ```

use criterion::Criterion;

use crate::bench::Bench;
use crate::case::CaseState;
use crate::context::{guard, Abort, BenchContext, Cleanup, Reporter};
use crate::error::{Error, Result};
use crate::report::{CaseReport, Outcome};
use crate::tb::Tb;

/// Benchmark group context over a [`Criterion`] instance
pub struct CriterionBench<'c> {
    criterion: &'c mut Criterion,
    state: CaseState,
}

impl<'c> CriterionBench<'c> {
    pub fn new(criterion: &'c mut Criterion, group: impl Into<String>) -> Self {
        Self {
            criterion,
            state: CaseState::new(group),
        }
    }

    /// Run `body` as the group body and finish the group
    pub fn execute<F>(criterion: &'c mut Criterion, group: &str, body: F) -> Result<CaseReport>
    where
        F: FnOnce(&mut Tb<'_>),
    {
        let mut bench = Self::new(criterion, group);
        let exit = guard(|| body(&mut Tb::from(&mut bench)));
        bench.state.absorb(exit);
        bench.finish()
    }

    /// Run group cleanups and report the outcome
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

impl Reporter for CriterionBench<'_> {
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

impl BenchContext for CriterionBench<'_> {
    fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn BenchContext)) -> bool {
        let full_name = self.state.child_name(name);
        let mut samples = 0_u64;
        let mut first_failure: Option<CaseReport> = None;
        let mut last_sample: Option<CaseReport> = None;

        tracing::debug!(case = %full_name, "=== RUN");
        self.criterion.bench_function(&full_name, |bencher| {
            bencher.iter_custom(|iterations| {
                let mut sample = Bench::new(full_name.as_str(), iterations);
                let elapsed = sample.measure(|sample| body(sample));
                let report = sample.into_report(elapsed);
                samples += 1;

                if report.outcome == Outcome::Failed && first_failure.is_none() {
                    first_failure = Some(report);
                } else {
                    last_sample = Some(report);
                }
                elapsed
            });
        });

        let report = match first_failure.or(last_sample) {
            Some(report) => report,
            None => CaseState::not_run(full_name, 1, "not selected by criterion"),
        };
        tracing::debug!(case = %report.name, samples, outcome = %report.outcome, "criterion done");

        let passed = report.passed();
        self.state.adopt(report);
        passed
    }

    /// The group itself is never timed
    fn iterations(&self) -> u64 {
        1
    }

    fn reset_timer(&mut self) {}
}

impl<'a, 'c> From<&'a mut CriterionBench<'c>> for Tb<'a> {
    fn from(context: &'a mut CriterionBench<'c>) -> Self {
        Tb::Bench(context)
    }
}
