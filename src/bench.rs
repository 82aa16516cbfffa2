//! Manual benchmark context
//!
//! [`Bench`] runs a body once with a fixed iteration count and measures it
//! with a wall-clock timer. It is the benchmark counterpart of
//! [`crate::TestRun`] and also backs each criterion sample in
//! [`crate::criterion_bench`].

use std::time::{Duration, Instant};

use crate::case::CaseState;
use crate::config::RunConfig;
use crate::context::{guard, Abort, BenchContext, Cleanup, Reporter};
use crate::error::{Error, Result};
use crate::report::CaseReport;
use crate::tb::Tb;

/// Wall-clock timer that can be paused and reset
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer {
    started: Option<Instant>,
    accumulated: Duration,
}

impl Timer {
    pub fn start(&mut self) {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    /// Discard measured time, keeping the running state
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
        if self.started.is_some() {
            self.started = Some(Instant::now());
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started
                .map(|started| started.elapsed())
                .unwrap_or_default()
    }
}

/// Benchmark context with a fixed iteration count
pub struct Bench {
    state: CaseState,
    iterations: u64,
    timer: Timer,
}

impl Bench {
    /// Root benchmark context; `iterations` below 1 is raised to 1
    pub fn new(name: impl Into<String>, iterations: u64) -> Self {
        Self {
            state: CaseState::new(name),
            iterations: iterations.max(1),
            timer: Timer::default(),
        }
    }

    /// Root benchmark context taking its iteration count from `config`
    pub fn with_config(name: impl Into<String>, config: &RunConfig) -> Self {
        Self::new(name, config.iterations())
    }

    /// Run `body` as a timed root case with an explicit iteration count
    ///
    /// An explicit count takes priority over `TESTORBENCH_ITERATIONS`. Use
    /// [`Bench::execute_from_env`] to take the count from the environment.
    pub fn execute<F>(name: &str, iterations: u64, body: F) -> Result<CaseReport>
    where
        F: FnOnce(&mut Tb<'_>),
    {
        Self::new(name, iterations).execute_root(body)
    }

    /// Run `body` as a timed root case, iterations resolved from the environment
    ///
    /// Falls back to a single iteration when `TESTORBENCH_ITERATIONS` is unset
    /// and fails with [`Error::Config`] when it holds an invalid count.
    pub fn execute_from_env<F>(name: &str, body: F) -> Result<CaseReport>
    where
        F: FnOnce(&mut Tb<'_>),
    {
        let config = RunConfig::from_env()?;
        Self::execute_with_config(name, &config, body)
    }

    /// Run `body` as a timed root case with an explicit configuration
    pub fn execute_with_config<F>(name: &str, config: &RunConfig, body: F) -> Result<CaseReport>
    where
        F: FnOnce(&mut Tb<'_>),
    {
        Self::with_config(name, config).execute_root(body)
    }

    fn execute_root<F>(mut self, body: F) -> Result<CaseReport>
    where
        F: FnOnce(&mut Tb<'_>),
    {
        tracing::debug!(case = %self.state.name(), iterations = self.iterations, "=== RUN");
        self.measure(|bench| body(&mut Tb::from(bench)));
        self.finish()
    }

    /// Run `body` with the timer running, returning the measured time
    pub fn measure<F>(&mut self, body: F) -> Duration
    where
        F: FnOnce(&mut Self),
    {
        self.timer.start();
        let exit = guard(|| body(self));
        self.timer.stop();
        self.state.absorb(exit);
        self.timer.elapsed()
    }

    /// Run root cleanups and report the outcome
    pub fn finish(self) -> Result<CaseReport> {
        let elapsed = self.timer.elapsed();
        let report = self.state.finish(self.iterations, Some(elapsed));
        if report.passed() {
            Ok(report)
        } else {
            Err(Error::CaseFailed {
                name: report.name.clone(),
                failures: report.failures(),
            })
        }
    }

    pub fn start_timer(&mut self) {
        self.timer.start();
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Finish without turning failure into an error
    pub(crate) fn into_report(self, elapsed: Duration) -> CaseReport {
        self.state.finish(self.iterations, Some(elapsed))
    }

    fn child(&mut self, name: &str) -> Self {
        Self {
            state: self.state.child(name),
            iterations: self.iterations,
            timer: Timer::default(),
        }
    }
}

impl Reporter for Bench {
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

impl BenchContext for Bench {
    fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn BenchContext)) -> bool {
        let mut child = self.child(name);
        let full_name = child.state.name().to_owned();

        tracing::debug!(case = %full_name, iterations = self.iterations, "=== RUN");
        let elapsed = child.measure(|child| body(child));
        tracing::debug!(
            case = %full_name,
            iterations = child.iterations,
            elapsed_ns = elapsed.as_nanos() as u64,
            ns_per_iter = elapsed.as_nanos() as u64 / child.iterations,
            "measured"
        );

        let Self {
            state, iterations, ..
        } = child;
        let report = state.finish(iterations, Some(elapsed));
        let passed = report.passed();
        self.state.adopt(report);
        passed
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn reset_timer(&mut self) {
        self.timer.reset();
    }
}
