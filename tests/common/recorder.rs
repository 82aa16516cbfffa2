//! Recording contexts
//!
//! Minimal framework stand-ins that count what the handle forwards to them.
//! Sub-cases run inline and are recorded as nested recorders so a test can
//! inspect the whole tree afterwards.

#![allow(dead_code)]

use testorbench::{Abort, BenchContext, Cleanup, Reporter, TestContext};

/// Shared call log of a recording context
#[derive(Default)]
pub struct Calls {
    pub name: String,
    pub logs: Vec<String>,
    pub failed: bool,
    pub skipped: bool,
    pub cleanups: Vec<Cleanup>,
    pub body_calls: usize,
}

impl Calls {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }
}

macro_rules! recording_reporter {
    ($ty:ty) => {
        impl Reporter for $ty {
            fn name(&self) -> &str {
                &self.calls.name
            }

            fn log(&mut self, message: &str) {
                self.calls.logs.push(message.to_owned());
            }

            fn fail(&mut self) {
                self.calls.failed = true;
            }

            fn failed(&self) -> bool {
                self.calls.failed
            }

            fn skip_now(&mut self) -> ! {
                self.calls.skipped = true;
                std::panic::panic_any(Abort::Skipped)
            }

            fn skipped(&self) -> bool {
                self.calls.skipped
            }

            fn cleanup(&mut self, cleanup: Cleanup) {
                self.calls.cleanups.push(cleanup);
            }
        }
    };
}

/// Test context that records calls and nested runs
#[derive(Default)]
pub struct RecordingTest {
    pub calls: Calls,
    pub children: Vec<RecordingTest>,
}

impl RecordingTest {
    pub fn new(name: &str) -> Self {
        Self {
            calls: Calls::named(name),
            children: Vec::new(),
        }
    }
}

recording_reporter!(RecordingTest);

impl TestContext for RecordingTest {
    fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn TestContext)) -> bool {
        let mut child = RecordingTest::new(&format!("{}/{name}", self.calls.name));
        child.calls.body_calls += 1;
        body(&mut child);
        let passed = !child.calls.failed;
        self.children.push(child);
        passed
    }
}

/// Benchmark context that records calls, nested runs and timer resets
#[derive(Default)]
pub struct RecordingBench {
    pub calls: Calls,
    pub iterations: u64,
    pub resets: usize,
    pub children: Vec<RecordingBench>,
}

impl RecordingBench {
    pub fn new(name: &str, iterations: u64) -> Self {
        Self {
            calls: Calls::named(name),
            iterations,
            resets: 0,
            children: Vec::new(),
        }
    }
}

recording_reporter!(RecordingBench);

impl BenchContext for RecordingBench {
    fn run(&mut self, name: &str, body: &mut dyn FnMut(&mut dyn BenchContext)) -> bool {
        let mut child =
            RecordingBench::new(&format!("{}/{name}", self.calls.name), self.iterations);
        child.calls.body_calls += 1;
        body(&mut child);
        let passed = !child.calls.failed;
        self.children.push(child);
        passed
    }

    fn iterations(&self) -> u64 {
        self.iterations
    }

    fn reset_timer(&mut self) {
        self.resets += 1;
    }
}
