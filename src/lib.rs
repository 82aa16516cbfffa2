//! testorbench library
//!
//! Write a case body once and run it either as a correctness test or as a
//! benchmark. Benchmarks are rarely run in CI, so bodies that only exist as
//! benchmarks rot; sharing the body with a test keeps both honest.
//!
//! The body receives a [`Tb`] handle. In test mode `tb.iterations()` is 1
//! and `tb.reset_timer()` does nothing; in benchmark mode they come from
//! the benchmark context.
//!
//! # Examples
//!
//! ```rust
//! use testorbench::{Bench, Reporter, Tb, TestRun};
//!
//! fn parse_suite(tb: &mut Tb<'_>) {
//!     for (name, input) in [("small", "42"), ("large", "18446744073709551615")] {
//!         tb.run(name, |tb| {
//!             tb.reset_timer();
//!             for _ in 0..tb.iterations() {
//!                 if input.parse::<u64>().is_err() {
//!                     tb.fatal("parse failed");
//!                 }
//!             }
//!         });
//!     }
//! }
//!
//! // As a test
//! TestRun::execute("parse", parse_suite)?;
//!
//! // As a benchmark
//! let report = Bench::execute("parse", 10_000, parse_suite)?;
//! assert!(report.children.iter().all(|c| c.elapsed.is_some()));
//! # Ok::<(), testorbench::Error>(())
//! ```

pub mod bench;
mod case;
pub mod config;
pub mod context;
pub mod criterion_bench;
pub mod error;
mod names;
pub mod report;
pub mod tb;
pub mod test_run;

pub use bench::{Bench, Timer};
pub use config::{ConfigError, RunConfig, RunConfigBuilder};
pub use context::{Abort, BenchContext, Cleanup, Reporter, TestContext};
pub use criterion_bench::CriterionBench;
pub use error::{Error, Result};
pub use report::{CaseReport, Outcome};
pub use tb::Tb;
pub use test_run::TestRun;
