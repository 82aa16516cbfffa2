//! Shared fixtures for the integration tests
//!
//! `suites` holds bodies that are also benchmarked from `benches/`, and
//! `recorder` holds fake framework contexts that record every call.

pub mod recorder;
pub mod suites;

#[allow(unused_imports)]
pub use recorder::{RecordingBench, RecordingTest};
