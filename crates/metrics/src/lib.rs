//! Metrics for yardstick runs
//!
//! Turns executor outcomes into comparable numbers:
//! - [`summarize`] computes throughput and the latency distribution
//! - [`BenchmarkReport`] pairs a summary with run identity and failures
//! - [`ResultWriter`] persists reports as CSV or JSON lines

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod report;
pub mod summary;
pub mod writer;

pub use report::{BenchmarkReport, MAX_FAILURE_MESSAGES};
pub use summary::{latency_stats, percentile, summarize, summarize_units, LatencyStats, Summary};
pub use writer::{write_reports, ResultFormat, ResultWriter, WriteError, CSV_HEADER};
