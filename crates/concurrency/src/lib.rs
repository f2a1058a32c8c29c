//! Bounded-concurrency execution for yardstick
//!
//! This crate runs batches of asynchronous units with:
//! - A hard cap on units in flight, enforced by a per-run semaphore
//! - One latency sample per unit, measured after admission
//! - Fail-soft failure handling, with optional cancel-on-first-error
//! - Optional per-unit timeouts
//!
//! Units are plain futures returning `Result<(), E>`; the executor knows
//! nothing about instructions or backends.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod executor;
pub mod outcome;
pub mod sink;

pub use error::{ExecutorError, UnitError};
pub use executor::{BoundedExecutor, ExecutorOptions, FailurePolicy};
pub use outcome::RunOutcome;
pub use sink::LatencySink;
