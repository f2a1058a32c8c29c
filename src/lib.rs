//! # Yardstick
//!
//! Reproducible workload generation and bounded-concurrency benchmarking for
//! database backends.
//!
//! A seed and a small reference corpus turn into a deterministic sequence of
//! user-behaviour instructions. The sequence is bound to any [`Backend`],
//! replayed with a hard cap on in-flight operations, and summarized as
//! throughput plus a latency distribution, so backends can be compared on
//! identical work.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use yardstick::prelude::*;
//!
//! let benchmark = Benchmark::builder()
//!     .seed(123)
//!     .count(10_000)
//!     .corpus_dir("samples")
//!     .concurrency(8)
//!     .build()?;
//!
//! let result = benchmark.run(Arc::new(MemoryBackend::new())).await?;
//! println!("{}", result.report);
//! ```
//!
//! ## Layers
//!
//! - [`model`]: instructions, entities, criteria and the error taxonomy
//! - [`generator`]: seed + corpus to instruction sequence
//! - [`wire`]: workload files and NDJSON dataset dumps
//! - [`interpreter`]: instruction + backend to execution unit
//! - [`concurrency`]: bounded executor and latency collection
//! - [`metrics`]: summaries, reports and result files
//! - [`storage`]: in-memory and fault-injecting backends

#![warn(missing_docs)]

mod benchmark;
mod error;

pub mod prelude;

pub use benchmark::{
    measure, Benchmark, BenchmarkBuilder, BenchmarkResult, UnitFailure, DEFAULT_COUNT,
    DEFAULT_LABEL, DEFAULT_SEED,
};
pub use error::{Error, Result};

pub use yardstick_concurrency as concurrency;
pub use yardstick_core as model;
pub use yardstick_generator as generator;
pub use yardstick_interpreter as interpreter;
pub use yardstick_metrics as metrics;
pub use yardstick_storage as storage;
pub use yardstick_wire as wire;

pub use yardstick_interpreter::Backend;
