//! Executor Test Suite
//!
//! Concurrency bound, failure isolation and timing of the bounded executor,
//! driven with synthetic sleeping units.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test executor
//! cargo test --test executor concurrency_bound::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod concurrency_bound;
mod fail_soft;
mod latency_count;
mod throughput;
