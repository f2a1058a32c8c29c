//! Workload Test Suite
//!
//! Generation, persistence and validation of instruction sequences.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test workload
//! cargo test --test workload determinism::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod determinism;
mod malformed;
mod store_roundtrip;
