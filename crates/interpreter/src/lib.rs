//! Instruction interpreter for yardstick
//!
//! This crate sits between workloads and storage:
//! - [`Backend`]: the operations a benchmarked store must provide
//! - [`Interpreter`]: binds an [`Instruction`](yardstick_core::Instruction)
//!   and a backend into an [`ExecutionUnit`]
//! - [`scenarios`]: bulk-load, point-read and full-scan unit builders
//!
//! Execution units are `'static` boxed futures, ready to hand to the
//! bounded executor.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod handlers;
pub mod interpreter;
pub mod scenarios;

#[cfg(test)]
mod tests;

pub use backend::{Backend, SharedBackend};
pub use interpreter::{ExecutionUnit, Interpreter, InterpreterOptions, DEFAULT_SEARCH_LIMIT};
pub use scenarios::{full_scan_units, insert_units, point_read_units};
