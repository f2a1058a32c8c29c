//! Backends for yardstick
//!
//! This crate provides:
//! - [`MemoryBackend`]: a concurrent in-memory store, the reference backend
//! - [`FaultyBackend`]: a wrapper that injects latency, jitter and failures
//!
//! Both implement [`Backend`](yardstick_interpreter::Backend), so they can be
//! driven by any workload or scenario.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod faulty;
pub mod memory;

pub use faulty::{FaultConfig, FaultyBackend};
pub use memory::MemoryBackend;
