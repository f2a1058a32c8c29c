//! Convenient imports for yardstick.
//!
//! ```ignore
//! use yardstick::prelude::*;
//! ```

// Entry point
pub use crate::benchmark::{measure, Benchmark, BenchmarkBuilder, BenchmarkResult};

// Error handling
pub use crate::error::{Error, Result};

// Model
pub use yardstick_core::{
    Criteria, Entity, EntityKind, Instruction, InstructionKind, InstructionSequence,
    RawInstruction, ReferenceCorpus,
};

// Workload
pub use yardstick_generator::{generate, load_corpus, Generator};
pub use yardstick_wire::InstructionStore;

// Execution
pub use yardstick_concurrency::{BoundedExecutor, ExecutorOptions, FailurePolicy, RunOutcome};
pub use yardstick_interpreter::{Backend, ExecutionUnit, Interpreter, SharedBackend};

// Metrics
pub use yardstick_metrics::{summarize, BenchmarkReport, ResultFormat, ResultWriter, Summary};

// Backends
pub use yardstick_storage::{FaultConfig, FaultyBackend, MemoryBackend};
