//! Unified error type for yardstick.
//!
//! Wraps the per-crate errors so callers of the facade handle one type.

use thiserror::Error;

use yardstick_concurrency::ExecutorError;
use yardstick_metrics::WriteError;

/// All yardstick errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Generation, store, interpreter or backend error
    #[error(transparent)]
    Core(#[from] yardstick_core::Error),

    /// Invalid executor settings
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// Result file could not be written
    #[error(transparent)]
    Write(#[from] WriteError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for yardstick operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error invalidates the whole benchmark.
    ///
    /// Only per-unit errors (malformed instructions, backend failures) are
    /// not fatal; everything else means the workload cannot be trusted.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Core(e) => e.is_fatal(),
            _ => true,
        }
    }

    /// Check if this is a malformed instruction.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_malformed())
    }

    /// Check if a backend call failed.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_backend_failure())
    }

    /// The core error, if this is one.
    pub fn as_core(&self) -> Option<&yardstick_core::Error> {
        match self {
            Error::Core(e) => Some(e),
            _ => None,
        }
    }
}
