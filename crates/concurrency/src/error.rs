//! Executor errors

use std::time::Duration;

use thiserror::Error;

/// Invalid executor configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutorError {
    /// Concurrency level must be at least 1
    #[error("max concurrency must be at least 1, got {requested}")]
    InvalidConcurrency {
        /// The rejected level
        requested: usize,
    },

    /// Unit timeout must be non-zero
    #[error("unit timeout must be greater than zero")]
    InvalidTimeout,
}

/// Why one unit did not succeed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UnitError<E> {
    /// The unit returned an error
    #[error("{0}")]
    Failed(E),

    /// The unit panicked; carries the panic message
    #[error("unit panicked: {0}")]
    Panicked(String),

    /// The unit exceeded the configured timeout
    #[error("unit timed out after {0:?}")]
    TimedOut(Duration),

    /// The unit was cancelled after a sibling failed
    #[error("unit cancelled")]
    Cancelled,
}

impl<E> UnitError<E> {
    /// The unit's own error, if it returned one.
    pub fn as_failed(&self) -> Option<&E> {
        match self {
            UnitError::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this unit was cancelled rather than failing itself.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, UnitError::Cancelled)
    }

    /// Convert the wrapped error.
    pub fn map<F>(self, f: impl FnOnce(E) -> F) -> UnitError<F> {
        match self {
            UnitError::Failed(e) => UnitError::Failed(f(e)),
            UnitError::Panicked(msg) => UnitError::Panicked(msg),
            UnitError::TimedOut(limit) => UnitError::TimedOut(limit),
            UnitError::Cancelled => UnitError::Cancelled,
        }
    }
}
