//! Error taxonomy shared by every yardstick layer
//!
//! | Variant | Raised by | Severity |
//! |---------|-----------|----------|
//! | MalformedInstruction | instruction validation, interpreter | caller decides |
//! | UnsupportedInstructionKind | kind parsing, generator | fatal |
//! | StoreUnavailable | instruction store load/save | fatal |
//! | BackendOperationFailed | backend calls | isolated per unit |
//! | CorpusUnavailable | corpus loading before generation | fatal |
//! | InvalidConfig | option and config validation | fatal |

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the core layers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A required parameter is missing or fails to parse as its expected type
    #[error("malformed {kind} instruction: field '{field}' {reason}")]
    MalformedInstruction {
        /// Instruction kind (wire name)
        kind: String,
        /// Offending parameter name
        field: String,
        /// What is wrong with it
        reason: String,
    },

    /// Instruction kind is not part of the known set
    #[error("unsupported instruction kind: {kind}")]
    UnsupportedInstructionKind {
        /// The unrecognized kind name
        kind: String,
    },

    /// Instruction file could not be read or written
    #[error("instruction store unavailable at {}: {reason}", path.display())]
    StoreUnavailable {
        /// Source or destination path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// A backend call failed
    #[error("{backend} {operation} failed: {reason}")]
    BackendOperationFailed {
        /// Backend name
        backend: String,
        /// Operation that failed (e.g. "insert user")
        operation: String,
        /// Underlying cause
        reason: String,
    },

    /// Reference corpus could not be loaded
    #[error("reference corpus unavailable at {}: {reason}", path.display())]
    CorpusUnavailable {
        /// Corpus file or directory
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },

    /// Invalid option or configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for a missing required parameter.
    pub fn missing(kind: impl Into<String>, field: impl Into<String>) -> Self {
        Error::MalformedInstruction {
            kind: kind.into(),
            field: field.into(),
            reason: "is missing".into(),
        }
    }

    /// Shorthand for a parameter that does not parse.
    pub fn invalid(
        kind: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedInstruction {
            kind: kind.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a failed backend call.
    pub fn backend(
        backend: impl Into<String>,
        operation: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::BackendOperationFailed {
            backend: backend.into(),
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error invalidates the whole workload.
    ///
    /// Generation-time and store-time errors are fatal; malformed instructions
    /// and backend failures are isolated to a single unit.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedInstructionKind { .. }
                | Error::StoreUnavailable { .. }
                | Error::CorpusUnavailable { .. }
                | Error::InvalidConfig(_)
        )
    }

    /// Check if this is a malformed-instruction error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedInstruction { .. })
    }

    /// Check if this is a backend failure.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Error::BackendOperationFailed { .. })
    }

    /// Name of the offending field for malformed instructions.
    pub fn malformed_field(&self) -> Option<&str> {
        match self {
            Error::MalformedInstruction { field, .. } => Some(field),
            _ => None,
        }
    }
}
