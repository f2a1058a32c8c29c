//! Core model for yardstick
//!
//! This crate defines the types every other layer shares:
//! - [`Instruction`] / [`RawInstruction`]: typed and serialized workload operations
//! - [`Entity`] / [`EntityKind`]: the records a backend stores
//! - [`Criteria`]: field predicates for backend searches
//! - [`ReferenceCorpus`]: sample identifiers the generator draws from
//! - [`Error`]: the error taxonomy for generation, storage and execution

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod criteria;
pub mod entity;
pub mod error;
pub mod instruction;

pub use corpus::{BusinessSample, ReferenceCorpus, ReviewSample, UserSample};
pub use criteria::{Criteria, FieldFilter};
pub use entity::{Business, Checkin, Entity, EntityKind, Photo, Review, Tip, User};
pub use error::{Error, Result};
pub use instruction::{Instruction, InstructionKind, InstructionSequence, RawInstruction};
