//! Workload generation for yardstick
//!
//! - [`Generator`] / [`generate`]: seed + corpus to a reproducible instruction sequence
//! - [`SampleLoader`] / [`SampleDumper`]: reference corpus files
//! - [`catalog`]: shipped city and category lists, literals and fallbacks

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod generator;
pub mod sample;

pub use generator::{generate, Generator};
pub use sample::{
    load_corpus, SampleDumper, SampleLoader, BUSINESS_SAMPLE_FILE, DEFAULT_SAMPLE_MAX,
    REVIEW_SAMPLE_FILE, USER_SAMPLE_FILE,
};
