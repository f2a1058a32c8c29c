//! File formats for yardstick
//!
//! - [`InstructionStore`]: workload files, a pretty-printed JSON array of
//!   `{ "type", "parameters" }` objects
//! - [`read_ndjson`] / [`truncate_ndjson`]: newline-delimited dataset dumps
//! - [`DatasetDir`]: a directory of per-kind dataset dumps
//!
//! ## Workload file
//!
//! ```json
//! [
//!   { "type": "ViewBusiness", "parameters": { "business_id": "b-1" } },
//!   { "type": "PostReview", "parameters": { "user_id": "u-7", "business_id": "b-1",
//!                                           "stars": "4", "text": "This is a test review." } }
//! ]
//! ```
//!
//! Parameter values are always strings. Whitespace is not significant.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod ndjson;
pub mod store;

pub use dataset::{DatasetDir, DATASET_PREFIX, REDUCED_SUFFIX};
pub use ndjson::{read_ndjson, read_ndjson_limit, truncate_ndjson, NdjsonBatch};
pub use store::InstructionStore;
