//! Per-kind instruction handlers
//!
//! Each handler performs the backend calls for one instruction kind. Handlers
//! take already-validated arguments and share no state with each other.

pub mod flow;
pub mod read;
pub mod write;

use chrono::{DateTime, Utc};

/// Date stamp used for newly created records.
pub(crate) fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Dataset-style rendering of a timestamp.
pub(crate) fn dataset_datetime(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Fresh random id for a new record.
pub(crate) fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
