//! Search predicates passed to `Backend::search`

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// One predicate over a named entity field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FieldFilter {
    /// Field equals value exactly
    Equals {
        /// Field name
        field: String,
        /// Expected value
        value: String,
    },
    /// Field contains value as a substring (case-sensitive)
    Contains {
        /// Field name
        field: String,
        /// Substring
        value: String,
    },
    /// Field starts with value (ASCII case-insensitive)
    Prefix {
        /// Field name
        field: String,
        /// Prefix
        value: String,
    },
}

impl FieldFilter {
    /// Field this filter inspects.
    pub fn field(&self) -> &str {
        match self {
            FieldFilter::Equals { field, .. }
            | FieldFilter::Contains { field, .. }
            | FieldFilter::Prefix { field, .. } => field,
        }
    }

    /// Check a single entity. Missing fields never match.
    pub fn matches(&self, entity: &Entity) -> bool {
        let Some(actual) = entity.field(self.field()) else {
            return false;
        };
        match self {
            FieldFilter::Equals { value, .. } => actual == *value,
            FieldFilter::Contains { value, .. } => actual.contains(value.as_str()),
            FieldFilter::Prefix { value, .. } => actual
                .get(..value.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(value)),
        }
    }
}

/// Conjunction of field filters. An empty criteria matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    filters: Vec<FieldFilter>,
}

impl Criteria {
    /// Criteria that matches every entity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter.
    pub fn equals(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter::Equals {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a substring filter.
    pub fn contains(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter::Contains {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Add a prefix filter.
    pub fn prefix(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter::Prefix {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// The filters, in insertion order.
    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    /// True when no filter has been added.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// True when every filter matches.
    pub fn matches(&self, entity: &Entity) -> bool {
        self.filters.iter().all(|f| f.matches(entity))
    }
}
