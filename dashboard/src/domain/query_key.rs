//! Hierarchical keys for the query cache.
//!
//! A key is an ordered list of segments. A key matches every key it is a
//! prefix of, so invalidating `customers` also reaches `customers:list` and
//! `customers:detail:7`.

use std::fmt;

use thiserror::Error;

use crate::domain::CustomerId;

/// Cache key made of one or more segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    /// Single-segment root key.
    pub fn new(segment: impl Into<String>) -> Result<Self, QueryKeyValidationError> {
        Ok(Self(vec![validate_segment(segment.into())?]))
    }

    /// Derive a child key by appending a segment.
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, QueryKeyValidationError> {
        Ok(self.extended(validate_segment(segment.into())?))
    }

    fn root(segment: &'static str) -> Self {
        Self(vec![segment.to_owned()])
    }

    fn extended(&self, segment: String) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Whether `prefix` names this key or one of its ancestors.
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Borrow the segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(":"))
    }
}

fn validate_segment(raw: String) -> Result<String, QueryKeyValidationError> {
    if raw.trim().is_empty() {
        return Err(QueryKeyValidationError::Empty);
    }
    if raw.trim() != raw {
        return Err(QueryKeyValidationError::ContainsWhitespace);
    }
    Ok(raw)
}

/// Validation errors returned when constructing a [`QueryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryKeyValidationError {
    /// Segment is empty after trimming whitespace.
    #[error("query key segment must not be empty")]
    Empty,
    /// Segment has leading or trailing whitespace.
    #[error("query key segment must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// Key factory for customer queries.
#[derive(Debug, Clone, Copy)]
pub struct CustomerKeys;

impl CustomerKeys {
    /// Every customer query.
    pub fn all() -> QueryKey {
        QueryKey::root("customers")
    }

    /// The list of all customers.
    pub fn lists() -> QueryKey {
        Self::all().extended("list".to_owned())
    }

    /// A single customer by identifier.
    pub fn detail(id: &CustomerId) -> QueryKey {
        Self::all()
            .extended("detail".to_owned())
            .extended(id.as_str().to_owned())
    }
}
