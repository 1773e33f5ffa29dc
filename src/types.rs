// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Core types for content index fetching and filtering

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One content item (post, page) from an index, as a field-to-string mapping.
///
/// Records are immutable for the duration of a filter pass. Typical fields
/// are `title`, `path`, `category`, `tags`, `teaser`, `image`, but the set
/// is whatever the index was published with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The `path` field, present on every page index record.
    pub fn path(&self) -> Option<&str> {
        self.field("path")
    }

    /// Iterate over all (field, value) pairs in field-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields on this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Wire shape of a published index document: `{ "data": [ ... ] }`.
///
/// A body without a `data` array is a malformed index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexDocument {
    /// The record collection.
    pub data: Vec<Record>,
}

/// Errors that can occur while loading an index.
///
/// All errors are local to a single load; there is no retry policy and no
/// partial-result semantics.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Transport-level failure (connect, DNS, body read)
    #[error("index fetch failed for {url}: {message}")]
    Fetch {
        /// URL that was being fetched
        url: String,
        /// Underlying transport error message
        message: String,
    },

    /// The request deadline expired
    #[error("index fetch timed out after {timeout_ms}ms: {url}")]
    Timeout {
        /// URL that was being fetched
        url: String,
        /// Configured timeout in milliseconds
        timeout_ms: u64,
    },

    /// Non-success HTTP status from the index host
    #[error("index fetch returned HTTP {status} for {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// URL that was being fetched
        url: String,
    },

    /// The body is not `{ "data": [...] }` with string-valued records
    #[error("malformed index at {url}: {message}")]
    MalformedIndex {
        /// URL the body came from
        url: String,
        /// Parse error detail
        message: String,
    },

    /// The configured base URL does not parse
    #[error("invalid index base URL {url}: {message}")]
    InvalidBaseUrl {
        /// The offending base URL
        url: String,
        /// Parse error detail
        message: String,
    },
}
