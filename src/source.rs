// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Index source abstraction and the HTTP implementation
//!
//! The original system kept a fetched index in process-global state. Here the
//! source is an injectable trait owned by the caller, so tests and embedders
//! can supply records without any network or global state.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::IndexConfig;
use crate::types::{IndexDocument, IndexError, Record};

/// A loadable collection of index records.
#[async_trait]
pub trait IndexSource: Send + Sync {
    /// Load the records of the index published at `path`.
    async fn load(&self, path: &str) -> Result<Vec<Record>, IndexError>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// HTTP index source: GETs `{base_url}{path}` and parses the
/// `{ "data": [...] }` document.
pub struct HttpIndexSource {
    client: Client,
    base_url: Url,
    timeout_ms: u64,
}

impl HttpIndexSource {
    /// Build a source from configuration.
    ///
    /// Fails if the configured base URL does not parse.
    pub fn new(config: &IndexConfig) -> Result<Self, IndexError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| IndexError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self {
            client,
            base_url,
            timeout_ms: config.request_timeout_ms,
        })
    }

    fn index_url(&self, path: &str) -> Result<Url, IndexError> {
        self.base_url
            .join(path)
            .map_err(|e| IndexError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl IndexSource for HttpIndexSource {
    async fn load(&self, path: &str) -> Result<Vec<Record>, IndexError> {
        let url = self.index_url(path)?;
        debug!("Fetching index: {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                IndexError::Timeout {
                    url: url.to_string(),
                    timeout_ms: self.timeout_ms,
                }
            } else {
                IndexError::Fetch {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let document: IndexDocument =
            response
                .json()
                .await
                .map_err(|e| IndexError::MalformedIndex {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        debug!("Index {} loaded: {} records", url, document.data.len());
        Ok(document.data)
    }

    fn name(&self) -> &str {
        "http"
    }
}

/// In-memory index source keyed by path. Used by tests and embedders that
/// already hold their records.
#[derive(Debug, Clone, Default)]
pub struct StaticIndexSource {
    indices: HashMap<String, Vec<Record>>,
}

impl StaticIndexSource {
    /// Empty source; every path is a 404.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the records published at `path`.
    pub fn with_index(mut self, path: impl Into<String>, records: Vec<Record>) -> Self {
        self.indices.insert(path.into(), records);
        self
    }
}

#[async_trait]
impl IndexSource for StaticIndexSource {
    async fn load(&self, path: &str) -> Result<Vec<Record>, IndexError> {
        self.indices
            .get(path)
            .cloned()
            .ok_or_else(|| IndexError::Status {
                status: 404,
                url: path.to_string(),
            })
    }

    fn name(&self) -> &str {
        "static"
    }
}
