// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Index service orchestration
//!
//! Coordinates the index source, the per-path cache, and the content filter.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::cache::{CacheStats, IndexCache};
use crate::config::IndexConfig;
use crate::filter::Criteria;
use crate::source::{HttpIndexSource, IndexSource};
use crate::types::{IndexError, Record};

/// Result of a filtered index query.
#[derive(Debug, Clone)]
pub struct IndexResponse {
    /// Path of the queried index
    pub path: String,
    /// Records matching the criteria, in index order
    pub records: Vec<Record>,
    /// Total records in the index before filtering
    pub total: usize,
    /// Time spent loading the index in milliseconds (0 on cache hit)
    pub load_time_ms: u64,
    /// Whether the index came from cache
    pub cached: bool,
}

/// A page matched by [`IndexService::find_pages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHit {
    /// Page title
    pub title: String,
    /// Normalized path: leading `/` ensured, `.html` suffix stripped
    pub path: String,
    /// Card image, when the index has one
    pub image: Option<String>,
}

/// All pages matching a path fragment, with the match count.
#[derive(Debug, Clone)]
pub struct PageMatches {
    /// Matching pages in merged-index order
    pub hits: Vec<PageHit>,
    /// Number of matches
    pub total: usize,
}

/// Main service: owns an index source, the cache, and the configuration.
pub struct IndexService {
    source: Arc<dyn IndexSource>,
    cache: IndexCache,
    config: IndexConfig,
}

impl IndexService {
    /// Create a service backed by HTTP fetches of `config.base_url`.
    pub fn new(config: IndexConfig) -> Result<Self, IndexError> {
        let source = Arc::new(HttpIndexSource::new(&config)?);
        Ok(Self::with_source(config, source))
    }

    /// Create a service with a caller-supplied source.
    pub fn with_source(config: IndexConfig, source: Arc<dyn IndexSource>) -> Self {
        debug!("Index service using {} source", source.name());
        let cache = IndexCache::new(config.max_cached_indices);
        Self {
            source,
            cache,
            config,
        }
    }

    /// Load (or reuse) the index at `path` and filter it.
    pub async fn query(
        &self,
        path: &str,
        criteria: &Criteria,
    ) -> Result<IndexResponse, IndexError> {
        let start = Instant::now();
        let (records, cached) = self.records_for(path).await?;
        let load_time_ms = if cached {
            0
        } else {
            start.elapsed().as_millis() as u64
        };

        let matched = criteria.filter(&records);
        info!(
            "Index query on {}: {} of {} records matched ({}, {}ms)",
            path,
            matched.len(),
            records.len(),
            if cached { "cached" } else { "loaded" },
            load_time_ms
        );

        Ok(IndexResponse {
            path: path.to_string(),
            total: records.len(),
            records: matched,
            load_time_ms,
            cached,
        })
    }

    /// Query the configured blog post index.
    pub async fn blog_posts(&self, criteria: &Criteria) -> Result<IndexResponse, IndexError> {
        let path = self.config.blog_index_path.clone();
        self.query(&path, criteria).await
    }

    /// Load the configured pricing feature index.
    pub async fn pricing_features(&self) -> Result<Arc<Vec<Record>>, IndexError> {
        let path = self.config.pricing_index_path.clone();
        let (records, _) = self.records_for(&path).await?;
        Ok(records)
    }

    /// Load several index shards concurrently and merge them.
    ///
    /// Each shard is sorted by its `path` field; shards are concatenated in
    /// the order given, so the merged result is deterministic. Any shard
    /// failure fails the whole merge.
    pub async fn load_merged(&self, paths: &[String]) -> Result<Vec<Record>, IndexError> {
        let loads: Vec<_> = paths.iter().map(|path| self.records_for(path)).collect();

        let mut merged = Vec::new();
        for (path, result) in paths.iter().zip(futures::future::join_all(loads).await) {
            let (records, _) = result.map_err(|e| {
                warn!("Index shard {} failed to load: {}", path, e);
                e
            })?;
            debug!("Index shard {}: {} records", path, records.len());

            let mut shard: Vec<Record> = records.as_ref().clone();
            shard.sort_by(|a, b| a.path().unwrap_or("").cmp(b.path().unwrap_or("")));
            merged.extend(shard);
        }
        Ok(merged)
    }

    /// Find pages whose `path` contains `fragment` across the given shards.
    ///
    /// The fragment match is case-sensitive, unlike [`Criteria`] matching.
    /// An empty fragment matches every page.
    pub async fn find_pages(
        &self,
        paths: &[String],
        fragment: &str,
    ) -> Result<PageMatches, IndexError> {
        let merged = self.load_merged(paths).await?;

        let hits: Vec<PageHit> = merged
            .iter()
            .filter(|record| record.path().is_some_and(|p| p.contains(fragment)))
            .map(|record| {
                let raw = record.path().unwrap_or_default();
                PageHit {
                    title: record.field("title").unwrap_or(raw).to_string(),
                    path: normalize_page_path(raw),
                    image: record.field("image").map(str::to_string),
                }
            })
            .collect();

        Ok(PageMatches {
            total: hits.len(),
            hits,
        })
    }

    /// Get cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Drop every cached index.
    pub fn clear_cache(&self) {
        self.cache.clear()
    }

    async fn records_for(&self, path: &str) -> Result<(Arc<Vec<Record>>, bool), IndexError> {
        self.cache
            .get_or_load(path, || self.source.load(path))
            .await
    }
}

/// Ensure a leading `/` and strip the first `.html` occurrence, the way the
/// published card links are built.
fn normalize_page_path(path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    path.replacen(".html", "", 1)
}
