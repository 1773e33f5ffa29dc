// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Per-path index caching with single-flight loads
//!
//! An index is fetched once on first use and held for the remainder of the
//! process. If several callers ask for the same path before the first load
//! completes, exactly one load runs and every caller awaits its result (the
//! per-entry `OnceCell` is the shared pending-load placeholder). Failed loads
//! are not cached; a later call retries.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Instant;

use tokio::sync::OnceCell;
use tracing::debug;

use crate::types::{IndexError, Record};

type RecordCell = Arc<OnceCell<Arc<Vec<Record>>>>;

struct CacheEntry {
    cell: RecordCell,
    inserted_at: Instant,
}

/// Cache of loaded indices, keyed by index path.
pub struct IndexCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    max_entries: usize,
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Total entries (loaded or with a load in flight)
    pub total: usize,
    /// Entries whose load has completed
    pub loaded: usize,
    /// Total records across loaded entries
    pub records: usize,
    /// Maximum cache capacity
    pub max: usize,
}

impl IndexCache {
    /// Create a cache holding at most `max_entries` distinct indices.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    /// Return the cached records for `path`, loading them with `load` on
    /// first use.
    ///
    /// The second tuple element is true when the records came from cache
    /// without running (or awaiting) a load.
    pub async fn get_or_load<F, Fut>(
        &self,
        path: &str,
        load: F,
    ) -> Result<(Arc<Vec<Record>>, bool), IndexError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Record>, IndexError>>,
    {
        let cell = self.entry_cell(path);

        if let Some(records) = cell.get() {
            debug!("Index cache hit: {}", path);
            return Ok((Arc::clone(records), true));
        }

        let records = cell
            .get_or_try_init(|| async { load().await.map(Arc::new) })
            .await?;

        Ok((Arc::clone(records), false))
    }

    /// Drop the entry for `path`, forcing a reload on next use.
    pub fn invalidate(&self, path: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(path);
        }
    }

    /// Drop all entries.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = match self.entries.read() {
            Ok(e) => e,
            Err(_) => {
                return CacheStats {
                    total: 0,
                    loaded: 0,
                    records: 0,
                    max: self.max_entries,
                }
            }
        };

        let loaded: Vec<_> = entries.values().filter_map(|e| e.cell.get()).collect();
        CacheStats {
            total: entries.len(),
            loaded: loaded.len(),
            records: loaded.iter().map(|r| r.len()).sum(),
            max: self.max_entries,
        }
    }

    /// Fetch or create the shared cell for `path`.
    fn entry_cell(&self, path: &str) -> RecordCell {
        let mut entries = match self.entries.write() {
            Ok(e) => e,
            // Poisoned lock: load without caching.
            Err(_) => return Arc::new(OnceCell::new()),
        };

        if let Some(entry) = entries.get(path) {
            return Arc::clone(&entry.cell);
        }

        if entries.len() >= self.max_entries {
            Self::evict_oldest(&mut entries);
        }

        let cell: RecordCell = Arc::new(OnceCell::new());
        entries.insert(
            path.to_string(),
            CacheEntry {
                cell: Arc::clone(&cell),
                inserted_at: Instant::now(),
            },
        );
        cell
    }

    fn evict_oldest(entries: &mut HashMap<String, CacheEntry>) {
        if let Some(oldest_key) = entries
            .iter()
            .min_by_key(|(_, e)| e.inserted_at)
            .map(|(k, _)| k.clone())
        {
            debug!("Index cache at capacity, evicting: {}", oldest_key);
            entries.remove(&oldest_key);
        }
    }
}
