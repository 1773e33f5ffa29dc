// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Configuration for content index loading

use std::env;

/// Configuration for the index service.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Origin the indices are published under (scheme + host)
    pub base_url: String,
    /// Well-known path of the blog post index
    pub blog_index_path: String,
    /// Well-known path of the pricing feature index
    pub pricing_index_path: String,
    /// Per-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum number of distinct indices to hold in the cache
    pub max_cached_indices: usize,
}

impl IndexConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("CONTENT_INDEX_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            blog_index_path: env::var("CONTENT_INDEX_BLOG_PATH")
                .unwrap_or_else(|_| "/blog-index.json".to_string()),
            pricing_index_path: env::var("CONTENT_INDEX_PRICING_PATH")
                .unwrap_or_else(|_| "/pricing-features.json".to_string()),
            request_timeout_ms: env::var("CONTENT_INDEX_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10000),
            max_cached_indices: env::var("CONTENT_INDEX_MAX_CACHED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("base URL does not parse: {}", self.base_url));
        }
        if !self.blog_index_path.starts_with('/') {
            return Err("blog index path must start with '/'".to_string());
        }
        if !self.pricing_index_path.starts_with('/') {
            return Err("pricing index path must start with '/'".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("request timeout must be greater than 0".to_string());
        }
        if self.max_cached_indices == 0 {
            return Err("cache capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            blog_index_path: "/blog-index.json".to_string(),
            pricing_index_path: "/pricing-features.json".to_string(),
            request_timeout_ms: 10000,
            max_cached_indices: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.blog_index_path, "/blog-index.json");
        assert_eq!(config.pricing_index_path, "/pricing-features.json");
        assert_eq!(config.request_timeout_ms, 10000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_base_url() {
        let config = IndexConfig {
            base_url: "not a url".to_string(),
            ..IndexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_relative_index_path() {
        let config = IndexConfig {
            blog_index_path: "blog-index.json".to_string(),
            ..IndexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = IndexConfig {
            request_timeout_ms: 0,
            ..IndexConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_capacity() {
        let config = IndexConfig {
            max_cached_indices: 0,
            ..IndexConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
