// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Content index fetching, caching, and filtering
//!
//! Content-authored sites publish their page inventory as JSON indices
//! (`{ "data": [ ... ] }`). This crate loads those indices over HTTP, caches
//! them per process with single-flight loads, and filters the records with
//! per-field substring criteria. It also carries the light personalization
//! logic that rides along with index-driven pages: A/B test bucketing and
//! path-derived page metadata.
//!
//! Key pieces:
//! - [`filter::Criteria`]: AND across fields, OR within a field,
//!   case-insensitive substring matching, stable output order
//! - [`source::IndexSource`]: injectable record source (HTTP or in-memory)
//! - [`cache::IndexCache`]: at most one in-flight load per index path
//! - [`service::IndexService`]: orchestration of loading, caching, filtering
//! - [`experiments`]: traffic-band A/B bucketing with eligibility gating
//! - [`tutorials`], [`metadata`]: typed record filters and page metadata

pub mod cache;
pub mod config;
pub mod experiments;
pub mod filter;
pub mod metadata;
pub mod service;
pub mod source;
pub mod tutorials;
pub mod types;

// Re-export commonly used types
pub use cache::{CacheStats, IndexCache};
pub use config::IndexConfig;
pub use filter::Criteria;
pub use service::{IndexResponse, IndexService, PageHit, PageMatches};
pub use source::{HttpIndexSource, IndexSource, StaticIndexSource};
pub use types::{IndexDocument, IndexError, Record};
