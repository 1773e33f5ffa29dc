// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Typed tutorial records with tag and category filtering
//!
//! Tutorials are authored with explicit tag and category lists, so their
//! filters use exact membership rather than the substring matching of
//! [`crate::filter::Criteria`]: a tutorial is kept iff **every** selected
//! tag is present.

use serde::{Deserialize, Serialize};

/// One authored tutorial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    /// Tutorial title
    pub title: String,
    /// Link to the tutorial video or page
    pub link: String,
    /// Authored duration text (e.g. "5 min")
    pub time: String,
    /// Tags the tutorial was authored with
    #[serde(default)]
    pub tags: Vec<String>,
    /// Categories the tutorial appears under
    #[serde(default)]
    pub categories: Vec<String>,
    /// Card image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Tutorials belonging to `category`, in input order.
pub fn by_category<'a>(tutorials: &'a [Tutorial], category: &str) -> Vec<&'a Tutorial> {
    tutorials
        .iter()
        .filter(|tutorial| tutorial.categories.iter().any(|c| c == category))
        .collect()
}

/// Tutorials carrying every selected tag, in input order.
///
/// With no selected tags every tutorial is returned.
pub fn with_tags<'a>(tutorials: &'a [Tutorial], selected: &[String]) -> Vec<&'a Tutorial> {
    tutorials
        .iter()
        .filter(|tutorial| selected.iter().all(|tag| tutorial.tags.contains(tag)))
        .collect()
}

/// Every distinct tag across `tutorials`, in first-seen order.
pub fn all_tags(tutorials: &[Tutorial]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tutorial in tutorials {
        for tag in &tutorial.tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
    }
    tags
}
