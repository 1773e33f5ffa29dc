// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Path-derived page metadata and legacy link rewriting

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

/// Page classes inferred from a page path. A path can be both a make page
/// and a blog page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageKind {
    /// The path sits under `/make/`
    pub make: bool,
    /// The path carries a `/2###/` year segment
    pub blog: bool,
}

impl PageKind {
    /// Classify a page path.
    pub fn from_path(path: &str) -> Self {
        Self {
            make: path.contains("/make/"),
            blog: year_pattern().is_match(path),
        }
    }
}

/// Rewrite a link into the legacy blog host to a local path.
///
/// `https://legacy.example/2019/post/` becomes `/2019/post`. Returns `None`
/// for links outside the legacy origin.
pub fn rewrite_legacy_url(href: &str, legacy_origin: &str) -> Option<String> {
    let origin = legacy_origin.trim_end_matches('/');
    let rest = href.strip_prefix(origin)?;
    if !rest.is_empty() && !rest.starts_with('/') {
        // "https://legacy.example.extra" is not under the legacy origin.
        return None;
    }
    Some(format!("/{}", rest.trim_matches('/')))
}

/// Blog byline parsed from the authored "by ..." and "posted on MM-DD-YYYY"
/// lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Byline {
    /// Author name
    pub author: String,
    /// Publication date
    pub posted: NaiveDate,
}

impl Byline {
    /// Find the byline in a page's paragraph texts.
    ///
    /// The first paragraph starting with "by " names the author; the first
    /// starting with "posted on " carries the date. Both prefixes are
    /// case-insensitive. Returns `None` unless both are present and the date
    /// parses.
    pub fn parse<'a, I>(paragraphs: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut author = None;
        let mut posted = None;

        for text in paragraphs {
            let lower = text.to_lowercase();
            if author.is_none() && lower.starts_with("by ") {
                author = Some(text[3..].trim().to_string());
            }
            if posted.is_none() && lower.starts_with("posted on ") {
                posted = NaiveDate::parse_from_str(text[10..].trim(), "%m-%d-%Y").ok();
            }
        }

        Some(Self {
            author: author?,
            posted: posted?,
        })
    }

    /// Long-form date, e.g. "January 5, 2021".
    pub fn long_date(&self) -> String {
        self.posted.format("%B %-d, %Y").to_string()
    }
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"/20\d\d/").expect("year pattern is valid"))
}
