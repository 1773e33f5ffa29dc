// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! A/B test bucketing
//!
//! An experiment is a list of variants with traffic fractions. A uniform
//! draw in `[0, 1)` walks the variants: each variant owns a band the size of
//! its traffic fraction, and a draw past every band falls through to the
//! control page. Eligibility is decided before bucketing: experiments run
//! only on the production host, are suppressed by a URL fragment or bot user
//! agents, and can be forced with the `?test` query.

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;
use tracing::debug;

/// One experiment variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Path of the variant page
    pub path: String,
    /// Fraction of traffic in `[0, 1]` routed to this variant
    pub traffic: f64,
}

/// An A/B test: a set of variants competing with the control page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Experiment {
    variants: Vec<Variant>,
}

impl Experiment {
    /// Build from explicit variants.
    pub fn new(variants: Vec<Variant>) -> Self {
        Self { variants }
    }

    /// Build from authored (path, percentage-text) rows.
    ///
    /// Rows whose percentage does not parse are skipped, matching how the
    /// authoring table is read.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let variants = rows
            .into_iter()
            .filter_map(|(path, percentage)| {
                let traffic = percentage.trim().parse::<f64>().ok()? / 100.0;
                Some(Variant {
                    path: path.to_string(),
                    traffic,
                })
            })
            .collect();
        Self { variants }
    }

    /// The configured variants.
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Select the variant owning the band that contains `draw`.
    ///
    /// `None` means the control page: the draw fell past every variant's
    /// band, or the experiment has no variants.
    pub fn pick(&self, draw: f64) -> Option<&Variant> {
        let mut remaining = draw;
        for variant in &self.variants {
            if (0.0..variant.traffic).contains(&remaining) {
                debug!("Variant selected: {}", variant.path);
                return Some(variant);
            }
            remaining -= variant.traffic;
        }
        None
    }

    /// Bucket with a fresh uniform draw.
    pub fn pick_random(&self) -> Option<&Variant> {
        self.pick(rand::thread_rng().gen::<f64>())
    }
}

/// Why an experiment did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The page is not served from the production host
    NotProductionHost,
    /// A URL fragment suppresses experiments
    SuppressedByFragment,
    /// The visitor looks like a crawler
    BotUserAgent,
}

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Skip::NotProductionHost => write!(f, "not prod host"),
            Skip::SuppressedByFragment => write!(f, "suppressed by #"),
            Skip::BotUserAgent => write!(f, "bot detected"),
        }
    }
}

/// The request context an eligibility decision is made from.
#[derive(Debug, Clone, Default)]
pub struct Audience {
    /// Host the page is served from
    pub host: String,
    /// Whether the URL carries a fragment
    pub has_fragment: bool,
    /// Raw query string, including the leading `?`
    pub query: String,
    /// Visitor user agent
    pub user_agent: String,
}

impl Audience {
    /// Decide whether an experiment may run for this visitor.
    ///
    /// Checks apply in order: production host, fragment suppression, `?test`
    /// force (which overrides the previous two), bot detection (which is
    /// never overridden).
    pub fn decide(&self, production_domain: &str) -> Result<(), Skip> {
        let mut run = true;
        let mut reason = Skip::NotProductionHost;

        if !self.host.contains(production_domain) {
            run = false;
            reason = Skip::NotProductionHost;
        }
        if self.has_fragment {
            run = false;
            reason = Skip::SuppressedByFragment;
        }
        if self.query == "?test" {
            run = true;
        }
        if bot_pattern().is_match(&self.user_agent) {
            run = false;
            reason = Skip::BotUserAgent;
        }

        if run {
            Ok(())
        } else {
            debug!("Test is not run => {}", reason);
            Err(reason)
        }
    }
}

/// Path of the plain (chrome-less) rendition of a variant page.
pub fn plain_page_path(path: &str) -> String {
    format!("{}.plain.html", path.replacen(".html", "", 1))
}

fn bot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)bot|crawl|spider").expect("bot pattern is valid"))
}
