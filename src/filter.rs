// Copyright (c) 2026 content-index contributors
// SPDX-License-Identifier: Apache-2.0
//! Content filter: per-field substring criteria over records
//!
//! A record is kept iff every criterion field matches (AND across fields),
//! where a field matches iff the record's value contains at least one of the
//! field's fragments, case-insensitively (OR within a field). The filter is
//! stable and pure.

use std::collections::BTreeMap;

use crate::types::Record;

/// Per-field sets of lowercase, trimmed substring fragments.
///
/// Built programmatically; every fragment is normalized on insertion so that
/// matching never has to re-normalize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    fields: BTreeMap<String, Vec<String>>,
}

impl Criteria {
    /// Empty criteria. Matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single-fragment criterion for `name`.
    pub fn field(self, name: impl Into<String>, fragment: impl AsRef<str>) -> Self {
        self.field_any(name, [fragment])
    }

    /// Add a criterion for `name` with several alternative fragments.
    pub fn field_any<I, S>(mut self, name: impl Into<String>, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.fields.entry(name.into()).or_default();
        for fragment in fragments {
            entry.push(normalize(fragment.as_ref()));
        }
        self
    }

    /// Whether no criterion fields are set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Test a single record against all criterion fields.
    ///
    /// A record that lacks a criterion field does not match; absence is not
    /// an error.
    pub fn matches(&self, record: &Record) -> bool {
        self.fields.iter().all(|(name, fragments)| {
            let Some(value) = record.field(name) else {
                return false;
            };
            let value = value.to_lowercase();
            fragments.iter().any(|fragment| value.contains(fragment))
        })
    }

    /// Filter `records`, preserving relative order.
    pub fn filter(&self, records: &[Record]) -> Vec<Record> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Criteria
where
    K: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |criteria, (name, fragment)| {
                criteria.field(name, fragment)
            })
    }
}

fn normalize(fragment: &str) -> String {
    fragment.trim().to_lowercase()
}
