//! Cipher strength reference
//!
//! Maps strength tier labels (Advanced, Broad Compatibility, ...) to the
//! cipher suites that belong to them. The reference is fetched once per run
//! through a [`CipherReferenceLoader`] and shared read-only by every host.

pub mod cheat_sheet;
pub mod dataset;
pub mod loader;

pub use cheat_sheet::{parse_tier_table, CheatSheetSource};
pub use dataset::{FileSource, StaticSource};
pub use loader::{CipherReferenceLoader, ReferenceSource};

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Grade letters used in policies and the tier labels they stand for
pub const GRADE_LABELS: [(&str, &str); 4] = [
    ("A", "Advanced"),
    ("B", "Broad Compatibility"),
    ("C", "Widest Compatibility"),
    ("D", "Legacy"),
];

/// Resolve a grade letter to its tier label; other values pass through
pub fn resolve_level(level: &str) -> &str {
    let level = level.trim();
    GRADE_LABELS
        .iter()
        .find(|(grade, _)| grade.eq_ignore_ascii_case(level))
        .map(|(_, label)| *label)
        .unwrap_or(level)
}

/// Strength tier label → cipher suites in that tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CipherReference {
    tiers: BTreeMap<String, BTreeSet<String>>,
}

impl CipherReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add ciphers to a tier, creating it if needed
    pub fn insert<I, S>(&mut self, label: &str, ciphers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let label = label.split_whitespace().collect::<Vec<_>>().join(" ");
        self.tiers
            .entry(label)
            .or_default()
            .extend(ciphers.into_iter().map(Into::into));
    }

    pub fn with_tier<I, S>(mut self, label: &str, ciphers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(label, ciphers);
        self
    }

    /// Ciphers for a policy level.
    ///
    /// The level matches a tier label exactly, through its grade letter, or
    /// as the label prefix of a tier written like `Advanced (A)`.
    pub fn tier(&self, level: &str) -> Option<&BTreeSet<String>> {
        let level = level.trim();
        if let Some(ciphers) = self.tiers.get(level) {
            return Some(ciphers);
        }
        let label = resolve_level(level);
        if let Some(ciphers) = self.tiers.get(label) {
            return Some(ciphers);
        }
        self.tiers
            .iter()
            .find(|(key, _)| {
                key.strip_prefix(label)
                    .map(|rest| rest.trim_start().starts_with('('))
                    .unwrap_or(false)
            })
            .map(|(_, ciphers)| ciphers)
    }

    /// A cipher is acceptable when any selected tier lists it
    pub fn is_acceptable(&self, cipher: &str, levels: &[String]) -> bool {
        levels
            .iter()
            .filter_map(|level| self.tier(level))
            .any(|ciphers| ciphers.contains(cipher))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
