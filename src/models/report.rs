//! Audit report types

use super::{CheckName, Finding};
use serde::Serialize;
use std::collections::BTreeMap;

/// Findings for a single host, keyed by check
pub type HostFindings = BTreeMap<CheckName, Finding>;

/// Findings for every evaluated host
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    hosts: BTreeMap<String, HostFindings>,
}

impl Report {
    pub(crate) fn from_map(hosts: BTreeMap<String, HostFindings>) -> Self {
        Self { hosts }
    }

    /// Findings recorded for `host`, if it was evaluated
    pub fn host(&self, host: &str) -> Option<&HostFindings> {
        self.hosts.get(host)
    }

    pub fn hosts(&self) -> impl Iterator<Item = (&String, &HostFindings)> {
        self.hosts.iter()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Total number of findings across all hosts
    pub fn finding_count(&self) -> usize {
        self.hosts.values().map(|f| f.len()).sum()
    }

    pub fn has_findings(&self) -> bool {
        self.finding_count() > 0
    }
}
