//! Report assembly
//!
//! Collects per-host findings into a [`Report`]. No policy logic lives here.

use crate::models::{HostFindings, Report};
use crate::utils::ReportError;
use std::collections::BTreeMap;

/// Build a report from host identifier / findings pairs.
///
/// Fails on an empty host identifier or a host supplied twice.
pub fn assemble<I, S>(host_findings: I) -> Result<Report, ReportError>
where
    I: IntoIterator<Item = (S, HostFindings)>,
    S: Into<String>,
{
    let mut hosts = BTreeMap::new();
    for (host, findings) in host_findings {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(ReportError::EmptyHost);
        }
        if hosts.contains_key(&host) {
            return Err(ReportError::DuplicateHost { host });
        }
        hosts.insert(host, findings);
    }
    Ok(Report::from_map(hosts))
}
