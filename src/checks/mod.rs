//! Policy checks for tls-policy-audit
//!
//! Each check inspects one aspect of a normalized scan and returns a
//! [`Finding`] only when the policy is violated. The [`PolicyEvaluator`] runs
//! every check and collects the sparse result.

pub mod certificate;
pub mod features;
pub mod protocol;

use crate::config::SecurityPolicy;
use crate::models::{CheckName, Finding, HostFindings, ScanResult};
use crate::reference::CipherReference;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Everything a check may look at
pub struct CheckContext<'a> {
    pub scan: &'a ScanResult,
    pub policy: &'a SecurityPolicy,
    pub reference: &'a CipherReference,
    pub now: DateTime<Utc>,
}

/// Runs the check battery against scans using one policy and reference.
///
/// Holding the loaded reference is what allows evaluation, so a run cannot
/// reach the cipher check without a successful reference load.
#[derive(Clone)]
pub struct PolicyEvaluator {
    policy: SecurityPolicy,
    reference: Arc<CipherReference>,
}

impl PolicyEvaluator {
    pub fn new(policy: SecurityPolicy, reference: Arc<CipherReference>) -> Self {
        Self { policy, reference }
    }

    /// Evaluate a scan against the current wall-clock time
    pub fn evaluate(&self, scan: &ScanResult) -> HostFindings {
        self.evaluate_at(scan, Utc::now())
    }

    /// Evaluate a scan as of `now`
    pub fn evaluate_at(&self, scan: &ScanResult, now: DateTime<Utc>) -> HostFindings {
        let ctx = CheckContext {
            scan,
            policy: &self.policy,
            reference: &self.reference,
            now,
        };

        let mut findings = HostFindings::new();
        for name in CheckName::ALL {
            if let Some(finding) = run_check(name, &ctx) {
                tracing::debug!("{}: {} -> {}", scan.host, name, finding);
                findings.insert(name, finding);
            }
        }
        findings
    }
}

/// Run a single check
pub fn run_check(name: CheckName, ctx: &CheckContext<'_>) -> Option<Finding> {
    match name {
        CheckName::ValidCert => certificate::validity(ctx),
        CheckName::PkCheck => certificate::public_key(ctx),
        CheckName::IsExpiring => certificate::expiry(ctx),
        CheckName::SelfSigned => certificate::self_signed(ctx),
        CheckName::VersionsCheck => protocol::disallowed_versions(ctx),
        CheckName::CiphersCheck => protocol::weak_ciphers(ctx),
        CheckName::RenegotiationSupport => features::renegotiation(ctx),
        CheckName::CompressionSupport => features::compression(ctx),
        CheckName::HeartbleedVulnerability => features::heartbleed(ctx),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::SecurityPolicy;
    use crate::models::{CertificateInfo, CipherEntry, ScanResult};
    use crate::reference::CipherReference;
    use chrono::{TimeZone, Utc};

    pub fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    pub fn certificate() -> CertificateInfo {
        CertificateInfo {
            not_valid_before: None,
            not_valid_after: None,
            expired: false,
            self_signed: false,
            public_key: None,
            subject: None,
            issuer: None,
        }
    }

    pub fn scan(ciphers: &[(&str, &str)]) -> ScanResult {
        ScanResult::new(
            "example.com",
            certificate(),
            ciphers
                .iter()
                .map(|(v, c)| CipherEntry::new(*v, *c))
                .collect(),
        )
    }

    pub fn policy() -> SecurityPolicy {
        SecurityPolicy::new(["TLSv1.2", "TLSv1.3"], ["A", "B"])
    }

    pub fn reference() -> CipherReference {
        CipherReference::new()
            .with_tier("A", ["AES256"])
            .with_tier("B", ["AES128"])
    }
}
