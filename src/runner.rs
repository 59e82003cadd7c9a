//! Audit orchestration engine
//!
//! Loads the cipher reference, scans and evaluates every host on a bounded
//! pool, and assembles the report. Frontends observe progress through
//! [`AuditEvent`]s.

use crate::checks::PolicyEvaluator;
use crate::config::{SecurityPolicy, Settings};
use crate::models::{HostFindings, Report};
use crate::reference::CipherReferenceLoader;
use crate::report::assemble;
use crate::scan::{self, Scanner};
use crate::utils::{AuditError, ScanError};
use futures::stream::{self, StreamExt};
use std::collections::{BTreeMap, BTreeSet};

/// Configuration for an audit run
pub struct AuditConfig {
    pub hosts: Vec<String>,
    pub policy: SecurityPolicy,
    pub parallel: usize,
}

impl AuditConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            hosts: settings.hosts.clone(),
            policy: settings.policy.clone(),
            parallel: settings.run.parallel,
        }
    }
}

/// Events emitted during an audit
pub enum AuditEvent<'a> {
    ReferenceLoaded { tiers: usize },
    HostStarted { host: &'a str },
    HostComplete { host: &'a str, findings: usize },
    HostFailed { host: &'a str, error: &'a ScanError },
}

/// Report plus the hosts that could not be evaluated
pub struct AuditOutcome {
    pub report: Report,
    pub errors: BTreeMap<String, ScanError>,
}

impl AuditOutcome {
    /// No findings and no failed hosts
    pub fn is_clean(&self) -> bool {
        !self.report.has_findings() && self.errors.is_empty()
    }
}

/// Scan, normalize and evaluate one host
pub async fn evaluate_host(
    scanner: &dyn Scanner,
    evaluator: &PolicyEvaluator,
    host: &str,
) -> Result<HostFindings, ScanError> {
    let raw = scanner.scan(host).await?;
    let scan = scan::normalize(&raw)?;
    Ok(evaluator.evaluate(&scan))
}

fn unique_hosts(hosts: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    hosts
        .iter()
        .filter(|h| {
            let fresh = seen.insert(h.as_str());
            if !fresh {
                tracing::warn!("Ignoring duplicate host {}", h);
            }
            fresh
        })
        .cloned()
        .collect()
}

/// Run the audit.
///
/// A reference failure aborts before any host is evaluated. Scan failures are
/// collected per host and do not stop the run.
pub async fn run_audit(
    config: AuditConfig,
    loader: &CipherReferenceLoader,
    scanner: &dyn Scanner,
    on_event: &(dyn Fn(AuditEvent<'_>) + Sync),
) -> Result<AuditOutcome, AuditError> {
    let reference = loader.load().await?;
    on_event(AuditEvent::ReferenceLoaded {
        tiers: reference.len(),
    });

    let evaluator = PolicyEvaluator::new(config.policy, reference);
    let hosts = unique_hosts(&config.hosts);
    tracing::info!(
        "Auditing {} hosts with {} workers",
        hosts.len(),
        config.parallel.max(1)
    );

    let results: Vec<(String, Result<HostFindings, ScanError>)> = stream::iter(hosts)
        .map(|host| {
            let evaluator = &evaluator;
            async move {
                on_event(AuditEvent::HostStarted { host: &host });
                let result = evaluate_host(scanner, evaluator, &host).await;
                match &result {
                    Ok(findings) => on_event(AuditEvent::HostComplete {
                        host: &host,
                        findings: findings.len(),
                    }),
                    Err(error) => {
                        tracing::warn!("Skipping {}: {}", host, error);
                        on_event(AuditEvent::HostFailed { host: &host, error });
                    }
                }
                (host, result)
            }
        })
        .buffer_unordered(config.parallel.max(1))
        .collect()
        .await;

    let mut evaluated = Vec::new();
    let mut errors = BTreeMap::new();
    for (host, result) in results {
        match result {
            Ok(findings) => evaluated.push((host, findings)),
            Err(e) => {
                errors.insert(host, e);
            }
        }
    }

    let report = assemble(evaluated)?;
    Ok(AuditOutcome { report, errors })
}

/// Run the audit described by `settings` with its configured reference and scanner
pub async fn run_with_settings(
    settings: &Settings,
    on_event: &(dyn Fn(AuditEvent<'_>) + Sync),
) -> Result<AuditOutcome, AuditError> {
    settings.require_hosts()?;
    let loader = CipherReferenceLoader::from_settings(&settings.reference)?;
    let scanner = scan::scanner::from_settings(&settings.scanner);
    run_audit(
        AuditConfig::from_settings(settings),
        &loader,
        scanner.as_ref(),
        on_event,
    )
    .await
}
