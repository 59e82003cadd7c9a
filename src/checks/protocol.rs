//! Protocol version and cipher suite checks

use super::CheckContext;
use crate::models::Finding;
use std::collections::BTreeMap;

/// Observed protocol versions missing from the policy's allow-list
pub fn disallowed_versions(ctx: &CheckContext<'_>) -> Option<Finding> {
    let disallowed: Vec<String> = ctx
        .scan
        .ciphers_by_version()
        .keys()
        .filter(|version| !ctx.policy.allows_version(version))
        .cloned()
        .collect();

    if disallowed.is_empty() {
        None
    } else {
        Some(Finding::Versions(disallowed))
    }
}

/// Ciphers not listed in any of the policy's acceptable tiers, per version
pub fn weak_ciphers(ctx: &CheckContext<'_>) -> Option<Finding> {
    let mut weak = BTreeMap::new();
    for (version, ciphers) in ctx.scan.ciphers_by_version() {
        let rejected: Vec<String> = ciphers
            .iter()
            .filter(|cipher| {
                !ctx
                    .reference
                    .is_acceptable(cipher, &ctx.policy.cipher_levels)
            })
            .cloned()
            .collect();
        if !rejected.is_empty() {
            weak.insert(version.clone(), rejected);
        }
    }

    if weak.is_empty() {
        None
    } else {
        Some(Finding::WeakCiphers(weak))
    }
}
