//! Optional protocol features and known vulnerabilities

use super::CheckContext;
use crate::models::Finding;

/// Renegotiation flags unless the policy requires secure renegotiation and
/// the server supports it securely
pub fn renegotiation(ctx: &CheckContext<'_>) -> Option<Finding> {
    let reneg = ctx.scan.renegotiation?;
    if ctx.policy.must_support_secure_renegotiation && reneg.supported && reneg.secure {
        None
    } else {
        Some(Finding::Renegotiation(reneg))
    }
}

/// Reported when the policy flag is set and the server compresses
pub fn compression(ctx: &CheckContext<'_>) -> Option<Finding> {
    if ctx.policy.must_support_compression && ctx.scan.compression_supported {
        Some(Finding::Flag(true))
    } else {
        None
    }
}

/// Protocol versions whose heartbleed probe did not come back clean
pub fn heartbleed(ctx: &CheckContext<'_>) -> Option<Finding> {
    let vulnerable: Vec<String> = ctx
        .scan
        .heartbleed
        .iter()
        .filter(|check| check.vulnerable)
        .map(|check| check.ssl_version.clone())
        .collect();

    if vulnerable.is_empty() {
        None
    } else {
        Some(Finding::Versions(vulnerable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::*;
    use crate::config::SecurityPolicy;
    use crate::models::{HeartbleedCheck, RenegotiationInfo, ScanResult};

    fn check(
        f: fn(&CheckContext<'_>) -> Option<Finding>,
        scan: &ScanResult,
        policy: &SecurityPolicy,
    ) -> Option<Finding> {
        let reference = reference();
        f(&CheckContext {
            scan,
            policy,
            reference: &reference,
            now: now(),
        })
    }

    #[test]
    fn test_renegotiation() {
        let secure = RenegotiationInfo {
            supported: true,
            secure: true,
        };
        let insecure = RenegotiationInfo {
            supported: true,
            secure: false,
        };
        let mut policy = policy();

        let missing = scan(&[("TLSv1.2", "AES256")]);
        assert_eq!(check(renegotiation, &missing, &policy), None);

        let scan_secure = scan(&[("TLSv1.2", "AES256")]).with_renegotiation(Some(secure));
        let scan_insecure = scan(&[("TLSv1.2", "AES256")]).with_renegotiation(Some(insecure));

        // Without the policy requirement the flags are always reported.
        assert_eq!(
            check(renegotiation, &scan_secure, &policy),
            Some(Finding::Renegotiation(secure))
        );

        policy.must_support_secure_renegotiation = true;
        assert_eq!(check(renegotiation, &scan_secure, &policy), None);
        assert_eq!(
            check(renegotiation, &scan_insecure, &policy),
            Some(Finding::Renegotiation(insecure))
        );
    }

    #[test]
    fn test_compression() {
        let mut policy = policy();
        let compressing = scan(&[("TLSv1.2", "AES256")]).with_compression(true);
        let plain = scan(&[("TLSv1.2", "AES256")]);

        assert_eq!(check(compression, &compressing, &policy), None);

        policy.must_support_compression = true;
        assert_eq!(
            check(compression, &compressing, &policy),
            Some(Finding::Flag(true))
        );
        assert_eq!(check(compression, &plain, &policy), None);
    }

    #[test]
    fn test_heartbleed() {
        let records = vec![
            HeartbleedCheck {
                ssl_version: "TLSv1.0".to_string(),
                vulnerable: true,
            },
            HeartbleedCheck {
                ssl_version: "TLSv1.2".to_string(),
                vulnerable: false,
            },
        ];
        let vulnerable = scan(&[("TLSv1.2", "AES256")]).with_heartbleed(records);
        assert_eq!(
            check(heartbleed, &vulnerable, &policy()),
            Some(Finding::Versions(vec!["TLSv1.0".to_string()]))
        );

        let clean = scan(&[("TLSv1.2", "AES256")]);
        assert_eq!(check(heartbleed, &clean, &policy()), None);
    }
}
