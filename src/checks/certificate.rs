//! Certificate checks
//!
//! The boolean conditions here are kept exactly as the audit has always
//! evaluated them, including the ones that read inverted; see the tests for
//! the behaviour each one pins.

use super::CheckContext;
use crate::models::Finding;

/// Certificate validity.
///
/// With the check enabled, a certificate only passes when the scanner
/// flagged it expired and the current time is past its start date. A missing
/// start date only matters for an expired certificate.
pub fn validity(ctx: &CheckContext<'_>) -> Option<Finding> {
    if !ctx.policy.validity_check_enabled {
        return None;
    }
    let cert = &ctx.scan.certificate;
    let passes = cert.expired && cert.not_valid_before.map_or(false, |nb| ctx.now > nb);
    if passes {
        None
    } else {
        Some(Finding::Flag(false))
    }
}

/// Public key error flag against the policy expectation
pub fn public_key(ctx: &CheckContext<'_>) -> Option<Finding> {
    let pk = ctx.scan.certificate.public_key.as_ref()?;
    let expected = ctx.policy.pk_error_expected;
    if pk.error && expected && pk.error == expected {
        None
    } else {
        Some(Finding::PublicKey(pk.clone()))
    }
}

/// Days until expiry below the threshold embedded in the scan.
///
/// A scan without `expireAfterDays` uses a threshold of zero, so only
/// certificates already past their end date are reported.
pub fn expiry(ctx: &CheckContext<'_>) -> Option<Finding> {
    let days = ctx.scan.certificate.days_until_expiry(ctx.now)?;
    let threshold = ctx.scan.expire_after_days.unwrap_or(0);
    if days < threshold as f64 {
        Some(Finding::DaysRemaining(days))
    } else {
        None
    }
}

pub fn self_signed(ctx: &CheckContext<'_>) -> Option<Finding> {
    let flag = ctx.scan.certificate.self_signed;
    if flag && ctx.policy.self_signed_acceptable {
        None
    } else {
        Some(Finding::Text(flag.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::*;
    use crate::models::PublicKeyInfo;
    use chrono::Duration;

    fn run(
        check: fn(&CheckContext<'_>) -> Option<Finding>,
        scan: &crate::models::ScanResult,
        policy: &crate::config::SecurityPolicy,
    ) -> Option<Finding> {
        let reference = reference();
        let ctx = CheckContext {
            scan,
            policy,
            reference: &reference,
            now: now(),
        };
        check(&ctx)
    }

    #[test]
    fn test_validity_disabled() {
        let scan = scan(&[("TLSv1.2", "AES256")]);
        assert_eq!(run(validity, &scan, &policy()), None);
    }

    #[test]
    fn test_validity_unexpired_certificate_is_reported() {
        let mut policy = policy();
        policy.validity_check_enabled = true;
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        scan.certificate.not_valid_before = Some(now() - Duration::days(10));
        scan.certificate.expired = false;
        assert_eq!(run(validity, &scan, &policy), Some(Finding::Flag(false)));
    }

    #[test]
    fn test_validity_expired_and_started_passes() {
        let mut policy = policy();
        policy.validity_check_enabled = true;
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        scan.certificate.not_valid_before = Some(now() - Duration::days(10));
        scan.certificate.expired = true;
        assert_eq!(run(validity, &scan, &policy), None);

        scan.certificate.not_valid_before = Some(now() + Duration::days(1));
        assert_eq!(run(validity, &scan, &policy), Some(Finding::Flag(false)));
    }

    #[test]
    fn test_validity_without_start_date() {
        let mut policy = policy();
        policy.validity_check_enabled = true;
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        assert_eq!(scan.certificate.not_valid_before, None);

        scan.certificate.expired = false;
        assert_eq!(run(validity, &scan, &policy), Some(Finding::Flag(false)));

        scan.certificate.expired = true;
        assert_eq!(run(validity, &scan, &policy), Some(Finding::Flag(false)));
    }

    #[test]
    fn test_public_key() {
        let pk = PublicKeyInfo {
            error: false,
            key_type: Some("RSA".to_string()),
            bits: Some(2048),
        };
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        let mut policy = policy();

        assert_eq!(run(public_key, &scan, &policy), None);

        scan.certificate.public_key = Some(pk.clone());
        assert_eq!(
            run(public_key, &scan, &policy),
            Some(Finding::PublicKey(pk.clone()))
        );

        scan.certificate.public_key = Some(PublicKeyInfo { error: true, ..pk });
        assert!(run(public_key, &scan, &policy).is_some());
        policy.pk_error_expected = true;
        assert_eq!(run(public_key, &scan, &policy), None);
    }

    #[test]
    fn test_expiry_uses_scan_threshold() {
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        scan.certificate.not_valid_after = Some(now() + Duration::days(5));

        let scan = scan.with_expire_after_days(Some(10));
        match run(expiry, &scan, &policy()) {
            Some(Finding::DaysRemaining(days)) => assert!((days - 5.0).abs() < 1e-6),
            other => panic!("unexpected {:?}", other),
        }

        let scan = scan.with_expire_after_days(Some(3));
        assert_eq!(run(expiry, &scan, &policy()), None);
    }

    #[test]
    fn test_expiry_without_scan_threshold_ignores_policy() {
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        scan.certificate.not_valid_after = Some(now() + Duration::days(20));
        let mut policy = policy();

        policy.expire_warning_days = 30;
        assert_eq!(run(expiry, &scan, &policy), None);

        scan.certificate.not_valid_after = Some(now() - Duration::hours(1));
        assert!(matches!(
            run(expiry, &scan, &policy),
            Some(Finding::DaysRemaining(days)) if days < 0.0
        ));
    }

    #[test]
    fn test_expiry_already_expired_is_negative() {
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        scan.certificate.not_valid_after = Some(now() - Duration::days(2));
        match run(expiry, &scan, &policy()) {
            Some(Finding::DaysRemaining(days)) => assert!(days < 0.0),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_self_signed_literal_condition() {
        let mut scan = scan(&[("TLSv1.2", "AES256")]);
        let mut policy = policy();

        // Self-signed and acceptable: the only combination without a finding.
        scan.certificate.self_signed = true;
        policy.self_signed_acceptable = true;
        assert_eq!(run(self_signed, &scan, &policy), None);

        policy.self_signed_acceptable = false;
        assert_eq!(
            run(self_signed, &scan, &policy),
            Some(Finding::Text("true".to_string()))
        );

        scan.certificate.self_signed = false;
        assert_eq!(
            run(self_signed, &scan, &policy),
            Some(Finding::Text("false".to_string()))
        );
    }
}
