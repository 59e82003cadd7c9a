//! Security policy configuration
//!
//! The policy arrives as a loosely written TOML table and is turned into a
//! strongly typed [`SecurityPolicy`] by [`SecurityPolicy::from_raw`], which
//! is the only place configuration values are validated.

use crate::utils::coerce::deserialize_flag;
use crate::utils::ConfigError;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Default number of days before expiry that triggers a warning
pub const DEFAULT_EXPIRE_WARNING_DAYS: i64 = 30;

/// Policy table as written in the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPolicy {
    #[serde(default, alias = "validityCheck", deserialize_with = "deserialize_flag")]
    pub validity_check: bool,
    #[serde(default, alias = "pkErrorExpected", deserialize_with = "deserialize_flag")]
    pub pk_error_expected: bool,
    #[serde(
        default,
        alias = "selfsigned",
        alias = "selfSignedAcceptable",
        deserialize_with = "deserialize_flag"
    )]
    pub self_signed_acceptable: bool,
    #[serde(
        default,
        alias = "mustSupportCompression",
        deserialize_with = "deserialize_flag"
    )]
    pub must_support_compression: bool,
    #[serde(
        default,
        alias = "mustSupportSecureRenegotiation",
        deserialize_with = "deserialize_flag"
    )]
    pub must_support_secure_renegotiation: bool,
    #[serde(default, alias = "tlsSecureVersions")]
    pub tls_secure_versions: Option<Vec<String>>,
    #[serde(default, alias = "cipherlevel", alias = "cipherLevels")]
    pub cipher_levels: Option<Vec<String>>,
    #[serde(default, alias = "expireWarningDays")]
    pub expire_warning_days: Option<i64>,
}

/// Validated security policy applied to every host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityPolicy {
    pub validity_check_enabled: bool,
    pub pk_error_expected: bool,
    pub self_signed_acceptable: bool,
    pub must_support_compression: bool,
    pub must_support_secure_renegotiation: bool,
    pub tls_secure_versions: BTreeSet<String>,
    /// Acceptable strength tiers, as labels or grade letters
    pub cipher_levels: Vec<String>,
    /// Carried with the policy; the expiry check reads the scan's own
    /// `expireAfterDays` instead
    pub expire_warning_days: i64,
}

impl SecurityPolicy {
    /// Policy with the required fields set and every toggle off
    pub fn new<V, L>(tls_secure_versions: V, cipher_levels: L) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            validity_check_enabled: false,
            pk_error_expected: false,
            self_signed_acceptable: false,
            must_support_compression: false,
            must_support_secure_renegotiation: false,
            tls_secure_versions: tls_secure_versions.into_iter().map(Into::into).collect(),
            cipher_levels: cipher_levels.into_iter().map(Into::into).collect(),
            expire_warning_days: DEFAULT_EXPIRE_WARNING_DAYS,
        }
    }

    /// Validate a raw policy table
    pub fn from_raw(raw: RawPolicy) -> Result<Self, ConfigError> {
        let tls_secure_versions = raw.tls_secure_versions.ok_or(ConfigError::MissingRequired {
            key: "policy.tls_secure_versions".to_string(),
        })?;
        let cipher_levels = raw.cipher_levels.ok_or(ConfigError::MissingRequired {
            key: "policy.cipher_levels".to_string(),
        })?;

        let cipher_levels: Vec<String> = cipher_levels
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if cipher_levels.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "policy.cipher_levels".to_string(),
                message: "at least one cipher level is required".to_string(),
            });
        }

        let expire_warning_days = raw
            .expire_warning_days
            .unwrap_or(DEFAULT_EXPIRE_WARNING_DAYS);
        if expire_warning_days < 0 {
            return Err(ConfigError::InvalidValue {
                key: "policy.expire_warning_days".to_string(),
                message: format!("must not be negative, got {}", expire_warning_days),
            });
        }

        Ok(Self {
            validity_check_enabled: raw.validity_check,
            pk_error_expected: raw.pk_error_expected,
            self_signed_acceptable: raw.self_signed_acceptable,
            must_support_compression: raw.must_support_compression,
            must_support_secure_renegotiation: raw.must_support_secure_renegotiation,
            tls_secure_versions: tls_secure_versions
                .into_iter()
                .map(|v| v.trim().to_string())
                .collect(),
            cipher_levels,
            expire_warning_days,
        })
    }

    pub fn allows_version(&self, version: &str) -> bool {
        self.tls_secure_versions.contains(version)
    }
}
