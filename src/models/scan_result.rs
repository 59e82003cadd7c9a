//! Canonical scan result types
//!
//! Produced once per host by the normalizer and never mutated afterwards,
//! apart from the lazily derived cipher-by-version view.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Protocol version label → cipher suites observed for it
pub type CipherByVersion = BTreeMap<String, BTreeSet<String>>;

/// Public key block reported alongside the leaf certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyInfo {
    pub error: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub key_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
}

/// Leaf certificate details as reported by the scanner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateInfo {
    pub not_valid_before: Option<DateTime<Utc>>,
    pub not_valid_after: Option<DateTime<Utc>>,
    pub expired: bool,
    pub self_signed: bool,
    pub public_key: Option<PublicKeyInfo>,
    pub subject: Option<String>,
    pub issuer: Option<String>,
}

impl CertificateInfo {
    /// Whether the scanner flagged a problem reading the public key
    pub fn pk_error(&self) -> bool {
        self.public_key.as_ref().map(|pk| pk.error).unwrap_or(false)
    }

    /// Fractional days from `now` until the certificate stops being valid
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> Option<f64> {
        self.not_valid_after
            .map(|after| (after - now).num_milliseconds() as f64 / 86_400_000.0)
    }
}

/// One accepted cipher suite for one protocol version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CipherEntry {
    pub ssl_version: String,
    pub cipher: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl CipherEntry {
    pub fn new(ssl_version: impl Into<String>, cipher: impl Into<String>) -> Self {
        Self {
            ssl_version: ssl_version.into(),
            cipher: cipher.into(),
            bits: None,
            status: None,
        }
    }
}

/// Heartbleed probe outcome for one protocol version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeartbleedCheck {
    pub ssl_version: String,
    pub vulnerable: bool,
}

/// Renegotiation support as reported by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenegotiationInfo {
    pub supported: bool,
    pub secure: bool,
}

/// Normalized scan of a single host
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub host: String,
    pub certificate: CertificateInfo,
    pub ciphers: Vec<CipherEntry>,
    pub heartbleed: Vec<HeartbleedCheck>,
    pub renegotiation: Option<RenegotiationInfo>,
    pub compression_supported: bool,
    /// Expiry warning threshold carried inside the scan document
    pub expire_after_days: Option<i64>,
    #[serde(skip)]
    by_version: OnceLock<CipherByVersion>,
}

impl ScanResult {
    pub fn new(
        host: impl Into<String>,
        certificate: CertificateInfo,
        ciphers: Vec<CipherEntry>,
    ) -> Self {
        Self {
            host: host.into(),
            certificate,
            ciphers,
            heartbleed: Vec::new(),
            renegotiation: None,
            compression_supported: false,
            expire_after_days: None,
            by_version: OnceLock::new(),
        }
    }

    pub fn with_heartbleed(mut self, heartbleed: Vec<HeartbleedCheck>) -> Self {
        self.heartbleed = heartbleed;
        self
    }

    pub fn with_renegotiation(mut self, renegotiation: Option<RenegotiationInfo>) -> Self {
        self.renegotiation = renegotiation;
        self
    }

    pub fn with_compression(mut self, supported: bool) -> Self {
        self.compression_supported = supported;
        self
    }

    pub fn with_expire_after_days(mut self, days: Option<i64>) -> Self {
        self.expire_after_days = days;
        self
    }

    /// Ciphers grouped by protocol version, computed on first use
    pub fn ciphers_by_version(&self) -> &CipherByVersion {
        self.by_version.get_or_init(|| {
            let mut map = CipherByVersion::new();
            for entry in &self.ciphers {
                map.entry(entry.ssl_version.clone())
                    .or_default()
                    .insert(entry.cipher.clone());
            }
            map
        })
    }
}
