//! Policy findings

use super::{PublicKeyInfo, RenegotiationInfo};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a policy check, used as the key in a host's findings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    ValidCert,
    PkCheck,
    IsExpiring,
    #[serde(rename = "selfsigned")]
    SelfSigned,
    #[serde(rename = "versionsCheck")]
    VersionsCheck,
    #[serde(rename = "ciphersCheck")]
    CiphersCheck,
    RenegotiationSupport,
    CompressionSupport,
    // Established report key, spelling included
    #[serde(rename = "heartbleed_vurnerability")]
    HeartbleedVulnerability,
}

impl CheckName {
    /// All checks in evaluation order
    pub const ALL: [CheckName; 9] = [
        CheckName::ValidCert,
        CheckName::PkCheck,
        CheckName::IsExpiring,
        CheckName::SelfSigned,
        CheckName::VersionsCheck,
        CheckName::CiphersCheck,
        CheckName::RenegotiationSupport,
        CheckName::CompressionSupport,
        CheckName::HeartbleedVulnerability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckName::ValidCert => "valid_cert",
            CheckName::PkCheck => "pk_check",
            CheckName::IsExpiring => "is_expiring",
            CheckName::SelfSigned => "selfsigned",
            CheckName::VersionsCheck => "versionsCheck",
            CheckName::CiphersCheck => "ciphersCheck",
            CheckName::RenegotiationSupport => "renegotiation_support",
            CheckName::CompressionSupport => "compression_support",
            CheckName::HeartbleedVulnerability => "heartbleed_vurnerability",
        }
    }

    /// Short human description for terminal output
    pub fn description(&self) -> &'static str {
        match self {
            CheckName::ValidCert => "Certificate validity",
            CheckName::PkCheck => "Public key",
            CheckName::IsExpiring => "Certificate expiry",
            CheckName::SelfSigned => "Self-signed certificate",
            CheckName::VersionsCheck => "Disallowed protocol versions",
            CheckName::CiphersCheck => "Weak cipher suites",
            CheckName::RenegotiationSupport => "Secure renegotiation",
            CheckName::CompressionSupport => "TLS compression",
            CheckName::HeartbleedVulnerability => "Heartbleed",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload describing a detected violation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Finding {
    /// Certificate validity or compression flag
    Flag(bool),
    /// Public key block as reported
    PublicKey(PublicKeyInfo),
    /// Days until the certificate expires
    DaysRemaining(f64),
    /// A scanner value echoed back as text
    Text(String),
    /// Protocol versions (disallowed or vulnerable)
    Versions(Vec<String>),
    /// Weak ciphers per protocol version
    WeakCiphers(BTreeMap<String, Vec<String>>),
    /// Renegotiation flags as reported
    Renegotiation(RenegotiationInfo),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Flag(b) => write!(f, "{}", b),
            Finding::PublicKey(pk) => {
                write!(f, "error={}", pk.error)?;
                if let Some(t) = &pk.key_type {
                    write!(f, " type={}", t)?;
                }
                if let Some(bits) = pk.bits {
                    write!(f, " bits={}", bits)?;
                }
                Ok(())
            }
            Finding::DaysRemaining(d) => write!(f, "{:.1} days", d),
            Finding::Text(s) => write!(f, "{}", s),
            Finding::Versions(v) => write!(f, "{}", v.join(", ")),
            Finding::WeakCiphers(map) => {
                let parts: Vec<String> = map
                    .iter()
                    .map(|(version, ciphers)| format!("{}: {}", version, ciphers.join(", ")))
                    .collect();
                write!(f, "{}", parts.join("; "))
            }
            Finding::Renegotiation(r) => {
                write!(f, "supported={} secure={}", r.supported, r.secure)
            }
        }
    }
}
