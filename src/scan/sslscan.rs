//! sslscan XML normalizer
//!
//! Turns the document printed by `sslscan --xml=-` into a [`ScanResult`].
//! Both the 1.x layout (`<certificate>` directly under `<ssltest>`) and the
//! 2.x layout (`<certificates><certificate type="short">`) are accepted.

use crate::models::{
    CertificateInfo, CipherEntry, HeartbleedCheck, PublicKeyInfo, RenegotiationInfo, ScanResult,
};
use crate::utils::coerce::flag_or_false;
use crate::utils::ScanError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "ssltest", default)]
    tests: Vec<SslTest>,
}

#[derive(Debug, Deserialize)]
struct SslTest {
    #[serde(rename = "@host", default)]
    host: Option<String>,
    #[serde(rename = "@expireAfterDays", default)]
    expire_after_days_attr: Option<String>,
    #[serde(rename = "expireAfterDays", default)]
    expire_after_days: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(rename = "cipher", default)]
    ciphers: Vec<RawCipher>,
    #[serde(default)]
    heartbleed: Vec<RawHeartbleed>,
    #[serde(default)]
    renegotiation: Option<RawRenegotiation>,
    #[serde(default)]
    compression: Option<RawCompression>,
    #[serde(rename = "certificate", default)]
    certificate: Vec<RawCertificate>,
    #[serde(default)]
    certificates: Option<RawCertificates>,
}

#[derive(Debug, Deserialize)]
struct RawCipher {
    #[serde(rename = "@sslversion")]
    ssl_version: Option<String>,
    #[serde(rename = "@cipher")]
    cipher: Option<String>,
    #[serde(rename = "@bits", default)]
    bits: Option<String>,
    #[serde(rename = "@status", default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawHeartbleed {
    #[serde(rename = "@sslversion")]
    ssl_version: Option<String>,
    #[serde(rename = "@vulnerable", default)]
    vulnerable: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRenegotiation {
    #[serde(rename = "@supported", default)]
    supported: Option<String>,
    #[serde(rename = "@secure", default)]
    secure: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCompression {
    #[serde(rename = "@supported", default)]
    supported: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCertificates {
    #[serde(rename = "certificate", default)]
    certificate: Vec<RawCertificate>,
}

#[derive(Debug, Deserialize)]
struct RawCertificate {
    #[serde(rename = "@type", default)]
    kind: Option<String>,
    #[serde(default)]
    pk: Option<RawPk>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    issuer: Option<String>,
    #[serde(rename = "self-signed", default)]
    self_signed: Option<String>,
    #[serde(rename = "not-valid-before", default)]
    not_valid_before: Option<String>,
    #[serde(rename = "not-valid-after", default)]
    not_valid_after: Option<String>,
    #[serde(default)]
    expired: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPk {
    #[serde(rename = "@error", default)]
    error: Option<String>,
    #[serde(rename = "@type", default)]
    key_type: Option<String>,
    #[serde(rename = "@bits", default)]
    bits: Option<String>,
}

/// Parse a certificate date as printed by OpenSSL (`Mar  3 00:00:00 2020 GMT`),
/// falling back to RFC 3339.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if let Ok(dt) = NaiveDateTime::parse_from_str(&collapsed, "%b %d %H:%M:%S %Y GMT") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref().map(flag_or_false).unwrap_or(false)
}

fn number<T: std::str::FromStr>(value: &Option<String>) -> Option<T> {
    value.as_deref().and_then(|v| v.trim().parse().ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Normalize the first host of an sslscan XML document
pub fn normalize(raw: &str) -> Result<ScanResult, ScanError> {
    let document: Document = quick_xml::de::from_str(raw).map_err(|e| ScanError::Malformed {
        message: e.to_string(),
    })?;

    let mut tests = document.tests.into_iter();
    let test = tests.next().ok_or(ScanError::MissingField {
        field: "ssltest".to_string(),
    })?;
    if tests.next().is_some() {
        tracing::warn!("Scan document holds more than one host; only the first is evaluated");
    }
    normalize_test(test)
}

fn normalize_test(test: SslTest) -> Result<ScanResult, ScanError> {
    if let Some(error) = non_empty(test.error) {
        return Err(ScanError::Malformed { message: error });
    }

    let raw_cert = pick_certificate(test.certificate, test.certificates).ok_or(
        ScanError::MissingField {
            field: "certificate".to_string(),
        },
    )?;
    let certificate = normalize_certificate(raw_cert);

    let ciphers: Vec<CipherEntry> = test
        .ciphers
        .into_iter()
        .filter_map(|c| {
            let ssl_version = non_empty(c.ssl_version)?;
            let cipher = non_empty(c.cipher)?;
            Some(CipherEntry {
                ssl_version,
                cipher,
                bits: number(&c.bits),
                status: non_empty(c.status),
            })
        })
        .collect();
    if ciphers.is_empty() {
        return Err(ScanError::MissingField {
            field: "cipher".to_string(),
        });
    }

    let heartbleed = test
        .heartbleed
        .into_iter()
        .filter_map(|h| {
            let ssl_version = non_empty(h.ssl_version)?;
            // Anything but the "0" sentinel counts as vulnerable.
            let vulnerable = h.vulnerable.as_deref().map(str::trim) != Some("0");
            Some(HeartbleedCheck {
                ssl_version,
                vulnerable,
            })
        })
        .collect();

    let renegotiation = test.renegotiation.map(|r| RenegotiationInfo {
        supported: flag(&r.supported),
        secure: flag(&r.secure),
    });
    let compression = test
        .compression
        .map(|c| flag(&c.supported))
        .unwrap_or(false);

    let expire_after_days = number(&test.expire_after_days_attr).or(number(&test.expire_after_days));

    Ok(ScanResult::new(test.host.unwrap_or_default(), certificate, ciphers)
        .with_heartbleed(heartbleed)
        .with_renegotiation(renegotiation)
        .with_compression(compression)
        .with_expire_after_days(expire_after_days))
}

fn pick_certificate(
    direct: Vec<RawCertificate>,
    wrapped: Option<RawCertificates>,
) -> Option<RawCertificate> {
    let mut candidates = direct;
    if let Some(wrapped) = wrapped {
        candidates.extend(wrapped.certificate);
    }
    let short = candidates
        .iter()
        .position(|c| c.kind.as_deref() == Some("short"));
    match short {
        Some(idx) => Some(candidates.swap_remove(idx)),
        None => candidates.into_iter().next(),
    }
}

fn normalize_certificate(raw: RawCertificate) -> CertificateInfo {
    let not_valid_before = raw.not_valid_before.as_deref().and_then(parse_timestamp);
    let not_valid_after = raw.not_valid_after.as_deref().and_then(parse_timestamp);
    if raw.not_valid_after.is_some() && not_valid_after.is_none() {
        tracing::debug!("Unparseable not-valid-after date: {:?}", raw.not_valid_after);
    }

    CertificateInfo {
        not_valid_before,
        not_valid_after,
        expired: flag(&raw.expired),
        self_signed: flag(&raw.self_signed),
        public_key: raw.pk.map(|pk| PublicKeyInfo {
            error: flag(&pk.error),
            key_type: non_empty(pk.key_type),
            bits: number(&pk.bits),
        }),
        subject: non_empty(raw.subject),
        issuer: non_empty(raw.issuer),
    }
}
