//! Data models for tls-policy-audit
//!
//! This module contains the canonical scan model, findings and the report.

pub mod finding;
pub mod report;
pub mod scan_result;

pub use finding::{CheckName, Finding};
pub use report::{HostFindings, Report};
pub use scan_result::{
    CertificateInfo, CipherByVersion, CipherEntry, HeartbleedCheck, PublicKeyInfo,
    RenegotiationInfo, ScanResult,
};
