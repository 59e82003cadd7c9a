//! Custom error types for tls-policy-audit
//!
//! This module defines domain-specific error types using `thiserror` for
//! the failure modes of an audit run. Reference and configuration errors
//! abort the run; scan errors only abort the affected host.

use thiserror::Error;

/// Top-level error type for an audit run
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Cipher reference error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Failures fetching or parsing the cipher strength reference
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Failed to fetch cipher reference from {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Cipher reference request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Cipher reference request to {url} timed out")]
    Timeout { url: String },

    #[error("Cipher reference document has no usable tier table: {message}")]
    Parse { message: String },

    #[error("Failed to read cipher dataset {path}: {message}")]
    Dataset { path: String, message: String },
}

/// Failures turning raw scanner output into a scan result
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Malformed scan result: {message}")]
    Malformed { message: String },

    #[error("Scan result is missing required field: {field}")]
    MissingField { field: String },

    #[error("Scanner failed for {host}: {message}")]
    ScannerFailed { host: String, message: String },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },
}

/// Report assembly and output errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Host {host} appears more than once")]
    DuplicateHost { host: String },

    #[error("Findings supplied without a host identifier")]
    EmptyHost,

    #[error("Failed to write report to {path}: {message}")]
    WriteError { path: String, message: String },

    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },
}

impl ReferenceError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ReferenceError::Timeout {
                url: url.to_string(),
            }
        } else {
            ReferenceError::Fetch {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;
