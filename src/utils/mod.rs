//! Utility modules for tls-policy-audit
//!
//! This module contains error types and value coercion helpers.

pub mod coerce;
pub mod error;

pub use error::{AuditError, ConfigError, ReferenceError, ReportError, Result, ScanError};
