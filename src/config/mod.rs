//! Configuration module for tls-policy-audit
//!
//! Handles loading the host list and security policy from TOML files.

pub mod policy;
pub mod settings;

pub use policy::{RawPolicy, SecurityPolicy};
pub use settings::{ReferenceSettings, RunSettings, ScannerSettings, Settings};
