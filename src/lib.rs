//! tls-policy-audit Library
//!
//! Evaluates sslscan results against a configurable TLS security policy:
//! - Normalizes sslscan XML into a typed scan model
//! - Classifies cipher suites using the OWASP cipher string tiers
//! - Runs certificate, protocol, cipher and vulnerability checks
//! - Assembles a per-host findings report
//!
//! # Usage
//!
//! ```rust,ignore
//! use tls_policy_audit::checks::PolicyEvaluator;
//! use tls_policy_audit::config::Settings;
//! use tls_policy_audit::reference::CipherReferenceLoader;
//!
//! #[tokio::main]
//! async fn main() {
//!     let settings = Settings::load_default().unwrap();
//!     let loader = CipherReferenceLoader::from_settings(&settings.reference).unwrap();
//!     let evaluator = PolicyEvaluator::new(settings.policy, loader.load().await.unwrap());
//!     let scan = tls_policy_audit::scan::normalize(&std::fs::read_to_string("scan.xml").unwrap()).unwrap();
//!     let findings = evaluator.evaluate(&scan);
//! }
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod reference;
pub mod report;
pub mod runner;
pub mod scan;
pub mod utils;

// Re-export commonly used types
pub use checks::PolicyEvaluator;
pub use cli::Cli;
pub use config::{SecurityPolicy, Settings};
pub use models::{CheckName, Finding, Report, ScanResult};
pub use reference::{CipherReference, CipherReferenceLoader};
pub use utils::{AuditError, Result};
