//! Scan acquisition and normalization
//!
//! [`scanner`] obtains raw sslscan output for a host; [`sslscan`] turns that
//! output into the canonical [`ScanResult`](crate::models::ScanResult).

pub mod scanner;
pub mod sslscan;

pub use scanner::{CommandScanner, DirectoryScanner, Scanner};
pub use sslscan::{normalize, parse_timestamp};
