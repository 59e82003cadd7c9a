//! JSON output formatter

use crate::models::Report;
use crate::runner::AuditOutcome;
use crate::utils::ReportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// JSON-serializable output structure
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub generated_at: DateTime<Utc>,
    pub report: &'a Report,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<&'a str, String>,
}

/// Build the JSON view of an audit outcome
pub fn to_json_output(outcome: &AuditOutcome) -> JsonOutput<'_> {
    JsonOutput {
        generated_at: Utc::now(),
        report: &outcome.report,
        errors: outcome
            .errors
            .iter()
            .map(|(host, e)| (host.as_str(), e.to_string()))
            .collect(),
    }
}

fn render(outcome: &AuditOutcome) -> Result<String, ReportError> {
    serde_json::to_string_pretty(&to_json_output(outcome)).map_err(|e| ReportError::Serialize {
        message: e.to_string(),
    })
}

/// Print an audit outcome as JSON to stdout
pub fn print_json(outcome: &AuditOutcome) -> Result<(), ReportError> {
    println!("{}", render(outcome)?);
    Ok(())
}

/// Write an audit outcome as JSON to a file
pub fn write_json_file(outcome: &AuditOutcome, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, render(outcome)?).map_err(|e| ReportError::WriteError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
