//! Rich terminal output formatting

use crate::models::{HostFindings, Report};
use crate::runner::AuditOutcome;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::{settings::Style as TabledStyle, Table, Tabled};

/// Create a progress bar for the host pool
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(template.progress_chars("█▓░"));
    pb.set_message(message.to_string());
    pb
}

/// Print section header
pub fn print_header(title: &str) {
    println!();
    println!("{}", style(format!("━━━ {} ━━━", title)).cyan().bold());
    println!();
}

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "Check")]
    check: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Detail")]
    detail: String,
}

/// Render one host's findings as a table
pub fn findings_table(findings: &HostFindings) -> String {
    let rows: Vec<FindingRow> = findings
        .iter()
        .map(|(name, finding)| FindingRow {
            check: name.description().to_string(),
            key: name.as_str().to_string(),
            detail: finding.to_string(),
        })
        .collect();
    Table::new(rows).with(TabledStyle::rounded()).to_string()
}

/// Print every host in the report
pub fn print_report(report: &Report) {
    for (host, findings) in report.hosts() {
        print_header(host);
        if findings.is_empty() {
            print_success("No policy violations");
        } else {
            println!("{}", findings_table(findings));
        }
    }
}

/// Print the full audit outcome, failures included
pub fn print_outcome(outcome: &AuditOutcome) {
    print_report(&outcome.report);

    if !outcome.errors.is_empty() {
        print_header("Hosts not evaluated");
        for (host, error) in &outcome.errors {
            print_error(&format!("{}: {}", style(host).bold(), error));
        }
    }

    print_summary(outcome);
}

/// Print run totals
pub fn print_summary(outcome: &AuditOutcome) {
    let report = &outcome.report;
    let flagged = report.hosts().filter(|(_, f)| !f.is_empty()).count();
    println!();
    println!(
        "  {} hosts evaluated, {} with findings, {} findings total, {} failed",
        style(report.len()).bold(),
        style(flagged).yellow().bold(),
        style(report.finding_count()).yellow(),
        style(outcome.errors.len()).red()
    );
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckName, Finding};

    #[test]
    fn test_findings_table_lists_each_check() {
        let mut findings = HostFindings::new();
        findings.insert(
            CheckName::HeartbleedVulnerability,
            Finding::Versions(vec!["TLSv1.0".to_string(), "TLSv1.1".to_string()]),
        );
        findings.insert(CheckName::IsExpiring, Finding::DaysRemaining(4.25));

        let table = findings_table(&findings);
        assert!(table.contains("heartbleed_vurnerability"));
        assert!(table.contains("TLSv1.0, TLSv1.1"));
        assert!(table.contains("4.2 days") || table.contains("4.3 days"));
    }
}
