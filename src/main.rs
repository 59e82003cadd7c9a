//! tls-policy-audit - audit TLS scan results against a security policy
//!
//! Runs the external scanner for every configured host, evaluates the
//! results against the policy and prints the findings.

use clap::Parser;
use console::style;
use tls_policy_audit::cli::{Cli, OutputFormat};
use tls_policy_audit::output;
use tls_policy_audit::runner::{self, AuditEvent};
use tracing_subscriber::EnvFilter;

/// Exit code when at least one host has findings or could not be evaluated
const EXIT_FINDINGS: i32 = 2;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let mut settings = cli.load_settings()?;
    cli.apply_overrides(&mut settings)?;
    settings.require_hosts()?;

    let show_progress = cli.format == OutputFormat::Table && cli.output.is_none();
    let pb = output::create_progress_bar(settings.hosts.len() as u64, "Auditing hosts");
    if !show_progress {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let on_event = |event: AuditEvent<'_>| match event {
        AuditEvent::ReferenceLoaded { tiers } => {
            tracing::debug!("Cipher reference ready with {} tiers", tiers);
        }
        AuditEvent::HostStarted { host } => pb.set_message(host.to_string()),
        AuditEvent::HostComplete { .. } | AuditEvent::HostFailed { .. } => pb.inc(1),
    };

    let outcome = runner::run_with_settings(&settings, &on_event).await;
    pb.finish_and_clear();
    let outcome = outcome?;

    if let Some(path) = &cli.output {
        output::write_json_file(&outcome, path)?;
        output::print_success(&format!("Report written to {}", path.display()));
        if !outcome.errors.is_empty() {
            output::print_warning(&format!(
                "{} hosts could not be evaluated",
                outcome.errors.len()
            ));
        }
    } else {
        match cli.format {
            OutputFormat::Json => output::print_json(&outcome)?,
            OutputFormat::Table => output::print_outcome(&outcome),
        }
    }

    Ok(if outcome.is_clean() { 0 } else { EXIT_FINDINGS })
}
