use clap::Parser;
use std::io::Write;
use tls_policy_audit::cli::{Cli, OutputFormat};
use tls_policy_audit::utils::ConfigError;

const CONFIG: &str = r#"
hosts = ["configured.example"]

[policy]
tlsSecureVersions = ["TLSv1.2", "TLSv1.3"]
cipherLevels = ["A", "B"]

[run]
parallel = 8
"#;

fn config_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let cli = Cli::try_parse_from(["tls-policy-audit"]).unwrap();
    assert!(cli.hosts.is_empty());
    assert_eq!(cli.format, OutputFormat::Table);
    assert_eq!(cli.parallel, None);
    assert_eq!(cli.log_filter(), "warn");
}

#[test]
fn test_repeated_hosts() {
    let cli = Cli::try_parse_from([
        "tls-policy-audit",
        "--host",
        "a.example",
        "--host",
        "b.example",
        "--format",
        "json",
        "-v",
    ])
    .unwrap();
    assert_eq!(cli.hosts, vec!["a.example", "b.example"]);
    assert_eq!(cli.format, OutputFormat::Json);
    assert_eq!(cli.log_filter(), "tls_policy_audit=debug");
}

#[test]
fn test_overrides_replace_configured_values() {
    let file = config_file();
    let path = file.path().to_str().unwrap();
    let cli = Cli::try_parse_from([
        "tls-policy-audit",
        "--config",
        path,
        "--host",
        "cli.example",
        "--scan-dir",
        "scans",
        "--dataset",
        "tiers.toml",
        "--parallel",
        "2",
    ])
    .unwrap();

    let mut settings = cli.load_settings().unwrap();
    assert_eq!(settings.hosts, vec!["configured.example"]);
    assert_eq!(settings.run.parallel, 8);

    cli.apply_overrides(&mut settings).unwrap();
    assert_eq!(settings.hosts, vec!["cli.example"]);
    assert_eq!(settings.run.parallel, 2);
    assert_eq!(settings.scanner.scan_dir.as_deref(), Some(std::path::Path::new("scans")));
    assert_eq!(
        settings.reference.dataset.as_deref(),
        Some(std::path::Path::new("tiers.toml"))
    );
}

#[test]
fn test_zero_parallel_rejected() {
    let file = config_file();
    let cli = Cli::try_parse_from([
        "tls-policy-audit",
        "--config",
        file.path().to_str().unwrap(),
        "--parallel",
        "0",
    ])
    .unwrap();

    let mut settings = cli.load_settings().unwrap();
    assert!(matches!(
        cli.apply_overrides(&mut settings),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_missing_config_file() {
    let cli = Cli::try_parse_from([
        "tls-policy-audit",
        "--config",
        "/nonexistent/tls-policy-audit.toml",
    ])
    .unwrap();
    assert!(matches!(
        cli.load_settings(),
        Err(ConfigError::FileNotFound { .. })
    ));
}
