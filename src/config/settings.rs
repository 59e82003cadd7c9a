//! Application settings configuration
//!
//! Defines the host list, the security policy, and the settings for the
//! cipher reference and the external scanner.

use super::policy::{RawPolicy, SecurityPolicy};
use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Location of the cipher strength cheat sheet
pub const DEFAULT_REFERENCE_URL: &str =
    "https://cheatsheetseries.owasp.org/cheatsheets/TLS_Cipher_String_Cheat_Sheet.html";

/// Configuration read when no file is given
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Cipher reference settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceSettings {
    #[serde(default = "default_reference_url")]
    pub url: String,
    #[serde(default = "default_reference_timeout")]
    pub timeout_secs: u64,
    /// Static TOML dataset used instead of fetching `url`
    #[serde(default)]
    pub dataset: Option<PathBuf>,
}

fn default_reference_url() -> String {
    DEFAULT_REFERENCE_URL.to_string()
}

fn default_reference_timeout() -> u64 {
    30
}

impl Default for ReferenceSettings {
    fn default() -> Self {
        Self {
            url: default_reference_url(),
            timeout_secs: default_reference_timeout(),
            dataset: None,
        }
    }
}

impl ReferenceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// External scanner settings
#[derive(Debug, Clone, Deserialize)]
pub struct ScannerSettings {
    #[serde(default = "default_scanner_command")]
    pub command: String,
    #[serde(default = "default_scanner_args")]
    pub args: Vec<String>,
    /// Read saved `<host>.xml` scans from here instead of running `command`
    #[serde(default)]
    pub scan_dir: Option<PathBuf>,
}

fn default_scanner_command() -> String {
    "docker".to_string()
}

fn default_scanner_args() -> Vec<String> {
    ["run", "--rm", "mini-sslscan", "sslscan", "--ssl3", "--tlsall", "--xml=-"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            command: default_scanner_command(),
            args: default_scanner_args(),
            scan_dir: None,
        }
    }
}

/// Run settings
#[derive(Debug, Clone, Deserialize)]
pub struct RunSettings {
    #[serde(default = "default_parallel")]
    pub parallel: usize,
}

fn default_parallel() -> usize {
    4
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default)]
    hosts: Vec<String>,
    policy: Option<RawPolicy>,
    #[serde(default)]
    reference: ReferenceSettings,
    #[serde(default)]
    scanner: ScannerSettings,
    #[serde(default)]
    run: RunSettings,
}

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub hosts: Vec<String>,
    pub policy: SecurityPolicy,
    pub reference: ReferenceSettings,
    pub scanner: ScannerSettings,
    pub run: RunSettings,
}

impl Settings {
    /// Load settings from `config/default.toml`.
    ///
    /// A missing default file is not an error by itself; the empty
    /// configuration then fails on the required `[policy]` table instead.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("{} not found", DEFAULT_CONFIG_PATH);
            Self::from_toml("")
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let raw: RawSettings = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;

        let policy = raw.policy.ok_or(ConfigError::MissingRequired {
            key: "policy".to_string(),
        })?;
        let policy = SecurityPolicy::from_raw(policy)?;

        if raw.run.parallel == 0 {
            return Err(ConfigError::InvalidValue {
                key: "run.parallel".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if raw.reference.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "reference.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let hosts = raw
            .hosts
            .into_iter()
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .collect();

        Ok(Self {
            hosts,
            policy,
            reference: raw.reference,
            scanner: raw.scanner,
            run: raw.run,
        })
    }

    /// Ensure there is something to audit
    pub fn require_hosts(&self) -> Result<(), ConfigError> {
        if self.hosts.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "hosts".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        hosts = ["example.com", " ", "example.org:8443"]

        [policy]
        validity_check = true
        tls_secure_versions = ["TLSv1.2", "TLSv1.3"]
        cipher_levels = ["A", "B"]

        [reference]
        timeout_secs = 5

        [run]
        parallel = 2
    "#;

    #[test]
    fn test_from_toml() {
        let settings = Settings::from_toml(SAMPLE).unwrap();
        assert_eq!(settings.hosts, vec!["example.com", "example.org:8443"]);
        assert!(settings.policy.validity_check_enabled);
        assert_eq!(settings.reference.url, DEFAULT_REFERENCE_URL);
        assert_eq!(settings.reference.timeout(), Duration::from_secs(5));
        assert_eq!(settings.scanner.command, "docker");
        assert!(settings.scanner.args.contains(&"--xml=-".to_string()));
        assert_eq!(settings.run.parallel, 2);
    }

    #[test]
    fn test_missing_policy() {
        let err = Settings::from_toml("hosts = [\"a\"]").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired { ref key } if key == "policy"));
    }

    #[test]
    fn test_zero_parallel_rejected() {
        let src = SAMPLE.replace("parallel = 2", "parallel = 0");
        assert!(matches!(
            Settings::from_toml(&src),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_zero_reference_timeout_rejected() {
        let src = SAMPLE.replace("timeout_secs = 5", "timeout_secs = 0");
        assert!(matches!(
            Settings::from_toml(&src),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "reference.timeout_secs"
        ));
    }

    #[test]
    fn test_require_hosts() {
        let src = SAMPLE.replace(r#"hosts = ["example.com", " ", "example.org:8443"]"#, "");
        let settings = Settings::from_toml(&src).unwrap();
        assert!(settings.require_hosts().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.hosts.len(), 2);

        assert!(matches!(
            Settings::load_from_file("/nonexistent/policy.toml"),
            Err(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Settings::from_toml("hosts = ["),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
