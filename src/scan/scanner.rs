//! External scanner adapters
//!
//! The scanner itself is an opaque command; these adapters only produce its
//! raw XML output for a host.

use crate::config::ScannerSettings;
use crate::utils::ScanError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Produces raw sslscan XML for a host
#[async_trait]
pub trait Scanner: Send + Sync {
    async fn scan(&self, host: &str) -> Result<String, ScanError>;
}

/// Build the scanner described by the settings
pub fn from_settings(settings: &ScannerSettings) -> Box<dyn Scanner> {
    match &settings.scan_dir {
        Some(dir) => Box::new(DirectoryScanner::new(dir)),
        None => Box::new(CommandScanner::new(&settings.command, settings.args.clone())),
    }
}

fn validate_host(host: &str) -> Result<(), ScanError> {
    let valid = !host.is_empty()
        && !host.starts_with('-')
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '[' | ']' | '_'));
    if valid {
        Ok(())
    } else {
        Err(ScanError::ScannerFailed {
            host: host.to_string(),
            message: "invalid host name".to_string(),
        })
    }
}

/// Runs the scanner command with the host as its final argument
pub struct CommandScanner {
    command: String,
    args: Vec<String>,
}

impl CommandScanner {
    pub fn new(command: &str, args: Vec<String>) -> Self {
        Self {
            command: command.to_string(),
            args,
        }
    }
}

#[async_trait]
impl Scanner for CommandScanner {
    async fn scan(&self, host: &str) -> Result<String, ScanError> {
        validate_host(host)?;
        tracing::debug!("Running {} {:?} {}", self.command, self.args, host);

        let output = Command::new(&self.command)
            .args(&self.args)
            .arg(host)
            .output()
            .await
            .map_err(|e| ScanError::ScannerFailed {
                host: host.to_string(),
                message: format!("failed to run {}: {}", self.command, e),
            })?;

        if !output.status.success() {
            return Err(ScanError::ScannerFailed {
                host: host.to_string(),
                message: format!(
                    "{} exited with {}: {}",
                    self.command,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Reads previously saved scans named `<host>.xml`
pub struct DirectoryScanner {
    dir: PathBuf,
}

impl DirectoryScanner {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// File holding the scan for `host`; `:` and path separators become `_`
    pub fn path_for(&self, host: &str) -> PathBuf {
        let name: String = host
            .chars()
            .map(|c| if matches!(c, ':' | '/' | '\\') { '_' } else { c })
            .collect();
        self.dir.join(format!("{}.xml", name))
    }
}

#[async_trait]
impl Scanner for DirectoryScanner {
    async fn scan(&self, host: &str) -> Result<String, ScanError> {
        validate_host(host)?;
        let path = self.path_for(host);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ScanError::ScannerFailed {
                host: host.to_string(),
                message: format!("cannot read {}: {}", path.display(), e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host() {
        assert!(validate_host("example.com").is_ok());
        assert!(validate_host("example.com:8443").is_ok());
        assert!(validate_host("[::1]:443").is_ok());
        assert!(validate_host("").is_err());
        assert!(validate_host("--help").is_err());
        assert!(validate_host("a.com; rm -rf /").is_err());
    }

    #[test]
    fn test_directory_path_for() {
        let scanner = DirectoryScanner::new("/scans");
        assert_eq!(
            scanner.path_for("example.org:8443"),
            PathBuf::from("/scans/example.org_8443.xml")
        );
    }

    #[tokio::test]
    async fn test_directory_scanner_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("example.com.xml"), "<document/>").unwrap();

        let scanner = DirectoryScanner::new(dir.path());
        assert_eq!(scanner.scan("example.com").await.unwrap(), "<document/>");
        assert!(matches!(
            scanner.scan("missing.example").await,
            Err(ScanError::ScannerFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_command_scanner_missing_binary() {
        let scanner = CommandScanner::new("/nonexistent/sslscan", vec![]);
        assert!(matches!(
            scanner.scan("example.com").await,
            Err(ScanError::ScannerFailed { .. })
        ));
    }
}
