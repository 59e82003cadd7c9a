//! Command-line interface module
//!
//! This module handles CLI argument parsing using Clap and merges the
//! arguments over the loaded settings.

pub mod args;

pub use args::{Cli, OutputFormat};

use crate::config::Settings;
use crate::utils::ConfigError;

impl Cli {
    /// Load settings from `--config` or the default location
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        match &self.config {
            Some(path) => Settings::load_from_file(path),
            None => Settings::load_default(),
        }
    }

    /// Apply command-line overrides to loaded settings
    pub fn apply_overrides(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        if !self.hosts.is_empty() {
            settings.hosts = self.hosts.clone();
        }
        if let Some(dir) = &self.scan_dir {
            settings.scanner.scan_dir = Some(dir.clone());
        }
        if let Some(dataset) = &self.dataset {
            settings.reference.dataset = Some(dataset.clone());
        }
        if let Some(parallel) = self.parallel {
            if parallel == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "--parallel".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
            settings.run.parallel = parallel;
        }
        Ok(())
    }

    /// Log filter implied by the verbosity flag
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "tls_policy_audit=debug"
        } else {
            "warn"
        }
    }
}
