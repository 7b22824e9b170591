use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::core::constants::{defaults, http, timeouts};
use crate::core::{AuditError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Per-request timeout in seconds
    pub timeout: Option<u64>,

    /// Paths checked under each domain, in order
    pub candidate_paths: Option<Vec<String>>,

    /// File the log stream is written to
    pub log_file: Option<String>,

    /// Level of the log stream (off, error, warn, info, debug, trace)
    pub log_level: Option<String>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Scheme of every probed origin
    pub scheme: Option<String>,

    /// Show a progress bar while probing
    pub show_progress: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            candidate_paths: Some(
                defaults::CANDIDATE_PATHS
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
            ),
            log_file: Some(defaults::LOG_FILE.to_string()),
            log_level: Some(defaults::LOG_LEVEL.to_string()),
            user_agent: None,
            scheme: Some(http::DEFAULT_SCHEME.to_string()),
            show_progress: Some(true),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. Keys absent from the file fall
    /// back to defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.fill_defaults();
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(ref paths) = cli_config.candidate_paths {
            self.candidate_paths = Some(paths.clone());
        }
        if let Some(ref log_file) = cli_config.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(ref log_level) = cli_config.log_level {
            self.log_level = Some(log_level.clone());
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref scheme) = cli_config.scheme {
            self.scheme = Some(scheme.clone());
        }
        if cli_config.no_progress {
            self.show_progress = Some(false);
        }
    }

    /// Reject values the probe cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.timeout == Some(0) {
            return Err(AuditError::Config(
                "timeout must be a positive number of seconds".to_string(),
            ));
        }

        let paths = self.candidate_paths();
        if paths.is_empty() {
            return Err(AuditError::Config(
                "at least one candidate path is required".to_string(),
            ));
        }
        if let Some(bad) = paths.iter().find(|p| !p.starts_with('/')) {
            return Err(AuditError::Config(format!(
                "candidate path '{bad}' must start with '/'"
            )));
        }

        if let Some(ref level) = self.log_level
            && log::LevelFilter::from_str(level).is_err()
        {
            return Err(AuditError::Config(format!("unknown log level '{level}'")));
        }

        let scheme = self.scheme();
        if !http::SCHEMES.contains(&scheme) {
            return Err(AuditError::Config(format!(
                "scheme must be one of {}, got '{scheme}'",
                http::SCHEMES.join(", ")
            )));
        }

        Ok(())
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn candidate_paths(&self) -> Vec<String> {
        self.candidate_paths.clone().unwrap_or_else(|| {
            defaults::CANDIDATE_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect()
        })
    }

    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(self.log_file.as_deref().unwrap_or(defaults::LOG_FILE))
    }

    /// Log level as a filter; unknown names fall back to the default level.
    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|level| log::LevelFilter::from_str(level).ok())
            .unwrap_or(log::LevelFilter::Trace)
    }

    pub fn scheme(&self) -> &str {
        self.scheme.as_deref().unwrap_or(http::DEFAULT_SCHEME)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
    }

    fn fill_defaults(&mut self) {
        let defaults = Self::default();
        self.timeout = self.timeout.or(defaults.timeout);
        self.candidate_paths = self.candidate_paths.take().or(defaults.candidate_paths);
        self.log_file = self.log_file.take().or(defaults.log_file);
        self.log_level = self.log_level.take().or(defaults.log_level);
        self.scheme = self.scheme.take().or(defaults.scheme);
        self.show_progress = self.show_progress.or(defaults.show_progress);
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub timeout: Option<u64>,
    pub candidate_paths: Option<Vec<String>>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
    pub user_agent: Option<String>,
    pub scheme: Option<String>,
    pub config_file: Option<String>,
    pub no_config: bool,
    pub no_progress: bool,
}
