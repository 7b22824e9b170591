//! Log stream setup and the logging capability handed to the probe.
//!
//! The binary installs an `env_logger` writing to the log file. Probing code
//! never calls the `log` macros directly; it logs through a [`ProbeLog`] so
//! tests can capture what was said without a process-wide logger.

use log::{Level, LevelFilter};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use crate::core::{AuditError, Result};

/// Initialize the logger, appending to `log_file` at `level`.
///
/// `level` applies to this crate only; dependencies log at `warn` or less.
/// `RUST_LOG` directives for other modules still apply.
pub fn init_logger(log_file: &Path, level: LevelFilter) -> Result<()> {
    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let mut builder = env_logger::Builder::from_default_env();
    scope_levels(&mut builder, level);
    builder
        .format_module_path(false)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| AuditError::Config(format!("could not install logger: {e}")))?;

    log::debug!("Logger initialized with level: {level:?}");
    Ok(())
}

/// Log this crate at `level` and everything else at no more than `warn`, so
/// HTTP client chatter stays out of the log file.
fn scope_levels(builder: &mut env_logger::Builder, level: LevelFilter) {
    builder
        .filter_level(level.min(LevelFilter::Warn))
        .filter_module(env!("CARGO_CRATE_NAME"), level);
}

/// Where probing and batch code send their log lines.
pub trait ProbeLog: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }
}

/// Forwards to the global `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeLog;

impl ProbeLog for FacadeLog {
    fn log(&self, level: Level, message: &str) {
        log::log!(level, "{message}");
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<(Level, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Whether some line at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl ProbeLog for MemoryLog {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => log::error!("{message}: {err}"),
        None => log::error!("{message}"),
    }
}
