//! Audit domains for `security.txt` disclosure-policy files.
//!
//! A run reads a CSV of domains, tries a fixed list of well-known paths on
//! each one and appends a row per domain to an output CSV. Interrupted runs
//! pick up right after the last row written.

pub mod batch;
pub mod config;
pub mod core;
pub mod logging;
pub mod preprocess;
pub mod probe;
pub mod progress;
pub mod securitytxt;
pub mod ui;

// Re-export commonly used items
pub use batch::{BatchRunner, ResultSink, ResumeState, RunSummary};
pub use config::Config;
pub use crate::core::{AuditError, DomainRecord, DomainResult, Result};
pub use probe::{Fetch, FetchResponse, HttpFetcher, Prober};
pub use securitytxt::FieldMap;
