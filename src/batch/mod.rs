//! The resumable batch loop
//!
//! Reading domains, working out where the previous run stopped, and appending
//! one row per probed domain so the next run can pick up after it.

pub mod resume;
pub mod runner;
pub mod sink;
pub mod source;

// Re-export commonly used items
pub use resume::{ResumeState, resolve};
pub use runner::{BatchRunner, RunSummary};
pub use sink::ResultSink;
pub use source::{DomainSource, count_domains};
