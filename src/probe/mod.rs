//! Probing a domain for a security.txt file
//!
//! The fetch capability wraps the HTTP client; the prober walks the candidate
//! paths of one domain and classifies each response.

pub mod fetcher;
pub mod prober;

// Re-export commonly used items
pub use fetcher::{Fetch, FetchResponse, HttpFetcher};
pub use prober::{ProbeAttempt, ProbeOutcome, Prober};
