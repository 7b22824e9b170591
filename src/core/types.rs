use std::fmt;

use crate::securitytxt::FieldMap;

/// A domain read from the input, tagged with its 0-based position.
///
/// The position is stable across runs because the input is never reordered,
/// which is what lets a run resume from the last index written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecord {
    pub index: u64,
    pub domain: String,
}

impl DomainRecord {
    pub fn new(index: u64, domain: impl Into<String>) -> Self {
        Self {
            index,
            domain: domain.into(),
        }
    }
}

/// The final outcome of probing one domain. One is written per processed domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainResult {
    pub index: u64,
    pub domain: String,
    /// The probed origin, e.g. `https://example.com`
    pub site: String,
    /// URL of the first candidate that returned a valid file
    pub matched_url: Option<String>,
    /// Parsed fields of the matched file, restricted to the captured set
    pub fields: FieldMap,
}

impl DomainResult {
    /// Result for a domain where a valid file was found at `matched_url`.
    pub fn found(record: &DomainRecord, site: String, matched_url: String, fields: FieldMap) -> Self {
        Self {
            index: record.index,
            domain: record.domain.clone(),
            site,
            matched_url: Some(matched_url),
            fields,
        }
    }

    /// Result for a domain where every candidate path was exhausted.
    pub fn not_found(record: &DomainRecord, site: String) -> Self {
        Self {
            index: record.index,
            domain: record.domain.clone(),
            site,
            matched_url: None,
            fields: FieldMap::default(),
        }
    }

    pub fn is_found(&self) -> bool {
        self.matched_url.is_some()
    }
}

impl fmt::Display for DomainResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.matched_url {
            Some(url) => write!(f, "{} - {} - found at {}", self.index, self.site, url),
            None => write!(f, "{} - {} - not found", self.index, self.site),
        }
    }
}
