use reqwest::Url;
use std::fmt;
use std::sync::Arc;

use super::fetcher::{Fetch, describe_error};
use crate::core::constants::{fields, http};
use crate::core::{DomainRecord, DomainResult};
use crate::logging::ProbeLog;
use crate::securitytxt::{self, FieldMap};

/// How a single candidate URL turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Transport failure: timeout, DNS, refused connection, TLS, bad URL
    NetworkError(String),
    NonOkStatus(u16),
    /// A 200 whose body starts with `<`, i.e. an HTML error or placeholder page
    HtmlLike,
    /// Parsed, but required fields are missing
    ParsedInvalid,
    ParsedValid(FieldMap),
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProbeOutcome::NetworkError(desc) => write!(f, "network error ({desc})"),
            ProbeOutcome::NonOkStatus(code) => write!(f, "status {code}"),
            ProbeOutcome::HtmlLike => write!(f, "HTML body"),
            ProbeOutcome::ParsedInvalid => write!(f, "missing required fields"),
            ProbeOutcome::ParsedValid(_) => write!(f, "valid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeAttempt {
    pub url: String,
    pub outcome: ProbeOutcome,
}

/// Walks the candidate paths of a domain until one serves a valid file.
pub struct Prober {
    fetcher: Arc<dyn Fetch>,
    log: Arc<dyn ProbeLog>,
    scheme: String,
}

impl Prober {
    pub fn new(fetcher: Arc<dyn Fetch>, log: Arc<dyn ProbeLog>) -> Self {
        Self {
            fetcher,
            log,
            scheme: http::DEFAULT_SCHEME.to_string(),
        }
    }

    /// Probe origins with `scheme` instead of `https`.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// The origin probed for `domain`, e.g. `https://example.com`.
    pub fn site(&self, domain: &str) -> String {
        format!("{}://{}", self.scheme, domain)
    }

    /// Try `candidate_paths` in order, stopping at the first valid file.
    ///
    /// Every failure is contained here: a domain with no valid file is simply
    /// not found.
    pub async fn probe(&self, record: &DomainRecord, candidate_paths: &[String]) -> DomainResult {
        let site = self.site(&record.domain);
        self.log.debug(&format!("Checking {site}..."));

        for path in candidate_paths {
            let attempt = self.try_candidate(&site, path).await;
            self.log
                .trace(&format!("{} -> {}", attempt.url, attempt.outcome));

            if let ProbeOutcome::ParsedValid(parsed) = attempt.outcome {
                self.log.debug(&format!("Found valid security.txt at {}", attempt.url));
                self.log.info(&format!(
                    "Successfully checked {site}, found valid security.txt!"
                ));
                let captured = parsed.restricted_to(&fields::INTERESTING);
                return DomainResult::found(record, site, attempt.url, captured);
            }
        }

        self.log.debug(&format!(
            "Successfully checked {site}, no valid security.txt found."
        ));
        DomainResult::not_found(record, site)
    }

    /// Fetch and classify one candidate path under `site`.
    pub async fn try_candidate(&self, site: &str, path: &str) -> ProbeAttempt {
        let url = match Url::parse(site).and_then(|origin| origin.join(path)) {
            Ok(url) => url.to_string(),
            Err(err) => {
                let url = format!("{site}{path}");
                self.log
                    .info(&format!("Could not build a URL from {url} ({err}), skipping."));
                return ProbeAttempt {
                    url,
                    outcome: ProbeOutcome::NetworkError(err.to_string()),
                };
            }
        };

        let outcome = self.classify(&url).await;
        ProbeAttempt { url, outcome }
    }

    async fn classify(&self, url: &str) -> ProbeOutcome {
        self.log.trace(&format!("Querying {url} for security.txt..."));
        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(err) => {
                let description = describe_error(&err);
                self.log.info(&format!(
                    "Something went wrong when connecting to {url}, skipping. ({description})"
                ));
                return ProbeOutcome::NetworkError(description);
            }
        };
        self.log
            .trace(&format!("Successfully queried {url} for security.txt."));

        if !response.is_ok() {
            self.log.debug(&format!(
                "Did not get an OK response from {url}, instead got {}, skipping.",
                response.status
            ));
            return ProbeOutcome::NonOkStatus(response.status);
        }

        if looks_like_html(&response.body) {
            self.log
                .debug("security.txt looks like an HTML file, invalid.");
            return ProbeOutcome::HtmlLike;
        }

        let parsed = securitytxt::parse(&response.body);
        if !securitytxt::validate_required(&parsed) {
            self.log
                .debug("security.txt does not have all the required fields, invalid.");
            return ProbeOutcome::ParsedInvalid;
        }

        ProbeOutcome::ParsedValid(parsed)
    }
}

/// Whether a 200 body is really an HTML page rather than a text file.
pub fn looks_like_html(body: &str) -> bool {
    body.starts_with('<')
}
