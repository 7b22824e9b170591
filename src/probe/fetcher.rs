use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::Config;
use crate::core::constants::http;
use crate::core::{AuditError, Result};

/// What the prober needs from a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    /// Response text. Only read for `200 OK` responses, empty otherwise.
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == http::OK
    }
}

/// `GET` a URL, following redirects, bounded by a timeout.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(Policy::limited(http::MAX_REDIRECTS))
            .user_agent(config.user_agent())
            // One domain at a time, so there is little to gain from idle sockets
            .pool_max_idle_per_host(1)
            .pool_idle_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        let body = if status == http::OK {
            response.text().await?
        } else {
            String::new()
        };

        Ok(FetchResponse { status, body })
    }
}

/// Short description of a fetch failure, preferring the underlying cause.
pub fn describe_error(err: &AuditError) -> String {
    match err {
        AuditError::Http(err) => std::error::Error::source(err)
            .map(|e| e.to_string())
            .unwrap_or_else(|| err.to_string()),
        other => other.to_string(),
    }
}
