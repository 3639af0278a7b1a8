//! HTTP client for the upstream data provider.

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::EntryType;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream rejected request for {0}")]
    BadRequest(String),

    #[error("not found upstream: {0}")]
    NotFound(String),

    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

pub struct UpstreamClient {
    http: Client,
    endpoint: String,
}

impl UpstreamClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.upstream_timeout()).build()?;

        Ok(Self {
            http,
            endpoint: config.upstream_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Perform a single fetch for the given subject. No retries; a timeout is
    /// an unavailable upstream like any other transport failure. An empty
    /// body that parses as JSON is a valid response; interpreting it is the
    /// caller's concern.
    pub async fn fetch(&self, entry_type: EntryType, subject: &str) -> Result<Value, UpstreamError> {
        let path = match entry_type {
            EntryType::Address => "rawaddr",
            EntryType::Transaction => "rawtx",
        };
        let url = format!("{}/{}/{}", self.endpoint, path, subject);

        debug!("sending upstream request to {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| UpstreamError::Unavailable(err.to_string()))?;

        match response.status().as_u16() {
            200..=299 => response
                .json()
                .await
                .map_err(|err| UpstreamError::Unavailable(format!("invalid upstream body: {err}"))),
            400 => Err(UpstreamError::BadRequest(subject.to_string())),
            404 => Err(UpstreamError::NotFound(subject.to_string())),
            status => Err(UpstreamError::Unavailable(format!(
                "upstream returned status {status}"
            ))),
        }
    }
}
