//! HTTP fetcher for status list credentials.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::error::{StatusError, StatusResult};
use crate::fetcher::StatusListFetcher;
use crate::types::{ClientConfig, StatusListCredential};

mod helpers;
mod http;

use helpers::{parse_locator, parse_status_list};
use http::HttpBackend;

/// User agent for status list requests.
pub const STATUS_CLIENT_USER_AGENT: &str = concat!("credential-status/", env!("CARGO_PKG_VERSION"));

/// Fetches status list credentials over HTTP(S).
///
/// One GET per call, no retries and no caching.
#[derive(Debug, Clone)]
pub struct StatusListClient {
    http: HttpBackend,
    config: ClientConfig,
}

impl StatusListClient {
    pub fn new(config: ClientConfig) -> StatusResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(STATUS_CLIENT_USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| StatusError::network(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http: HttpBackend {
                client,
                max_body_bytes: config.max_body_bytes,
            },
            config,
        })
    }

    pub fn from_env() -> StatusResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Download and parse the status list credential at `url`.
    pub async fn fetch_status_list(&self, url: &str) -> StatusResult<StatusListCredential> {
        let url = parse_locator(url)?;
        debug!(url = %url, "fetching status list credential");

        let body = self.http.get_body(url.as_str()).await?;
        let list = parse_status_list(&body)?;

        debug!(
            url = %url,
            list_id = ?list.id,
            purpose = ?list.status_purpose().map(|p| p.to_string()),
            "status list credential fetched"
        );
        Ok(list)
    }
}

#[async_trait]
impl StatusListFetcher for StatusListClient {
    async fn fetch(&self, locator: &str) -> StatusResult<StatusListCredential> {
        self.fetch_status_list(locator).await
    }
}
