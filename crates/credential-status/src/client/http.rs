//! HTTP layer: single GET, status mapping, body extraction.
//!
//! This is the ONLY place for status code handling. client/mod.rs never
//! interprets status codes.

use reqwest::header::ACCEPT;
use tracing::{debug, error, trace};

use crate::error::{StatusError, StatusResult};

use super::helpers::body_excerpt;

/// Media types a status list endpoint may serve.
const ACCEPT_VALUE: &str = "application/vc+ld+json, application/vc+json, application/json";

/// HTTP backend for making requests (holds the reqwest client).
#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
    pub(crate) max_body_bytes: usize,
}

impl HttpBackend {
    /// GET `url` once and return the non-empty body.
    pub(crate) async fn get_body(&self, url: &str) -> StatusResult<String> {
        trace!(url = %url, "downloading status list");

        let mut response = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_VALUE)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "status list request failed");
                StatusError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = self.read_body(&mut response).await.unwrap_or_default();
            error!(url = %url, status = status.as_u16(), "status list endpoint returned an error");
            return Err(StatusError::network(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body_excerpt(&body)
            )));
        }

        let body = self.read_body(&mut response).await.map_err(|e| {
            error!(url = %url, error = %e, "failed to read status list body");
            e
        })?;

        if body.trim().is_empty() {
            error!(url = %url, "response received from status list endpoint is empty");
            return Err(StatusError::network("response body is empty"));
        }

        debug!(url = %url, bytes = body.len(), "status list downloaded");
        Ok(body)
    }

    /// Read the body in chunks, failing once it grows past `max_body_bytes`.
    async fn read_body(&self, response: &mut reqwest::Response) -> StatusResult<String> {
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(StatusError::network(format!(
                    "response body exceeds {} bytes",
                    self.max_body_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
