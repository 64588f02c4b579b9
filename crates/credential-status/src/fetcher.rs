//! Status list retrieval capability.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StatusResult;
use crate::types::StatusListCredential;

/// Retrieves a status list credential by locator.
///
/// Implementations fail with [`StatusError::Network`](crate::StatusError::Network)
/// when the transport fails or the response has no body. They must not retry
/// or cache; each call is one retrieval.
#[async_trait]
pub trait StatusListFetcher: Send + Sync {
    async fn fetch(&self, locator: &str) -> StatusResult<StatusListCredential>;
}

#[async_trait]
impl<T: StatusListFetcher + ?Sized> StatusListFetcher for Arc<T> {
    async fn fetch(&self, locator: &str) -> StatusResult<StatusListCredential> {
        (**self).fetch(locator).await
    }
}

#[async_trait]
impl<T: StatusListFetcher + ?Sized> StatusListFetcher for &T {
    async fn fetch(&self, locator: &str) -> StatusResult<StatusListCredential> {
        (**self).fetch(locator).await
    }
}
