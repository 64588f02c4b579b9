//! Status verification.
//!
//! Entries are checked strictly in order. For each one:
//!
//! 1. Validate the index (and the rest of the descriptor) before any fetch
//! 2. Fetch the status list credential
//! 3. Compare the entry purpose with the list purpose (case-insensitive)
//! 4. Decode the entry's bit from the encoded list
//!
//! The first failure aborts the whole batch; partial results are never
//! returned. Nothing is cached, so a locator shared by several entries is
//! fetched once per entry.

use std::future::Future;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::bitstring::decode_status_list;
use crate::client::StatusListClient;
use crate::credential::status_entries;
use crate::error::{StatusError, StatusResult};
use crate::fetcher::StatusListFetcher;
use crate::types::{StatusEntry, VerificationResult};

/// Checks status entries against their published status lists.
#[derive(Debug, Clone)]
pub struct StatusVerifier<F> {
    fetcher: F,
}

impl StatusVerifier<StatusListClient> {
    /// Verifier over an HTTP client configured from the environment.
    pub fn from_env() -> StatusResult<Self> {
        Ok(Self::new(StatusListClient::from_env()?))
    }
}

impl<F: StatusListFetcher> StatusVerifier<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Verify `entries`, returning one result per entry in input order.
    pub async fn verify(&self, entries: &[StatusEntry]) -> StatusResult<Vec<VerificationResult>> {
        verify_status(&self.fetcher, entries).await
    }

    /// Like [`verify`](Self::verify), but gives up when `cancel` completes.
    ///
    /// An in-flight fetch is dropped and the run fails with
    /// [`StatusError::Cancelled`].
    pub async fn verify_until<C>(
        &self,
        entries: &[StatusEntry],
        cancel: C,
    ) -> StatusResult<Vec<VerificationResult>>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                warn!(entries = entries.len(), "status check cancelled");
                Err(StatusError::Cancelled)
            }
            result = self.verify(entries) => result,
        }
    }

    /// Verify every `credentialStatus` entry of a credential.
    pub async fn verify_credential(
        &self,
        credential: &Value,
    ) -> StatusResult<Vec<VerificationResult>> {
        let entries = status_entries(credential)?;
        self.verify(&entries).await
    }
}

/// Verify `entries` with `fetcher`. See the module docs for the order of checks.
pub async fn verify_status<F>(
    fetcher: &F,
    entries: &[StatusEntry],
) -> StatusResult<Vec<VerificationResult>>
where
    F: StatusListFetcher + ?Sized,
{
    let mut results = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        results.push(verify_entry(fetcher, entry, position).await?);
    }
    Ok(results)
}

async fn verify_entry<F>(
    fetcher: &F,
    entry: &StatusEntry,
    position: usize,
) -> StatusResult<VerificationResult>
where
    F: StatusListFetcher + ?Sized,
{
    let index = validate_entry(entry)?;

    debug!(
        position,
        purpose = %entry.status_purpose,
        index,
        size = entry.status_size,
        url = %entry.status_list_credential,
        "checking status entry"
    );

    if entry.status_size > 1 {
        warn!(
            size = entry.status_size,
            "multi-bit status entry; only the first bit is read"
        );
    }

    let list = fetcher.fetch(&entry.status_list_credential).await?;

    if !list.asserts_purpose(&entry.status_purpose) {
        let list_purpose = list
            .status_purpose()
            .map(|p| p.to_string())
            .unwrap_or_default();
        error!(
            entry_purpose = %entry.status_purpose,
            list_purpose = %list_purpose,
            "status purpose comparison failed"
        );
        return Err(StatusError::PurposeMismatch {
            entry_purpose: entry.status_purpose.clone(),
            list_purpose,
        });
    }

    let encoded = list.encoded_list().unwrap_or_default();
    let status = decode_status_list(encoded, index, entry.status_size)?;

    debug!(position, purpose = %entry.status_purpose, status, "status entry resolved");
    Ok(VerificationResult {
        status_purpose: entry.status_purpose.clone(),
        status,
    })
}

/// Reject descriptors that must not reach the network.
fn validate_entry(entry: &StatusEntry) -> StatusResult<u64> {
    let index = u64::try_from(entry.status_list_index).map_err(|_| {
        error!(index = entry.status_list_index, "negative statusListIndex");
        StatusError::Index {
            index: entry.status_list_index,
        }
    })?;

    if entry.status_size == 0 {
        error!("statusSize is zero");
        return Err(StatusError::invalid_entry(
            "statusSize must be greater than zero",
        ));
    }

    if entry.status_list_credential.trim().is_empty() {
        error!("statusListCredential is empty");
        return Err(StatusError::invalid_entry(
            "statusListCredential must not be empty",
        ));
    }

    Ok(index)
}
