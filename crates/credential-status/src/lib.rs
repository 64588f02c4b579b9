//! Bitstring status list client for verifiable credentials.
//!
//! Answers "is this credential revoked or suspended?" for credentials that
//! carry `credentialStatus` entries pointing into a W3C Bitstring Status List:
//!
//! - HTTP retrieval of status list credentials
//! - Multibase/Base64URL/gzip decoding of `encodedList`
//! - MSB-first bit lookup with range checks
//! - Purpose comparison between entry and list
//! - Stable error titles with fixed detail texts
//!
//! # Quick Start
//!
//! ```no_run
//! use credential_status::{StatusEntry, StatusVerifier};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let verifier = StatusVerifier::from_env()?;
//!
//! let entry = StatusEntry::new(
//!     "revocation",
//!     94567,
//!     "https://example.com/credentials/status/3",
//! );
//! for result in verifier.verify(&[entry]).await? {
//!     println!("{}: {}", result.status_purpose, result.status);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Results come back in input order. The first failing entry aborts the
//! batch; see [`StatusError`] for the kinds of failure.
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `CREDENTIAL_STATUS_TIMEOUT` | Request timeout in seconds (default: 30) |
//! | `CREDENTIAL_STATUS_CONNECT_TIMEOUT` | Connect timeout in seconds (default: 10) |
//!
//! Response bodies are capped at [`ClientConfig::max_body_bytes`] (32 MiB by
//! default) and inflated lists at [`MAX_BITSTRING_BYTES`].

pub mod bitstring;
pub mod client;
pub mod credential;
pub mod error;
pub mod fetcher;
pub mod types;
pub mod verifier;

// Re-export main types
pub use bitstring::{
    bit_at, decode_status_list, expand, MAX_BITSTRING_BYTES, MULTIBASE_BASE64URL_PREFIX,
};
pub use client::{StatusListClient, STATUS_CLIENT_USER_AGENT};
pub use credential::status_entries;
pub use error::{EncodingErrorKind, ProblemDetails, StatusError, StatusResult};
pub use fetcher::StatusListFetcher;
pub use types::{
    ClientConfig, StatusEntry, StatusListCredential, StatusListSubject, StatusPurposes,
    VerificationResult,
};
pub use verifier::{verify_status, StatusVerifier};
