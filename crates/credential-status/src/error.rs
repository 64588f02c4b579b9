//! Error types for status list verification.
//!
//! Every error carries a stable machine-readable title and a human-readable
//! detail. Detail texts for the status list failures are fixed strings that
//! callers and fixtures may compare literally.

use serde::{Deserialize, Serialize};

pub const STATUS_LIST_INDEX_ERROR_TITLE: &str = "STATUS_LIST_INDEX_ERROR";
pub const STATUS_LIST_INDEX_ERROR_DETAIL: &str =
    "statusListIndex must be greater than or equal to zero";

pub const STATUS_LIST_NETWORK_ERROR_TITLE: &str = "STATUS_LIST_NETWORK_ERROR";
pub const STATUS_LIST_NETWORK_ERROR_DETAIL: &str =
    "Error occurred during http call to statusListCredential endpoint";

pub const STATUS_PURPOSE_COMPARISON_ERROR_TITLE: &str = "STATUS_PURPOSE_COMPARISON_ERROR";
pub const STATUS_PURPOSE_COMPARISON_ERROR_DETAIL: &str =
    "statusPurpose value of the credentialStatus and statusPurpose value of the credentialSubject are not equal";

pub const ENCODED_LIST_ERROR_TITLE: &str = "ENCODED_LIST_ERROR";
pub const ENCODED_LIST_EMPTY_DETAIL: &str = "Encoded string cannot be null or empty";
pub const ENCODED_LIST_MARKER_DETAIL: &str =
    "The received encoded list doesn't start with 'u'. the encoded list must start with the letter 'u'";

pub const BASE64URL_ERROR_TITLE: &str = "BASE64URL_ERROR";
pub const BASE64URL_ERROR_DETAIL: &str =
    "The provided string is not a valid Base64URL-encoded string";
pub const BASE64_ERROR_DETAIL: &str = "The provided string could not be decoded as Base64";

pub const DECOMPRESSION_ERROR_TITLE: &str = "DECOMPRESSION_ERROR";

/// Title for a bit offset past the end of the list.
///
/// The Java status checker reports this as `"RANGE ERROR"`, with a space. The
/// underscore spelling keeps it in line with every other title; consumers
/// matching the Java text must map it.
pub const RANGE_ERROR_TITLE: &str = "RANGE_ERROR";
pub const RANGE_ERROR_DETAIL: &str =
    "A provided value is outside of the expected range of an associated value, such as a given index value for an array being larger than the current size of the array.";

pub const STATUS_ENTRY_ERROR_TITLE: &str = "STATUS_ENTRY_ERROR";

pub const STATUS_CHECK_CANCELLED_TITLE: &str = "STATUS_CHECK_CANCELLED";
pub const STATUS_CHECK_CANCELLED_DETAIL: &str = "status check was cancelled by the caller";

/// Which step of bitstring decoding rejected the encoded list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingErrorKind {
    /// Encoded list is empty or absent.
    Empty,
    /// First character is not the `u` multibase marker.
    MissingMarker,
    /// Payload contains characters outside `[A-Za-z0-9_-]`.
    InvalidBase64Url,
    /// Payload passed the alphabet check but is not decodable Base64.
    InvalidBase64,
}

impl EncodingErrorKind {
    fn title(self) -> &'static str {
        match self {
            Self::Empty | Self::MissingMarker => ENCODED_LIST_ERROR_TITLE,
            Self::InvalidBase64Url | Self::InvalidBase64 => BASE64URL_ERROR_TITLE,
        }
    }

    fn detail(self) -> &'static str {
        match self {
            Self::Empty => ENCODED_LIST_EMPTY_DETAIL,
            Self::MissingMarker => ENCODED_LIST_MARKER_DETAIL,
            Self::InvalidBase64Url => BASE64URL_ERROR_DETAIL,
            Self::InvalidBase64 => BASE64_ERROR_DETAIL,
        }
    }
}

/// Status verification errors.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    /// A status entry declares a negative `statusListIndex`.
    #[error(
        "{}: {} (got {index})",
        STATUS_LIST_INDEX_ERROR_TITLE,
        STATUS_LIST_INDEX_ERROR_DETAIL
    )]
    Index { index: i64 },

    /// Fetching the status list credential failed.
    #[error(
        "{}: {}: {cause}",
        STATUS_LIST_NETWORK_ERROR_TITLE,
        STATUS_LIST_NETWORK_ERROR_DETAIL
    )]
    Network { cause: String },

    /// Entry purpose is not asserted by the fetched status list.
    #[error(
        "{}: {} (entry: {entry_purpose}, list: {list_purpose})",
        STATUS_PURPOSE_COMPARISON_ERROR_TITLE,
        STATUS_PURPOSE_COMPARISON_ERROR_DETAIL
    )]
    PurposeMismatch {
        entry_purpose: String,
        list_purpose: String,
    },

    /// Encoded list is empty, unmarked or not Base64URL.
    #[error("{}: {}", .kind.title(), .kind.detail())]
    Encoding { kind: EncodingErrorKind },

    /// Gzip decompression of the decoded list failed.
    #[error("{}: {message}", DECOMPRESSION_ERROR_TITLE)]
    Decompression { message: String },

    /// Bit offset lies beyond the decompressed bitstring.
    #[error(
        "{}: {} (bit offset {offset}, list length {length} bytes)",
        RANGE_ERROR_TITLE,
        RANGE_ERROR_DETAIL
    )]
    Range { offset: u64, length: usize },

    /// Status entry is malformed (wrong types, missing fields, bad locator).
    #[error("{}: {message}", STATUS_ENTRY_ERROR_TITLE)]
    InvalidEntry { message: String },

    /// The caller cancelled the run before it completed.
    #[error("{}: {}", STATUS_CHECK_CANCELLED_TITLE, STATUS_CHECK_CANCELLED_DETAIL)]
    Cancelled,
}

impl StatusError {
    pub(crate) fn encoding(kind: EncodingErrorKind) -> Self {
        Self::Encoding { kind }
    }

    pub(crate) fn invalid_entry(message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            message: message.into(),
        }
    }

    pub(crate) fn network(cause: impl Into<String>) -> Self {
        Self::Network {
            cause: cause.into(),
        }
    }

    /// Stable machine-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Index { .. } => STATUS_LIST_INDEX_ERROR_TITLE,
            Self::Network { .. } => STATUS_LIST_NETWORK_ERROR_TITLE,
            Self::PurposeMismatch { .. } => STATUS_PURPOSE_COMPARISON_ERROR_TITLE,
            Self::Encoding { kind } => kind.title(),
            Self::Decompression { .. } => DECOMPRESSION_ERROR_TITLE,
            Self::Range { .. } => RANGE_ERROR_TITLE,
            Self::InvalidEntry { .. } => STATUS_ENTRY_ERROR_TITLE,
            Self::Cancelled => STATUS_CHECK_CANCELLED_TITLE,
        }
    }

    /// Human-readable detail.
    ///
    /// Fixed text for every kind except decompression and malformed entries,
    /// which report the underlying cause.
    pub fn detail(&self) -> String {
        match self {
            Self::Index { .. } => STATUS_LIST_INDEX_ERROR_DETAIL.to_string(),
            Self::Network { .. } => STATUS_LIST_NETWORK_ERROR_DETAIL.to_string(),
            Self::PurposeMismatch { .. } => STATUS_PURPOSE_COMPARISON_ERROR_DETAIL.to_string(),
            Self::Encoding { kind } => kind.detail().to_string(),
            Self::Decompression { message } => message.clone(),
            Self::Range { .. } => RANGE_ERROR_DETAIL.to_string(),
            Self::InvalidEntry { message } => message.clone(),
            Self::Cancelled => STATUS_CHECK_CANCELLED_DETAIL.to_string(),
        }
    }

    /// Title/detail pair in problem-details shape.
    pub fn problem(&self) -> ProblemDetails {
        ProblemDetails {
            title: self.title().to_string(),
            detail: self.detail(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Caller input
            Self::Index { .. } => 1,
            Self::InvalidEntry { .. } => 1,

            // Integrity / configuration
            Self::PurposeMismatch { .. } => 4,

            // Network/transient
            Self::Network { .. } => 5,

            // Payload
            Self::Encoding { .. } => 6,
            Self::Decompression { .. } => 6,
            Self::Range { .. } => 6,

            Self::Cancelled => 130,
        }
    }

    /// Whether a caller-level retry could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

impl From<reqwest::Error> for StatusError {
    fn from(err: reqwest::Error) -> Self {
        let cause = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else {
            err.to_string()
        };
        Self::Network { cause }
    }
}

/// Serializable title/detail pair, shaped after RFC 9457 problem details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub title: String,
    pub detail: String,
}

/// Result type for status operations.
pub type StatusResult<T> = Result<T, StatusError>;
