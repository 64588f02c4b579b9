//! Status entry, status list and result types.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{StatusError, StatusResult};

/// A `credentialStatus` entry pointing into a bitstring status list.
///
/// Deserialization accepts `statusListIndex` and `statusSize` either as JSON
/// numbers or as decimal strings; issuers publish both forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    /// Entry identifier (e.g., "https://example.com/credentials/status/3#94567").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Entry type (e.g., "BitstringStatusListEntry").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Purpose of the status bit (e.g., "revocation", "suspension").
    pub status_purpose: String,

    /// Logical position in the bitstring.
    #[serde(deserialize_with = "int_or_string")]
    pub status_list_index: i64,

    /// URL of the status list credential.
    pub status_list_credential: String,

    /// Number of bits per entry.
    #[serde(default = "default_status_size", deserialize_with = "int_or_string")]
    pub status_size: u32,
}

fn default_status_size() -> u32 {
    1
}

fn int_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", n)))?,
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("expected an integer, got \"{}\"", s)))?,
        other => {
            return Err(de::Error::custom(format!(
                "expected an integer or integer string, got {}",
                other
            )))
        }
    };
    T::try_from(number).map_err(|_| de::Error::custom(format!("integer out of range: {}", number)))
}

impl StatusEntry {
    /// Create an entry with the default status size of 1.
    pub fn new(
        status_purpose: impl Into<String>,
        status_list_index: i64,
        status_list_credential: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            type_: None,
            status_purpose: status_purpose.into(),
            status_list_index,
            status_list_credential: status_list_credential.into(),
            status_size: default_status_size(),
        }
    }

    /// Set the number of bits per entry.
    pub fn with_status_size(mut self, status_size: u32) -> Self {
        self.status_size = status_size;
        self
    }

    /// Parse an entry from a raw `credentialStatus` JSON object.
    pub fn from_json(value: &Value) -> StatusResult<Self> {
        Self::deserialize(value)
            .map_err(|e| StatusError::invalid_entry(format!("malformed credentialStatus: {}", e)))
    }
}

/// One or more status purposes asserted by a status list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusPurposes {
    One(String),
    Many(Vec<String>),
}

impl StatusPurposes {
    /// Case-insensitive membership test.
    pub fn matches(&self, purpose: &str) -> bool {
        let wanted = purpose.to_lowercase();
        match self {
            Self::One(p) => p.to_lowercase() == wanted,
            Self::Many(ps) => ps.iter().any(|p| p.to_lowercase() == wanted),
        }
    }
}

impl std::fmt::Display for StatusPurposes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One(p) => write!(f, "{}", p),
            Self::Many(ps) => write!(f, "{}", ps.join(",")),
        }
    }
}

/// Subject of a status list credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusListSubject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Purpose(s) the list as a whole asserts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_purpose: Option<StatusPurposes>,

    /// Multibase (`u`) Base64URL encoding of the gzipped bitstring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoded_list: Option<String>,
}

/// Fetched status list credential.
///
/// Only the subject's `statusPurpose` and `encodedList` are interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusListCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub credential_subject: StatusListSubject,
}

impl StatusListCredential {
    /// Build a list document from its two interpreted fields.
    pub fn new(status_purpose: impl Into<String>, encoded_list: impl Into<String>) -> Self {
        Self {
            id: None,
            credential_subject: StatusListSubject {
                id: None,
                status_purpose: Some(StatusPurposes::One(status_purpose.into())),
                encoded_list: Some(encoded_list.into()),
            },
        }
    }

    pub fn status_purpose(&self) -> Option<&StatusPurposes> {
        self.credential_subject.status_purpose.as_ref()
    }

    pub fn encoded_list(&self) -> Option<&str> {
        self.credential_subject.encoded_list.as_deref()
    }

    /// Whether the list asserts `purpose`. A list without a purpose matches nothing.
    pub fn asserts_purpose(&self, purpose: &str) -> bool {
        self.status_purpose()
            .map(|p| p.matches(purpose))
            .unwrap_or(false)
    }
}

/// Outcome of checking one status entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Purpose copied from the checked entry.
    pub status_purpose: String,

    /// State of the entry's bit (`true` = set, i.e. revoked/suspended).
    pub status: bool,
}

/// HTTP fetcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Largest status list response body accepted, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default response body limit: 32 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ClientConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `CREDENTIAL_STATUS_TIMEOUT` | Request timeout in seconds |
    /// | `CREDENTIAL_STATUS_CONNECT_TIMEOUT` | Connect timeout in seconds |
    pub fn from_env() -> Self {
        Self {
            timeout_secs: std::env::var("CREDENTIAL_STATUS_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
            connect_timeout_secs: std::env::var("CREDENTIAL_STATUS_CONNECT_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_connect_timeout),
            max_body_bytes: default_max_body_bytes(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    /// Set the response body limit.
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    fn test_entry_from_json_string_index() {
        let entry = StatusEntry::from_json(&json!({
            "id": "https://example.com/credentials/status/3#4000",
            "type": "BitstringStatusListEntry",
            "statusPurpose": "revocation",
            "statusListIndex": "4000",
            "statusListCredential": "https://example.com/credentials/status/3"
        }))
        .unwrap();

        assert_eq!(entry.status_list_index, 4000);
        assert_eq!(entry.status_size, 1);
        assert_eq!(entry.type_.as_deref(), Some("BitstringStatusListEntry"));
    }

    #[test]
    fn test_entry_from_json_numeric_fields() {
        let entry = StatusEntry::from_json(&json!({
            "statusPurpose": "message",
            "statusListIndex": 12,
            "statusSize": 2,
            "statusListCredential": "https://example.com/status/1"
        }))
        .unwrap();

        assert_eq!(entry.status_list_index, 12);
        assert_eq!(entry.status_size, 2);
    }

    #[test]
    fn test_entry_negative_index_parses() {
        let entry = StatusEntry::from_json(&json!({
            "statusPurpose": "revocation",
            "statusListIndex": "-1",
            "statusListCredential": "https://example.com/status/1"
        }))
        .unwrap();
        assert_eq!(entry.status_list_index, -1);
    }

    #[test]
    fn test_entry_non_numeric_index() {
        let err = StatusEntry::from_json(&json!({
            "statusPurpose": "revocation",
            "statusListIndex": "abc",
            "statusListCredential": "https://example.com/status/1"
        }))
        .unwrap_err();
        assert!(matches!(err, StatusError::InvalidEntry { .. }));
        assert!(err.detail().contains("abc"));
    }

    #[test]
    fn test_entry_missing_locator() {
        let err = StatusEntry::from_json(&json!({
            "statusPurpose": "revocation",
            "statusListIndex": "1"
        }))
        .unwrap_err();
        assert!(matches!(err, StatusError::InvalidEntry { .. }));
        assert!(err.detail().contains("statusListCredential"));
    }

    #[test]
    fn test_entry_negative_status_size_rejected() {
        let err = StatusEntry::from_json(&json!({
            "statusPurpose": "revocation",
            "statusListIndex": "1",
            "statusSize": "-2",
            "statusListCredential": "https://example.com/status/1"
        }))
        .unwrap_err();
        assert!(matches!(err, StatusError::InvalidEntry { .. }));
    }

    #[test]
    fn test_purposes_match_case_insensitive() {
        let one = StatusPurposes::One("Revocation".into());
        assert!(one.matches("REVOCATION"));
        assert!(!one.matches("suspension"));

        let many: StatusPurposes =
            serde_json::from_value(json!(["revocation", "suspension"])).unwrap();
        assert!(many.matches("Suspension"));
        assert!(!many.matches("message"));
    }

    #[test]
    fn test_list_without_purpose_matches_nothing() {
        let list: StatusListCredential = serde_json::from_value(json!({
            "credentialSubject": { "encodedList": "uH4sI" }
        }))
        .unwrap();
        assert!(!list.asserts_purpose("revocation"));
        assert_eq!(list.encoded_list(), Some("uH4sI"));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = VerificationResult {
            status_purpose: "revocation".into(),
            status: true,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "statusPurpose": "revocation", "status": true })
        );
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);

        let config = config
            .with_timeout_secs(5)
            .with_connect_timeout_secs(2)
            .with_max_body_bytes(1024);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 2);
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    #[serial]
    fn test_client_config_from_env() {
        std::env::set_var("CREDENTIAL_STATUS_TIMEOUT", "3");
        std::env::set_var("CREDENTIAL_STATUS_CONNECT_TIMEOUT", "not-a-number");
        let config = ClientConfig::from_env();
        std::env::remove_var("CREDENTIAL_STATUS_TIMEOUT");
        std::env::remove_var("CREDENTIAL_STATUS_CONNECT_TIMEOUT");

        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    #[serial]
    fn test_client_config_from_empty_env() {
        std::env::remove_var("CREDENTIAL_STATUS_TIMEOUT");
        std::env::remove_var("CREDENTIAL_STATUS_CONNECT_TIMEOUT");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }
}
