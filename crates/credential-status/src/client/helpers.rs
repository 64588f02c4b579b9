//! Pure helpers: locator validation, body parsing (no HTTP, no status logic).

use url::Url;

use crate::error::{StatusError, StatusResult};
use crate::types::StatusListCredential;

/// Longest body fragment quoted in an error.
const MAX_EXCERPT_CHARS: usize = 200;

/// Parse a locator as an absolute http(s) URL.
pub(crate) fn parse_locator(locator: &str) -> StatusResult<Url> {
    let url = Url::parse(locator).map_err(|e| {
        StatusError::invalid_entry(format!(
            "statusListCredential is not a valid URL: {} ({})",
            locator, e
        ))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(StatusError::invalid_entry(format!(
            "statusListCredential must use http or https, got {}",
            other
        ))),
    }
}

/// Parse a response body as a status list credential.
pub(crate) fn parse_status_list(body: &str) -> StatusResult<StatusListCredential> {
    serde_json::from_str(body)
        .map_err(|e| StatusError::network(format!("failed to parse status list: {}", e)))
}

/// First characters of a body, for error messages.
pub(crate) fn body_excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no body".to_string()
    } else {
        trimmed.chars().take(MAX_EXCERPT_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locator_https() {
        let url = parse_locator("https://example.com/credentials/status/3").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/credentials/status/3");
    }

    #[test]
    fn test_parse_locator_rejects_relative() {
        let err = parse_locator("/credentials/status/3").unwrap_err();
        assert!(matches!(err, StatusError::InvalidEntry { .. }));
    }

    #[test]
    fn test_parse_locator_rejects_other_schemes() {
        let err = parse_locator("did:example:123").unwrap_err();
        assert!(err.detail().contains("did"));
        assert!(parse_locator("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_parse_status_list() {
        let body = r#"{
            "id": "https://example.com/credentials/status/3",
            "type": ["VerifiableCredential", "BitstringStatusListCredential"],
            "credentialSubject": {
                "id": "https://example.com/status/3#list",
                "type": "BitstringStatusList",
                "statusPurpose": "revocation",
                "encodedList": "uH4sIAAAAAAACA2sAAK1suj8BAAAA"
            }
        }"#;
        let list = parse_status_list(body).unwrap();
        assert!(list.asserts_purpose("revocation"));
        assert_eq!(list.encoded_list(), Some("uH4sIAAAAAAACA2sAAK1suj8BAAAA"));
    }

    #[test]
    fn test_parse_status_list_without_subject() {
        let err = parse_status_list(r#"{"id": "x"}"#).unwrap_err();
        assert!(matches!(err, StatusError::Network { .. }));
        assert!(err.to_string().contains("credentialSubject"));
    }

    #[test]
    fn test_body_excerpt_truncates() {
        let long = "x".repeat(500);
        assert_eq!(body_excerpt(&long).len(), MAX_EXCERPT_CHARS);
        assert_eq!(body_excerpt("  "), "no body");
    }
}
