//! Extraction of status entries from a verifiable credential.

use serde_json::Value;
use tracing::debug;

use crate::error::{StatusError, StatusResult};
use crate::types::StatusEntry;

/// Read the `credentialStatus` entries of a credential.
///
/// `credentialStatus` may be one object or an array of objects. A credential
/// without it has no entries.
pub fn status_entries(credential: &Value) -> StatusResult<Vec<StatusEntry>> {
    let object = credential
        .as_object()
        .ok_or_else(|| StatusError::invalid_entry("credential is not a JSON object"))?;

    let entries = match object.get("credentialStatus") {
        None | Some(Value::Null) => {
            debug!("credential has no credentialStatus");
            return Ok(Vec::new());
        }
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| entry_at(item, i))
            .collect::<StatusResult<Vec<_>>>()?,
        Some(item) => vec![entry_at(item, 0)?],
    };

    debug!(count = entries.len(), "extracted status entries");
    Ok(entries)
}

fn entry_at(item: &Value, position: usize) -> StatusResult<StatusEntry> {
    if !item.is_object() {
        return Err(StatusError::invalid_entry(format!(
            "credentialStatus[{}] is not an object",
            position
        )));
    }
    StatusEntry::from_json(item)
}
