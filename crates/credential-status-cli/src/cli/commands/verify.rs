use std::future::Future;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use credential_status::{StatusListFetcher, StatusResult, StatusVerifier, VerificationResult};
use serde_json::Value;

use super::super::args::VerifyArgs;

/// Outer error: the credential could not be read. Inner: the status check failed.
pub async fn run<F: StatusListFetcher>(
    verifier: &StatusVerifier<F>,
    args: VerifyArgs,
    cancel: impl Future<Output = ()>,
) -> anyhow::Result<StatusResult<Vec<VerificationResult>>> {
    let credential = read_credential(&args.credential)?;
    let entries = match credential_status::status_entries(&credential) {
        Ok(entries) => entries,
        Err(e) => return Ok(Err(e)),
    };
    Ok(verifier.verify_until(&entries, cancel).await)
}

fn read_credential(path: &Path) -> anyhow::Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read credential from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read credential {}", path.display()))?
    };
    serde_json::from_str(&raw)
        .with_context(|| format!("credential {} is not valid JSON", path.display()))
}
