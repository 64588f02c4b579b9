use std::future::Future;

use credential_status::{
    StatusEntry, StatusListFetcher, StatusResult, StatusVerifier, VerificationResult,
};
use tracing::debug;

use super::super::args::CheckArgs;

pub async fn run<F: StatusListFetcher>(
    verifier: &StatusVerifier<F>,
    args: CheckArgs,
    cancel: impl Future<Output = ()>,
) -> StatusResult<Vec<VerificationResult>> {
    let entry = StatusEntry::new(args.purpose, args.index, args.list_url)
        .with_status_size(args.size);
    debug!(?entry, "checking single status entry");
    verifier.verify_until(&[entry], cancel).await
}
