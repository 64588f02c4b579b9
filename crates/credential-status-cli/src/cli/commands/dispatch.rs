use credential_status::{StatusListClient, StatusResult, StatusVerifier, VerificationResult};
use tracing::{error, info};

use super::super::args::{Cli, Command};
use crate::exit_codes;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let verifier = match StatusListClient::new(cli.http.client_config()) {
        Ok(client) => StatusVerifier::new(client),
        Err(e) => return report(Err(e)),
    };

    let outcome = match cli.cmd {
        Command::Check(args) => super::check::run(&verifier, args, interrupted()).await,
        Command::Verify(args) => super::verify::run(&verifier, args, interrupted()).await?,
    };
    report(outcome)
}

/// Print results as JSON on stdout, or the problem details on stderr.
fn report(outcome: StatusResult<Vec<VerificationResult>>) -> anyhow::Result<i32> {
    match outcome {
        Ok(results) => {
            info!(entries = results.len(), "status check complete");
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(exit_codes::EXIT_SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "status check failed");
            eprintln!("{}", serde_json::to_string(&e.problem())?);
            Ok(e.exit_code())
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
