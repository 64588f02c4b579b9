use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use credential_status::ClientConfig;

#[derive(Parser, Debug)]
#[command(
    name = "credential-status",
    version,
    about = "Check credential revocation and suspension against bitstring status lists"
)]
pub struct Cli {
    #[command(flatten)]
    pub http: HttpArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a single position in a status list
    Check(CheckArgs),
    /// Check every credentialStatus entry of a credential
    Verify(VerifyArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct HttpArgs {
    /// Request timeout in seconds (default: 30)
    #[arg(long, global = true, env = "CREDENTIAL_STATUS_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Connect timeout in seconds (default: 10)
    #[arg(long, global = true, env = "CREDENTIAL_STATUS_CONNECT_TIMEOUT")]
    pub connect_timeout: Option<u64>,
}

impl HttpArgs {
    /// Library defaults, overridden by flags or their environment variables.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(secs) = self.timeout {
            config = config.with_timeout_secs(secs);
        }
        if let Some(secs) = self.connect_timeout {
            config = config.with_connect_timeout_secs(secs);
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// URL of the status list credential
    #[arg(long)]
    pub list_url: String,

    /// Position of the credential in the list
    #[arg(long, allow_negative_numbers = true)]
    pub index: i64,

    /// Status purpose to check
    #[arg(long, default_value = "revocation")]
    pub purpose: String,

    /// Bits per entry
    #[arg(long, default_value_t = 1)]
    pub size: u32,
}

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Credential JSON file, or `-` for stdin
    #[arg(long)]
    pub credential: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from([
            "credential-status",
            "check",
            "--list-url",
            "https://example.com/credentials/status/3",
            "--index",
            "94567",
        ])
        .unwrap();

        match cli.cmd {
            Command::Check(args) => {
                assert_eq!(args.index, 94567);
                assert_eq!(args.purpose, "revocation");
                assert_eq!(args.size, 1);
            }
            other => panic!("expected check, got {other:?}"),
        }
        assert!(cli.http.timeout.is_none());
    }

    #[test]
    fn test_check_negative_index_parses() {
        let cli = Cli::try_parse_from([
            "credential-status",
            "check",
            "--list-url",
            "https://example.com/s",
            "--index=-1",
        ])
        .unwrap();
        match cli.cmd {
            Command::Check(args) => assert_eq!(args.index, -1),
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn test_global_timeouts_after_subcommand() {
        let cli = Cli::try_parse_from([
            "credential-status",
            "verify",
            "--credential",
            "vc.json",
            "--timeout",
            "5",
            "--connect-timeout",
            "2",
        ])
        .unwrap();

        let config = cli.http.client_config();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 2);
    }

    #[test]
    fn test_check_requires_list_url() {
        let argv = ["credential-status", "check", "--index", "1"];
        let err = Cli::try_parse_from(argv).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_non_numeric_index_rejected() {
        let result = Cli::try_parse_from([
            "credential-status",
            "check",
            "--list-url",
            "https://example.com/s",
            "--index",
            "abc",
        ]);
        assert!(result.is_err());
    }

    fn env_name(id: &str) -> Option<String> {
        Cli::command()
            .get_arguments()
            .find(|arg| arg.get_id() == id)
            .and_then(|arg| arg.get_env())
            .map(|env| env.to_string_lossy().into_owned())
    }

    #[test]
    fn test_timeouts_read_environment() {
        let timeout = env_name("timeout");
        assert_eq!(timeout.as_deref(), Some("CREDENTIAL_STATUS_TIMEOUT"));

        let connect = env_name("connect_timeout");
        assert_eq!(
            connect.as_deref(),
            Some("CREDENTIAL_STATUS_CONNECT_TIMEOUT")
        );
    }

    #[test]
    fn test_client_config_without_flags_uses_defaults() {
        let config = HttpArgs::default().client_config();
        assert_eq!(config, ClientConfig::default());
    }
}
