//! CLI flags and command dispatch.

use crate::constants;
use crate::core::credstore::EnvFileStore;
use crate::models::target::ConnectionTarget;
use anyhow::Result;
use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;
use tracing::debug;

pub mod key;
pub mod shutdown;

const EXAMPLES: &str = "\
Examples:
  ergo-shutdown --set-key YOUR_API_KEY    # Save API key
  ergo-shutdown --view-key                # View saved key
  ergo-shutdown --remove-key              # Remove saved key
  ergo-shutdown                           # Run shutdown with saved key
  ergo-shutdown --api-key KEY             # Run with temporary key";

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub store: EnvFileStore,
    pub target: ConnectionTarget,
    pub api_key: Option<String>,
}

fn parse_scheme(s: &str) -> Result<String, String> {
    let lower = s.to_ascii_lowercase();
    if constants::VALID_SCHEMES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(format!(
            "invalid scheme '{}', must be one of: {}",
            s,
            constants::VALID_SCHEMES.join(", ")
        ))
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "ergo-shutdown",
    version,
    about = "Ergo Node Shutdown Tool",
    after_help = EXAMPLES
)]
#[command(group(ArgGroup::new("key_command").args(["set_key", "view_key", "remove_key"])))]
pub struct Cli {
    /// Host address
    #[arg(long, env = "ERGO_NODE_HOST", default_value = constants::DEFAULT_HOST)]
    pub host: String,

    /// Port number
    #[arg(long, env = "ERGO_NODE_PORT", default_value_t = constants::DEFAULT_PORT)]
    pub port: u16,

    /// URL scheme of the node API (http|https)
    #[arg(long, env = "ERGO_NODE_SCHEME", default_value = constants::DEFAULT_SCHEME, value_parser = parse_scheme)]
    pub scheme: String,

    /// Use API key for this session only
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Save new API key for future use
    #[arg(long, value_name = "KEY", num_args = 0..=1, default_missing_value = "")]
    pub set_key: Option<String>,

    /// View current saved API key (masked)
    #[arg(long)]
    pub view_key: bool,

    /// Remove saved API key
    #[arg(long)]
    pub remove_key: bool,

    /// Credential file (default: .env in the working directory)
    #[arg(long, value_name = "PATH", env = "ERGO_SHUTDOWN_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// What a parsed command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetKey(String),
    ViewKey,
    RemoveKey,
    Shutdown,
}

impl Cli {
    pub fn command(&self) -> Command {
        if let Some(key) = &self.set_key {
            Command::SetKey(key.clone())
        } else if self.view_key {
            Command::ViewKey
        } else if self.remove_key {
            Command::RemoveKey
        } else {
            Command::Shutdown
        }
    }

    /// Run the selected command. `Ok(false)` is a reported failure (exit 1).
    pub fn run(self) -> Result<bool> {
        let command = self.command();
        let ctx = CliContext {
            store: EnvFileStore::resolve(self.env_file)?,
            target: ConnectionTarget::new(self.scheme, self.host, self.port),
            api_key: self.api_key,
        };
        debug!(?command, env_file = %ctx.store.path().display(), "dispatching");

        match command {
            Command::SetKey(key) => key::run_set(&ctx, &key),
            Command::ViewKey => key::run_view(&ctx),
            Command::RemoveKey => key::run_remove(&ctx),
            Command::Shutdown => shutdown::run(&ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ergo-shutdown").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.command(), Command::Shutdown);
        assert_eq!(cli.port, constants::DEFAULT_PORT);
        assert_eq!(cli.scheme, "http");
        assert!(cli.api_key.is_none());
    }

    #[test]
    fn test_target_overrides() {
        let cli = parse(&["--host", "10.0.0.2", "--port", "9052", "--scheme", "HTTPS"]);
        assert_eq!(cli.host, "10.0.0.2");
        assert_eq!(cli.port, 9052);
        assert_eq!(cli.scheme, "https");
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(parse(&["--set-key", "abc"]).command(), Command::SetKey("abc".into()));
        assert_eq!(parse(&["--set-key"]).command(), Command::SetKey(String::new()));
        assert_eq!(parse(&["--view-key"]).command(), Command::ViewKey);
        assert_eq!(parse(&["--remove-key"]).command(), Command::RemoveKey);
        assert_eq!(parse(&["--api-key", "tmp"]).command(), Command::Shutdown);
    }

    #[test]
    fn test_key_commands_conflict() {
        assert!(Cli::try_parse_from(["ergo-shutdown", "--view-key", "--remove-key"]).is_err());
        assert!(Cli::try_parse_from(["ergo-shutdown", "--set-key", "a", "--view-key"]).is_err());
    }

    #[test]
    fn test_empty_set_key_with_other_key_command_is_usage_error() {
        let err = Cli::try_parse_from(["ergo-shutdown", "--set-key", "--view-key"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_invalid_port_and_scheme_rejected() {
        assert!(Cli::try_parse_from(["ergo-shutdown", "--port", "70000"]).is_err());
        assert!(Cli::try_parse_from(["ergo-shutdown", "--port", "abc"]).is_err());
        assert!(Cli::try_parse_from(["ergo-shutdown", "--scheme", "ftp"]).is_err());
    }

    #[test]
    fn test_verbose_count() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }
}
