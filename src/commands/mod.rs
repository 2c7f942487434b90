//! Command implementations for lobbylock.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod config_cmd;
mod simulate;

use crate::cli::Command;
use lobbylock::config::Config;
use lobbylock::error::Result;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. Each command
/// is routed to its handler function.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Simulate(args) => simulate::cmd_simulate(args),
        Command::Config(args) => config_cmd::cmd_config(args),
    }
}

/// Load the config file when one is given, otherwise use the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConfigArgs;
    use lobbylock::exit_codes;

    #[test]
    fn load_config_defaults_without_path() {
        assert_eq!(load_config(None).unwrap(), Config::default());
    }

    #[test]
    fn load_config_missing_file_is_config_failure() {
        let result = load_config(Some(Path::new("/nonexistent/lobbylock.yaml")));
        assert_eq!(result.unwrap_err().exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn dispatch_routes_to_correct_handler() {
        let result = dispatch(Command::Config(ConfigArgs {
            config: Some("/nonexistent/lobbylock.yaml".into()),
        }));
        assert!(result.unwrap_err().to_string().contains("failed to read config file"));
    }
}
