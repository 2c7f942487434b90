//! Implementation of the `lobbylock config` command.

use crate::cli::ConfigArgs;
use crate::commands::load_config;
use lobbylock::error::Result;

/// Execute the `lobbylock config` command.
///
/// Prints the validated effective configuration as YAML.
pub fn cmd_config(args: ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_accepts_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sweep_interval_ms: 0").unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
        };
        assert!(cmd_config(args).is_ok());
    }

    #[test]
    fn config_rejects_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "default_timeout_ms: 0").unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
        };
        let err = cmd_config(args).unwrap_err();
        assert_eq!(err.exit_code(), lobbylock::exit_codes::CONFIG_FAILURE);
    }
}
