//! Error types for lobbylock.
//!
//! Uses thiserror for derive macros. Only `LockHeld` is produced by the
//! registry itself; the other variants belong to configuration, the timer
//! backend and the CLI.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for lobbylock operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LobbyLockError {
    /// The resource already has a live lock entry.
    #[error("Resource {0} is locked")]
    LockHeld(String),

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be read, parsed, or validated.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The timer backend could not be started.
    #[error("Scheduler error: {0}")]
    SchedulerError(String),
}

impl LobbyLockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LobbyLockError::LockHeld(_) => exit_codes::LOCK_FAILURE,
            LobbyLockError::UserError(_) => exit_codes::USER_ERROR,
            LobbyLockError::ConfigError(_) => exit_codes::CONFIG_FAILURE,
            LobbyLockError::SchedulerError(_) => exit_codes::SCHEDULER_FAILURE,
        }
    }
}

/// Result type alias for lobbylock operations.
pub type Result<T> = std::result::Result<T, LobbyLockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_held_has_correct_exit_code() {
        let err = LobbyLockError::LockHeld("game-42".to_string());
        assert_eq!(err.exit_code(), exit_codes::LOCK_FAILURE);
    }

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = LobbyLockError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = LobbyLockError::ConfigError("bad yaml".to_string());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_FAILURE);
    }

    #[test]
    fn scheduler_error_is_not_a_user_error() {
        let err = LobbyLockError::SchedulerError("failed to spawn timer thread".to_string());
        assert_eq!(err.exit_code(), exit_codes::SCHEDULER_FAILURE);
        assert_ne!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(
            err.to_string(),
            "Scheduler error: failed to spawn timer thread"
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = LobbyLockError::LockHeld("game-42".to_string());
        assert_eq!(err.to_string(), "Resource game-42 is locked");

        let err = LobbyLockError::ConfigError("default_timeout_ms must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "Configuration error: default_timeout_ms must be greater than 0"
        );
    }
}
