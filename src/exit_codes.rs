//! Exit code constants for the lobbylock CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Configuration failure (unreadable or invalid config)
//! - 3: Scheduler failure (timer thread could not start)
//! - 4: Lock acquisition failure

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid state.
pub const USER_ERROR: i32 = 1;

/// Configuration failure: config file missing, malformed, or invalid.
pub const CONFIG_FAILURE: i32 = 2;

/// Scheduler failure: the background timer thread could not be started.
pub const SCHEDULER_FAILURE: i32 = 3;

/// Lock acquisition failure: the resource is already held.
pub const LOCK_FAILURE: i32 = 4;
