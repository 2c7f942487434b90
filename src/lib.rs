//! Lobbylock: fail-fast, in-process resource locks for game-lobby servers.
//!
//! Request handlers serialize work on a shared resource (a game, a lobby) by
//! taking a lock on its identifier. Contention fails immediately instead of
//! queueing, and holds that outlive their timeout are reclaimed by a per-lock
//! timer, with a periodic sweep as a backstop.
//!
//! ```
//! use lobbylock::locks::LockRegistry;
//! use lobbylock::scheduler::ManualScheduler;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(ManualScheduler::new());
//! let registry = LockRegistry::new(clock.clone());
//!
//! let guard = registry.acquire_with_timeout("game-42", Duration::from_millis(1000))?;
//! assert!(registry.acquire("game-42").is_err());
//! guard.release();
//! assert!(!registry.is_locked("game-42"));
//! # Ok::<(), lobbylock::error::LobbyLockError>(())
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod scheduler;
