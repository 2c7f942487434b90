//! Resource lock registry.
//!
//! This module implements fail-fast, in-process mutual exclusion over
//! caller-chosen resource identifiers (e.g. `game-42`):
//! - `acquire` never waits: a held resource fails with `LockHeld` at once
//! - every hold has a timeout and a one-shot expiry timer
//! - a periodic sweep reclaims anything a missed timer left behind
//!
//! # Lock Entries
//!
//! Each live hold records:
//! - `resource_id`: the key; at most one entry per key
//! - `acquired_at`: instant read from the registry's scheduler
//! - `timeout`: maximum hold duration
//! - `generation`: registry-unique tag identifying this particular hold
//!
//! # Guards
//!
//! A successful acquisition returns a [`LockGuard`]. Releasing it (explicitly
//! or by dropping it) removes the entry only if it is still the same hold, so
//! a guard left over from an expired hold never frees a newer one.
//!
//! # Timeouts
//!
//! Expiry is silent. The holder is not told that its lock was reclaimed and
//! may keep working under the assumption that it is still exclusive.

mod guard;
mod registry;
mod types;


// Re-export public API
pub use guard::LockGuard;
pub use registry::LockRegistry;
pub use types::LockInfo;
