//! Release capability returned by a successful acquisition.

use super::registry::RegistryInner;
use std::sync::Weak;
use std::sync::atomic::{AtomicBool, Ordering};

/// RAII guard for one hold on a resource.
///
/// Dropping the guard releases the hold. The guard is bound to the specific
/// acquisition that produced it: once that hold is gone (released, expired,
/// swept, or cleared by shutdown) the guard can no longer affect the
/// resource, even if someone else has acquired it since.
#[derive(Debug)]
pub struct LockGuard {
    registry: Weak<RegistryInner>,
    resource_id: String,
    generation: u64,
    released: AtomicBool,
}

impl LockGuard {
    pub(super) fn new(registry: Weak<RegistryInner>, resource_id: String, generation: u64) -> Self {
        Self {
            registry,
            resource_id,
            generation,
            released: AtomicBool::new(false),
        }
    }

    /// The resource this guard was acquired for.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Release the hold.
    ///
    /// Only the first call has an effect; later calls, and calls after the
    /// hold already expired, are no-ops.
    pub fn release(&self) {
        if self.released.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.release_generation(&self.resource_id, self.generation);
        }
    }

    /// Give up the guard without releasing.
    ///
    /// The hold stays in place until its timeout reclaims it, exactly as if
    /// the holder had crashed.
    pub fn abandon(self) {
        self.released.store(true, Ordering::Release);
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.release();
    }
}
