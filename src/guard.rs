//! Degraded-mode menu binding.
//!
//! When a script error escapes, or the controller cannot mount, a bare
//! click-to-toggle handler keeps the mobile menu usable. [`FallbackLatch`]
//! decides whether that handler may be attached.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::Cell;

/// Gate for the fallback toggle binding.
///
/// The toggle has one owner: the fallback or the controller. The fallback is
/// attached at most once, and never alongside a mounted controller: two
/// click handlers toggling the same class cancel each other.
#[derive(Debug, Default)]
pub struct FallbackLatch {
    controller_live: Cell<bool>,
    installed: Cell<bool>,
}

impl FallbackLatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the toggle for the full controller before it binds.
    ///
    /// Returns `false` when the fallback already owns the toggle; the page
    /// then stays in degraded mode.
    #[must_use]
    pub fn mark_live(&self) -> bool {
        if self.installed.get() {
            return false;
        }
        self.controller_live.set(true);
        true
    }

    /// The controller failed to mount after [`mark_live`](Self::mark_live).
    pub fn stand_down(&self) {
        self.controller_live.set(false);
    }

    /// Claim the right to attach the fallback.
    ///
    /// Returns `true` exactly once, and only if no controller is live.
    #[must_use]
    pub fn claim(&self) -> bool {
        if self.controller_live.get() || self.installed.get() {
            return false;
        }
        self.installed.set(true);
        true
    }

    /// Undo a claim whose binding could not be attached.
    pub fn release(&self) {
        self.installed.set(false);
    }
}
