#![forbid(unsafe_code)]

//! Deferred auto-return timer.
//!
//! [`DeferredActionTimer`] owns the at-most-one pending "snap back" and the
//! host scheduler that will deliver it. Scheduling is last-write-wins: arming
//! replaces any outstanding callback, which is cancelled silently and never
//! fires. The controller's teardown — and the timer's own `Drop` — cancel
//! unconditionally, so no callback can outlive the window that armed it.
//!
//! When the host fires, the controller hands the payload back through
//! [`claim`](DeferredActionTimer::claim); only a fire that matches the
//! currently armed action is honored, anything else is a stale delivery and
//! is dropped.

use std::time::Duration;

use tracing::{debug, trace};

use crate::host::DeferredScheduler;

/// The two integers carried by a deferred snap-back: where the reverse snap
/// starts and where it returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapBackPayload {
    pub from_x: i32,
    pub to_x: i32,
}

impl SnapBackPayload {
    /// Create a payload.
    #[must_use]
    pub const fn new(from_x: i32, to_x: i32) -> Self {
        Self { from_x, to_x }
    }
}

/// Owns the pending auto-return and its host scheduler.
pub struct DeferredActionTimer {
    scheduler: Box<dyn DeferredScheduler>,
    pending: Option<SnapBackPayload>,
    /// Counts arms, for log correlation only.
    generation: u64,
}

impl std::fmt::Debug for DeferredActionTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredActionTimer")
            .field("pending", &self.pending)
            .field("generation", &self.generation)
            .finish()
    }
}

impl DeferredActionTimer {
    /// Create a disarmed timer over the host scheduler.
    #[must_use]
    pub fn new(scheduler: Box<dyn DeferredScheduler>) -> Self {
        Self {
            scheduler,
            pending: None,
            generation: 0,
        }
    }

    /// Arm the timer, replacing any not-yet-fired action (which never fires).
    pub fn schedule(&mut self, payload: SnapBackPayload, delay: Duration) {
        if self.pending.is_some() {
            self.scheduler.cancel_scheduled();
        }
        self.generation += 1;
        self.pending = Some(payload);
        self.scheduler.schedule_once(delay, payload);
        debug!(
            generation = self.generation,
            from_x = payload.from_x,
            to_x = payload.to_x,
            delay_ms = delay.as_millis() as u64,
            "auto-return armed"
        );
    }

    /// Disarm unconditionally.
    pub fn cancel_all(&mut self) {
        if self.pending.take().is_some() {
            self.scheduler.cancel_scheduled();
            trace!(generation = self.generation, "auto-return cancelled");
        }
    }

    /// Validate a host fire against the armed action and consume it.
    ///
    /// Returns `None` for a stale or unknown payload; the caller drops those.
    pub fn claim(&mut self, payload: SnapBackPayload) -> Option<SnapBackPayload> {
        match self.pending {
            Some(armed) if armed == payload => {
                self.pending = None;
                Some(armed)
            }
            _ => {
                trace!(
                    from_x = payload.from_x,
                    to_x = payload.to_x,
                    "stale auto-return fire dropped"
                );
                None
            }
        }
    }

    /// Whether an action is armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl Drop for DeferredActionTimer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
