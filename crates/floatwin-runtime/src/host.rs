#![forbid(unsafe_code)]

//! Host collaborator seams.
//!
//! The controller never talks to a window system, a timer service, or a
//! camera directly; it calls these traits. Hosts implement them over
//! whatever surface/scheduler machinery they own, and the harness implements
//! them as recording doubles.
//!
//! Geometry and render-hint calls are fire-and-forget: a host that cannot
//! apply them has already failed at attach time. Attach/detach are the
//! fallible seam — the overlay cannot function without a surface, so those
//! errors are surfaced to the caller, never swallowed (and never retried).

use std::time::Duration;

use thiserror::Error;

use crate::timer::SnapBackPayload;

/// Failures reported by host collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("failed to attach video source to surface: {0}")]
    SurfaceAttach(String),

    #[error("failed to detach video source: {0}")]
    SurfaceDetach(String),
}

/// Opaque identifier for the host's overlay surface, handed to the video
/// source on attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    /// Wrap a host-chosen identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The system surface hosting the overlay window.
pub trait SurfaceHost {
    /// Identifier passed to [`VideoSource::attach`].
    fn handle(&self) -> SurfaceHandle;

    /// Move the overlay window.
    fn set_position(&mut self, x: i32, y: i32);

    /// Resize the overlay window.
    fn set_size(&mut self, width: i32, height: i32);

    /// Toggle the hardware-accelerated rendering hint for the duration of a
    /// snap animation. Presentation-only; hosts may ignore it.
    fn set_render_hint(&mut self, hardware_accelerated: bool);
}

/// One-shot delayed callback service backing the auto-return timer.
///
/// The host must deliver at most the latest scheduled payload, via the
/// controller's `on_deferred_timer_fired`, and must drop a callback once
/// `cancel_scheduled` was called.
pub trait DeferredScheduler {
    /// Replace any outstanding callback with this one.
    fn schedule_once(&mut self, delay: Duration, payload: SnapBackPayload);

    /// Drop the outstanding callback, if any.
    fn cancel_scheduled(&mut self);
}

/// The double-tap action supplied by the embedder (e.g. launching capture).
pub trait PrimaryAction {
    fn invoke(&mut self);
}

/// The live video feed rendered into the overlay surface.
///
/// Pass-through only: the controller forwards attach/detach and never makes
/// frame-level decisions.
pub trait VideoSource {
    fn attach(&mut self, surface: SurfaceHandle) -> Result<(), HostError>;
    fn detach(&mut self) -> Result<(), HostError>;
}
