#![forbid(unsafe_code)]

//! Runtime: the window controller and its host seams.
//!
//! # Role in floatwin
//! `floatwin-runtime` composes the pure pieces from `floatwin-core` — the
//! geometry model, the gesture interpreter, the snap animator — into
//! [`WindowController`], and defines the collaborator traits a host
//! implements to receive geometry commands and deliver timers.
//!
//! # Primary responsibilities
//! - **WindowController**: Idle/Dragging/Animating state machine, input
//!   suppression during snaps, tap toggle with auto-return, pinch rescale,
//!   overlay show/hide lifecycle.
//! - **DeferredActionTimer**: the owned, cancellable auto-return timer.
//! - **Host traits**: `SurfaceHost`, `DeferredScheduler`, `PrimaryAction`,
//!   `VideoSource`.
//!
//! # Concurrency model
//! Single-threaded and cooperative: every inbound call — pointer events,
//! animation ticks, the deferred fire — runs on one logical event queue.
//! Nothing here blocks, retries, or spawns.

pub mod controller;
pub mod error;
pub mod host;
pub mod timer;

pub use controller::{ControllerState, GestureSession, WindowController};
pub use error::ControllerError;
pub use host::{DeferredScheduler, HostError, PrimaryAction, SurfaceHandle, SurfaceHost, VideoSource};
pub use timer::{DeferredActionTimer, SnapBackPayload};
