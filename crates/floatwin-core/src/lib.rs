#![forbid(unsafe_code)]

//! Core: geometry, gesture interpretation, and snap animation.
//!
//! # Role in floatwin
//! `floatwin-core` is the pure interaction layer. It owns the window's
//! geometry model, classifies raw pointer streams into semantic gestures,
//! and interpolates snap animations — all without touching a clock, a
//! thread, or a host API.
//!
//! # Primary responsibilities
//! - **GeometryModel**: position, scaled size, screen bounds, edge affinity.
//! - **GestureInterpreter**: press/drag/release/tap/double-tap/pinch from
//!   raw pointer events.
//! - **SnapAnimator**: fraction-driven horizontal interpolation with an
//!   explicit run lifecycle.
//! - **OverlayConfig**: construction-time constants with fail-fast
//!   validation.
//!
//! # How it fits in the system
//! The runtime (`floatwin-runtime`) composes these pieces into the window
//! controller and wires them to host collaborators. Everything here is
//! deterministic: time enters only as injected `Instant`s and tick
//! fractions, which is what makes the harness suites exact.

pub mod animation;
pub mod config;
pub mod event;
pub mod geometry;
pub mod gesture;

pub use animation::{AnimationRun, RunState, SnapAnimator, SnapStart, SnapTick};
pub use config::{ConfigError, OverlayConfig};
pub use event::PointerEvent;
pub use geometry::{GeometryModel, Point, ScaleLimits, ScreenBounds, Side, Size};
pub use gesture::{GestureConfig, GestureEvent, GestureInterpreter};
