#![forbid(unsafe_code)]

//! Harness: deterministic doubles and scripted drivers for the overlay.
//!
//! # Role in floatwin
//! Everything the integration suites need to exercise the controller end to
//! end without a window system: recording host doubles, a manual scheduler
//! whose callbacks fire only when the test says so, and a scripted driver
//! that turns whole interactions into single calls.
//!
//! All doubles are probe-based: the double moves into the controller, the
//! probe stays with the test and observes (or fires) through shared state.

pub mod driver;
pub mod recording;

pub use driver::OverlayHarness;
pub use recording::{
    ActionProbe, CountingAction, ManualScheduler, RecordingSurface, SchedulerProbe, StubVideoSource,
    SurfaceCall, SurfaceRecorder, VideoProbe,
};
