#![forbid(unsafe_code)]

//! Scripted overlay driver.
//!
//! [`OverlayHarness`] assembles a [`WindowController`] over the recording
//! doubles and owns a deterministic clock; its helpers express whole
//! interactions (a drag, a confirmed tap, a pinch sequence) as single calls
//! so the integration suites read as scenarios.

use std::time::{Duration, Instant};

use floatwin_core::config::OverlayConfig;
use floatwin_core::geometry::ScreenBounds;
use floatwin_runtime::controller::WindowController;

use crate::recording::{
    ActionProbe, CountingAction, ManualScheduler, RecordingSurface, SchedulerProbe,
    StubVideoSource, SurfaceRecorder, VideoProbe,
};

/// A controller wired to recording doubles, plus the probes and a clock.
pub struct OverlayHarness {
    pub controller: WindowController,
    pub surface: SurfaceRecorder,
    pub scheduler: SchedulerProbe,
    pub action: ActionProbe,
    pub video: VideoProbe,
    now: Instant,
}

impl OverlayHarness {
    /// Default configuration on a 1080x1920 portrait screen.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OverlayConfig::default(), ScreenBounds::new(1080, 1920))
    }

    /// Custom configuration and screen.
    #[must_use]
    pub fn with_config(config: OverlayConfig, screen: ScreenBounds) -> Self {
        let (video, video_probe) = StubVideoSource::new();
        Self::assemble(config, screen, video, video_probe)
    }

    /// Default configuration with a video source whose attach fails.
    #[must_use]
    pub fn with_failing_attach(message: &str) -> Self {
        let (video, video_probe) = StubVideoSource::failing_attach(message);
        Self::assemble(
            OverlayConfig::default(),
            ScreenBounds::new(1080, 1920),
            video,
            video_probe,
        )
    }

    /// Default configuration with a video source whose detach fails.
    #[must_use]
    pub fn with_failing_detach(message: &str) -> Self {
        let (video, video_probe) = StubVideoSource::failing_detach(message);
        Self::assemble(
            OverlayConfig::default(),
            ScreenBounds::new(1080, 1920),
            video,
            video_probe,
        )
    }

    fn assemble(
        config: OverlayConfig,
        screen: ScreenBounds,
        video: StubVideoSource,
        video_probe: VideoProbe,
    ) -> Self {
        let (surface, surface_probe) = RecordingSurface::new();
        let (scheduler, scheduler_probe) = ManualScheduler::new();
        let (action, action_probe) = CountingAction::new();
        let controller = WindowController::new(
            config,
            screen,
            Box::new(surface),
            Box::new(video),
            Box::new(action),
            Box::new(scheduler),
        )
        .expect("harness configuration is valid");
        Self {
            controller,
            surface: surface_probe,
            scheduler: scheduler_probe,
            action: action_probe,
            video: video_probe,
            now: Instant::now(),
        }
    }

    // -- Clock -------------------------------------------------------------

    /// The harness clock.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Advance the clock and return the new time.
    pub fn advance_ms(&mut self, ms: u64) -> Instant {
        self.now += Duration::from_millis(ms);
        self.now
    }

    // -- Scripted interactions --------------------------------------------

    /// Press at `start`, drag by `(dx, dy)` in two moves, release.
    pub fn drag_by(&mut self, start: (f32, f32), dx: f32, dy: f32) {
        let t = self.now;
        self.controller.on_pointer_down(start.0, start.1, t);
        let t = self.advance_ms(16);
        self.controller
            .on_pointer_move(start.0 + dx / 2.0, start.1 + dy / 2.0, t);
        let t = self.advance_ms(16);
        self.controller.on_pointer_move(start.0 + dx, start.1 + dy, t);
        let t = self.advance_ms(16);
        self.controller.on_pointer_up(start.0 + dx, start.1 + dy, t);
    }

    /// Quick down/up at `pos` without waiting out the double-tap window.
    pub fn tap_unconfirmed(&mut self, pos: (f32, f32)) {
        let t = self.now;
        self.controller.on_pointer_down(pos.0, pos.1, t);
        let t = self.advance_ms(40);
        self.controller.on_pointer_up(pos.0, pos.1, t);
    }

    /// A single tap, confirmed by letting the double-tap window lapse.
    pub fn tap(&mut self, pos: (f32, f32)) {
        self.tap_unconfirmed(pos);
        let t = self.advance_ms(350);
        self.controller.poll_gestures(t);
    }

    /// Two quick taps forming a double tap.
    pub fn double_tap(&mut self, pos: (f32, f32)) {
        self.tap_unconfirmed(pos);
        self.advance_ms(80);
        self.tap_unconfirmed(pos);
    }

    /// A pinch applying the given span factors in sequence. The primary
    /// pointer stays put; the secondary moves to stretch the span.
    pub fn pinch(&mut self, factors: &[f32]) {
        let anchor = (400.0, 400.0);
        let mut span = 100.0f32;
        let t = self.now;
        self.controller.on_pointer_down(anchor.0, anchor.1, t);
        let t = self.advance_ms(16);
        self.controller
            .on_secondary_pointer_down(anchor.0 + span, anchor.1, t);
        for factor in factors {
            span *= factor;
            let t = self.advance_ms(16);
            self.controller
                .on_secondary_pointer_move(anchor.0 + span, anchor.1, t);
        }
        let t = self.advance_ms(16);
        self.controller.on_secondary_pointer_up(t);
        let t = self.advance_ms(16);
        self.controller.on_pointer_up(anchor.0, anchor.1, t);
    }

    /// Drive the live snap to completion over `frames` evenly spaced ticks.
    pub fn finish_snap(&mut self, frames: u32) {
        for i in 1..=frames {
            self.controller.on_animation_tick(i as f32 / frames as f32);
        }
    }

    /// Expire the host timer and deliver its payload, as the host would.
    /// Returns false when nothing was scheduled.
    pub fn fire_auto_return(&mut self) -> bool {
        match self.scheduler.take_fire() {
            Some(payload) => {
                self.controller.on_deferred_timer_fired(payload);
                true
            }
            None => false,
        }
    }
}
