#![forbid(unsafe_code)]

//! The window controller: root state machine of the overlay.
//!
//! [`WindowController`] owns the geometry model, the gesture interpreter,
//! the snap animator, and the auto-return timer, and routes everything to
//! the host collaborators. It is single-threaded and event-driven: pointer
//! events, animation ticks, and the deferred-timer fire all enter through
//! its methods on one logical queue, so no locking guards the geometry.
//!
//! # State Machine
//!
//! `Idle --press--> Dragging --release--> Animating --complete--> Idle`,
//! plus the discrete `Idle` transitions (tap toggle, double-tap action,
//! pinch rescale). Exactly one of `Dragging`/`Animating` governs position
//! mutation at any instant; `Idle` never takes continuous position writes.
//!
//! # Invariants
//!
//! 1. While `Animating`, every incoming pointer event is consumed with zero
//!    geometry mutation (input suppression: a drag can never start
//!    mid-animation and corrupt the interpolated position).
//! 2. A primary pointer-down outside the suppression window always disarms
//!    the auto-return before gesture classification runs.
//! 3. Starting a snap resets the gesture interpreter, so no half-built
//!    cycle leaks across the suppression window.
//! 4. A display/orientation change updates the screen bounds only; the
//!    window is not repositioned. Known limitation, kept deliberately.
//!
//! # Snap targets
//!
//! A drag release parks the window at the *resting* position of the nearest
//! edge (two thirds tucked off-screen). A tap toggles between that resting
//! position and the fully revealed edge: revealing arms the auto-return
//! (whose payload carries the reversed pair so the fire restores the exact
//! pre-tap x), concealing just snaps back. Two taps in succession are an
//! involution, absent the timer firing in between.

use std::time::Instant;

use tracing::{debug, trace};

use floatwin_core::animation::SnapAnimator;
use floatwin_core::config::OverlayConfig;
use floatwin_core::event::PointerEvent;
use floatwin_core::geometry::{GeometryModel, Point, ScreenBounds, Side, Size};
use floatwin_core::gesture::{GestureEvent, GestureInterpreter};

use crate::error::ControllerError;
use crate::host::{DeferredScheduler, PrimaryAction, SurfaceHost, VideoSource};
use crate::timer::{DeferredActionTimer, SnapBackPayload};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// One press-to-release interaction, recorded at the press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Pointer position at the press.
    pub initial_pointer: (f32, f32),
    /// Window position at the press; drag deltas are applied to this.
    pub initial_window: Point,
}

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerState {
    /// Accepting discrete gestures only.
    Idle,
    /// A drag is relocating the window continuously.
    Dragging(GestureSession),
    /// A snap animation owns the position; input is suppressed.
    Animating,
}

impl ControllerState {
    /// True while a snap animation owns the position.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        matches!(self, Self::Animating)
    }
}

// ---------------------------------------------------------------------------
// WindowController
// ---------------------------------------------------------------------------

/// Root coordinator for the floating overlay window.
pub struct WindowController {
    config: OverlayConfig,
    geometry: GeometryModel,
    gestures: GestureInterpreter,
    animator: SnapAnimator,
    timer: DeferredActionTimer,
    surface: Box<dyn SurfaceHost>,
    video: Box<dyn VideoSource>,
    primary: Box<dyn PrimaryAction>,
    state: ControllerState,
    /// True while the window sits at (or is snapping to) the fully revealed
    /// edge position; drives the tap toggle direction.
    revealed: bool,
    shown: bool,
}

impl std::fmt::Debug for WindowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowController")
            .field("state", &self.state)
            .field("position", &self.geometry.position())
            .field("size", &self.geometry.size())
            .field("side", &self.geometry.side())
            .field("shown", &self.shown)
            .finish()
    }
}

impl WindowController {
    /// Build a controller over validated configuration and host seams.
    ///
    /// Fails fast on an impossible configuration (§ error taxonomy:
    /// construction is the only place configuration can be rejected).
    pub fn new(
        config: OverlayConfig,
        screen: ScreenBounds,
        surface: Box<dyn SurfaceHost>,
        video: Box<dyn VideoSource>,
        primary: Box<dyn PrimaryAction>,
        scheduler: Box<dyn DeferredScheduler>,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let geometry = GeometryModel::new(config.base_size(), screen, config.scale_limits());
        let gestures = GestureInterpreter::new(config.gesture.clone());
        let animator = SnapAnimator::new(config.snap_duration);
        let timer = DeferredActionTimer::new(scheduler);
        Ok(Self {
            config,
            geometry,
            gestures,
            animator,
            timer,
            surface,
            video,
            primary,
            state: ControllerState::Idle,
            revealed: false,
            shown: false,
        })
    }

    // -- Lifecycle ---------------------------------------------------------

    /// Attach the video feed and materialize the overlay at its initial
    /// geometry.
    pub fn show(&mut self) -> Result<(), ControllerError> {
        self.video.attach(self.surface.handle())?;
        let size = self.geometry.size();
        let pos = self.geometry.position();
        self.surface.set_size(size.width, size.height);
        self.surface.set_position(pos.x, pos.y);
        self.shown = true;
        debug!(x = pos.x, y = pos.y, width = size.width, height = size.height, "overlay shown");
        Ok(())
    }

    /// Tear the overlay down: disarm the auto-return, stop any snap, and
    /// detach the video feed.
    pub fn hide(&mut self) -> Result<(), ControllerError> {
        self.timer.cancel_all();
        if self.animator.cancel().is_some() {
            self.surface.set_render_hint(false);
        }
        self.gestures.reset();
        self.state = ControllerState::Idle;
        self.revealed = false;
        self.shown = false;
        self.video.detach()?;
        debug!("overlay hidden");
        Ok(())
    }

    // -- Inbound: pointer events ------------------------------------------

    /// Primary pointer down.
    pub fn on_pointer_down(&mut self, x: f32, y: f32, now: Instant) {
        self.handle_pointer(PointerEvent::down(x, y), now);
    }

    /// Primary pointer move.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, now: Instant) {
        self.handle_pointer(PointerEvent::moved(x, y), now);
    }

    /// Primary pointer up.
    pub fn on_pointer_up(&mut self, x: f32, y: f32, now: Instant) {
        self.handle_pointer(PointerEvent::up(x, y), now);
    }

    /// Host aborted the pointer stream.
    pub fn on_pointer_cancel(&mut self, now: Instant) {
        self.handle_pointer(PointerEvent::Cancel, now);
    }

    /// Second pointer down (pinch).
    pub fn on_secondary_pointer_down(&mut self, x: f32, y: f32, now: Instant) {
        self.handle_pointer(PointerEvent::SecondaryDown { x, y }, now);
    }

    /// Second pointer move (pinch).
    pub fn on_secondary_pointer_move(&mut self, x: f32, y: f32, now: Instant) {
        self.handle_pointer(PointerEvent::SecondaryMove { x, y }, now);
    }

    /// Second pointer up.
    pub fn on_secondary_pointer_up(&mut self, now: Instant) {
        self.handle_pointer(PointerEvent::SecondaryUp, now);
    }

    /// Confirm a pending tap whose double-tap window expired without input.
    /// Hosts call this from their periodic tick.
    pub fn poll_gestures(&mut self, now: Instant) {
        if self.state.is_animating() {
            return;
        }
        if let Some(event) = self.gestures.poll(now) {
            self.apply_gesture(event);
        }
    }

    // -- Inbound: environment ---------------------------------------------

    /// Display/orientation change. Updates snap-target bounds only; the
    /// window keeps its position until the next snap.
    pub fn on_screen_bounds_changed(&mut self, width: i32, height: i32) {
        self.geometry.set_screen_bounds(width, height);
        debug!(width, height, "screen bounds updated");
    }

    /// One frame of the externally driven snap animation, with the elapsed
    /// fraction of the fixed duration.
    pub fn on_animation_tick(&mut self, fraction: f32) {
        let Some(tick) = self.animator.tick(fraction) else {
            trace!(fraction, "stray animation tick dropped");
            return;
        };
        let y = self.geometry.position().y;
        let pos = self.geometry.set_position(tick.x, y);
        self.surface.set_position(pos.x, pos.y);
        if tick.completed {
            self.surface.set_render_hint(false);
            self.state = ControllerState::Idle;
            debug!(run_id = tick.run_id, x = pos.x, "snap complete");
        }
    }

    /// The host's deferred timer fired with the payload it was armed with.
    pub fn on_deferred_timer_fired(&mut self, payload: SnapBackPayload) {
        let Some(action) = self.timer.claim(payload) else {
            return;
        };
        if self.state == ControllerState::Idle {
            debug!(from_x = action.from_x, to_x = action.to_x, "auto-return snap");
            self.revealed = false;
            self.start_snap(action.from_x, action.to_x);
        } else {
            trace!(state = ?self.state, "auto-return fire dropped in non-idle state");
        }
    }

    // -- Accessors ---------------------------------------------------------

    /// Current controller state.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Current window position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.geometry.position()
    }

    /// Current window size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.geometry.size()
    }

    /// Current scale factor.
    #[must_use]
    pub const fn scale_factor(&self) -> f32 {
        self.geometry.scale_factor()
    }

    /// Current edge affinity.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.geometry.side()
    }

    /// Whether the overlay is currently shown.
    #[must_use]
    pub const fn is_shown(&self) -> bool {
        self.shown
    }

    /// Whether the auto-return is armed.
    #[must_use]
    pub const fn is_auto_return_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Whether the window is at (or snapping to) the revealed edge position.
    #[must_use]
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// The fixed snap duration the host should spread its ticks over.
    #[must_use]
    pub const fn snap_duration(&self) -> std::time::Duration {
        self.animator.duration()
    }
}

// ---------------------------------------------------------------------------
// Internal routing
// ---------------------------------------------------------------------------

impl WindowController {
    fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        if self.state.is_animating() {
            // Consumed, never forwarded: input suppression for the duration
            // of the snap.
            trace!(?event, "pointer event suppressed while animating");
            return;
        }
        if event.is_down() {
            self.timer.cancel_all();
        }
        for gesture in self.gestures.process(&event, now) {
            self.apply_gesture(gesture);
        }
    }

    fn apply_gesture(&mut self, gesture: GestureEvent) {
        match gesture {
            GestureEvent::Press { x, y } => {
                if self.state == ControllerState::Idle {
                    self.state = ControllerState::Dragging(GestureSession {
                        initial_pointer: (x, y),
                        initial_window: self.geometry.position(),
                    });
                    trace!(x, y, "drag session started");
                }
            }
            GestureEvent::Drag { dx, dy } => {
                if let ControllerState::Dragging(session) = self.state {
                    let pos = self.geometry.set_position(
                        session.initial_window.x + dx as i32,
                        session.initial_window.y + dy as i32,
                    );
                    self.surface.set_position(pos.x, pos.y);
                }
            }
            GestureEvent::Release => {
                if matches!(self.state, ControllerState::Dragging(_)) {
                    let side = self.geometry.nearest_side();
                    self.geometry.set_side(side);
                    let from = self.geometry.position().x;
                    let to = self.geometry.resting_x(side);
                    debug!(?side, from, to, "release snap");
                    self.revealed = false;
                    self.start_snap(from, to);
                }
            }
            GestureEvent::Tap => {
                if self.state == ControllerState::Idle {
                    let from = self.geometry.position().x;
                    if self.revealed {
                        // Conceal: manual reversal, no auto-return to arm.
                        let to = self.geometry.resting_x(self.geometry.side());
                        debug!(from, to, "tap toggle: conceal");
                        self.revealed = false;
                        self.start_snap(from, to);
                    } else {
                        let to = self.geometry.revealed_x(self.geometry.side());
                        debug!(from, to, "tap toggle: reveal");
                        self.revealed = true;
                        self.start_snap(from, to);
                        self.timer.schedule(
                            SnapBackPayload::new(to, from),
                            self.config.auto_return_delay,
                        );
                    }
                }
            }
            GestureEvent::DoubleTap => {
                if self.state == ControllerState::Idle {
                    debug!("double tap: invoking primary action");
                    self.primary.invoke();
                }
            }
            GestureEvent::Scale { factor } => {
                if self.state == ControllerState::Idle {
                    let size = self
                        .geometry
                        .set_scale(self.geometry.scale_factor() * factor);
                    self.surface.set_size(size.width, size.height);
                    trace!(factor, scale = self.geometry.scale_factor(), "pinch rescale");
                }
            }
        }
    }

    /// Begin a snap run, superseding any live one, and enter `Animating`.
    fn start_snap(&mut self, from_x: i32, to_x: i32) {
        let start = self.animator.start(from_x, to_x);
        if let Some(old) = start.superseded {
            trace!(run_id = old, "superseded live snap run");
        }
        self.gestures.reset();
        self.surface.set_render_hint(true);
        self.state = ControllerState::Animating;
        debug!(run_id = start.run_id, from_x, to_x, "snap started");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
