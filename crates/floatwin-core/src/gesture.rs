#![forbid(unsafe_code)]

//! Gesture interpretation: raw pointer events in, semantic gestures out.
//!
//! [`GestureInterpreter`] is a stateful classifier that turns a stream of
//! [`PointerEvent`]s into [`GestureEvent`]s (press, drag, release, tap,
//! double-tap, pinch scale). It tracks one press-to-release cycle at a time.
//!
//! # State Machine
//!
//! - **Tap/drag disambiguation**: a down arms the cycle; crossing the slop
//!   distance turns it into a drag (emitting `Press` then cumulative `Drag`
//!   deltas), while an up within the slop and the tap timeout makes it a tap
//!   candidate. Tap and drag are therefore mutually exclusive per cycle.
//! - **Tap confirmation**: a candidate tap is held back for the double-tap
//!   window. A second qualifying down emits `DoubleTap` and consumes it; the
//!   window expiring (observed on a later event or via [`poll`]) emits `Tap`.
//! - **Pinch**: a secondary down while the primary is still within slop
//!   switches the cycle to pinch tracking; every pointer move then reports
//!   the span ratio against the previous sample as a multiplicative `Scale`.
//!   A pinch cycle never degrades back into press, drag, or tap.
//!
//! # Invariants
//!
//! 1. `Press` is emitted at most once per cycle, always before any `Drag`.
//! 2. `Release` is emitted only for cycles that produced a `Press`.
//! 3. `Tap` and `DoubleTap` are never emitted for a cycle that dragged or
//!    pinched.
//! 4. `Drag` deltas are cumulative from the down position, so a dropped
//!    intermediate move cannot accumulate drift.
//!
//! # Failure Modes
//!
//! - Malformed ordering (move or up with no prior down, duplicate downs,
//!   secondary events with no pinch in progress) is ignored, never fatal.
//! - A cancel mid-drag emits `Release` so the window is never stranded
//!   between edges; a cancel before the drag started aborts silently.
//!
//! [`poll`]: GestureInterpreter::poll

use std::time::{Duration, Instant};

use crate::event::PointerEvent;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds and timeouts for gesture classification.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Maximum pointer travel (px) for a cycle to stay a tap candidate
    /// (default: 16.0).
    pub tap_slop: f32,
    /// Maximum distance (px) between two taps for them to form a double tap
    /// (default: 64.0).
    pub double_tap_slop: f32,
    /// Maximum press duration for a tap (default: 250ms).
    pub tap_timeout: Duration,
    /// Window after a tap in which a second down forms a double tap
    /// (default: 300ms).
    pub double_tap_timeout: Duration,
    /// Minimum pointer span (px) for a pinch sample to produce a scale
    /// factor (default: 1.0).
    pub pinch_span_epsilon: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: 16.0,
            double_tap_slop: 64.0,
            tap_timeout: Duration::from_millis(250),
            double_tap_timeout: Duration::from_millis(300),
            pinch_span_epsilon: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Semantic events
// ---------------------------------------------------------------------------

/// A semantic gesture derived from the raw pointer stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The cycle crossed the slop distance and became a drag. Coordinates
    /// are the original down position.
    Press { x: f32, y: f32 },

    /// Cumulative drag delta from the down position.
    Drag { dx: f32, dy: f32 },

    /// The dragging pointer was lifted (or the host cancelled mid-drag).
    Release,

    /// A confirmed single tap (no second tap arrived in the window).
    Tap,

    /// Two qualifying taps inside the double-tap window.
    DoubleTap,

    /// Multiplicative pinch-scale delta relative to the previous sample.
    Scale { factor: f32 },
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
struct PointF {
    x: f32,
    y: f32,
}

impl PointF {
    const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance_to(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One press-to-release cycle.
#[derive(Debug, Clone, Copy)]
enum Cycle {
    /// No pointer down.
    Idle,
    /// Primary down, still within slop: tap candidate / drag not yet armed.
    Pending { down: PointF, last: PointF, at: Instant },
    /// Crossed the slop; emitting cumulative drags until up.
    Dragging { down: PointF },
    /// Two pointers active; emitting span-ratio scale samples.
    Pinching {
        primary: PointF,
        secondary: PointF,
        span: f32,
    },
    /// The cycle's gesture was already delivered (double tap, finished
    /// pinch); remaining events are swallowed until the primary up.
    Spent,
}

/// A tap waiting out the double-tap window.
#[derive(Debug, Clone, Copy)]
struct PendingTap {
    pos: PointF,
    up_at: Instant,
}

// ---------------------------------------------------------------------------
// GestureInterpreter
// ---------------------------------------------------------------------------

/// Stateful pointer-gesture classifier.
///
/// Feed every raw event through [`process`](Self::process) with the time it
/// arrived. Call [`poll`](Self::poll) from a periodic tick to confirm a
/// pending tap when no further input arrives.
pub struct GestureInterpreter {
    config: GestureConfig,
    cycle: Cycle,
    pending_tap: Option<PendingTap>,
}

impl std::fmt::Debug for GestureInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureInterpreter")
            .field("dragging", &self.is_dragging())
            .field("pinching", &self.is_pinching())
            .field("tap_pending", &self.pending_tap.is_some())
            .finish()
    }
}

impl GestureInterpreter {
    /// Create an interpreter with the given thresholds.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            cycle: Cycle::Idle,
            pending_tap: None,
        }
    }

    /// Process one raw event, returning the semantic events it produced.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> Vec<GestureEvent> {
        let mut out = Vec::with_capacity(2);
        self.flush_expired_tap(now, &mut out);

        match *event {
            PointerEvent::Down { x, y } => self.on_down(PointF::new(x, y), now, &mut out),
            PointerEvent::Move { x, y } => self.on_move(PointF::new(x, y), &mut out),
            PointerEvent::Up { x, y } => self.on_up(PointF::new(x, y), now, &mut out),
            PointerEvent::Cancel => self.on_cancel(&mut out),
            PointerEvent::SecondaryDown { x, y } => self.on_secondary_down(PointF::new(x, y)),
            PointerEvent::SecondaryMove { x, y } => {
                self.on_secondary_move(PointF::new(x, y), &mut out);
            }
            PointerEvent::SecondaryUp => self.on_secondary_up(),
        }

        out
    }

    /// Confirm a pending tap whose double-tap window has expired.
    ///
    /// Call periodically (e.g. from the host's frame tick); without this, a
    /// lone tap is only confirmed when the next pointer event arrives.
    pub fn poll(&mut self, now: Instant) -> Option<GestureEvent> {
        let tap = self.pending_tap?;
        if now.duration_since(tap.up_at) >= self.config.double_tap_timeout {
            self.pending_tap = None;
            return Some(GestureEvent::Tap);
        }
        None
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.cycle, Cycle::Dragging { .. })
    }

    /// Whether a pinch is in progress.
    #[inline]
    #[must_use]
    pub const fn is_pinching(&self) -> bool {
        matches!(self.cycle, Cycle::Pinching { .. })
    }

    /// Drop every in-flight cycle and pending tap.
    pub fn reset(&mut self) {
        self.cycle = Cycle::Idle;
        self.pending_tap = None;
    }

    /// Current configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GestureConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GestureInterpreter {
    fn flush_expired_tap(&mut self, now: Instant, out: &mut Vec<GestureEvent>) {
        if let Some(tap) = self.pending_tap
            && now.duration_since(tap.up_at) >= self.config.double_tap_timeout
        {
            self.pending_tap = None;
            out.push(GestureEvent::Tap);
        }
    }

    fn on_down(&mut self, pos: PointF, now: Instant, out: &mut Vec<GestureEvent>) {
        if !matches!(self.cycle, Cycle::Idle) {
            // Duplicate down without an up: drop it.
            return;
        }

        if let Some(tap) = self.pending_tap.take() {
            if tap.pos.distance_to(pos) <= self.config.double_tap_slop {
                // Second tap begins: deliver the double tap now and swallow
                // the rest of this cycle.
                out.push(GestureEvent::DoubleTap);
                self.cycle = Cycle::Spent;
                return;
            }
            // A distinct press elsewhere confirms the earlier single tap.
            out.push(GestureEvent::Tap);
        }

        self.cycle = Cycle::Pending {
            down: pos,
            last: pos,
            at: now,
        };
    }

    fn on_move(&mut self, pos: PointF, out: &mut Vec<GestureEvent>) {
        match self.cycle {
            Cycle::Pending { down, .. } => {
                if down.distance_to(pos) > self.config.tap_slop {
                    out.push(GestureEvent::Press {
                        x: down.x,
                        y: down.y,
                    });
                    out.push(GestureEvent::Drag {
                        dx: pos.x - down.x,
                        dy: pos.y - down.y,
                    });
                    self.cycle = Cycle::Dragging { down };
                } else if let Cycle::Pending { last, .. } = &mut self.cycle {
                    *last = pos;
                }
            }
            Cycle::Dragging { down } => {
                out.push(GestureEvent::Drag {
                    dx: pos.x - down.x,
                    dy: pos.y - down.y,
                });
            }
            Cycle::Pinching { .. } => {
                if let Cycle::Pinching { primary, .. } = &mut self.cycle {
                    *primary = pos;
                }
                self.emit_scale_sample(out);
            }
            Cycle::Idle | Cycle::Spent => {}
        }
    }

    fn on_up(&mut self, pos: PointF, now: Instant, out: &mut Vec<GestureEvent>) {
        let cycle = std::mem::replace(&mut self.cycle, Cycle::Idle);
        match cycle {
            Cycle::Pending { down, at, .. } => {
                let quick = now.duration_since(at) <= self.config.tap_timeout;
                if quick && down.distance_to(pos) <= self.config.tap_slop {
                    self.pending_tap = Some(PendingTap { pos: down, up_at: now });
                }
                // A slow or wandering press that never dragged ends silently.
            }
            Cycle::Dragging { .. } => out.push(GestureEvent::Release),
            Cycle::Idle => {
                // Up with no down: drop it.
            }
            Cycle::Pinching { .. } | Cycle::Spent => {}
        }
    }

    fn on_cancel(&mut self, out: &mut Vec<GestureEvent>) {
        // A cancelled drag still releases so the controller can snap the
        // window to an edge instead of leaving it stranded.
        if self.is_dragging() {
            out.push(GestureEvent::Release);
        }
        self.cycle = Cycle::Idle;
    }

    fn on_secondary_down(&mut self, pos: PointF) {
        if let Cycle::Pending { last, .. } = self.cycle {
            let span = last.distance_to(pos);
            if span > self.config.pinch_span_epsilon {
                self.cycle = Cycle::Pinching {
                    primary: last,
                    secondary: pos,
                    span,
                };
            }
        }
        // Mid-drag or stray secondary downs are dropped.
    }

    fn on_secondary_move(&mut self, pos: PointF, out: &mut Vec<GestureEvent>) {
        if let Cycle::Pinching { secondary, .. } = &mut self.cycle {
            *secondary = pos;
            self.emit_scale_sample(out);
        }
    }

    fn on_secondary_up(&mut self) {
        if self.is_pinching() {
            self.cycle = Cycle::Spent;
        }
    }

    fn emit_scale_sample(&mut self, out: &mut Vec<GestureEvent>) {
        if let Cycle::Pinching {
            primary,
            secondary,
            span,
        } = &mut self.cycle
        {
            let new_span = primary.distance_to(*secondary);
            if new_span > self.config.pinch_span_epsilon {
                out.push(GestureEvent::Scale {
                    factor: new_span / *span,
                });
                *span = new_span;
            }
            // Degenerate spans are skipped so a near-zero denominator can
            // never produce an explosive factor on the next sample.
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
