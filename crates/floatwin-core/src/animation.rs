#![forbid(unsafe_code)]

//! Snap animation: horizontal edge-relocation driven by external ticks.
//!
//! [`SnapAnimator`] interpolates the window's x coordinate from a start to a
//! target over a fixed duration. The host drives it by calling
//! [`tick`](SnapAnimator::tick) with the elapsed fraction until completion;
//! the animator owns no clock of its own. Interpolation is fraction-linear
//! (`from + f * (to - from)`); easing is deliberately not applied.
//!
//! # Invariants
//!
//! 1. At most one [`AnimationRun`] is live. Starting a new run cancels the
//!    previous one first: its ticks are ignored from that point and its
//!    completion signal never fires.
//! 2. The driving fraction is clamped to `[0, 1]` and treated as
//!    monotonically non-decreasing; a regressing tick can never move the
//!    window backwards.
//! 3. Completion is reported exactly once per run, at the first tick with
//!    `f == 1`.
//! 4. `from_x == to_x` still runs to completion so the start/complete signal
//!    pair keeps its timing contract.
//!
//! # Failure Modes
//!
//! - A tick with no live run returns `None` (stray frame callbacks after
//!   completion or cancellation are dropped).

use std::time::Duration;

// ---------------------------------------------------------------------------
// Run lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle of one animation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Cancelled,
    Completed,
}

/// One horizontal interpolation from `from_x` to `to_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRun {
    pub id: u64,
    pub from_x: i32,
    pub to_x: i32,
    pub state: RunState,
    /// Highest fraction observed so far; enforces monotonicity.
    last_fraction: f32,
}

impl AnimationRun {
    /// Interpolated x at a fraction, fraction-linear with truncation.
    #[must_use]
    fn x_at(&self, fraction: f32) -> i32 {
        self.from_x + (fraction * (self.to_x - self.from_x) as f32) as i32
    }
}

/// Outcome of starting a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapStart {
    /// Id of the freshly started run.
    pub run_id: u64,
    /// Id of the run this start cancelled, if one was live.
    pub superseded: Option<u64>,
}

/// Outcome of one tick of the live run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapTick {
    pub run_id: u64,
    /// Interpolated x for this frame.
    pub x: i32,
    /// True exactly once, on the completing tick.
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// SnapAnimator
// ---------------------------------------------------------------------------

/// Fraction-driven horizontal snap interpolator.
#[derive(Debug, Clone)]
pub struct SnapAnimator {
    duration: Duration,
    current: Option<AnimationRun>,
    next_id: u64,
}

impl SnapAnimator {
    /// Create an animator with the fixed per-run duration the host should
    /// spread its ticks over.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
            next_id: 1,
        }
    }

    /// The fixed run duration.
    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether a run is live.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|run| run.state == RunState::Running)
    }

    /// The most recent run, live or finished.
    #[inline]
    #[must_use]
    pub const fn current_run(&self) -> Option<&AnimationRun> {
        self.current.as_ref()
    }

    /// Start a run from `from_x` to `to_x`, cancelling any live run first.
    pub fn start(&mut self, from_x: i32, to_x: i32) -> SnapStart {
        let superseded = self.cancel();
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(AnimationRun {
            id,
            from_x,
            to_x,
            state: RunState::Running,
            last_fraction: 0.0,
        });
        SnapStart {
            run_id: id,
            superseded,
        }
    }

    /// Advance the live run to `fraction`, returning the interpolated x.
    ///
    /// The fraction is clamped to `[0, 1]` and floored at the highest value
    /// seen so far. Returns `None` when no run is live.
    pub fn tick(&mut self, fraction: f32) -> Option<SnapTick> {
        let run = self.current.as_mut()?;
        if run.state != RunState::Running {
            return None;
        }

        let fraction = fraction.clamp(0.0, 1.0).max(run.last_fraction);
        run.last_fraction = fraction;
        let completed = fraction >= 1.0;
        if completed {
            run.state = RunState::Completed;
        }
        Some(SnapTick {
            run_id: run.id,
            x: run.x_at(fraction),
            completed,
        })
    }

    /// Cancel the live run, returning its id if one was running.
    pub fn cancel(&mut self) -> Option<u64> {
        let run = self.current.as_mut()?;
        if run.state == RunState::Running {
            run.state = RunState::Cancelled;
            Some(run.id)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
