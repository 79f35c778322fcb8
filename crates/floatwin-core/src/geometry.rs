#![forbid(unsafe_code)]

//! Window geometry: position, scaled size, screen bounds, and edge affinity.
//!
//! [`GeometryModel`] is the single source of truth for where the overlay
//! window is and how big it is. It is owned by the window controller and
//! mutated only through its guarded setters; the gesture interpreter and the
//! snap animator never touch it directly.
//!
//! # Invariants
//!
//! 1. `size == round(base_size * scale_factor)` per axis after every update.
//! 2. `scale_factor` is always inside the configured `[min, max]` range;
//!    out-of-range inputs are clamped, never rejected.
//! 3. Position is unconstrained: the window may be dragged fully off-screen
//!    mid-gesture, so `set_position` accepts any coordinates.
//!
//! # Failure Modes
//!
//! None. Every input is coerced or clamped; no setter can fail.

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// A window position in screen pixels. May be negative (partially or fully
/// off-screen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is non-positive.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Scale both dimensions by `factor`, rounding to the nearest pixel.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Size {
        Size {
            width: (self.width as f32 * factor).round() as i32,
            height: (self.height as f32 * factor).round() as i32,
        }
    }
}

/// The visible screen dimensions, updated on display/orientation change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenBounds {
    pub width: i32,
    pub height: i32,
}

impl ScreenBounds {
    /// Create new screen bounds.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Which screen edge the window currently clings to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Left,
    Right,
}

impl Side {
    /// The other edge.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True for the left edge.
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::Left)
    }
}

/// Inclusive scale-factor range applied by [`GeometryModel::set_scale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    pub min: f32,
    pub max: f32,
}

impl ScaleLimits {
    /// Create a new limit pair. Callers validate ordering up front (the
    /// overlay configuration rejects inverted ranges at construction).
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a factor into the range.
    #[must_use]
    pub fn clamp(&self, factor: f32) -> f32 {
        factor.clamp(self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// GeometryModel
// ---------------------------------------------------------------------------

/// Position, scaled size, edge affinity, and screen bounds of the overlay.
///
/// Snap targets come in two flavors per edge:
/// - the *resting* position tucks two thirds of the window past the edge so
///   only a sliver stays on screen, and
/// - the *revealed* position places the window fully visible at the edge.
///
/// The tap toggle moves between the two; a drag release always lands on the
/// resting position of the nearest edge.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryModel {
    position: Point,
    base_size: Size,
    scale_factor: f32,
    size: Size,
    side: Side,
    screen: ScreenBounds,
    limits: ScaleLimits,
}

impl GeometryModel {
    /// Create a model at the origin with scale 1.0 and left-edge affinity.
    #[must_use]
    pub fn new(base_size: Size, screen: ScreenBounds, limits: ScaleLimits) -> Self {
        let scale_factor = limits.clamp(1.0);
        Self {
            position: Point::default(),
            base_size,
            scale_factor,
            size: base_size.scaled(scale_factor),
            side: Side::Left,
            screen,
            limits,
        }
    }

    /// Current window position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Current (scaled) window size.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Unscaled reference size.
    #[inline]
    #[must_use]
    pub const fn base_size(&self) -> Size {
        self.base_size
    }

    /// Current scale factor.
    #[inline]
    #[must_use]
    pub const fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Current edge affinity.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Current screen bounds.
    #[inline]
    #[must_use]
    pub const fn screen(&self) -> ScreenBounds {
        self.screen
    }

    /// Store a new position, unclamped, and return it.
    pub fn set_position(&mut self, x: i32, y: i32) -> Point {
        self.position = Point::new(x, y);
        self.position
    }

    /// Clamp `factor` into the scale limits, recompute the size from the
    /// base size, and return the new size.
    pub fn set_scale(&mut self, factor: f32) -> Size {
        self.scale_factor = self.limits.clamp(factor);
        self.size = self.base_size.scaled(self.scale_factor);
        self.size
    }

    /// Update the bounds used for snap-target computation. Does not
    /// reposition the window.
    pub fn set_screen_bounds(&mut self, width: i32, height: i32) {
        self.screen = ScreenBounds::new(width, height);
    }

    /// Update the edge affinity.
    pub fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    /// Horizontal center of the window.
    #[must_use]
    pub const fn center_x(&self) -> i32 {
        self.position.x + self.size.width / 2
    }

    /// The edge whose half of the screen contains the window's center.
    ///
    /// A center exactly on the midline counts as the right half.
    #[must_use]
    pub const fn nearest_side(&self) -> Side {
        if self.center_x() < self.screen.width / 2 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Resting x for an edge: two thirds of the window tucked past it.
    #[must_use]
    pub const fn resting_x(&self, side: Side) -> i32 {
        match side {
            Side::Left => -(2 * self.size.width) / 3,
            Side::Right => self.screen.width - self.size.width / 3,
        }
    }

    /// Fully revealed x for an edge.
    #[must_use]
    pub const fn revealed_x(&self, side: Side) -> i32 {
        match side {
            Side::Left => 0,
            Side::Right => self.screen.width - self.size.width,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
