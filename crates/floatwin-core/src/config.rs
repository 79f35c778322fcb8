#![forbid(unsafe_code)]

//! Overlay configuration: the constants fixed at construction time.
//!
//! Invalid combinations fail fast at controller construction via
//! [`OverlayConfig::validate`]; nothing here is clamped silently — runtime
//! clamping applies only to live inputs such as pinch deltas.

use std::time::Duration;

use thiserror::Error;

use crate::geometry::{ScaleLimits, Size};
use crate::gesture::GestureConfig;

/// Rejected configuration combinations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("minimum scale must be positive, got {0}")]
    MinScaleNotPositive(f32),

    #[error("scale range inverted: min {min} > max {max}")]
    ScaleRangeInverted { min: f32, max: f32 },

    #[error("initial window size must be positive, got {width}x{height}")]
    EmptyBaseSize { width: i32, height: i32 },

    #[error("snap animation duration must be non-zero")]
    ZeroSnapDuration,
}

/// Construction-time constants for the overlay window.
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Unscaled window width in pixels (default: 200).
    pub initial_width: i32,
    /// Unscaled window height in pixels (default: 267).
    pub initial_height: i32,
    /// Lower pinch-scale bound (default: 0.75).
    pub min_scale: f32,
    /// Upper pinch-scale bound (default: 3.0).
    pub max_scale: f32,
    /// Delay before a tap-toggle automatically reverses (default: 5000ms).
    pub auto_return_delay: Duration,
    /// Fixed duration of every snap animation (default: 300ms).
    pub snap_duration: Duration,
    /// Gesture classification thresholds.
    pub gesture: GestureConfig,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            initial_width: 200,
            initial_height: 267,
            min_scale: 0.75,
            max_scale: 3.0,
            auto_return_delay: Duration::from_millis(5000),
            snap_duration: Duration::from_millis(300),
            gesture: GestureConfig::default(),
        }
    }
}

impl OverlayConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unscaled window size.
    #[must_use]
    pub fn initial_size(mut self, width: i32, height: i32) -> Self {
        self.initial_width = width;
        self.initial_height = height;
        self
    }

    /// Set the pinch-scale bounds.
    #[must_use]
    pub fn scale_range(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Set the auto-return delay.
    #[must_use]
    pub fn auto_return_delay(mut self, delay: Duration) -> Self {
        self.auto_return_delay = delay;
        self
    }

    /// Set the snap animation duration.
    #[must_use]
    pub fn snap_duration(mut self, duration: Duration) -> Self {
        self.snap_duration = duration;
        self
    }

    /// Set the gesture thresholds.
    #[must_use]
    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// The unscaled reference size.
    #[must_use]
    pub const fn base_size(&self) -> Size {
        Size::new(self.initial_width, self.initial_height)
    }

    /// The scale clamp range.
    #[must_use]
    pub const fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits::new(self.min_scale, self.max_scale)
    }

    /// Reject impossible combinations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_scale <= 0.0 {
            return Err(ConfigError::MinScaleNotPositive(self.min_scale));
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleRangeInverted {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.base_size().is_empty() {
            return Err(ConfigError::EmptyBaseSize {
                width: self.initial_width,
                height: self.initial_height,
            });
        }
        if self.snap_duration.is_zero() {
            return Err(ConfigError::ZeroSnapDuration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(OverlayConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_values() {
        let c = OverlayConfig::default();
        assert_eq!(c.initial_width, 200);
        assert_eq!(c.initial_height, 267);
        assert_eq!(c.min_scale, 0.75);
        assert_eq!(c.max_scale, 3.0);
        assert_eq!(c.auto_return_delay, Duration::from_millis(5000));
        assert_eq!(c.snap_duration, Duration::from_millis(300));
    }

    #[test]
    fn inverted_scale_range_is_rejected() {
        let err = OverlayConfig::new().scale_range(2.0, 1.0).validate();
        assert_eq!(
            err,
            Err(ConfigError::ScaleRangeInverted { min: 2.0, max: 1.0 })
        );
    }

    #[test]
    fn non_positive_min_scale_is_rejected() {
        let err = OverlayConfig::new().scale_range(0.0, 3.0).validate();
        assert_eq!(err, Err(ConfigError::MinScaleNotPositive(0.0)));
    }

    #[test]
    fn empty_base_size_is_rejected() {
        let err = OverlayConfig::new().initial_size(0, 267).validate();
        assert_eq!(
            err,
            Err(ConfigError::EmptyBaseSize {
                width: 0,
                height: 267
            })
        );
    }

    #[test]
    fn zero_snap_duration_is_rejected() {
        let err = OverlayConfig::new()
            .snap_duration(Duration::ZERO)
            .validate();
        assert_eq!(err, Err(ConfigError::ZeroSnapDuration));
    }

    #[test]
    fn builder_methods_set_fields() {
        let c = OverlayConfig::new()
            .initial_size(100, 150)
            .scale_range(0.5, 2.0)
            .auto_return_delay(Duration::from_secs(3))
            .snap_duration(Duration::from_millis(120));
        assert_eq!(c.base_size(), Size::new(100, 150));
        assert_eq!(c.scale_limits(), ScaleLimits::new(0.5, 2.0));
        assert_eq!(c.auto_return_delay, Duration::from_secs(3));
        assert_eq!(c.snap_duration, Duration::from_millis(120));
        assert_eq!(c.validate(), Ok(()));
    }
}
