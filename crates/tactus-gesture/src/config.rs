//! Recognizer configuration
//!
//! Five thresholds, merged over defaults at construction and never mutated
//! afterwards. Field names serialize in camelCase so configs written for the
//! web client load unchanged.

use serde::{Deserialize, Serialize};

use crate::GestureError;

/// Maximum displacement (px) for a release to count as a tap. Not configurable.
pub const TAP_SLOP: f64 = 10.0;

/// Tunable thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureConfig {
    /// Minimum distance for swipe detection (px)
    pub swipe_threshold: f64,
    /// Minimum velocity for swipe (px/ms)
    pub swipe_velocity: f64,
    /// Delay for long press detection (ms)
    pub long_press_delay: f64,
    /// Maximum gap between taps for double tap (ms)
    pub double_tap_delay: f64,
    /// Minimum scale change for pinch
    pub pinch_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            swipe_velocity: 0.3,
            long_press_delay: 500.0,
            double_tap_delay: 300.0,
            pinch_threshold: 0.1,
        }
    }
}

impl GestureConfig {
    /// Check every threshold is finite and in range
    pub fn validate(&self) -> Result<(), GestureError> {
        let checks = [
            ("swipeThreshold", self.swipe_threshold, false),
            ("swipeVelocity", self.swipe_velocity, false),
            ("longPressDelay", self.long_press_delay, true),
            ("doubleTapDelay", self.double_tap_delay, false),
            ("pinchThreshold", self.pinch_threshold, true),
        ];
        for (field, value, must_be_positive) in checks {
            let out_of_range = if must_be_positive { value <= 0.0 } else { value < 0.0 };
            if !value.is_finite() || out_of_range {
                return Err(GestureError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

/// Partial override of `GestureConfig`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialGestureConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swipe_velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_press_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_tap_delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinch_threshold: Option<f64>,
}

impl PartialGestureConfig {
    /// Overlay the set fields on `base`
    pub fn merge_over(&self, base: GestureConfig) -> GestureConfig {
        GestureConfig {
            swipe_threshold: self.swipe_threshold.unwrap_or(base.swipe_threshold),
            swipe_velocity: self.swipe_velocity.unwrap_or(base.swipe_velocity),
            long_press_delay: self.long_press_delay.unwrap_or(base.long_press_delay),
            double_tap_delay: self.double_tap_delay.unwrap_or(base.double_tap_delay),
            pinch_threshold: self.pinch_threshold.unwrap_or(base.pinch_threshold),
        }
    }

    /// Merge over defaults and validate
    pub fn resolve(&self) -> Result<GestureConfig, GestureError> {
        let config = self.merge_over(GestureConfig::default());
        config.validate()?;
        Ok(config)
    }
}

impl From<GestureConfig> for PartialGestureConfig {
    fn from(config: GestureConfig) -> Self {
        Self {
            swipe_threshold: Some(config.swipe_threshold),
            swipe_velocity: Some(config.swipe_velocity),
            long_press_delay: Some(config.long_press_delay),
            double_tap_delay: Some(config.double_tap_delay),
            pinch_threshold: Some(config.pinch_threshold),
        }
    }
}
