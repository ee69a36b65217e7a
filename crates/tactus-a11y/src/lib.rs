//! tactus Accessibility
//!
//! Accessibility helpers for touch surfaces hosted in a `tactus_dom::Host`.
//!
//! Features:
//! - Voice-control labelling and lookup
//! - Haptic feedback through the Vibration API
//! - Enter/Space keyboard activation
//! - Screen reader announcements via transient live regions
//! - Touch/keyboard focus indicators
//! - Touch target validation and enhancement

pub mod announce;
pub mod aria;
pub mod focus;
pub mod haptics;
pub mod keyboard;
pub mod touch_targets;
pub mod voice_control;

pub use announce::{announce_to_screen_reader, announce_with, ANNOUNCEMENT_LIFETIME_MS};
pub use aria::{AriaRole, LiveRegionMode};
pub use focus::{add_accessible_focus, FocusIndicator, TOUCH_FOCUS_CLASS};
pub use haptics::{add_haptic_feedback, HapticIntensity};
pub use keyboard::add_keyboard_support;
pub use touch_targets::{
    device_type, enhance_element_for_touch, is_ipad, is_touch_device,
    scan_and_enhance_touch_targets, validate_touch_target, DeviceType, TouchTargetConfig,
    TouchTargetKind, TouchTargetReport,
};
pub use voice_control::{enhance_for_voice_control, find_by_voice_command};

use tactus_dom::DomError;

/// Accessibility error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum A11yError {
    #[error("Accessible label must not be empty")]
    EmptyLabel,

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
