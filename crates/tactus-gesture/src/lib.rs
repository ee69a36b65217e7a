//! tactus Gesture
//!
//! Touch gesture recognition layered on a `tactus_dom::Host` surface.
//!
//! Features:
//! - Swipe with direction classification
//! - Long press (timer driven)
//! - Double tap
//! - Two-contact pinch with scale threshold
//! - Composed utilities: swipe-to-dismiss, pull-to-refresh, pinch-to-zoom
//! - Effect-style binding that subscribes and disposes a recognizer

pub mod binding;
pub mod callbacks;
pub mod config;
pub mod data;
pub mod machine;
pub mod recognizer;
pub mod utilities;

pub use binding::GestureBinding;
pub use callbacks::GestureCallbacks;
pub use config::{GestureConfig, PartialGestureConfig, TAP_SLOP};
pub use data::{GestureData, SwipeDirection};
pub use machine::{GestureMachine, Phase, Recognized};
pub use recognizer::GestureRecognizer;
pub use utilities::{
    add_pinch_to_zoom, add_pull_to_refresh, add_swipe_to_dismiss, Disposer, PinchZoomOptions,
    DEFAULT_DISMISS_DIRECTION, DEFAULT_REFRESH_THRESHOLD,
};

use tactus_dom::{DomError, NodeId};

/// Gesture error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    #[error("Gesture surface {0} is not a live element")]
    InvalidSurface(NodeId),

    #[error("Invalid gesture config: {field} = {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
}
