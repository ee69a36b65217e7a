//! Gesture event descriptors and geometry

use serde::{Deserialize, Serialize};

/// Direction of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Classify a displacement. Horizontal wins only when `|dx| > |dy|`,
    /// so ties resolve to the vertical axis.
    pub fn from_delta(dx: f64, dy: f64) -> Self {
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Self::Right } else { Self::Left }
        } else if dy > 0.0 {
            Self::Down
        } else {
            Self::Up
        }
    }
}

/// What happened during a contact session. Passed to callbacks only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureData {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub distance: f64,
    pub velocity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SwipeDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl GestureData {
    /// Zero-displacement descriptor anchored at a point
    pub fn stationary(x: f64, y: f64, start_time: f64, end_time: f64) -> Self {
        Self {
            start_x: x,
            start_y: y,
            end_x: x,
            end_y: y,
            start_time,
            end_time,
            distance: 0.0,
            velocity: 0.0,
            direction: None,
            scale: None,
        }
    }

    /// Descriptor for a motion between two timed points
    pub fn between(start: (f64, f64), start_time: f64, end: (f64, f64), end_time: f64) -> Self {
        let distance = distance(end.0 - start.0, end.1 - start.1);
        Self {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            start_time,
            end_time,
            distance,
            velocity: velocity(distance, end_time - start_time),
            direction: None,
            scale: None,
        }
    }

    pub fn delta_x(&self) -> f64 {
        self.end_x - self.start_x
    }

    pub fn delta_y(&self) -> f64 {
        self.end_y - self.start_y
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Euclidean norm of a displacement
pub fn distance(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

/// px/ms; zero when no time elapsed
pub fn velocity(distance: f64, elapsed_ms: f64) -> f64 {
    if elapsed_ms > 0.0 { distance / elapsed_ms } else { 0.0 }
}
