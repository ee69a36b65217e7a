//! tactus Replay
//!
//! Runs a recorded touch trace through a gesture recognizer on a fresh host
//! and collects every gesture it reports.
//!
//! Trace format (JSON):
//!
//! ```json
//! {
//!   "config": { "longPressDelay": 400 },
//!   "steps": [
//!     { "at": 0,   "type": "start", "id": 1, "x": 0,   "y": 0 },
//!     { "at": 100, "type": "end",   "id": 1, "x": 100, "y": 0 }
//!   ]
//! }
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tactus_dom::{DeviceProfile, Host, TouchSimulator};
use tactus_gesture::{
    GestureCallbacks, GestureData, GestureError, GestureRecognizer, PartialGestureConfig,
};

/// Replay error
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("Step {index} at {at}ms goes back in time (previous step at {previous}ms)")]
    OutOfOrder { index: usize, at: f64, previous: f64 },

    #[error("Step {index} has a non-finite value")]
    NonFinite { index: usize },

    #[error("Gesture error: {0}")]
    Gesture(#[from] GestureError),
}

/// Kind of touch input in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Start,
    Move,
    End,
    Cancel,
}

/// One timed touch input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// Host clock time (ms)
    pub at: f64,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// A recorded touch session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub config: PartialGestureConfig,
    /// Device to emulate; desktop when absent
    #[serde(default)]
    pub device: Option<DeviceProfile>,
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Check that step times are finite and never decrease
    pub fn validate(&self) -> Result<(), ReplayError> {
        let mut previous = f64::NEG_INFINITY;
        for (index, step) in self.steps.iter().enumerate() {
            if !(step.at.is_finite() && step.x.is_finite() && step.y.is_finite()) {
                return Err(ReplayError::NonFinite { index });
            }
            if step.at < previous {
                return Err(ReplayError::OutOfOrder {
                    index,
                    at: step.at,
                    previous,
                });
            }
            previous = step.at;
        }
        Ok(())
    }
}

/// A gesture reported during replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedGesture {
    pub gesture: &'static str,
    #[serde(flatten)]
    pub data: GestureData,
}

/// Replay `trace` and return the gestures in the order they were reported
pub fn run_trace(trace: &Trace) -> Result<Vec<RecordedGesture>, ReplayError> {
    trace.validate()?;

    let host = Host::with_profile(trace.device.clone().unwrap_or_default());
    let surface = host.create_element("div");
    host.append_child(host.body(), surface)
        .map_err(GestureError::from)?;

    let recorded = Rc::new(RefCell::new(Vec::new()));
    let recognizer = GestureRecognizer::new(&host, surface, recorder(&recorded), trace.config)?;
    tracing::info!("Replaying {} steps with {:?}", trace.steps.len(), recognizer.config());

    let mut touch = TouchSimulator::new(&host, surface);
    for (index, step) in trace.steps.iter().enumerate() {
        host.advance_to(step.at);
        let known = match step.kind {
            StepKind::Start => {
                touch.start(step.id, step.x, step.y);
                true
            }
            StepKind::Move => {
                let known = touch.is_active(step.id);
                touch.move_to(step.id, step.x, step.y);
                known
            }
            StepKind::End => {
                let known = touch.is_active(step.id);
                touch.end_at(step.id, step.x, step.y);
                known
            }
            StepKind::Cancel => {
                touch.cancel();
                true
            }
        };
        if !known {
            tracing::warn!("Step {} refers to inactive touch {}; ignored", index, step.id);
        }
    }

    recognizer.destroy();
    let gestures = recorded.borrow().clone();
    tracing::info!("Recognized {} gestures", gestures.len());
    Ok(gestures)
}

fn recorder(log: &Rc<RefCell<Vec<RecordedGesture>>>) -> GestureCallbacks {
    let push = |gesture: &'static str| {
        let log = log.clone();
        move |data: &GestureData| {
            log.borrow_mut().push(RecordedGesture {
                gesture,
                data: *data,
            })
        }
    };

    let on_swipe = push("swipe");
    let on_pinch = push("pinch");
    GestureCallbacks::new()
        .on_touch_start(push("touchstart"))
        .on_swipe(move |_, data| on_swipe(data))
        .on_long_press(push("longpress"))
        .on_double_tap(push("doubletap"))
        .on_pinch(move |_, data| on_pinch(data))
        .on_touch_end(push("touchend"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(at: f64, kind: StepKind, id: u64, x: f64, y: f64) -> TraceStep {
        TraceStep { at, kind, id, x, y }
    }

    #[test]
    fn test_rejects_out_of_order() {
        let trace = Trace {
            steps: vec![
                step(10.0, StepKind::Start, 1, 0.0, 0.0),
                step(5.0, StepKind::End, 1, 0.0, 0.0),
            ],
            ..Default::default()
        };
        assert!(matches!(
            run_trace(&trace),
            Err(ReplayError::OutOfOrder { index: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        let trace = Trace {
            steps: vec![step(f64::NAN, StepKind::Start, 1, 0.0, 0.0)],
            ..Default::default()
        };
        assert!(matches!(trace.validate(), Err(ReplayError::NonFinite { index: 0 })));
    }

    #[test]
    fn test_swipe_trace() {
        let trace = Trace {
            steps: vec![
                step(0.0, StepKind::Start, 1, 0.0, 0.0),
                step(100.0, StepKind::End, 1, 100.0, 0.0),
            ],
            ..Default::default()
        };
        let names: Vec<_> = run_trace(&trace).unwrap().iter().map(|g| g.gesture).collect();
        assert_eq!(names, vec!["touchstart", "swipe", "touchend"]);
    }

    #[test]
    fn test_unknown_touch_is_ignored() {
        let trace = Trace {
            steps: vec![step(0.0, StepKind::End, 7, 0.0, 0.0)],
            ..Default::default()
        };
        assert!(run_trace(&trace).unwrap().is_empty());
    }
}
