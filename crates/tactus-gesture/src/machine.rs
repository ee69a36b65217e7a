//! Gesture state machine
//!
//! Pure classification logic with no host access. Each input returns a
//! `Step` describing what was recognized, what the long-press timer should
//! do and whether the platform default must be suppressed. The recognizer
//! executes steps against the host.
//!
//! Single-contact path:
//!
//! ```text
//! Idle -> Pressing (timer armed) -> Dragging (moved)  -> Idle on release (classify)
//!                                -> LongPressed       -> Idle on release (ended only)
//!                                -> Idle on release (classify) or cancel
//! any active phase + second contact -> Pinching -> PinchSettling (< 2 contacts) -> Idle
//! ```

use tactus_dom::Touch;

use crate::config::{GestureConfig, TAP_SLOP};
use crate::data::{self, GestureData, SwipeDirection};

/// One continuous contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSession {
    pub identifier: u64,
    pub start_x: f64,
    pub start_y: f64,
    pub start_time: f64,
    pub last_x: f64,
    pub last_y: f64,
}

impl ContactSession {
    fn begin(touch: &Touch, now: f64) -> Self {
        Self {
            identifier: touch.identifier,
            start_x: touch.client_x,
            start_y: touch.client_y,
            start_time: now,
            last_x: touch.client_x,
            last_y: touch.client_y,
        }
    }

    fn track(&mut self, touches: &[Touch]) {
        let touch = touches
            .iter()
            .find(|t| t.identifier == self.identifier)
            .or_else(|| touches.first());
        if let Some(t) = touch {
            self.last_x = t.client_x;
            self.last_y = t.client_y;
        }
    }

    /// Zero-displacement descriptor at the start point
    fn stationary(&self, now: f64) -> GestureData {
        GestureData::stationary(self.start_x, self.start_y, self.start_time, now)
    }

    /// Descriptor from the start point to a release point
    fn released_at(&self, x: f64, y: f64, now: f64) -> GestureData {
        GestureData::between((self.start_x, self.start_y), self.start_time, (x, y), now)
    }
}

/// Two-contact tracking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchTracking {
    pub initial_distance: f64,
    /// Scale at the last emitted pinch
    pub baseline: f64,
}

/// Consecutive tap tracking
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TapCounter {
    pub last_release: Option<f64>,
    pub count: u32,
}

/// Recognizer phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Idle,
    /// Contact down, long-press timer armed
    Pressing(ContactSession),
    /// Contact moved, long-press no longer possible
    Dragging(ContactSession),
    /// Long press fired; release only ends the session
    LongPressed(ContactSession),
    /// Two contacts down
    Pinching(ContactSession, PinchTracking),
    /// A pinch dropped below two contacts; waiting for the rest to lift
    PinchSettling(ContactSession),
}

impl Phase {
    pub fn session(&self) -> Option<&ContactSession> {
        match self {
            Phase::Idle => None,
            Phase::Pressing(s)
            | Phase::Dragging(s)
            | Phase::LongPressed(s)
            | Phase::Pinching(s, _)
            | Phase::PinchSettling(s) => Some(s),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }
}

/// Gesture recognized by a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recognized {
    TouchStart(GestureData),
    Swipe(SwipeDirection, GestureData),
    LongPress(GestureData),
    DoubleTap(GestureData),
    Pinch(f64, GestureData),
    TouchEnd(GestureData),
}

impl Recognized {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TouchStart(_) => "touchstart",
            Self::Swipe(..) => "swipe",
            Self::LongPress(_) => "longpress",
            Self::DoubleTap(_) => "doubletap",
            Self::Pinch(..) => "pinch",
            Self::TouchEnd(_) => "touchend",
        }
    }

    pub fn data(&self) -> &GestureData {
        match self {
            Self::TouchStart(d)
            | Self::Swipe(_, d)
            | Self::LongPress(d)
            | Self::DoubleTap(d)
            | Self::Pinch(_, d)
            | Self::TouchEnd(d) => d,
        }
    }
}

/// Long-press timer instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerAction {
    /// Replace any pending timer with one firing after `delay_ms`
    Arm { delay_ms: f64 },
    Disarm,
}

/// Result of feeding one input to the machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    pub recognized: Vec<Recognized>,
    pub timer: Option<TimerAction>,
    pub prevent_default: bool,
}

impl Step {
    fn disarm() -> Self {
        Self {
            timer: Some(TimerAction::Disarm),
            ..Self::default()
        }
    }
}

/// Gesture classification state
#[derive(Debug, Clone)]
pub struct GestureMachine {
    config: GestureConfig,
    phase: Phase,
    taps: TapCounter,
}

impl GestureMachine {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            taps: TapCounter::default(),
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn tap_count(&self) -> u32 {
        self.taps.count
    }

    /// Drop all per-session state
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// A contact touched the surface; `touches` are all active contacts
    pub fn contact_start(&mut self, touches: &[Touch], now: f64) -> Step {
        let Some(first) = touches.first() else {
            return Step::default();
        };
        // Extra contacts leave the running pinch and its baseline untouched
        if matches!(self.phase, Phase::Pinching(..)) {
            tracing::trace!("Ignoring contact {} during pinch", touches.len());
            return Step::default();
        }

        let mut step = Step::default();
        let session = match self.phase.session() {
            Some(session) if touches.len() >= 2 => *session,
            _ => {
                let session = ContactSession::begin(first, now);
                self.count_tap_start(now);
                step.recognized
                    .push(Recognized::TouchStart(session.stationary(now)));
                session
            }
        };

        if touches.len() >= 2 {
            let initial_distance = touch_distance(&touches[0], &touches[1]);
            tracing::trace!("Pinch tracking started at {:.1}px", initial_distance);
            self.phase = Phase::Pinching(
                session,
                PinchTracking {
                    initial_distance,
                    baseline: 1.0,
                },
            );
            step.timer = Some(TimerAction::Disarm);
        } else {
            self.phase = Phase::Pressing(session);
            step.timer = Some(TimerAction::Arm {
                delay_ms: self.config.long_press_delay,
            });
        }
        step
    }

    /// Active contacts moved
    pub fn contact_move(&mut self, touches: &[Touch], now: f64) -> Step {
        let mut step = Step {
            // The platform must not scroll or zoom during a two-contact gesture
            prevent_default: touches.len() == 2,
            ..Step::default()
        };

        match &mut self.phase {
            Phase::Idle | Phase::PinchSettling(_) => {}
            Phase::Pinching(session, pinch) => {
                if touches.len() == 2 && pinch.initial_distance > 0.0 {
                    let (a, b) = (&touches[0], &touches[1]);
                    let scale = touch_distance(a, b) / pinch.initial_distance;
                    if (scale - pinch.baseline).abs() > self.config.pinch_threshold {
                        let mut data = GestureData::stationary(
                            session.start_x,
                            session.start_y,
                            session.start_time,
                            now,
                        );
                        data.end_x = (a.client_x + b.client_x) / 2.0;
                        data.end_y = (a.client_y + b.client_y) / 2.0;
                        data.scale = Some(scale);
                        tracing::debug!("Pinch scale {:.3}", scale);
                        step.recognized.push(Recognized::Pinch(scale, data));
                        pinch.baseline = scale;
                    }
                }
            }
            Phase::Pressing(session) => {
                session.track(touches);
                self.phase = Phase::Dragging(*session);
                step.timer = Some(TimerAction::Disarm);
            }
            Phase::Dragging(session) | Phase::LongPressed(session) => {
                session.track(touches);
            }
        }
        step
    }

    /// A contact lifted; `remaining` are the contacts still down and
    /// `changed` holds the lifted one
    pub fn contact_end(&mut self, remaining: &[Touch], changed: &[Touch], now: f64) -> Step {
        let phase = self.phase;
        let Some(session) = phase.session().copied() else {
            return Step::default();
        };

        let released = changed
            .iter()
            .find(|t| t.identifier == session.identifier)
            .or_else(|| changed.first())
            .map(|t| (t.client_x, t.client_y))
            .unwrap_or((session.last_x, session.last_y));

        match phase {
            Phase::Pressing(_) | Phase::Dragging(_) => {
                self.phase = Phase::Idle;
                let mut step = Step::disarm();
                let mut data = session.released_at(released.0, released.1, now);

                if data.distance >= self.config.swipe_threshold
                    && data.velocity >= self.config.swipe_velocity
                {
                    let direction = SwipeDirection::from_delta(data.delta_x(), data.delta_y());
                    data.direction = Some(direction);
                    tracing::debug!(
                        "Swipe {} ({:.1}px at {:.3}px/ms)",
                        direction.as_str(),
                        data.distance,
                        data.velocity
                    );
                    step.recognized.push(Recognized::Swipe(direction, data));
                } else if data.distance < TAP_SLOP {
                    self.taps.last_release = Some(now);
                    if self.taps.count >= 2 {
                        tracing::debug!("Double tap at ({}, {})", data.end_x, data.end_y);
                        step.recognized.push(Recognized::DoubleTap(data));
                        self.taps.count = 0;
                    }
                }

                step.recognized.push(Recognized::TouchEnd(data));
                step
            }
            Phase::LongPressed(_) | Phase::PinchSettling(_) => {
                if !remaining.is_empty() {
                    return Step::default();
                }
                self.phase = Phase::Idle;
                let mut step = Step::disarm();
                let data = session.released_at(released.0, released.1, now);
                step.recognized.push(Recognized::TouchEnd(data));
                step
            }
            Phase::Pinching(..) => {
                if remaining.len() >= 2 {
                    return Step::default();
                }
                tracing::trace!("Pinch tracking discarded");
                if remaining.is_empty() {
                    self.phase = Phase::Idle;
                    let mut step = Step::disarm();
                    let data = session.released_at(released.0, released.1, now);
                    step.recognized.push(Recognized::TouchEnd(data));
                    step
                } else {
                    self.phase = Phase::PinchSettling(session);
                    Step::default()
                }
            }
            Phase::Idle => Step::default(),
        }
    }

    /// The platform cancelled the contact sequence
    pub fn contact_cancel(&mut self) -> Step {
        self.phase = Phase::Idle;
        Step::disarm()
    }

    /// The long-press timer elapsed
    pub fn long_press_elapsed(&mut self, now: f64) -> Step {
        let Phase::Pressing(session) = self.phase else {
            return Step::default();
        };
        self.phase = Phase::LongPressed(session);
        let data = session.stationary(now);
        tracing::debug!("Long press at ({}, {})", data.start_x, data.start_y);
        Step {
            recognized: vec![Recognized::LongPress(data)],
            ..Step::default()
        }
    }

    fn count_tap_start(&mut self, now: f64) {
        let within_window = self
            .taps
            .last_release
            .is_some_and(|last| now - last < self.config.double_tap_delay);
        self.taps.count = if within_window { self.taps.count + 1 } else { 1 };
    }
}

fn touch_distance(a: &Touch, b: &Touch) -> f64 {
    data::distance(b.client_x - a.client_x, b.client_y - a.client_y)
}
