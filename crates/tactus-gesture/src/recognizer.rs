//! Gesture recognizer
//!
//! Binds a `GestureMachine` to one host element. Owns the four touch
//! listeners and the long-press timer, and delivers recognized gestures
//! to the current callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tactus_dom::{Event, EventType, Host, ListenerId, ListenerOptions, NodeId, TimerId, WeakHost};

use crate::callbacks::GestureCallbacks;
use crate::config::{GestureConfig, PartialGestureConfig};
use crate::machine::{GestureMachine, Phase, Step, TimerAction};
use crate::GestureError;

const SURFACE_EVENTS: [EventType; 4] = [
    EventType::TouchStart,
    EventType::TouchMove,
    EventType::TouchEnd,
    EventType::TouchCancel,
];

#[derive(Debug)]
struct Inner {
    host: WeakHost,
    surface: NodeId,
    machine: GestureMachine,
    callbacks: GestureCallbacks,
    listeners: Vec<ListenerId>,
    long_press: Option<TimerId>,
    destroyed: bool,
}

/// Recognizer attached to a surface element
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    inner: Rc<RefCell<Inner>>,
}

impl GestureRecognizer {
    /// Attach a recognizer to `surface`.
    ///
    /// Sets `touch-action: none` on the surface and registers non-passive
    /// listeners so moves can suppress scrolling.
    pub fn new(
        host: &Host,
        surface: NodeId,
        callbacks: GestureCallbacks,
        config: PartialGestureConfig,
    ) -> Result<Self, GestureError> {
        if !host.is_element(surface) {
            return Err(GestureError::InvalidSurface(surface));
        }
        let config = config.resolve()?;

        let recognizer = Self {
            inner: Rc::new(RefCell::new(Inner {
                host: host.downgrade(),
                surface,
                machine: GestureMachine::new(config),
                callbacks,
                listeners: Vec::new(),
                long_press: None,
                destroyed: false,
            })),
        };

        host.set_style(surface, "touch-action", "none")?;

        let mut listeners = Vec::with_capacity(SURFACE_EVENTS.len());
        for event_type in SURFACE_EVENTS {
            let this = recognizer.clone();
            let id = host.add_event_listener(
                surface,
                event_type,
                move |event| this.handle_event(event),
                ListenerOptions::active(),
            )?;
            listeners.push(id);
        }
        recognizer.inner.borrow_mut().listeners = listeners;

        tracing::debug!("Gesture recognizer attached to {}", surface);
        Ok(recognizer)
    }

    pub fn surface(&self) -> NodeId {
        self.inner.borrow().surface
    }

    pub fn config(&self) -> GestureConfig {
        *self.inner.borrow().machine.config()
    }

    pub fn phase(&self) -> Phase {
        *self.inner.borrow().machine.phase()
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.borrow().destroyed
    }

    /// Overlay the callbacks set in `partial`. Listeners stay as they are.
    pub fn update_callbacks(&self, partial: GestureCallbacks) {
        self.inner.borrow_mut().callbacks.merge(partial);
    }

    /// Detach from the surface. Safe to call more than once.
    pub fn destroy(&self) {
        let (host, surface, listeners, timer) = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            inner.destroyed = true;
            inner.machine.reset();
            (
                inner.host.upgrade(),
                inner.surface,
                std::mem::take(&mut inner.listeners),
                inner.long_press.take(),
            )
        };

        // Without a host there is nothing left to unregister from
        let Some(host) = host else {
            return;
        };
        for id in listeners {
            host.remove_event_listener(surface, id);
        }
        if let Some(timer) = timer {
            host.clear_timeout(timer);
        }
        tracing::debug!("Gesture recognizer detached from {}", surface);
    }

    fn handle_event(&self, event: &mut Event) {
        let now = event.time_stamp;
        let step = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            let machine = &mut inner.machine;
            match event.event_type {
                EventType::TouchStart => machine.contact_start(&event.touches, now),
                EventType::TouchMove => machine.contact_move(&event.touches, now),
                EventType::TouchEnd => {
                    machine.contact_end(&event.touches, &event.changed_touches, now)
                }
                EventType::TouchCancel => machine.contact_cancel(),
                EventType::KeyDown => return,
            }
        };

        if step.prevent_default {
            event.prevent_default();
        }
        self.apply(step);
    }

    fn on_long_press_timer(weak: &Weak<RefCell<Inner>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let this = Self { inner };
        let step = {
            let mut inner = this.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            inner.long_press = None;
            let now = inner.host.upgrade().map(|h| h.now()).unwrap_or_default();
            inner.machine.long_press_elapsed(now)
        };
        this.apply(step);
    }

    /// Execute a machine step: timer first, then callbacks with no borrow held
    fn apply(&self, step: Step) {
        if let Some(action) = step.timer {
            self.apply_timer(action);
        }
        if step.recognized.is_empty() {
            return;
        }

        let callbacks = self.inner.borrow().callbacks.clone();
        for recognized in &step.recognized {
            // A callback may destroy the recognizer
            if self.is_destroyed() {
                break;
            }
            tracing::trace!("Delivering {}", recognized.name());
            callbacks.deliver(recognized);
        }
    }

    fn apply_timer(&self, action: TimerAction) {
        let (host, previous) = {
            let mut inner = self.inner.borrow_mut();
            (inner.host.upgrade(), inner.long_press.take())
        };
        let Some(host) = host else {
            return;
        };
        if let Some(previous) = previous {
            host.clear_timeout(previous);
        }

        if let TimerAction::Arm { delay_ms } = action {
            let weak = Rc::downgrade(&self.inner);
            let id = host.set_timeout(delay_ms, move || Self::on_long_press_timer(&weak));
            self.inner.borrow_mut().long_press = Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SwipeDirection;
    use std::cell::Cell;
    use tactus_dom::TouchSimulator;

    fn surface(host: &Host) -> NodeId {
        let div = host.create_element("div");
        host.append_child(host.body(), div).unwrap();
        div
    }

    #[test]
    fn test_invalid_surface() {
        let host = Host::new();
        let result = GestureRecognizer::new(
            &host,
            NodeId::ROOT,
            GestureCallbacks::new(),
            PartialGestureConfig::default(),
        );
        assert_eq!(result.err(), Some(GestureError::InvalidSurface(NodeId::ROOT)));
    }

    #[test]
    fn test_invalid_config_registers_nothing() {
        let host = Host::new();
        let div = surface(&host);
        let config = PartialGestureConfig {
            long_press_delay: Some(-1.0),
            ..Default::default()
        };
        assert!(GestureRecognizer::new(&host, div, GestureCallbacks::new(), config).is_err());
        assert_eq!(host.listener_count(div, EventType::TouchStart), 0);
    }

    #[test]
    fn test_attach_sets_touch_action_and_listeners() {
        let host = Host::new();
        let div = surface(&host);
        let recognizer =
            GestureRecognizer::new(&host, div, GestureCallbacks::new(), PartialGestureConfig::default())
                .unwrap();

        assert_eq!(host.style(div, "touch-action").as_deref(), Some("none"));
        for event_type in SURFACE_EVENTS {
            assert_eq!(host.listener_count(div, event_type), 1);
        }

        recognizer.destroy();
        for event_type in SURFACE_EVENTS {
            assert_eq!(host.listener_count(div, event_type), 0);
        }
    }

    #[test]
    fn test_long_press_timer_cleared_by_move() {
        let host = Host::new();
        let div = surface(&host);
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();
        let _recognizer = GestureRecognizer::new(
            &host,
            div,
            GestureCallbacks::new().on_long_press(move |_| f.set(true)),
            PartialGestureConfig::default(),
        )
        .unwrap();

        let mut touch = TouchSimulator::new(&host, div);
        touch.start(1, 10.0, 10.0);
        assert_eq!(host.pending_timers(), 1);
        host.advance(100.0);
        touch.move_to(1, 12.0, 10.0);
        assert_eq!(host.pending_timers(), 0);
        host.advance(1000.0);
        assert!(!fired.get());
    }

    #[test]
    fn test_swipe_delivered_with_timestamps_from_host_clock() {
        let host = Host::new();
        let div = surface(&host);
        let seen = Rc::new(RefCell::new(None));
        let s = seen.clone();
        let _recognizer = GestureRecognizer::new(
            &host,
            div,
            GestureCallbacks::new().on_swipe(move |dir, data| *s.borrow_mut() = Some((dir, *data))),
            PartialGestureConfig::default(),
        )
        .unwrap();

        host.advance(1000.0);
        let mut touch = TouchSimulator::new(&host, div);
        touch.start(1, 100.0, 200.0);
        host.advance(80.0);
        touch.end_at(1, 100.0, 100.0);

        let (dir, data) = seen.borrow().expect("swipe delivered");
        assert_eq!(dir, SwipeDirection::Up);
        assert_eq!((data.start_time, data.end_time), (1000.0, 1080.0));
        assert_eq!(data.velocity, 1.25);
    }

    #[test]
    fn test_update_callbacks_keeps_existing() {
        let host = Host::new();
        let div = surface(&host);
        let starts = Rc::new(Cell::new(0));
        let ends = Rc::new(Cell::new(0));

        let s = starts.clone();
        let recognizer = GestureRecognizer::new(
            &host,
            div,
            GestureCallbacks::new().on_touch_start(move |_| s.set(s.get() + 1)),
            PartialGestureConfig::default(),
        )
        .unwrap();
        let e = ends.clone();
        recognizer.update_callbacks(GestureCallbacks::new().on_touch_end(move |_| e.set(e.get() + 1)));

        let mut touch = TouchSimulator::new(&host, div);
        touch.start(1, 0.0, 0.0);
        touch.end(1);
        assert_eq!((starts.get(), ends.get()), (1, 1));
        assert_eq!(host.listener_count(div, EventType::TouchStart), 1);
    }

    #[test]
    fn test_two_contact_move_prevents_default() {
        let host = Host::new();
        let div = surface(&host);
        let _recognizer =
            GestureRecognizer::new(&host, div, GestureCallbacks::new(), PartialGestureConfig::default())
                .unwrap();

        let mut touch = TouchSimulator::new(&host, div);
        touch.start(1, 0.0, 0.0);
        assert!(touch.move_to(1, 5.0, 0.0));
        touch.start(2, 100.0, 0.0);
        assert!(!touch.move_to(2, 102.0, 0.0));
    }
}
