//! Touch simulator
//!
//! Multi-touch input against one target element. Keeps the active touch list
//! so every dispatched event carries correct `touches` and `changed_touches`.

use crate::events::{Event, EventType, Touch};
use crate::host::Host;
use crate::NodeId;

/// Drives touch sequences on a target
#[derive(Debug)]
pub struct TouchSimulator {
    host: Host,
    target: NodeId,
    active: Vec<Touch>,
}

impl TouchSimulator {
    pub fn new(host: &Host, target: NodeId) -> Self {
        Self {
            host: host.clone(),
            target,
            active: Vec::new(),
        }
    }

    /// Begin a touch. Returns false if default was prevented.
    pub fn start(&mut self, identifier: u64, x: f64, y: f64) -> bool {
        let touch = Touch::new(identifier, x, y);
        self.active.retain(|t| t.identifier != identifier);
        self.active.push(touch);
        self.dispatch(EventType::TouchStart, vec![touch])
    }

    /// Move one touch
    pub fn move_to(&mut self, identifier: u64, x: f64, y: f64) -> bool {
        self.move_many(&[(identifier, x, y)])
    }

    /// Move several touches in one coalesced `touchmove`
    pub fn move_many(&mut self, moves: &[(u64, f64, f64)]) -> bool {
        let mut changed = Vec::with_capacity(moves.len());
        for &(identifier, x, y) in moves {
            if let Some(touch) = self.active.iter_mut().find(|t| t.identifier == identifier) {
                touch.client_x = x;
                touch.client_y = y;
                changed.push(*touch);
            }
        }
        if changed.is_empty() {
            return true;
        }
        self.dispatch(EventType::TouchMove, changed)
    }

    /// Lift a touch at its last position
    pub fn end(&mut self, identifier: u64) -> bool {
        let Some(idx) = self.active.iter().position(|t| t.identifier == identifier) else {
            return true;
        };
        let touch = self.active.remove(idx);
        self.dispatch(EventType::TouchEnd, vec![touch])
    }

    /// Lift a touch at a final position
    pub fn end_at(&mut self, identifier: u64, x: f64, y: f64) -> bool {
        if let Some(touch) = self.active.iter_mut().find(|t| t.identifier == identifier) {
            touch.client_x = x;
            touch.client_y = y;
        }
        self.end(identifier)
    }

    /// Cancel all touches
    pub fn cancel(&mut self) -> bool {
        let changed: Vec<_> = self.active.drain(..).collect();
        self.dispatch(EventType::TouchCancel, changed)
    }

    /// Whether a touch with this identifier is down
    pub fn is_active(&self, identifier: u64) -> bool {
        self.active.iter().any(|t| t.identifier == identifier)
    }

    /// Number of active touches
    pub fn touch_count(&self) -> usize {
        self.active.len()
    }

    fn dispatch(&self, event_type: EventType, changed: Vec<Touch>) -> bool {
        let event = Event::touch(event_type, self.target, self.active.clone(), changed);
        self.host.dispatch_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListenerOptions;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(host: &Host, target: NodeId) -> Rc<RefCell<Vec<(EventType, usize, usize)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for event_type in [
            EventType::TouchStart,
            EventType::TouchMove,
            EventType::TouchEnd,
            EventType::TouchCancel,
        ] {
            let log = log.clone();
            host.add_event_listener(
                target,
                event_type,
                move |e| {
                    log.borrow_mut()
                        .push((e.event_type, e.touches.len(), e.changed_touches.len()))
                },
                ListenerOptions::default(),
            )
            .unwrap();
        }
        log
    }

    #[test]
    fn test_touch_lists() {
        let host = Host::new();
        let div = host.create_element("div");
        let log = record(&host, div);
        let mut sim = TouchSimulator::new(&host, div);

        sim.start(1, 0.0, 0.0);
        sim.start(2, 10.0, 0.0);
        sim.move_many(&[(1, -5.0, 0.0), (2, 15.0, 0.0)]);
        sim.end(2);
        sim.end(1);

        assert_eq!(
            *log.borrow(),
            vec![
                (EventType::TouchStart, 1, 1),
                (EventType::TouchStart, 2, 1),
                (EventType::TouchMove, 2, 2),
                (EventType::TouchEnd, 1, 1),
                (EventType::TouchEnd, 0, 1),
            ]
        );
        assert_eq!(sim.touch_count(), 0);
    }

    #[test]
    fn test_cancel_clears_touches() {
        let host = Host::new();
        let div = host.create_element("div");
        let log = record(&host, div);
        let mut sim = TouchSimulator::new(&host, div);

        sim.start(1, 0.0, 0.0);
        sim.cancel();

        assert_eq!(log.borrow().last(), Some(&(EventType::TouchCancel, 0, 1)));
        assert_eq!(sim.touch_count(), 0);
    }

    #[test]
    fn test_unknown_touch_ignored() {
        let host = Host::new();
        let div = host.create_element("div");
        let log = record(&host, div);
        let mut sim = TouchSimulator::new(&host, div);

        assert!(!sim.is_active(9));
        assert!(sim.move_to(9, 1.0, 1.0));
        assert!(sim.end(9));
        assert!(log.borrow().is_empty());
    }
}
