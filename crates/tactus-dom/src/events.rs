//! Touch and keyboard events
//!
//! Event payloads dispatched to element listeners.

use std::cell::RefCell;
use std::rc::Rc;

use crate::NodeId;

/// Event types understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    KeyDown,
}

impl EventType {
    /// DOM event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::KeyDown => "keydown",
        }
    }

    pub fn is_touch(&self) -> bool {
        !matches!(self, Self::KeyDown)
    }
}

/// A single touch point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    pub identifier: u64,
    pub client_x: f64,
    pub client_y: f64,
}

impl Touch {
    pub fn new(identifier: u64, client_x: f64, client_y: f64) -> Self {
        Self {
            identifier,
            client_x,
            client_y,
        }
    }
}

/// Dispatched event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    /// Host clock at dispatch, in milliseconds
    pub time_stamp: f64,
    /// All currently active touches
    pub touches: Vec<Touch>,
    /// Touches that triggered this event
    pub changed_touches: Vec<Touch>,
    /// Key value for keyboard events (`"Enter"`, `" "`, ...)
    pub key: Option<String>,
    pub cancelable: bool,
    default_prevented: bool,
    in_passive_listener: bool,
}

impl Event {
    /// Create a touch event
    pub fn touch(
        event_type: EventType,
        target: NodeId,
        touches: Vec<Touch>,
        changed_touches: Vec<Touch>,
    ) -> Self {
        Self {
            event_type,
            target,
            time_stamp: 0.0,
            touches,
            changed_touches,
            key: None,
            // touchcancel is not cancelable
            cancelable: event_type != EventType::TouchCancel,
            default_prevented: false,
            in_passive_listener: false,
        }
    }

    /// Create a keydown event
    pub fn key_down(target: NodeId, key: &str) -> Self {
        Self {
            event_type: EventType::KeyDown,
            target,
            time_stamp: 0.0,
            touches: Vec::new(),
            changed_touches: Vec::new(),
            key: Some(key.to_string()),
            cancelable: true,
            default_prevented: false,
            in_passive_listener: false,
        }
    }

    /// Prevent default action. Ignored inside passive listeners.
    pub fn prevent_default(&mut self) {
        if self.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn set_in_passive_listener(&mut self, passive: bool) {
        self.in_passive_listener = passive;
    }
}

/// Listener callback
pub type Listener = Rc<RefCell<dyn FnMut(&mut Event)>>;

/// Handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Listener registration options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Passive listeners cannot call `prevent_default`
    pub passive: bool,
}

impl ListenerOptions {
    pub fn passive() -> Self {
        Self { passive: true }
    }

    pub fn active() -> Self {
        Self { passive: false }
    }
}
