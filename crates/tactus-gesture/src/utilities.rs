//! Composed gesture behaviors
//!
//! Each helper attaches to an element and hands back a `Disposer` that
//! undoes the attachment.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tactus_dom::{Event, EventType, Host, ListenerOptions, NodeId, TimerId, WeakHost};

use crate::callbacks::GestureCallbacks;
use crate::config::PartialGestureConfig;
use crate::data::{GestureData, SwipeDirection};
use crate::recognizer::GestureRecognizer;
use crate::GestureError;

/// Dismiss direction used when the caller has no preference
pub const DEFAULT_DISMISS_DIRECTION: SwipeDirection = SwipeDirection::Up;

/// Pull distance (px) past which a release refreshes
pub const DEFAULT_REFRESH_THRESHOLD: f64 = 100.0;

/// How long pull-to-refresh stays locked after triggering (ms)
const REFRESH_LOCK_MS: f64 = 1000.0;

/// Undo handle for an attached behavior
#[must_use = "dropping a Disposer leaves the behavior attached"]
pub struct Disposer {
    teardown: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Disposer {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: RefCell::new(Some(Box::new(teardown))),
        }
    }

    /// Detach the behavior. Later calls do nothing.
    pub fn dispose(&self) {
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.teardown.borrow().is_none()
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Call `on_dismiss` when a swipe in `direction` completes
pub fn add_swipe_to_dismiss(
    host: &Host,
    element: NodeId,
    on_dismiss: impl Fn() + 'static,
    direction: SwipeDirection,
) -> Result<Disposer, GestureError> {
    let callbacks = GestureCallbacks::new().on_swipe(move |swiped, _| {
        if swiped == direction {
            tracing::debug!("Swipe-to-dismiss triggered ({})", direction.as_str());
            on_dismiss();
        }
    });
    let recognizer =
        GestureRecognizer::new(host, element, callbacks, PartialGestureConfig::default())?;
    Ok(Disposer::new(move || recognizer.destroy()))
}

#[derive(Debug, Default)]
struct PullState {
    start_y: f64,
    current_y: f64,
    refreshing: bool,
    lock_timer: Option<TimerId>,
}

/// Drag-down-to-refresh with visual feedback on the element.
///
/// Only engages while the element is scrolled to the top.
pub fn add_pull_to_refresh(
    host: &Host,
    element: NodeId,
    on_refresh: impl Fn() + 'static,
    threshold: f64,
) -> Result<Disposer, GestureError> {
    if !host.is_element(element) {
        return Err(GestureError::InvalidSurface(element));
    }

    let state = Rc::new(RefCell::new(PullState::default()));
    let weak_host = host.downgrade();

    let start = {
        let state = state.clone();
        move |event: &mut Event| {
            if let Some(touch) = event.touches.first() {
                let mut state = state.borrow_mut();
                state.start_y = touch.client_y;
                state.current_y = touch.client_y;
            }
        }
    };

    let pull = {
        let state = state.clone();
        let weak_host = weak_host.clone();
        move |event: &mut Event| {
            let (Some(host), Some(touch)) = (weak_host.upgrade(), event.touches.first()) else {
                return;
            };
            let delta = {
                let mut state = state.borrow_mut();
                if state.refreshing {
                    return;
                }
                state.current_y = touch.client_y;
                state.current_y - state.start_y
            };

            if delta > 0.0 && host.scroll_top(element) == 0.0 {
                event.prevent_default();
                let offset = (delta * 0.5).min(threshold);
                let opacity = (1.0 - delta / 200.0).max(0.7);
                set_feedback(&host, element, &format!("translateY({offset}px)"), &opacity.to_string());
            }
        }
    };

    let release = {
        let state = state.clone();
        let weak_host = weak_host.clone();
        move |_: &mut Event| {
            let Some(host) = weak_host.upgrade() else {
                return;
            };
            let triggered = {
                let mut state = state.borrow_mut();
                if state.refreshing {
                    return;
                }
                let delta = state.current_y - state.start_y;
                state.refreshing = delta > threshold;
                state.refreshing
            };

            if !triggered {
                clear_feedback(&host, element);
                return;
            }

            tracing::debug!("Pull-to-refresh triggered on {}", element);
            let lock = {
                let state = state.clone();
                let weak_host = host.downgrade();
                host.set_timeout(REFRESH_LOCK_MS, move || {
                    let mut state = state.borrow_mut();
                    state.refreshing = false;
                    state.lock_timer = None;
                    if let Some(host) = weak_host.upgrade() {
                        clear_feedback(&host, element);
                    }
                })
            };
            state.borrow_mut().lock_timer = Some(lock);
            on_refresh();
        }
    };

    let listeners = [
        host.add_event_listener(element, EventType::TouchStart, start, ListenerOptions::active())?,
        host.add_event_listener(element, EventType::TouchMove, pull, ListenerOptions::active())?,
        host.add_event_listener(element, EventType::TouchEnd, release, ListenerOptions::active())?,
    ];

    Ok(Disposer::new(move || {
        let Some(host) = weak_host.upgrade() else {
            return;
        };
        for id in listeners {
            host.remove_event_listener(element, id);
        }
        if let Some(timer) = state.borrow_mut().lock_timer.take() {
            host.clear_timeout(timer);
        }
    }))
}

fn set_feedback(host: &Host, element: NodeId, transform: &str, opacity: &str) {
    let result = host
        .set_style(element, "transform", transform)
        .and_then(|()| host.set_style(element, "opacity", opacity));
    if let Err(err) = result {
        tracing::warn!("Pull-to-refresh feedback failed: {}", err);
    }
}

fn clear_feedback(host: &Host, element: NodeId) {
    set_feedback(host, element, "", "");
}

/// Scale limits for pinch-to-zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchZoomOptions {
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for PinchZoomOptions {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 3.0,
        }
    }
}

/// Scale the element with a pinch; double-tap resets to 1
pub fn add_pinch_to_zoom(
    host: &Host,
    element: NodeId,
    options: PinchZoomOptions,
) -> Result<Disposer, GestureError> {
    let weak_host = host.downgrade();
    let PinchZoomOptions { min_scale, max_scale } = options;

    let zoom = {
        let weak_host = weak_host.clone();
        move |scale: f64, _: &GestureData| {
            let clamped = scale.max(min_scale).min(max_scale);
            write_scale(&weak_host, element, clamped);
        }
    };
    let recognizer = GestureRecognizer::new(
        host,
        element,
        GestureCallbacks::new().on_pinch(zoom),
        PartialGestureConfig::default(),
    )?;

    recognizer.update_callbacks(
        GestureCallbacks::new().on_double_tap(move |_| write_scale(&weak_host, element, 1.0)),
    );

    Ok(Disposer::new(move || recognizer.destroy()))
}

fn write_scale(weak_host: &WeakHost, element: NodeId, scale: f64) {
    let Some(host) = weak_host.upgrade() else {
        return;
    };
    if let Err(err) = host.set_style(element, "transform", &format!("scale({scale})")) {
        tracing::warn!("Pinch-to-zoom transform failed: {}", err);
    }
}
