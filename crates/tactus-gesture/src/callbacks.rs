//! Gesture callbacks
//!
//! Every slot is optional. `merge` overlays only the slots that are set,
//! which lets composed utilities layer extra behavior onto a live recognizer.

use std::fmt;
use std::rc::Rc;

use crate::data::{GestureData, SwipeDirection};
use crate::machine::Recognized;

pub type SwipeCallback = Rc<dyn Fn(SwipeDirection, &GestureData)>;
pub type PinchCallback = Rc<dyn Fn(f64, &GestureData)>;
pub type DataCallback = Rc<dyn Fn(&GestureData)>;

/// Handlers keyed by gesture
#[derive(Clone, Default)]
pub struct GestureCallbacks {
    swipe: Option<SwipeCallback>,
    long_press: Option<DataCallback>,
    double_tap: Option<DataCallback>,
    pinch: Option<PinchCallback>,
    touch_start: Option<DataCallback>,
    touch_end: Option<DataCallback>,
}

impl GestureCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_swipe(mut self, f: impl Fn(SwipeDirection, &GestureData) + 'static) -> Self {
        self.swipe = Some(Rc::new(f));
        self
    }

    pub fn on_long_press(mut self, f: impl Fn(&GestureData) + 'static) -> Self {
        self.long_press = Some(Rc::new(f));
        self
    }

    pub fn on_double_tap(mut self, f: impl Fn(&GestureData) + 'static) -> Self {
        self.double_tap = Some(Rc::new(f));
        self
    }

    pub fn on_pinch(mut self, f: impl Fn(f64, &GestureData) + 'static) -> Self {
        self.pinch = Some(Rc::new(f));
        self
    }

    pub fn on_touch_start(mut self, f: impl Fn(&GestureData) + 'static) -> Self {
        self.touch_start = Some(Rc::new(f));
        self
    }

    pub fn on_touch_end(mut self, f: impl Fn(&GestureData) + 'static) -> Self {
        self.touch_end = Some(Rc::new(f));
        self
    }

    /// Overlay the slots set in `partial`; unset slots keep their handler
    pub fn merge(&mut self, partial: GestureCallbacks) {
        let GestureCallbacks {
            swipe,
            long_press,
            double_tap,
            pinch,
            touch_start,
            touch_end,
        } = partial;
        if swipe.is_some() {
            self.swipe = swipe;
        }
        if long_press.is_some() {
            self.long_press = long_press;
        }
        if double_tap.is_some() {
            self.double_tap = double_tap;
        }
        if pinch.is_some() {
            self.pinch = pinch;
        }
        if touch_start.is_some() {
            self.touch_start = touch_start;
        }
        if touch_end.is_some() {
            self.touch_end = touch_end;
        }
    }

    /// Invoke the handler for a recognized gesture, if one is set
    pub fn deliver(&self, recognized: &Recognized) {
        match recognized {
            Recognized::TouchStart(data) => {
                if let Some(f) = &self.touch_start {
                    f(data);
                }
            }
            Recognized::Swipe(direction, data) => {
                if let Some(f) = &self.swipe {
                    f(*direction, data);
                }
            }
            Recognized::LongPress(data) => {
                if let Some(f) = &self.long_press {
                    f(data);
                }
            }
            Recognized::DoubleTap(data) => {
                if let Some(f) = &self.double_tap {
                    f(data);
                }
            }
            Recognized::Pinch(scale, data) => {
                if let Some(f) = &self.pinch {
                    f(*scale, data);
                }
            }
            Recognized::TouchEnd(data) => {
                if let Some(f) = &self.touch_end {
                    f(data);
                }
            }
        }
    }
}

impl fmt::Debug for GestureCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureCallbacks")
            .field("swipe", &self.swipe.is_some())
            .field("long_press", &self.long_press.is_some())
            .field("double_tap", &self.double_tap.is_some())
            .field("pinch", &self.pinch.is_some())
            .field("touch_start", &self.touch_start.is_some())
            .field("touch_end", &self.touch_end.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_merge_keeps_unset_slots() {
        let log = Rc::new(RefCell::new(Vec::new()));

        let l = log.clone();
        let mut callbacks = GestureCallbacks::new()
            .on_swipe(move |dir, _| l.borrow_mut().push(format!("swipe {}", dir.as_str())));

        let l = log.clone();
        callbacks.merge(GestureCallbacks::new().on_double_tap(move |_| l.borrow_mut().push("double".into())));

        let data = GestureData::stationary(0.0, 0.0, 0.0, 0.0);
        callbacks.deliver(&Recognized::Swipe(SwipeDirection::Up, data));
        callbacks.deliver(&Recognized::DoubleTap(data));
        callbacks.deliver(&Recognized::LongPress(data));

        assert_eq!(*log.borrow(), vec!["swipe up".to_string(), "double".to_string()]);
    }

    #[test]
    fn test_merge_replaces_set_slots() {
        let hits = Rc::new(RefCell::new(Vec::new()));

        let h = hits.clone();
        let mut callbacks = GestureCallbacks::new().on_pinch(move |s, _| h.borrow_mut().push(("old", s)));
        let h = hits.clone();
        callbacks.merge(GestureCallbacks::new().on_pinch(move |s, _| h.borrow_mut().push(("new", s))));

        let data = GestureData::stationary(0.0, 0.0, 0.0, 0.0);
        callbacks.deliver(&Recognized::Pinch(1.5, data));
        assert_eq!(*hits.borrow(), vec![("new", 1.5)]);
    }

    #[test]
    fn test_debug_lists_slots() {
        let callbacks = GestureCallbacks::new().on_touch_end(|_| {});
        let dbg = format!("{callbacks:?}");
        assert!(dbg.contains("touch_end: true"));
        assert!(dbg.contains("swipe: false"));
    }
}
