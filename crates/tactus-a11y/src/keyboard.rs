//! Keyboard activation for touch targets

use tactus_dom::{EventType, Host, ListenerId, ListenerOptions, NodeId};

use crate::A11yError;

/// Keys that activate a control
const ACTIVATION_KEYS: [&str; 2] = ["Enter", " "];

/// Call `callback` when Enter or Space is pressed on `element`.
///
/// The key's default action is suppressed so Space does not scroll.
pub fn add_keyboard_support(
    host: &Host,
    element: NodeId,
    callback: impl Fn() + 'static,
) -> Result<ListenerId, A11yError> {
    let id = host.add_event_listener(
        element,
        EventType::KeyDown,
        move |event| {
            let activates = event
                .key
                .as_deref()
                .is_some_and(|key| ACTIVATION_KEYS.contains(&key));
            if activates {
                event.prevent_default();
                callback();
            }
        },
        ListenerOptions::active(),
    )?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use tactus_dom::Event;

    #[test]
    fn test_enter_and_space_activate() {
        let host = Host::new();
        let div = host.create_element("div");
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        add_keyboard_support(&host, div, move || c.set(c.get() + 1)).unwrap();

        assert!(!host.dispatch_event(Event::key_down(div, "Enter")));
        assert!(!host.dispatch_event(Event::key_down(div, " ")));
        assert!(host.dispatch_event(Event::key_down(div, "a")));
        assert!(host.dispatch_event(Event::key_down(div, "Spacebar")));
        assert_eq!(count.get(), 2);
    }
}
