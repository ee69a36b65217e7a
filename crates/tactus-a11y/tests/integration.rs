//! Integration tests for tactus-a11y

use std::cell::Cell;
use std::rc::Rc;

use tactus_dom::{DeviceProfile, Event, Host, NodeId, Rect, TouchSimulator};
use tactus_a11y::{
    add_accessible_focus, add_haptic_feedback, add_keyboard_support, announce_to_screen_reader,
    enhance_for_voice_control, find_by_voice_command, scan_and_enhance_touch_targets,
    HapticIntensity, TOUCH_FOCUS_CLASS,
};

fn element(host: &Host, parent: NodeId, tag: &str, bounds: Rect) -> NodeId {
    let node = host.create_element(tag);
    host.append_child(parent, node).unwrap();
    host.set_bounds(node, bounds).unwrap();
    node
}

// ============================================================================
// TOUCH TARGET SCAN
// ============================================================================

#[test]
fn test_scan_enhances_undersized_targets_once() {
    let host = Host::with_profile(DeviceProfile::ipad_air());
    let body = host.body();

    let small = element(&host, body, "button", Rect::new(0.0, 0.0, 30.0, 30.0));
    let fine = element(&host, body, "button", Rect::new(200.0, 200.0, 50.0, 50.0));
    host.add_class(fine, "touch-manipulation").unwrap();

    let li = element(&host, body, "li", Rect::default());
    let link = element(&host, li, "a", Rect::new(400.0, 400.0, 100.0, 20.0));

    let submit = element(&host, body, "input", Rect::new(600.0, 600.0, 100.0, 30.0));
    host.set_attribute(submit, "type", "submit").unwrap();

    let fake = element(&host, body, "div", Rect::default());
    host.set_attribute(fake, "role", "button").unwrap();

    let text = element(&host, body, "input", Rect::new(800.0, 800.0, 10.0, 10.0));
    host.set_attribute(text, "type", "text").unwrap();

    assert_eq!(scan_and_enhance_touch_targets(&host).unwrap(), 4);

    for node in [small, link, submit, fake] {
        assert_eq!(host.get_attribute(node, "data-touch-enhanced").as_deref(), Some("true"));
        assert_eq!(host.style(node, "touch-action").as_deref(), Some("manipulation"));
    }
    assert!(!host.has_attribute(fine, "data-touch-enhanced"));
    assert!(!host.has_attribute(text, "data-touch-enhanced"));

    assert!(host.has_class(small, "active:scale-95"));
    assert!(host.has_class(link, "w-full"));
    assert!(host.has_class(submit, "px-4"));
    assert!(!host.has_attribute(link, "role"));
    assert_eq!(host.get_attribute(fake, "tabindex").as_deref(), Some("0"));

    assert_eq!(scan_and_enhance_touch_targets(&host).unwrap(), 0);
}

#[test]
fn test_scan_skipped_without_touch() {
    let host = Host::new();
    let small = element(&host, host.body(), "button", Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(scan_and_enhance_touch_targets(&host).unwrap(), 0);
    assert!(!host.has_attribute(small, "data-touch-enhanced"));
}

// ============================================================================
// COMBINED HELPERS
// ============================================================================

#[test]
fn test_accessible_control() {
    let host = Host::with_profile(DeviceProfile::phone());
    let button = element(&host, host.body(), "button", Rect::new(0.0, 0.0, 48.0, 48.0));

    enhance_for_voice_control(&host, button, "Add To Cart").unwrap();
    add_accessible_focus(&host, button).unwrap();
    add_haptic_feedback(&host, button, HapticIntensity::Medium).unwrap();

    let activations = Rc::new(Cell::new(0));
    let a = activations.clone();
    let h = host.clone();
    add_keyboard_support(&host, button, move || {
        a.set(a.get() + 1);
        announce_to_screen_reader(&h, "Added to cart").unwrap();
    })
    .unwrap();

    assert_eq!(find_by_voice_command(&host, "add to cart"), Some(button));
    assert!(host.has_class(button, TOUCH_FOCUS_CLASS));

    let mut touch = TouchSimulator::new(&host, button);
    touch.start(1, 10.0, 10.0);
    touch.end(1);
    assert_eq!(host.vibrations(), vec![20]);

    let before = host.children(host.body()).len();
    assert!(!host.dispatch_event(Event::key_down(button, "Enter")));
    assert_eq!(activations.get(), 1);
    assert_eq!(host.children(host.body()).len(), before + 1);

    host.advance(1000.0);
    assert_eq!(host.children(host.body()).len(), before);
}
