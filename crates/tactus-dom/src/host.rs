//! Host handle
//!
//! Shared, single-threaded access to the document, clock, timers and
//! navigator. Every method takes `&self` and releases its internal borrow
//! before running listener or timer callbacks, so callbacks may call back
//! into the host freely.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::events::{Event, EventType, ListenerId, ListenerOptions};
use crate::navigator::{DeviceProfile, Navigator};
use crate::node::{ElementData, RegisteredListener, Rect};
use crate::timers::{TimerId, TimerQueue};
use crate::tree::DomTree;
use crate::{DomError, NodeId};

#[derive(Debug)]
struct HostInner {
    tree: DomTree,
    head: NodeId,
    body: NodeId,
    timers: TimerQueue,
    /// Virtual clock in milliseconds
    clock: f64,
    navigator: Navigator,
    next_listener: u64,
}

/// Cloneable handle to one document and its event loop
#[derive(Debug, Clone)]
pub struct Host {
    inner: Rc<RefCell<HostInner>>,
}

/// Non-owning host handle, used by bindings stored inside the host itself
#[derive(Debug, Clone)]
pub struct WeakHost {
    inner: Weak<RefCell<HostInner>>,
}

impl WeakHost {
    pub fn upgrade(&self) -> Option<Host> {
        self.inner.upgrade().map(|inner| Host { inner })
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    /// Create a desktop host with `html`, `head` and `body`
    pub fn new() -> Self {
        Self::with_profile(DeviceProfile::default())
    }

    /// Create a host emulating the given device
    pub fn with_profile(profile: DeviceProfile) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_child_element(NodeId::ROOT, "html");
        let head = tree.create_child_element(html, "head");
        let body = tree.create_child_element(html, "body");

        Self {
            inner: Rc::new(RefCell::new(HostInner {
                tree,
                head,
                body,
                timers: TimerQueue::new(),
                clock: 0.0,
                navigator: Navigator::new(profile),
                next_listener: 0,
            })),
        }
    }

    pub fn downgrade(&self) -> WeakHost {
        WeakHost {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Whether both handles point at the same host
    pub fn ptr_eq(&self, other: &Host) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------
    // Tree
    // ------------------------------------------------------------------

    pub fn head(&self) -> NodeId {
        self.inner.borrow().head
    }

    pub fn body(&self) -> NodeId {
        self.inner.borrow().body
    }

    /// Create a detached element
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.inner.borrow_mut().tree.create_element(tag)
    }

    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.inner.borrow_mut().tree.append_child(parent, child)
    }

    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.inner.borrow_mut().tree.remove_child(parent, child)
    }

    /// Detach a node from wherever it is
    pub fn remove(&self, node: NodeId) {
        self.inner.borrow_mut().tree.detach(node);
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        self.inner.borrow().tree.is_element(node)
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.inner.borrow().tree.is_connected(node)
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.borrow().tree.children(node).to_vec()
    }

    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.inner.borrow().tree.descendants(node)
    }

    pub fn closest(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.inner.borrow().tree.closest(node, tag)
    }

    /// Run `f` against an element's data
    pub fn with_element<R>(
        &self,
        node: NodeId,
        f: impl FnOnce(&ElementData) -> R,
    ) -> Result<R, DomError> {
        let inner = self.inner.borrow();
        inner.tree.element(node).map(f)
    }

    /// Run `f` against an element's data mutably
    pub fn with_element_mut<R>(
        &self,
        node: NodeId,
        f: impl FnOnce(&mut ElementData) -> R,
    ) -> Result<R, DomError> {
        let mut inner = self.inner.borrow_mut();
        inner.tree.element_mut(node).map(f)
    }

    pub fn tag_name(&self, node: NodeId) -> Result<String, DomError> {
        self.with_element(node, |e| e.tag.clone())
    }

    // ------------------------------------------------------------------
    // Attributes, classes, style
    // ------------------------------------------------------------------

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| e.set_attribute(name, value))
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_element(node, |e| e.get_attribute(name).map(str::to_string))
            .ok()
            .flatten()
    }

    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.with_element(node, |e| e.get_attribute(name).is_some())
            .unwrap_or(false)
    }

    pub fn remove_attribute(&self, node: NodeId, name: &str) -> Result<bool, DomError> {
        self.with_element_mut(node, |e| e.remove_attribute(name))
    }

    pub fn add_class(&self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| {
            for c in class.split_whitespace() {
                e.add_class(c);
            }
        })
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.with_element(node, |e| e.has_class(class))
            .unwrap_or(false)
    }

    pub fn class_name(&self, node: NodeId) -> Option<String> {
        self.with_element(node, ElementData::class_name).ok()
    }

    /// Set an inline style property; an empty value removes it
    pub fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| e.style.set(property, value))
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.with_element(node, |e| e.style.get(property).map(str::to_string))
            .ok()
            .flatten()
    }

    pub fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| e.text = text.to_string())
    }

    pub fn text_content(&self, node: NodeId) -> Option<String> {
        self.with_element(node, |e| e.text.clone()).ok()
    }

    pub fn set_bounds(&self, node: NodeId, bounds: Rect) -> Result<(), DomError> {
        self.with_element_mut(node, |e| e.bounds = bounds)
    }

    /// `getBoundingClientRect()`
    pub fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.with_element(node, |e| e.bounds).ok()
    }

    pub fn set_scroll_top(&self, node: NodeId, scroll_top: f64) -> Result<(), DomError> {
        self.with_element_mut(node, |e| e.scroll_top = scroll_top)
    }

    pub fn scroll_top(&self, node: NodeId) -> f64 {
        self.with_element(node, |e| e.scroll_top).unwrap_or(0.0)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener on an element
    pub fn add_event_listener(
        &self,
        node: NodeId,
        event_type: EventType,
        listener: impl FnMut(&mut Event) + 'static,
        options: ListenerOptions,
    ) -> Result<ListenerId, DomError> {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = ListenerId(inner.next_listener);
        let element = inner.tree.element_mut(node)?;
        element.listeners.push(RegisteredListener {
            id,
            event_type,
            options,
            callback: Rc::new(RefCell::new(listener)),
        });
        tracing::trace!("Added {} listener {:?} on {}", event_type.as_str(), id, node);
        Ok(id)
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove_event_listener(&self, node: NodeId, id: ListenerId) -> bool {
        self.with_element_mut(node, |e| {
            let before = e.listeners.len();
            e.listeners.retain(|l| l.id != id);
            before != e.listeners.len()
        })
        .unwrap_or(false)
    }

    pub fn listener_count(&self, node: NodeId, event_type: EventType) -> usize {
        self.with_element(node, |e| e.listener_count(event_type))
            .unwrap_or(0)
    }

    fn has_listener(&self, node: NodeId, id: ListenerId) -> bool {
        self.with_element(node, |e| e.listeners.iter().any(|l| l.id == id))
            .unwrap_or(false)
    }

    /// Dispatch an event at its target.
    ///
    /// Returns false if a listener prevented the default action.
    pub fn dispatch_event(&self, mut event: Event) -> bool {
        let target = event.target;
        let listeners: Vec<_> = {
            let inner = self.inner.borrow();
            match inner.tree.element(target) {
                Ok(element) => element
                    .listeners
                    .iter()
                    .filter(|l| l.event_type == event.event_type)
                    .map(|l| (l.id, l.options, l.callback.clone()))
                    .collect(),
                Err(err) => {
                    tracing::warn!("Dropping {} event: {}", event.event_type.as_str(), err);
                    return true;
                }
            }
        };
        event.time_stamp = self.now();

        for (id, options, callback) in listeners {
            // Listeners removed by an earlier listener in this dispatch do not run
            if !self.has_listener(target, id) {
                continue;
            }
            event.set_in_passive_listener(options.passive);
            match callback.try_borrow_mut() {
                Ok(mut f) => (*f)(&mut event),
                Err(_) => tracing::warn!("Skipping re-entrant listener {:?} on {}", id, target),
            }
        }
        event.set_in_passive_listener(false);

        !event.is_default_prevented()
    }

    // ------------------------------------------------------------------
    // Clock and timers
    // ------------------------------------------------------------------

    /// Current virtual time in milliseconds
    pub fn now(&self) -> f64 {
        self.inner.borrow().clock
    }

    /// Schedule `callback` after `delay_ms`
    pub fn set_timeout(&self, delay_ms: f64, callback: impl FnOnce() + 'static) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.clock + delay_ms.max(0.0);
        let id = inner.timers.schedule(deadline, Box::new(callback));
        tracing::trace!("Scheduled timer {:?} at {}ms", id, deadline);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired.
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        self.inner.borrow_mut().timers.cancel(id)
    }

    pub fn is_timer_pending(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.is_pending(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Move the clock forward, firing every timer that comes due
    pub fn advance(&self, ms: f64) {
        let target = self.now() + ms.max(0.0);
        self.advance_to(target);
    }

    /// Move the clock to an absolute time (never backwards)
    pub fn advance_to(&self, target: f64) {
        loop {
            let due = {
                let mut inner = self.inner.borrow_mut();
                let due = inner.timers.pop_due(target);
                if let Some((deadline, _)) = &due {
                    inner.clock = inner.clock.max(*deadline);
                }
                due
            };
            match due {
                Some((_, callback)) => callback(),
                None => break,
            }
        }
        let mut inner = self.inner.borrow_mut();
        inner.clock = inner.clock.max(target);
    }

    // ------------------------------------------------------------------
    // Navigator
    // ------------------------------------------------------------------

    pub fn device_profile(&self) -> DeviceProfile {
        self.inner.borrow().navigator.profile.clone()
    }

    pub fn supports_vibration(&self) -> bool {
        self.inner.borrow().navigator.vibration.supported
    }

    /// `navigator.vibrate(ms)`
    pub fn vibrate(&self, duration_ms: u64) -> bool {
        self.inner.borrow_mut().navigator.vibration.vibrate(duration_ms)
    }

    /// Pulses played so far
    pub fn vibrations(&self) -> Vec<u64> {
        self.inner.borrow().navigator.vibration.pulses().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_document_structure() {
        let host = Host::new();
        assert_eq!(host.tag_name(host.head()).unwrap(), "head");
        assert_eq!(host.tag_name(host.body()).unwrap(), "body");
        assert!(host.is_connected(host.body()));

        let html = host.children(NodeId::ROOT);
        assert_eq!(html.len(), 1);
        assert_eq!(host.tag_name(html[0]).unwrap(), "html");
        assert_eq!(host.children(html[0]), vec![host.head(), host.body()]);
    }

    #[test]
    fn test_dispatch_and_prevent_default() {
        let host = Host::new();
        let div = host.create_element("div");
        host.append_child(host.body(), div).unwrap();

        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        host.add_event_listener(
            div,
            EventType::TouchMove,
            move |e| {
                seen.set(seen.get() + 1);
                e.prevent_default();
            },
            ListenerOptions::active(),
        )
        .unwrap();

        let event = Event::touch(EventType::TouchMove, div, vec![], vec![]);
        assert!(!host.dispatch_event(event));
        assert_eq!(calls.get(), 1);

        // Other event types do not reach the listener
        let event = Event::touch(EventType::TouchEnd, div, vec![], vec![]);
        assert!(host.dispatch_event(event));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_passive_listener_cannot_prevent() {
        let host = Host::new();
        let div = host.create_element("div");
        host.add_event_listener(div, EventType::TouchMove, |e| e.prevent_default(), ListenerOptions::passive())
            .unwrap();

        let event = Event::touch(EventType::TouchMove, div, vec![], vec![]);
        assert!(host.dispatch_event(event));
    }

    #[test]
    fn test_listener_removed_during_dispatch_does_not_run() {
        let host = Host::new();
        let div = host.create_element("div");
        let second_ran = Rc::new(Cell::new(false));

        let second_id = Rc::new(Cell::new(None));
        let h = host.clone();
        let sid = second_id.clone();
        host.add_event_listener(
            div,
            EventType::KeyDown,
            move |_| {
                if let Some(id) = sid.get() {
                    h.remove_event_listener(div, id);
                }
            },
            ListenerOptions::default(),
        )
        .unwrap();
        let ran = second_ran.clone();
        let id = host
            .add_event_listener(div, EventType::KeyDown, move |_| ran.set(true), ListenerOptions::default())
            .unwrap();
        second_id.set(Some(id));

        host.dispatch_event(Event::key_down(div, "Enter"));
        assert!(!second_ran.get());
        assert!(!host.remove_event_listener(div, id));
    }

    #[test]
    fn test_timers_fire_at_deadline() {
        let host = Host::new();
        let fired_at = Rc::new(Cell::new(None));

        let h = host.clone();
        let slot = fired_at.clone();
        host.set_timeout(500.0, move || slot.set(Some(h.now())));

        host.advance(499.0);
        assert_eq!(fired_at.get(), None);
        host.advance(100.0);
        assert_eq!(fired_at.get(), Some(500.0));
        assert_eq!(host.now(), 599.0);
    }

    #[test]
    fn test_timer_scheduled_from_timer() {
        let host = Host::new();
        let count = Rc::new(Cell::new(0));

        let h = host.clone();
        let c = count.clone();
        host.set_timeout(10.0, move || {
            c.set(c.get() + 1);
            let c = c.clone();
            h.set_timeout(10.0, move || c.set(c.get() + 1));
        });

        host.advance(25.0);
        assert_eq!(count.get(), 2);
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_clear_timeout() {
        let host = Host::new();
        let id = host.set_timeout(10.0, || panic!("cleared timer fired"));
        assert!(host.clear_timeout(id));
        assert!(!host.clear_timeout(id));
        host.advance(20.0);
    }

    #[test]
    fn test_vibrate_follows_profile() {
        let desktop = Host::new();
        assert!(!desktop.vibrate(10));

        let phone = Host::with_profile(DeviceProfile::phone());
        assert!(phone.vibrate(10));
        assert_eq!(phone.vibrations(), vec![10]);
    }

    #[test]
    fn test_weak_host() {
        let host = Host::new();
        let weak = host.downgrade();
        assert!(weak.upgrade().is_some_and(|h| h.ptr_eq(&host)));
        drop(host);
        assert!(weak.upgrade().is_none());
    }
}
