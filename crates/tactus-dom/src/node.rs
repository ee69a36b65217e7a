//! DOM Node
//!
//! Element payload: attributes, class list, inline style, layout bounds,
//! scroll offset and registered event listeners.

use std::fmt;

use crate::events::{EventType, Listener, ListenerId, ListenerOptions};
use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (None if detached or root)
    pub parent: Option<NodeId>,
    /// Children in document order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Element(ElementData::new(tag)),
        }
    }

    /// Create a document node
    pub fn document() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: NodeData::Document,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Document => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            NodeData::Document => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
}

/// Axis-aligned layout box in client coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Inline style declarations, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    /// Set a property. An empty value removes it, like `style.prop = ''`.
    pub fn set(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.remove(property);
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_string(),
            None => self
                .declarations
                .push((property.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, property: &str) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|(p, _)| p != property);
        before != self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize as a `style` attribute value
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A listener registered on an element
pub(crate) struct RegisteredListener {
    pub id: ListenerId,
    pub event_type: EventType,
    pub options: ListenerOptions,
    pub callback: Listener,
}

impl fmt::Debug for RegisteredListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredListener")
            .field("id", &self.id)
            .field("event_type", &self.event_type)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Lower-cased tag name
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<(String, String)>,
    /// Class list
    pub classes: Vec<String>,
    /// Inline style
    pub style: InlineStyle,
    /// Text content
    pub text: String,
    /// Layout box
    pub bounds: Rect,
    /// Vertical scroll offset
    pub scroll_top: f64,
    pub(crate) listeners: Vec<RegisteredListener>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
            style: InlineStyle::default(),
            text: String::new(),
            bounds: Rect::default(),
            scroll_top: 0.0,
            listeners: Vec::new(),
        }
    }

    /// Get attribute value
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set attribute value, replacing any previous value
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(n, _)| n != name);
        before != self.attrs.len()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Space-separated class list
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub(crate) fn listener_count(&self, event_type: EventType) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.event_type == event_type)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_style_empty_value_removes() {
        let mut style = InlineStyle::default();
        style.set("transform", "scale(2)");
        style.set("opacity", "0.7");
        assert_eq!(style.get("transform"), Some("scale(2)"));

        style.set("transform", "");
        assert_eq!(style.get("transform"), None);
        assert_eq!(style.css_text(), "opacity: 0.7;");
    }

    #[test]
    fn test_attributes_replace_in_place() {
        let mut el = ElementData::new("DIV");
        assert_eq!(el.tag, "div");

        el.set_attribute("role", "button");
        el.set_attribute("tabindex", "0");
        el.set_attribute("role", "application");

        assert_eq!(el.attrs.len(), 2);
        assert_eq!(el.get_attribute("role"), Some("application"));
        assert!(el.remove_attribute("role"));
        assert!(!el.remove_attribute("role"));
    }

    #[test]
    fn test_class_list_dedup() {
        let mut el = ElementData::new("button");
        el.add_class("touch-focus");
        el.add_class("touch-focus");
        el.add_class("primary");
        assert_eq!(el.class_name(), "touch-focus primary");
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 44.0, 30.0);
        assert_eq!(r.right(), 54.0);
        assert_eq!(r.bottom(), 50.0);
    }
}
