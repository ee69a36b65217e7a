//! Focus indicators
//!
//! Elements opt in with the `touch-focus` class. The matching
//! `:focus-visible` rule lives in a single `<style>` element in `head`,
//! registered the first time any element opts in.

use tactus_dom::{Host, NodeId};

use crate::A11yError;

/// Class that opts an element into the focus indicator
pub const TOUCH_FOCUS_CLASS: &str = "touch-focus";

/// Marks the shared focus `<style>` element
const FOCUS_STYLE_MARKER: &str = "data-touch-focus-style";

/// Focus indicator style
#[derive(Debug, Clone, PartialEq)]
pub struct FocusIndicator {
    pub color: String,
    pub width: f64,
    pub offset: f64,
    pub radius: f64,
    /// Soft halo drawn outside the outline
    pub halo: String,
}

impl Default for FocusIndicator {
    fn default() -> Self {
        Self {
            color: "#3b82f6".to_string(),
            width: 2.0,
            offset: 2.0,
            radius: 4.0,
            halo: "0 0 0 4px rgba(59, 130, 246, 0.2)".to_string(),
        }
    }
}

impl FocusIndicator {
    /// CSS rule for `selector:focus-visible`
    pub fn css_rule(&self, selector: &str) -> String {
        format!(
            "{selector}:focus-visible {{ outline: {}px solid {}; outline-offset: {}px; border-radius: {}px; box-shadow: {}; }}",
            self.width, self.color, self.offset, self.radius, self.halo
        )
    }
}

/// Give `element` a visible focus ring for keyboard and switch users
pub fn add_accessible_focus(host: &Host, element: NodeId) -> Result<(), A11yError> {
    host.add_class(element, TOUCH_FOCUS_CLASS)?;
    ensure_focus_style(host)?;
    Ok(())
}

/// Register the shared rule unless the document already has it
fn ensure_focus_style(host: &Host) -> Result<NodeId, A11yError> {
    let head = host.head();
    if let Some(existing) = host
        .children(head)
        .into_iter()
        .find(|&node| host.has_attribute(node, FOCUS_STYLE_MARKER))
    {
        return Ok(existing);
    }

    let style = host.create_element("style");
    host.set_attribute(style, FOCUS_STYLE_MARKER, "")?;
    let rule = FocusIndicator::default().css_rule(&format!(".{TOUCH_FOCUS_CLASS}"));
    host.set_text_content(style, &rule)?;
    host.append_child(head, style)?;
    tracing::debug!("Registered focus indicator style");
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus_styles(host: &Host) -> Vec<NodeId> {
        host.children(host.head())
            .into_iter()
            .filter(|&n| host.has_attribute(n, FOCUS_STYLE_MARKER))
            .collect()
    }

    #[test]
    fn test_style_registered_once() {
        let host = Host::new();
        let a = host.create_element("button");
        let b = host.create_element("button");

        add_accessible_focus(&host, a).unwrap();
        add_accessible_focus(&host, b).unwrap();
        add_accessible_focus(&host, a).unwrap();

        assert!(host.has_class(a, TOUCH_FOCUS_CLASS));
        assert!(host.has_class(b, TOUCH_FOCUS_CLASS));
        assert_eq!(host.class_name(a).as_deref(), Some("touch-focus"));
        assert_eq!(focus_styles(&host).len(), 1);
    }

    #[test]
    fn test_rule_text() {
        let host = Host::new();
        let a = host.create_element("a");
        add_accessible_focus(&host, a).unwrap();

        let style = focus_styles(&host)[0];
        let css = host.text_content(style).unwrap();
        assert!(css.starts_with(".touch-focus:focus-visible"));
        assert!(css.contains("outline: 2px solid #3b82f6"));
        assert!(css.contains("outline-offset: 2px"));
        assert!(css.contains("border-radius: 4px"));
        assert!(css.contains("box-shadow: 0 0 0 4px rgba(59, 130, 246, 0.2)"));
    }
}
