//! Voice control
//!
//! Labels elements so voice-control software can address them by name.

use tactus_dom::{Host, NodeId};

use crate::aria::AriaRole;
use crate::A11yError;

const VOICE_COMMAND_ATTR: &str = "data-voice-command";

/// Give `element` an accessible name and a spoken command.
///
/// Sets `aria-label`, a `role` (`button` for `<button>`, otherwise
/// `application`), the lower-cased command, and makes the element focusable
/// unless it already declares a `tabindex`.
pub fn enhance_for_voice_control(host: &Host, element: NodeId, label: &str) -> Result<(), A11yError> {
    if label.trim().is_empty() {
        return Err(A11yError::EmptyLabel);
    }

    let role = if host.tag_name(element)? == "button" {
        AriaRole::Button
    } else {
        AriaRole::Application
    };

    host.set_attribute(element, "aria-label", label)?;
    host.set_attribute(element, "role", role.as_str())?;
    host.set_attribute(element, VOICE_COMMAND_ATTR, &label.to_lowercase())?;
    if !host.has_attribute(element, "tabindex") {
        host.set_attribute(element, "tabindex", "0")?;
    }

    tracing::debug!("Voice command \"{}\" bound to {}", label.to_lowercase(), element);
    Ok(())
}

/// First connected element, in document order, whose voice command matches `phrase`
pub fn find_by_voice_command(host: &Host, phrase: &str) -> Option<NodeId> {
    let wanted = phrase.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    host.descendants(NodeId::ROOT)
        .into_iter()
        .find(|&node| host.get_attribute(node, VOICE_COMMAND_ATTR).as_deref() == Some(wanted.as_str()))
}
