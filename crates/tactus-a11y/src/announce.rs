//! Screen reader announcements
//!
//! Each announcement is its own visually hidden live region, appended to
//! `body` and removed once assistive technology has had time to read it.

use tactus_dom::{Host, NodeId};

use crate::aria::LiveRegionMode;
use crate::A11yError;

/// How long an announcement region stays in the document (ms)
pub const ANNOUNCEMENT_LIFETIME_MS: f64 = 1000.0;

/// Off-screen but still exposed to assistive technology
const VISUALLY_HIDDEN: [(&str, &str); 5] = [
    ("position", "absolute"),
    ("left", "-10000px"),
    ("width", "1px"),
    ("height", "1px"),
    ("overflow", "hidden"),
];

/// Politely announce `message`. Returns the temporary region.
pub fn announce_to_screen_reader(host: &Host, message: &str) -> Result<NodeId, A11yError> {
    announce_with(host, message, LiveRegionMode::Polite)
}

/// Announce `message` with the given politeness
pub fn announce_with(
    host: &Host,
    message: &str,
    politeness: LiveRegionMode,
) -> Result<NodeId, A11yError> {
    let region = host.create_element("div");
    host.set_attribute(region, "aria-live", politeness.as_str())?;
    host.set_attribute(region, "aria-atomic", "true")?;
    for (property, value) in VISUALLY_HIDDEN {
        host.set_style(region, property, value)?;
    }

    let body = host.body();
    host.append_child(body, region)?;
    host.set_text_content(region, message)?;

    let weak_host = host.downgrade();
    host.set_timeout(ANNOUNCEMENT_LIFETIME_MS, move || {
        let Some(host) = weak_host.upgrade() else {
            return;
        };
        // Someone else may have moved or removed it already
        if let Err(err) = host.remove_child(body, region) {
            tracing::trace!("Announcement region already gone: {}", err);
        }
    });

    tracing::debug!("Announced ({}): {}", politeness.as_str(), message);
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_lifecycle() {
        let host = Host::new();
        let region = announce_to_screen_reader(&host, "Saved").unwrap();

        assert!(host.is_connected(region));
        assert_eq!(host.text_content(region).as_deref(), Some("Saved"));
        assert_eq!(host.get_attribute(region, "aria-live").as_deref(), Some("polite"));
        assert_eq!(host.get_attribute(region, "aria-atomic").as_deref(), Some("true"));
        assert_eq!(host.style(region, "left").as_deref(), Some("-10000px"));
        assert_eq!(host.style(region, "overflow").as_deref(), Some("hidden"));

        host.advance(999.0);
        assert!(host.is_connected(region));
        host.advance(1.0);
        assert!(!host.is_connected(region));
    }

    #[test]
    fn test_announcements_are_independent() {
        let host = Host::new();
        let first = announce_to_screen_reader(&host, "One").unwrap();
        host.advance(500.0);
        let second = announce_with(&host, "Two", LiveRegionMode::Assertive).unwrap();

        assert_ne!(first, second);
        assert_eq!(host.get_attribute(second, "aria-live").as_deref(), Some("assertive"));
        host.advance(500.0);
        assert!(!host.is_connected(first));
        assert!(host.is_connected(second));
        host.advance(500.0);
        assert!(!host.is_connected(second));
    }

    #[test]
    fn test_region_removed_early_is_tolerated() {
        let host = Host::new();
        let region = announce_to_screen_reader(&host, "Gone").unwrap();
        host.remove(region);
        host.advance(ANNOUNCEMENT_LIFETIME_MS);
        assert_eq!(host.pending_timers(), 0);
    }
}
