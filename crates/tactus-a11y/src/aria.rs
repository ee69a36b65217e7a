//! ARIA Support
//!
//! The roles and live-region modes the touch helpers read and write.

use serde::{Deserialize, Serialize};
use tactus_dom::{Host, NodeId};

/// ARIA role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AriaRole {
    Button,
    ListItem,
    Application,
}

impl AriaRole {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.trim().to_ascii_lowercase().as_str() {
            "button" => Self::Button,
            "listitem" => Self::ListItem,
            "application" => Self::Application,
            _ => return None,
        })
    }

    /// Attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::ListItem => "listitem",
            Self::Application => "application",
        }
    }

    /// Explicit role of an element, if it carries a known one
    pub fn of(host: &Host, node: NodeId) -> Option<Self> {
        host.get_attribute(node, "role")
            .as_deref()
            .and_then(Self::parse)
    }
}

/// Live region politeness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveRegionMode {
    #[default]
    Polite,
    Assertive,
}

impl LiveRegionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(AriaRole::parse("button"), Some(AriaRole::Button));
        assert_eq!(AriaRole::parse(" ListItem "), Some(AriaRole::ListItem));
        assert_eq!(AriaRole::parse("application"), Some(AriaRole::Application));
        assert_eq!(AriaRole::parse("presentation"), None);
    }

    #[test]
    fn test_role_of_element() {
        let host = Host::new();
        let div = host.create_element("div");
        assert_eq!(AriaRole::of(&host, div), None);
        host.set_attribute(div, "role", AriaRole::Button.as_str()).unwrap();
        assert_eq!(AriaRole::of(&host, div), Some(AriaRole::Button));
    }

    #[test]
    fn test_live_region_mode() {
        assert_eq!(LiveRegionMode::default(), LiveRegionMode::Polite);
        assert_eq!(LiveRegionMode::Polite.as_str(), "polite");
        assert_eq!(LiveRegionMode::Assertive.as_str(), "assertive");
        assert_eq!(serde_json::to_string(&LiveRegionMode::Assertive).unwrap(), "\"assertive\"");
    }
}
