//! Touch target sizing
//!
//! Checks interactive elements against minimum size and spacing guidelines
//! and enlarges the ones that fall short, using utility classes sized per
//! device type.

use serde::{Deserialize, Serialize};
use tactus_dom::{Host, NodeId, Rect};

use crate::aria::AriaRole;
use crate::A11yError;

const ENHANCED_MARKER: &str = "data-touch-enhanced";

/// Size and spacing guidelines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTargetConfig {
    /// Minimum target edge (px)
    pub min_size: f64,
    /// Minimum gap to the next interactive element (px)
    pub spacing: f64,
    /// Press feedback animation length (ms)
    pub feedback_duration: f64,
}

impl Default for TouchTargetConfig {
    fn default() -> Self {
        Self {
            min_size: 44.0,
            spacing: 8.0,
            feedback_duration: 150.0,
        }
    }
}

impl TouchTargetConfig {
    /// CSS custom properties and helper classes for these guidelines
    pub fn css_variables(&self) -> String {
        format!(
            ":root {{ --touch-target-min: {}px; --touch-spacing: {}px; --touch-feedback-duration: {}ms; }}\n\
             @media (max-width: 768px) {{ :root {{ --touch-target-min: 48px; --touch-spacing: 12px; }} }}\n\
             .touch-target {{ min-height: var(--touch-target-min); min-width: var(--touch-target-min); touch-action: manipulation; }}\n\
             .touch-feedback {{ transition: all var(--touch-feedback-duration) ease-out; }}\n\
             .touch-feedback:active {{ transform: scale(0.95); filter: brightness(1.1); }}",
            self.min_size, self.spacing, self.feedback_duration
        )
    }

    /// Check one element against the guidelines
    pub fn validate(&self, host: &Host, element: NodeId) -> Result<TouchTargetReport, A11yError> {
        let rect = host.with_element(element, |e| e.bounds)?;
        let mut report = TouchTargetReport::default();

        if rect.width < self.min_size {
            report.flag(
                format!("Width {}px is below minimum {}px", rect.width.round(), self.min_size),
                "Increase width to meet touch target guidelines",
            );
        }
        if rect.height < self.min_size {
            report.flag(
                format!("Height {}px is below minimum {}px", rect.height.round(), self.min_size),
                "Increase height to meet touch target guidelines",
            );
        }

        if !has_touch_manipulation(host, element) {
            report.flag(
                "Missing touch-action: manipulation for better touch response".to_string(),
                "Add touch-manipulation class or CSS property",
            );
        }

        let nearby = host
            .descendants(NodeId::ROOT)
            .into_iter()
            .filter(|&other| other != element && is_interactive(host, other))
            .filter_map(|other| host.bounds(other))
            .filter(|other| other.width > 0.0);
        for other in nearby {
            let gap = edge_gap(&rect, &other);
            if gap < self.spacing {
                report.flag(
                    format!("Too close to nearby interactive element ({}px)", gap.round()),
                    "Increase spacing between interactive elements",
                );
                // first offender only
                break;
            }
        }

        report.is_valid = report.issues.is_empty();
        Ok(report)
    }
}

/// Outcome of a touch target check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTargetReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Default for TouchTargetReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

impl TouchTargetReport {
    fn flag(&mut self, issue: String, recommendation: &str) {
        self.issues.push(issue);
        self.recommendations.push(recommendation.to_string());
    }
}

/// Check `element` against the default guidelines
pub fn validate_touch_target(host: &Host, element: NodeId) -> Result<TouchTargetReport, A11yError> {
    TouchTargetConfig::default().validate(host, element)
}

/// Device class derived from viewport and user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Tablet,
    Desktop,
}

pub fn is_touch_device(host: &Host) -> bool {
    host.device_profile().max_touch_points > 0
}

/// iPad by user agent (including desktop-mode Safari) or by screen size
pub fn is_ipad(host: &Host) -> bool {
    let profile = host.device_profile();
    let ua = profile.user_agent.to_lowercase();
    let ipad_ua = ua.contains("ipad") || (ua.contains("macintosh") && profile.max_touch_points > 1);

    let (w, h) = (profile.screen_width, profile.screen_height);
    let ipad_screen = (w == 768.0 && h == 1024.0) || (w == 1024.0 && h == 768.0);

    ipad_ua || ipad_screen
}

pub fn device_type(host: &Host) -> DeviceType {
    let width = host.device_profile().viewport_width;
    if width < 768.0 {
        DeviceType::Mobile
    } else if width < 1024.0 || is_ipad(host) {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    }
}

/// Target category, deciding size classes and press feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TouchTargetKind {
    Primary,
    Secondary,
    Icon,
    ListItem,
    Input,
}

impl TouchTargetKind {
    /// Classes applied on every device
    pub fn base_classes(&self) -> &'static str {
        match self {
            Self::Primary => "min-h-[48px] min-w-[120px] px-6 py-3 touch-manipulation",
            Self::Secondary => "min-h-[44px] min-w-[44px] p-3 touch-manipulation",
            Self::Icon => "min-h-[44px] min-w-[44px] p-2 touch-manipulation",
            Self::ListItem => "min-h-[44px] w-full p-3 touch-manipulation",
            Self::Input => "min-h-[44px] px-4 py-3 touch-manipulation",
        }
    }

    pub fn mobile_classes(&self) -> &'static str {
        match self {
            Self::Primary => "min-h-[52px] min-w-[140px] px-8 py-4",
            Self::Secondary => "min-h-[48px] min-w-[48px] p-4",
            Self::Icon => "min-h-[48px] min-w-[48px] p-3",
            Self::ListItem => "min-h-[52px] w-full p-4",
            Self::Input => "min-h-[52px] px-4 py-4",
        }
    }

    pub fn tablet_classes(&self) -> &'static str {
        match self {
            Self::Primary => "min-h-[44px] min-w-[120px] px-6 py-3",
            Self::Secondary => "min-h-[44px] min-w-[44px] p-3",
            Self::Icon => "min-h-[44px] min-w-[44px] p-2",
            Self::ListItem => "min-h-[48px] w-full p-3",
            Self::Input => "min-h-[48px] px-4 py-3",
        }
    }

    /// Press feedback animation, if the kind has one
    pub fn feedback_classes(&self) -> Option<&'static str> {
        match self {
            Self::Primary => {
                Some("active:scale-95 active:brightness-110 transition-all duration-150 ease-out")
            }
            Self::Secondary | Self::Icon => {
                Some("active:scale-95 transition-transform duration-150 ease-out")
            }
            Self::ListItem => Some("active:brightness-95 transition-all duration-150 ease-out"),
            Self::Input => None,
        }
    }

    /// Best-fitting kind for an existing element
    fn classify(host: &Host, element: NodeId) -> Self {
        let tag = host.tag_name(element).unwrap_or_default();
        let primary = host.has_class(element, "primary")
            || host.get_attribute(element, "data-primary").is_some_and(|v| !v.is_empty());

        if primary {
            Self::Primary
        } else if tag == "input" {
            Self::Input
        } else if AriaRole::of(host, element) == Some(AriaRole::ListItem)
            || host.closest(element, "li").is_some()
        {
            Self::ListItem
        } else if host.has_class(element, "icon") || contains_tag(host, element, "svg") {
            Self::Icon
        } else {
            Self::Secondary
        }
    }
}

/// Enlarge `element` for touch and make it reachable by keyboard
pub fn enhance_element_for_touch(
    host: &Host,
    element: NodeId,
    kind: TouchTargetKind,
) -> Result<(), A11yError> {
    host.add_class(element, kind.base_classes())?;
    match device_type(host) {
        DeviceType::Mobile => host.add_class(element, kind.mobile_classes())?,
        DeviceType::Tablet => host.add_class(element, kind.tablet_classes())?,
        DeviceType::Desktop => {}
    }
    if let Some(feedback) = kind.feedback_classes() {
        host.add_class(element, feedback)?;
    }

    host.set_style(element, "touch-action", "manipulation")?;

    let tag = host.tag_name(element)?;
    if !has_value(host, element, "role") && tag != "button" && tag != "a" {
        host.set_attribute(element, "role", AriaRole::Button.as_str())?;
    }
    if !has_value(host, element, "tabindex") {
        host.set_attribute(element, "tabindex", "0")?;
    }
    Ok(())
}

/// Enhance every undersized interactive element in the document.
///
/// Does nothing on devices without touch input. Each enhanced element is
/// tagged so later scans skip it. Returns how many were enhanced.
pub fn scan_and_enhance_touch_targets(host: &Host) -> Result<usize, A11yError> {
    if !is_touch_device(host) {
        return Ok(0);
    }
    tracing::debug!("Scanning for touch target improvements");

    let candidates: Vec<_> = host
        .descendants(NodeId::ROOT)
        .into_iter()
        .filter(|&node| is_scan_candidate(host, node) && !host.has_attribute(node, ENHANCED_MARKER))
        .collect();

    let config = TouchTargetConfig::default();
    let mut enhanced = 0;
    for element in candidates {
        let report = config.validate(host, element)?;
        if report.is_valid {
            continue;
        }
        let kind = TouchTargetKind::classify(host, element);
        enhance_element_for_touch(host, element, kind)?;
        host.set_attribute(element, ENHANCED_MARKER, "true")?;
        enhanced += 1;
        tracing::debug!("Enhanced {} as {:?}: {:?}", element, kind, report.issues);
    }

    if enhanced > 0 {
        tracing::info!("Enhanced {} touch targets", enhanced);
    }
    Ok(enhanced)
}

/// `button, a, [role=button], input[type=submit], input[type=button]`
fn is_scan_candidate(host: &Host, node: NodeId) -> bool {
    let Ok(tag) = host.tag_name(node) else {
        return false;
    };
    match tag.as_str() {
        "button" | "a" => true,
        "input" => matches!(
            host.get_attribute(node, "type").as_deref(),
            Some("submit" | "button")
        ),
        _ => host.get_attribute(node, "role").as_deref() == Some("button"),
    }
}

/// `button, a, input, [role=button], [tabindex]`
fn is_interactive(host: &Host, node: NodeId) -> bool {
    let Ok(tag) = host.tag_name(node) else {
        return false;
    };
    matches!(tag.as_str(), "button" | "a" | "input")
        || host.get_attribute(node, "role").as_deref() == Some("button")
        || host.has_attribute(node, "tabindex")
}

fn has_touch_manipulation(host: &Host, element: NodeId) -> bool {
    host.style(element, "touch-action")
        .is_some_and(|v| v.contains("manipulation"))
        || host.has_class(element, "touch-manipulation")
}

fn has_value(host: &Host, element: NodeId, name: &str) -> bool {
    host.get_attribute(element, name).is_some_and(|v| !v.is_empty())
}

fn contains_tag(host: &Host, element: NodeId, tag: &str) -> bool {
    host.descendants(element)
        .into_iter()
        .any(|n| host.tag_name(n).is_ok_and(|t| t == tag))
}

/// Smallest gap between facing edges of two boxes
fn edge_gap(a: &Rect, b: &Rect) -> f64 {
    [
        (a.left() - b.right()).abs(),
        (a.right() - b.left()).abs(),
        (a.top() - b.bottom()).abs(),
        (a.bottom() - b.top()).abs(),
    ]
    .into_iter()
    .fold(f64::INFINITY, f64::min)
}
