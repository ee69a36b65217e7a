//! Haptic feedback

use serde::{Deserialize, Serialize};
use tactus_dom::{EventType, Host, ListenerId, ListenerOptions, NodeId};

use crate::A11yError;

/// Pulse strength
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticIntensity {
    #[default]
    Light,
    Medium,
    Heavy,
}

impl HapticIntensity {
    /// Pulse length in ms
    pub fn duration_ms(&self) -> u64 {
        match self {
            Self::Light => 10,
            Self::Medium => 20,
            Self::Heavy => 50,
        }
    }
}

/// Vibrate on every touch-start on `element`.
///
/// Devices without the Vibration API get nothing, silently.
pub fn add_haptic_feedback(
    host: &Host,
    element: NodeId,
    intensity: HapticIntensity,
) -> Result<ListenerId, A11yError> {
    let weak_host = host.downgrade();
    let id = host.add_event_listener(
        element,
        EventType::TouchStart,
        move |_| {
            let Some(host) = weak_host.upgrade() else {
                return;
            };
            if host.supports_vibration() {
                host.vibrate(intensity.duration_ms());
            }
        },
        ListenerOptions::passive(),
    )?;
    Ok(id)
}
