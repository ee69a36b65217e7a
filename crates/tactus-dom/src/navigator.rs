//! Navigator
//!
//! Device capabilities and the Vibration API (`navigator.vibrate`).

use serde::{Deserialize, Serialize};

/// Capabilities of the device the host is emulating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub user_agent: String,
    pub max_touch_points: u32,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub screen_width: f64,
    pub screen_height: f64,
    /// Whether `navigator.vibrate` exists
    pub vibration: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::desktop()
    }
}

impl DeviceProfile {
    /// Mouse-only desktop browser
    pub fn desktop() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
            max_touch_points: 0,
            viewport_width: 1440.0,
            viewport_height: 900.0,
            screen_width: 1440.0,
            screen_height: 900.0,
            vibration: false,
        }
    }

    /// iPad Air in portrait. Safari exposes no vibration API.
    pub fn ipad_air() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
                .to_string(),
            max_touch_points: 5,
            viewport_width: 768.0,
            viewport_height: 1024.0,
            screen_width: 768.0,
            screen_height: 1024.0,
            vibration: false,
        }
    }

    /// Android phone
    pub fn phone() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36".to_string(),
            max_touch_points: 5,
            viewport_width: 412.0,
            viewport_height: 915.0,
            screen_width: 412.0,
            screen_height: 915.0,
            vibration: true,
        }
    }
}

/// Vibration controller
#[derive(Debug, Default)]
pub struct VibrationController {
    /// Is vibration supported
    pub supported: bool,
    /// Pulses played so far, in ms
    pulses: Vec<u64>,
}

impl VibrationController {
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            pulses: Vec::new(),
        }
    }

    /// Vibrate with a single duration
    pub fn vibrate(&mut self, duration_ms: u64) -> bool {
        if !self.supported {
            return false;
        }
        self.pulses.push(duration_ms);
        true
    }

    pub fn pulses(&self) -> &[u64] {
        &self.pulses
    }
}

/// `window.navigator`
#[derive(Debug)]
pub struct Navigator {
    pub profile: DeviceProfile,
    pub vibration: VibrationController,
}

impl Navigator {
    pub fn new(profile: DeviceProfile) -> Self {
        let vibration = VibrationController::new(profile.vibration);
        Self { profile, vibration }
    }
}
