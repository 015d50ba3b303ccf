//! Capability flags supplied by the host
//!
//! Queried once when a controller is constructed; changing them afterwards
//! has no effect on an existing surface.

use serde::{Deserialize, Serialize};

/// First platform API level with a system-wide dark mode (Android P)
pub const FOLLOW_SYSTEM_MIN_SDK: u32 = 28;

/// Host capabilities and feature flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Capabilities {
    /// Platform can follow the system appearance; otherwise the auto-battery
    /// mode takes that slot in the theme group
    pub follow_system_supported: bool,
    /// Show the home category with the top frecent sites switch
    pub top_frecent_sites: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            follow_system_supported: true,
            top_frecent_sites: false,
        }
    }
}

impl Capabilities {
    /// Capabilities of a platform without system dark mode
    pub fn legacy() -> Self {
        Self {
            follow_system_supported: false,
            ..Default::default()
        }
    }

    /// Derive capabilities from the platform API level
    pub fn from_sdk_level(sdk_level: u32) -> Self {
        Self {
            follow_system_supported: sdk_level >= FOLLOW_SYSTEM_MIN_SDK,
            ..Default::default()
        }
    }

    /// Enable or disable the top frecent sites feature
    pub fn with_top_frecent_sites(mut self, enabled: bool) -> Self {
        self.top_frecent_sites = enabled;
        self
    }

    /// Parse capabilities from host JSON, falling back to defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(capabilities) => capabilities,
            Err(e) => {
                log::error!("Failed to parse capabilities: {}", e);
                Self::default()
            }
        }
    }
}
