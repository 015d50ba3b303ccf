//! Appearance selection
//!
//! The theme group is a specialized exclusive group: besides persisting the
//! choice it commits the process-wide appearance mode, recreates the UI
//! surface, and refreshes the rendering engine.

pub mod appearance;
pub mod selector;

use serde::{Deserialize, Serialize};

use crate::store::StoreEnum;

pub use appearance::ProcessAppearance;
pub use selector::ThemeSelector;

/// Global appearance (night) mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppearanceMode {
    Light,
    Dark,
    /// Track the system-wide dark mode setting
    FollowSystem,
    /// Go dark while battery saver is on
    AutoBattery,
}

impl AppearanceMode {
    /// Platform night-mode constant for this mode
    pub fn night_mode(self) -> i32 {
        match self {
            AppearanceMode::FollowSystem => -1,
            AppearanceMode::Light => 1,
            AppearanceMode::Dark => 2,
            AppearanceMode::AutoBattery => 3,
        }
    }

    pub fn from_night_mode(mode: i32) -> Option<Self> {
        match mode {
            -1 => Some(AppearanceMode::FollowSystem),
            1 => Some(AppearanceMode::Light),
            2 => Some(AppearanceMode::Dark),
            3 => Some(AppearanceMode::AutoBattery),
            _ => None,
        }
    }
}

impl StoreEnum for AppearanceMode {
    fn tag(self) -> &'static str {
        match self {
            AppearanceMode::Light => "light",
            AppearanceMode::Dark => "dark",
            AppearanceMode::FollowSystem => "follow_system",
            AppearanceMode::AutoBattery => "auto_battery",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "light" => Some(AppearanceMode::Light),
            "dark" => Some(AppearanceMode::Dark),
            "follow_system" => Some(AppearanceMode::FollowSystem),
            "auto_battery" => Some(AppearanceMode::AutoBattery),
            _ => None,
        }
    }
}

/// Color scheme requested from the rendering engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferredColorScheme {
    Light,
    Dark,
}

/// The platform refused an appearance change
#[derive(Debug, thiserror::Error)]
#[error("Failed to apply appearance mode: {0}")]
pub struct AppearanceError(pub String);

/// Process-wide appearance state owned by the platform
pub trait AppearancePlatform {
    fn current_mode(&self) -> AppearanceMode;

    fn set_mode(&mut self, mode: AppearanceMode) -> Result<(), AppearanceError>;

    /// Whether the system is currently rendering dark
    fn system_is_dark(&self) -> bool;
}

/// The active UI surface
pub trait SurfaceHost {
    /// Request recreation so the new appearance is picked up
    fn recreate(&mut self);
}

/// Rendering engine configuration
pub trait RenderingEngine {
    fn set_preferred_color_scheme(&mut self, scheme: PreferredColorScheme);

    /// Reload the currently displayed content
    fn reload(&mut self);
}

/// Color scheme implied by the platform's committed appearance
pub fn preferred_color_scheme(appearance: &dyn AppearancePlatform) -> PreferredColorScheme {
    match appearance.current_mode() {
        AppearanceMode::Dark => PreferredColorScheme::Dark,
        AppearanceMode::Light => PreferredColorScheme::Light,
        AppearanceMode::FollowSystem | AppearanceMode::AutoBattery => {
            if appearance.system_is_dark() {
                PreferredColorScheme::Dark
            } else {
                PreferredColorScheme::Light
            }
        }
    }
}
