//! Recognized customization options
//!
//! Defines the option enums and the snapshot of committed values that the UI
//! renders.

use serde::{Deserialize, Serialize};

use crate::store::StoreEnum;
use crate::theme::AppearanceMode;

/// Where the browser toolbar is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarPosition {
    Top,
    Bottom,
}

impl StoreEnum for ToolbarPosition {
    fn tag(self) -> &'static str {
        match self {
            ToolbarPosition::Top => "top",
            ToolbarPosition::Bottom => "bottom",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "top" => Some(ToolbarPosition::Top),
            "bottom" => Some(ToolbarPosition::Bottom),
            _ => None,
        }
    }
}

/// Ordering of tabs in the tab tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TabTrayLayout {
    /// Newest tabs always at the top
    AlwaysTop,
    /// Newest tabs always at the bottom
    AlwaysBottom,
    /// Follow the toolbar position
    SameDirection,
    /// Opposite of the toolbar position
    OppositeDirection,
}

/// Control used to open a new tab from the tab tray
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NewTabControl {
    /// Floating action button
    Fab,
    /// Bottom bar
    Bar,
}

/// Committed values of the customization surface
///
/// `None` means the group has no selection (inconsistent storage) or the
/// binding is hidden by a capability flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomizationSettings {
    pub theme: Option<AppearanceMode>,
    pub toolbar_position: Option<ToolbarPosition>,
    pub tab_tray_layout: Option<TabTrayLayout>,
    pub new_tab_control: Option<NewTabControl>,
    pub strip_url: bool,
    pub show_top_frecent_sites: Option<bool>,
    pub custom_addons_account: String,
    pub custom_addons_collection: String,
}

impl CustomizationSettings {
    /// Serialize for the host UI
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
