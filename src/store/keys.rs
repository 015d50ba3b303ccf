//! Stable preference keys
//!
//! Each key is owned by exactly one binding or group.

pub const THEME_MODE: &str = "pref_key_theme_mode";

pub const TOOLBAR_POSITION: &str = "pref_key_toolbar_position";

pub const TAB_TRAY_ALWAYS_TOP: &str = "pref_key_tab_tray_always_top";
pub const TAB_TRAY_ALWAYS_BOTTOM: &str = "pref_key_tab_tray_always_bottom";
pub const TAB_TRAY_SAME_DIRECTION: &str = "pref_key_tab_tray_same_direction";
pub const TAB_TRAY_OPPOSITE_DIRECTION: &str = "pref_key_tab_tray_opposite_direction";

pub const TAB_TRAY_NEW_TAB_FAB: &str = "pref_key_tab_tray_new_tab_fab";
pub const TAB_TRAY_NEW_TAB_BAR: &str = "pref_key_tab_tray_new_tab_bar";

pub const STRIP_URL: &str = "pref_key_strip_url";
pub const ENABLE_TOP_FRECENT_SITES: &str = "pref_key_enable_top_frecent_sites";

pub const ADDONS_CUSTOM_ACCOUNT: &str = "pref_key_addons_custom_account";
pub const ADDONS_CUSTOM_COLLECTION: &str = "pref_key_addons_custom_collection";
