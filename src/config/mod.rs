//! Configuration module
//!
//! The recognized option set, its committed snapshot, and the capability
//! flags that decide which bindings a surface exposes.

pub mod capabilities;
pub mod settings;

pub use capabilities::Capabilities;
pub use settings::{CustomizationSettings, NewTabControl, TabTrayLayout, ToolbarPosition};
