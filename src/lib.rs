//! Customize Core - settings binding for the browser customization screen
//!
//! This library keeps persisted settings and the controls of a customization
//! surface in sync. Controls are organized into exclusive groups ("choose one
//! of N"), and changing a selection triggers the side effects attached to it.
//!
//! ## Appearance
//!
//! The `theme` module switches the process-wide appearance mode, recreates
//! the active surface, and refreshes the rendering engine's color scheme.
//!
//! Rendering, storage internals and platform lifecycle belong to the host;
//! it hands them in as [`controller::Components`].

pub mod binding;
pub mod config;
pub mod controller;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod theme;

#[cfg(test)]
pub(crate) mod testing;

pub use binding::{ExclusiveGroup, OptionBinding, Selection};
pub use config::{Capabilities, CustomizationSettings};
pub use controller::{Applied, ChangeRequest, Components, CustomizationController};
pub use error::{Error, Result};
pub use store::{MemoryStore, PersistenceError, SettingsStore};
pub use theme::{AppearanceMode, ThemeSelector};

/// Install the platform logger
///
/// Call once when the host starts. Only Android needs this; elsewhere the
/// host installs its own `log` backend.
pub fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("Customize"),
    );

    log::debug!("Customize core logging initialized");
}
