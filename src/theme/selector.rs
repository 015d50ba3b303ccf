//! Theme radio group

use super::{preferred_color_scheme, AppearanceMode, AppearancePlatform};
use crate::binding::{ExclusiveGroup, OptionBinding, Selection};
use crate::config::Capabilities;
use crate::controller::Components;
use crate::error::{Error, Result};
use crate::store::{keys, SettingsStore};
use crate::telemetry::{self, Event, Source};

/// Exclusive group of appearance modes with global side effects
#[derive(Debug)]
pub struct ThemeSelector {
    group: ExclusiveGroup<AppearanceMode>,
}

impl ThemeSelector {
    /// Build the group. The third slot is fixed here for the life of the
    /// selector: follow-system when supported, auto-battery otherwise.
    pub fn new(capabilities: &Capabilities) -> Self {
        let system_slot = if capabilities.follow_system_supported {
            AppearanceMode::FollowSystem
        } else {
            AppearanceMode::AutoBattery
        };

        Self {
            group: ExclusiveGroup::new(
                "theme",
                vec![
                    OptionBinding::choice(AppearanceMode::Light, keys::THEME_MODE),
                    OptionBinding::choice(AppearanceMode::Dark, keys::THEME_MODE),
                    OptionBinding::choice(system_slot, keys::THEME_MODE),
                ],
            ),
        }
    }

    /// Modes offered by this selector, in display order
    pub fn modes(&self) -> Vec<AppearanceMode> {
        self.group.members().map(|(mode, _)| mode).collect()
    }

    /// Currently selected mode
    pub fn selected(&self) -> Option<AppearanceMode> {
        self.group.selected()
    }

    /// Underlying exclusive group
    pub fn group(&self) -> &ExclusiveGroup<AppearanceMode> {
        &self.group
    }

    /// Load the stored theme, falling back to the platform's current mode
    pub fn initialize(&mut self, store: &dyn SettingsStore, appearance: &dyn AppearancePlatform) {
        self.group.initialize(store);
        if self.group.selected().is_none() {
            self.group.assume_selected(appearance.current_mode());
        }
    }

    /// Switch the global appearance to `mode`
    ///
    /// When the platform already runs in `mode` only the group is brought in
    /// line with it: no surface recreation, reload or telemetry. A platform
    /// failure aborts before any write; a store failure restores the previous
    /// platform mode.
    pub fn select(
        &mut self,
        mode: AppearanceMode,
        components: &mut Components,
    ) -> Result<Selection<AppearanceMode>> {
        if !self.group.contains(mode) {
            log::error!("{:?} is not offered by the theme selector", mode);
            return Err(Error::NotAMember {
                group: self.group.name().to_string(),
                option: format!("{:?}", mode),
            });
        }

        let current = components.appearance.current_mode();
        if current == mode {
            log::debug!("Appearance already {:?}", mode);
            // The stored theme may lag the platform after a restart
            return self.group.select(
                mode,
                &mut *components.store,
                &mut *components.telemetry,
            );
        }

        components.appearance.set_mode(mode)?;

        if let Err(e) = self.group.select(
            mode,
            &mut *components.store,
            &mut *components.telemetry,
        ) {
            if let Err(restore) = components.appearance.set_mode(current) {
                log::warn!("Failed to restore appearance {:?}: {}", current, restore);
            }
            return Err(e);
        }

        components.surface.recreate();
        let scheme = preferred_color_scheme(&*components.appearance);
        components.engine.set_preferred_color_scheme(scheme);
        components.engine.reload();

        if mode == AppearanceMode::Dark {
            telemetry::track(
                &mut *components.telemetry,
                Event::DarkThemeSelected {
                    source: Source::Settings,
                },
            );
        }

        log::info!("Appearance changed from {:?} to {:?}", current, mode);
        Ok(Selection::Changed {
            previous: Some(current),
        })
    }
}
