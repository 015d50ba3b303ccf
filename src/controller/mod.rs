//! Customization surface controller
//!
//! Owns every group and binding shown on the customization screen and routes
//! change requests from the UI layer to them.

use serde::{Deserialize, Serialize};

use crate::binding::{ExclusiveGroup, OptionBinding, Selection, SwitchBinding, TextBinding};
use crate::config::{
    Capabilities, CustomizationSettings, NewTabControl, TabTrayLayout, ToolbarPosition,
};
use crate::error::{Error, Result};
use crate::store::{keys, SettingsStore};
use crate::telemetry::{self, Event, TelemetrySink};
use crate::theme::{AppearanceMode, AppearancePlatform, RenderingEngine, SurfaceHost, ThemeSelector};

/// External collaborators used by the engine
pub struct Components {
    pub store: Box<dyn SettingsStore>,
    pub appearance: Box<dyn AppearancePlatform>,
    pub surface: Box<dyn SurfaceHost>,
    pub engine: Box<dyn RenderingEngine>,
    pub telemetry: Box<dyn TelemetrySink>,
}

impl Components {
    /// Box each collaborator
    pub fn new(
        store: impl SettingsStore + 'static,
        appearance: impl AppearancePlatform + 'static,
        surface: impl SurfaceHost + 'static,
        engine: impl RenderingEngine + 'static,
        telemetry: impl TelemetrySink + 'static,
    ) -> Self {
        Self {
            store: Box::new(store),
            appearance: Box::new(appearance),
            surface: Box::new(surface),
            engine: Box::new(engine),
            telemetry: Box::new(telemetry),
        }
    }
}

/// Sections of the customization screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Theme,
    Toolbar,
    Home,
    AddonsCustomization,
    TabTrayDirection,
    TabTrayNewTab,
    StripUrl,
}

/// A user-initiated change, as sent by the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "option", content = "value", rename_all = "camelCase")]
pub enum ChangeRequest {
    Theme(AppearanceMode),
    ToolbarPosition(ToolbarPosition),
    TabTrayLayout(TabTrayLayout),
    NewTabControl(NewTabControl),
    StripUrl(bool),
    ShowTopFrecentSites(bool),
    CustomAddonsAccount(String),
    CustomAddonsCollection(String),
}

impl ChangeRequest {
    /// Section of the screen this request targets
    pub fn category(&self) -> Category {
        match self {
            ChangeRequest::Theme(_) => Category::Theme,
            ChangeRequest::ToolbarPosition(_) => Category::Toolbar,
            ChangeRequest::TabTrayLayout(_) => Category::TabTrayDirection,
            ChangeRequest::NewTabControl(_) => Category::TabTrayNewTab,
            ChangeRequest::StripUrl(_) => Category::StripUrl,
            ChangeRequest::ShowTopFrecentSites(_) => Category::Home,
            ChangeRequest::CustomAddonsAccount(_) | ChangeRequest::CustomAddonsCollection(_) => {
                Category::AddonsCustomization
            }
        }
    }
}

/// Result of applying a change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A new value was committed and its side effects ran
    Changed,
    /// The value was already committed
    Unchanged,
}

impl<T> From<Selection<T>> for Applied {
    fn from(selection: Selection<T>) -> Self {
        if selection.is_changed() {
            Applied::Changed
        } else {
            Applied::Unchanged
        }
    }
}

/// All groups and bindings of one customization surface
#[derive(Debug)]
pub struct CustomizationController {
    capabilities: Capabilities,
    theme: ThemeSelector,
    toolbar: ExclusiveGroup<ToolbarPosition>,
    tab_tray: ExclusiveGroup<TabTrayLayout>,
    new_tab: ExclusiveGroup<NewTabControl>,
    strip_url: SwitchBinding,
    show_top_frecent_sites: SwitchBinding,
    custom_addons_account: TextBinding,
    custom_addons_collection: TextBinding,
    ready: bool,
}

impl CustomizationController {
    /// Build every group for the given capabilities
    pub fn new(capabilities: Capabilities) -> Self {
        let toolbar_option = |position: ToolbarPosition| {
            OptionBinding::choice(position, keys::TOOLBAR_POSITION).with_listener(
                |position: &ToolbarPosition, sink: &mut dyn TelemetrySink| {
                    telemetry::track(
                        sink,
                        Event::ToolbarPositionChanged {
                            position: *position,
                        },
                    )
                },
            )
        };

        Self {
            capabilities,
            theme: ThemeSelector::new(&capabilities),
            toolbar: ExclusiveGroup::new(
                "toolbar",
                vec![
                    toolbar_option(ToolbarPosition::Top),
                    toolbar_option(ToolbarPosition::Bottom),
                ],
            ),
            tab_tray: ExclusiveGroup::new(
                "tab_tray",
                vec![
                    OptionBinding::flag(
                        TabTrayLayout::SameDirection,
                        keys::TAB_TRAY_SAME_DIRECTION,
                    ),
                    OptionBinding::flag(
                        TabTrayLayout::OppositeDirection,
                        keys::TAB_TRAY_OPPOSITE_DIRECTION,
                    ),
                    OptionBinding::flag(TabTrayLayout::AlwaysTop, keys::TAB_TRAY_ALWAYS_TOP),
                    OptionBinding::flag(TabTrayLayout::AlwaysBottom, keys::TAB_TRAY_ALWAYS_BOTTOM),
                ],
            ),
            new_tab: ExclusiveGroup::new(
                "new_tab",
                vec![
                    OptionBinding::flag(NewTabControl::Fab, keys::TAB_TRAY_NEW_TAB_FAB),
                    OptionBinding::flag(NewTabControl::Bar, keys::TAB_TRAY_NEW_TAB_BAR),
                ],
            ),
            strip_url: SwitchBinding::new(keys::STRIP_URL),
            show_top_frecent_sites: SwitchBinding::new(keys::ENABLE_TOP_FRECENT_SITES)
                .with_visibility(capabilities.top_frecent_sites),
            custom_addons_account: TextBinding::new(keys::ADDONS_CUSTOM_ACCOUNT),
            custom_addons_collection: TextBinding::new(keys::ADDONS_CUSTOM_COLLECTION),
            ready: false,
        }
    }

    /// Capabilities the groups were built for
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Whether `initialize_all` has run
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Whether the host should show `category`
    pub fn is_visible(&self, category: Category) -> bool {
        match category {
            Category::Home => self.capabilities.top_frecent_sites,
            _ => true,
        }
    }

    pub fn theme(&self) -> &ThemeSelector {
        &self.theme
    }

    pub fn toolbar(&self) -> &ExclusiveGroup<ToolbarPosition> {
        &self.toolbar
    }

    pub fn tab_tray(&self) -> &ExclusiveGroup<TabTrayLayout> {
        &self.tab_tray
    }

    pub fn new_tab(&self) -> &ExclusiveGroup<NewTabControl> {
        &self.new_tab
    }

    /// Load every visible binding from storage
    ///
    /// Called on each surface activation. Fires no side effects.
    pub fn initialize_all(&mut self, components: &Components) {
        let store = &*components.store;

        self.theme.initialize(store, &*components.appearance);
        self.toolbar.initialize(store);
        self.tab_tray.initialize(store);
        self.new_tab.initialize(store);
        self.strip_url.initialize(store);
        self.show_top_frecent_sites.initialize(store);
        self.custom_addons_account.initialize(store);
        self.custom_addons_collection.initialize(store);

        self.ready = true;
        log::debug!("Customization surface ready: {:?}", self.snapshot());
    }

    /// Apply one change request from the UI layer
    pub fn apply(
        &mut self,
        request: ChangeRequest,
        components: &mut Components,
    ) -> Result<Applied> {
        if !self.ready {
            log::error!("{:?} applied before initialization", request);
            return Err(Error::NotReady);
        }

        let applied: Applied = match request {
            ChangeRequest::Theme(mode) => self.theme.select(mode, components)?.into(),
            ChangeRequest::ToolbarPosition(position) => self
                .toolbar
                .select(position, &mut *components.store, &mut *components.telemetry)?
                .into(),
            ChangeRequest::TabTrayLayout(layout) => self
                .tab_tray
                .select(layout, &mut *components.store, &mut *components.telemetry)?
                .into(),
            ChangeRequest::NewTabControl(control) => self
                .new_tab
                .select(control, &mut *components.store, &mut *components.telemetry)?
                .into(),
            ChangeRequest::StripUrl(enabled) => {
                self.strip_url.set(enabled, &mut *components.store)?.into()
            }
            ChangeRequest::ShowTopFrecentSites(enabled) => {
                self.show_top_frecent_sites.set(enabled, &mut *components.store)?.into()
            }
            ChangeRequest::CustomAddonsAccount(account) => {
                self.custom_addons_account.set(&account, &mut *components.store)?.into()
            }
            ChangeRequest::CustomAddonsCollection(collection) => {
                self.custom_addons_collection.set(&collection, &mut *components.store)?.into()
            }
        };
        Ok(applied)
    }

    /// Parse and apply a serialized [`ChangeRequest`]
    pub fn apply_json(&mut self, json: &str, components: &mut Components) -> Result<Applied> {
        let request: ChangeRequest = serde_json::from_str(json)?;
        self.apply(request, components)
    }

    /// Currently committed values
    pub fn snapshot(&self) -> CustomizationSettings {
        CustomizationSettings {
            theme: self.theme.selected(),
            toolbar_position: self.toolbar.selected(),
            tab_tray_layout: self.tab_tray.selected(),
            new_tab_control: self.new_tab.selected(),
            strip_url: self.strip_url.is_checked(),
            show_top_frecent_sites: self
                .show_top_frecent_sites
                .is_visible()
                .then(|| self.show_top_frecent_sites.is_checked()),
            custom_addons_account: self.custom_addons_account.text().to_string(),
            custom_addons_collection: self.custom_addons_collection.text().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::telemetry::Source;
    use crate::testing::Harness;

    fn ready(
        capabilities: Capabilities,
        harness: &Harness,
    ) -> (CustomizationController, Components) {
        let components = harness.components();
        let mut controller = CustomizationController::new(capabilities);
        controller.initialize_all(&components);
        (controller, components)
    }

    #[test]
    fn test_initialize_all_reads_every_binding() {
        let store = MemoryStore::new()
            .with_string(keys::THEME_MODE, "dark")
            .with_string(keys::TOOLBAR_POSITION, "bottom")
            .with_bool(keys::TAB_TRAY_SAME_DIRECTION, true)
            .with_bool(keys::TAB_TRAY_NEW_TAB_BAR, true)
            .with_bool(keys::STRIP_URL, true)
            .with_string(keys::ADDONS_CUSTOM_ACCOUNT, "16201230")
            .with_string(keys::ADDONS_CUSTOM_COLLECTION, "What-I-want-on-Fenix");
        let harness = Harness::with_store(AppearanceMode::Light, store);
        let (controller, _components) = ready(Capabilities::default(), &harness);

        assert!(controller.is_ready());
        assert_eq!(
            controller.snapshot(),
            CustomizationSettings {
                theme: Some(AppearanceMode::Dark),
                toolbar_position: Some(ToolbarPosition::Bottom),
                tab_tray_layout: Some(TabTrayLayout::SameDirection),
                new_tab_control: Some(NewTabControl::Bar),
                strip_url: true,
                show_top_frecent_sites: None,
                custom_addons_account: "16201230".to_string(),
                custom_addons_collection: "What-I-want-on-Fenix".to_string(),
            }
        );

        assert_eq!(harness.store.writes(), 0);
        assert_eq!(harness.appearance.set_calls(), 0);
        assert_eq!(harness.surface.recreated(), 0);
        assert_eq!(harness.engine.reloads(), 0);
        assert!(harness.telemetry.events().is_empty());
    }

    #[test]
    fn test_apply_before_initialize() {
        let harness = Harness::new(AppearanceMode::Light);
        let mut components = harness.components();
        let mut controller = CustomizationController::new(Capabilities::default());

        let err = controller
            .apply(ChangeRequest::StripUrl(true), &mut components)
            .unwrap_err();
        assert!(matches!(err, Error::NotReady));
        assert_eq!(harness.store.writes(), 0);
    }

    #[test]
    fn test_hidden_binding_is_not_available() {
        let harness = Harness::new(AppearanceMode::Light);
        let (mut controller, mut components) = ready(Capabilities::default(), &harness);

        assert!(!controller.is_visible(Category::Home));
        let err = controller
            .apply(ChangeRequest::ShowTopFrecentSites(true), &mut components)
            .unwrap_err();
        assert!(matches!(err, Error::NotAvailable { .. }));
        assert!(!harness.store.contains(keys::ENABLE_TOP_FRECENT_SITES));
        assert_eq!(harness.store.writes(), 0);
        assert_eq!(controller.snapshot().show_top_frecent_sites, None);
    }

    #[test]
    fn test_hidden_binding_is_not_initialized() {
        let store = MemoryStore::new().with_bool(keys::ENABLE_TOP_FRECENT_SITES, true);
        let harness = Harness::with_store(AppearanceMode::Light, store);
        let (controller, _components) = ready(Capabilities::default(), &harness);
        assert_eq!(controller.snapshot().show_top_frecent_sites, None);
    }

    #[test]
    fn test_visible_home_category() {
        let harness = Harness::new(AppearanceMode::Light);
        let capabilities = Capabilities::default().with_top_frecent_sites(true);
        let (mut controller, mut components) = ready(capabilities, &harness);

        assert!(controller.is_visible(Category::Home));
        let applied = controller
            .apply(ChangeRequest::ShowTopFrecentSites(true), &mut components)
            .unwrap();
        assert_eq!(applied, Applied::Changed);
        assert!(harness.store.get_bool(keys::ENABLE_TOP_FRECENT_SITES));
        assert_eq!(controller.snapshot().show_top_frecent_sites, Some(true));
    }

    #[test]
    fn test_toolbar_change_emits_telemetry_once() {
        let store = MemoryStore::new().with_string(keys::TOOLBAR_POSITION, "top");
        let harness = Harness::with_store(AppearanceMode::Light, store);
        let (mut controller, mut components) = ready(Capabilities::default(), &harness);

        for _ in 0..2 {
            controller
                .apply(
                    ChangeRequest::ToolbarPosition(ToolbarPosition::Bottom),
                    &mut components,
                )
                .unwrap();
        }
        assert_eq!(
            harness.telemetry.events(),
            vec![Event::ToolbarPositionChanged {
                position: ToolbarPosition::Bottom
            }]
        );
        assert_eq!(controller.toolbar().selected(), Some(ToolbarPosition::Bottom));
        assert_eq!(harness.store.writes(), 1);
    }

    #[test]
    fn test_end_to_end_without_follow_system() {
        let harness = Harness::new(AppearanceMode::Light);
        let (mut controller, mut components) = ready(Capabilities::legacy(), &harness);

        let applied = controller
            .apply(
                ChangeRequest::Theme(AppearanceMode::AutoBattery),
                &mut components,
            )
            .unwrap();
        assert_eq!(applied, Applied::Changed);
        assert_eq!(harness.appearance.mode(), AppearanceMode::AutoBattery);
        assert_eq!(harness.engine.schemes().len(), 1);
        assert_eq!(harness.engine.reloads(), 1);
        assert!(harness.telemetry.events().is_empty());

        controller
            .apply(ChangeRequest::Theme(AppearanceMode::Dark), &mut components)
            .unwrap();
        assert_eq!(
            harness.telemetry.events(),
            vec![Event::DarkThemeSelected {
                source: Source::Settings
            }]
        );
        assert_eq!(harness.appearance.mode(), AppearanceMode::Dark);
        assert_eq!(controller.snapshot().theme, Some(AppearanceMode::Dark));

        let err = controller
            .apply(
                ChangeRequest::Theme(AppearanceMode::FollowSystem),
                &mut components,
            )
            .unwrap_err();
        assert!(matches!(err, Error::NotAMember { .. }));
    }

    #[test]
    fn test_telemetry_failure_does_not_fail_selection() {
        let harness = Harness::new(AppearanceMode::Light);
        harness.telemetry.set_failing(true);
        let (mut controller, mut components) = ready(Capabilities::default(), &harness);

        let applied = controller
            .apply(ChangeRequest::Theme(AppearanceMode::Dark), &mut components)
            .unwrap();
        assert_eq!(applied, Applied::Changed);
        assert_eq!(harness.appearance.mode(), AppearanceMode::Dark);
    }

    #[test]
    fn test_persistence_failure_keeps_last_committed() {
        let store = MemoryStore::new().with_bool(keys::TAB_TRAY_NEW_TAB_FAB, true);
        let harness = Harness::with_store(AppearanceMode::Light, store);
        let (mut controller, mut components) = ready(Capabilities::default(), &harness);
        harness.store.set_fail_all(true);

        let err = controller
            .apply(ChangeRequest::NewTabControl(NewTabControl::Bar), &mut components)
            .unwrap_err();
        assert!(matches!(err, Error::Persistence(_)));
        assert_eq!(controller.snapshot().new_tab_control, Some(NewTabControl::Fab));

        assert!(controller
            .apply(ChangeRequest::StripUrl(true), &mut components)
            .is_err());
        assert!(!controller.snapshot().strip_url);
    }

    #[test]
    fn test_corrupt_new_tab_state_resolves_to_first() {
        let store = MemoryStore::new()
            .with_bool(keys::TAB_TRAY_NEW_TAB_BAR, true)
            .with_bool(keys::TAB_TRAY_NEW_TAB_FAB, true);
        let harness = Harness::with_store(AppearanceMode::Light, store);
        let (controller, _components) = ready(Capabilities::default(), &harness);

        assert_eq!(controller.new_tab().selected(), Some(NewTabControl::Fab));
        assert_eq!(controller.new_tab().selected_count(), 1);
    }

    #[test]
    fn test_apply_json() {
        let harness = Harness::new(AppearanceMode::Light);
        let (mut controller, mut components) = ready(Capabilities::default(), &harness);

        let applied = controller
            .apply_json(
                r#"{"option": "tabTrayLayout", "value": "alwaysBottom"}"#,
                &mut components,
            )
            .unwrap();
        assert_eq!(applied, Applied::Changed);
        assert!(harness.store.get_bool(keys::TAB_TRAY_ALWAYS_BOTTOM));

        controller
            .apply_json(
                r#"{"option": "customAddonsCollection", "value": "mine"}"#,
                &mut components,
            )
            .unwrap();
        assert_eq!(controller.snapshot().custom_addons_collection, "mine");

        let err = controller
            .apply_json(r#"{"option": "theme", "value": "sepia"}"#, &mut components)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn test_reinitialize_picks_up_external_changes() {
        let harness = Harness::new(AppearanceMode::Light);
        let (mut controller, components) = ready(Capabilities::default(), &harness);
        assert_eq!(controller.tab_tray().selected(), None);

        let mut external = harness.store.clone();
        external
            .set_bool(keys::TAB_TRAY_OPPOSITE_DIRECTION, true)
            .unwrap();
        controller.initialize_all(&components);
        assert_eq!(
            controller.tab_tray().selected(),
            Some(TabTrayLayout::OppositeDirection)
        );
    }

    #[test]
    fn test_change_request_categories() {
        assert_eq!(
            ChangeRequest::Theme(AppearanceMode::Dark).category(),
            Category::Theme
        );
        assert_eq!(
            ChangeRequest::CustomAddonsAccount(String::new()).category(),
            Category::AddonsCustomization
        );
        let json = serde_json::to_string(&ChangeRequest::StripUrl(true)).unwrap();
        assert_eq!(json, r#"{"option":"stripUrl","value":true}"#);
    }
}
