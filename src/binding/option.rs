//! A single option bound to a stored value

use std::fmt;

use crate::store::{PersistenceError, SettingsStore, StoreEnum};
use crate::telemetry::TelemetrySink;

/// Callback run after the owning group commits a change to this option
pub type Listener<T> = Box<dyn FnMut(&T, &mut dyn TelemetrySink)>;

/// Where an option's selected state lives in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The option owns a boolean key that is `true` while selected
    Flag { key: &'static str },
    /// The group shares one key holding the tag of the selected option
    Choice { key: &'static str, tag: &'static str },
}

impl Slot {
    /// Store key behind this slot
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Flag { key } | Slot::Choice { key, .. } => *key,
        }
    }

    /// Whether the store currently marks this option as selected
    pub fn is_set(&self, store: &dyn SettingsStore) -> bool {
        match self {
            Slot::Flag { key } => store.get_bool(key),
            Slot::Choice { key, tag } => store.get_string(key).as_deref() == Some(*tag),
        }
    }

    fn persist(&self, store: &mut dyn SettingsStore) -> Result<(), PersistenceError> {
        match self {
            Slot::Flag { key } => store.set_bool(key, true),
            Slot::Choice { key, tag } => store.set_string(key, tag),
        }
    }
}

/// One control bound to one stored value
pub struct OptionBinding<T> {
    value: T,
    slot: Slot,
    selected: bool,
    listener: Option<Listener<T>>,
}

impl<T> OptionBinding<T> {
    /// Bind an option that owns its own boolean key
    pub fn flag(value: T, key: &'static str) -> Self {
        Self {
            value,
            slot: Slot::Flag { key },
            selected: false,
            listener: None,
        }
    }

    /// Attach an on-change callback
    pub fn with_listener(
        mut self,
        listener: impl FnMut(&T, &mut dyn TelemetrySink) + 'static,
    ) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Option value this binding represents
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Storage slot of this option
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Store key backing this option
    pub fn key(&self) -> &'static str {
        self.slot.key()
    }

    /// Whether the control is shown selected
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Read the stored value into the selected flag. Never notifies.
    pub fn initialize(&mut self, store: &dyn SettingsStore) {
        self.selected = self.slot.is_set(store);
    }

    /// Persist this option as selected, then mark it selected
    ///
    /// The flag is left untouched when the write fails.
    pub fn on_select(&mut self, store: &mut dyn SettingsStore) -> Result<(), PersistenceError> {
        self.slot.persist(store)?;
        self.selected = true;
        Ok(())
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn notify(&mut self, telemetry: &mut dyn TelemetrySink) {
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.value, telemetry);
        }
    }
}

impl<T: StoreEnum> OptionBinding<T> {
    /// Bind an option stored as an enum tag under a shared key
    pub fn choice(value: T, key: &'static str) -> Self {
        Self {
            slot: Slot::Choice {
                key,
                tag: value.tag(),
            },
            value,
            selected: false,
            listener: None,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OptionBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionBinding")
            .field("value", &self.value)
            .field("slot", &self.slot)
            .field("selected", &self.selected)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}
