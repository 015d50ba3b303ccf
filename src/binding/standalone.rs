//! Bindings that stand alone rather than in a group
//!
//! Switches and free-text fields write straight through to their key.

use super::Selection;
use crate::error::{Error, Result};
use crate::store::SettingsStore;

/// A boolean switch bound to one key
#[derive(Debug, Clone)]
pub struct SwitchBinding {
    key: &'static str,
    checked: bool,
    visible: bool,
}

impl SwitchBinding {
    /// Visible, unchecked switch bound to `key`
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            checked: false,
            visible: true,
        }
    }

    /// Hide the switch; hidden switches are never read or written
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Store key backing this switch
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Last committed value
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Whether the host shows this switch
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Read the stored value; hidden switches keep their default
    pub fn initialize(&mut self, store: &dyn SettingsStore) {
        if self.visible {
            self.checked = store.get_bool(self.key);
        }
    }

    /// Persist `checked`, then update the switch
    pub fn set(&mut self, checked: bool, store: &mut dyn SettingsStore) -> Result<Selection<bool>> {
        if !self.visible {
            return Err(Error::NotAvailable {
                option: self.key.to_string(),
            });
        }
        if self.checked == checked {
            return Ok(Selection::Unchanged);
        }

        store.set_bool(self.key, checked)?;
        let previous = std::mem::replace(&mut self.checked, checked);
        log::info!("Switch {} set to {}", self.key, checked);
        Ok(Selection::Changed {
            previous: Some(previous),
        })
    }
}

/// A free-text value bound to one key
#[derive(Debug, Clone)]
pub struct TextBinding {
    key: &'static str,
    text: String,
}

impl TextBinding {
    /// Empty text field bound to `key`
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            text: String::new(),
        }
    }

    /// Store key backing this field
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Last committed text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Read the stored text, empty when unset
    pub fn initialize(&mut self, store: &dyn SettingsStore) {
        self.text = store.get_string(self.key).unwrap_or_default();
    }

    /// Persist `text`, then update the field
    pub fn set(&mut self, text: &str, store: &mut dyn SettingsStore) -> Result<Selection<String>> {
        if self.text == text {
            return Ok(Selection::Unchanged);
        }

        store.set_string(self.key, text)?;
        let previous = std::mem::replace(&mut self.text, text.to_string());
        log::info!("Text {} updated", self.key);
        Ok(Selection::Changed {
            previous: Some(previous),
        })
    }
}
