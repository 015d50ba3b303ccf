//! Mutually exclusive option groups
//!
//! Selecting one member deselects every other member. Storage is written
//! before memory, so a failed write leaves the group exactly as it was.

use std::fmt;

use super::option::{OptionBinding, Slot};
use super::Selection;
use crate::error::{Error, Result};
use crate::store::{PersistenceError, SettingsStore};
use crate::telemetry::TelemetrySink;

/// Stored state of a slot before the group wrote to it
enum Prior {
    Flag(bool),
    Choice(Option<String>),
}

impl Prior {
    fn capture(slot: Slot, store: &dyn SettingsStore) -> Self {
        match slot {
            Slot::Flag { key } => Prior::Flag(store.get_bool(key)),
            Slot::Choice { key, .. } => Prior::Choice(store.get_string(key)),
        }
    }

    fn restore(
        self,
        slot: Slot,
        store: &mut dyn SettingsStore,
    ) -> std::result::Result<(), PersistenceError> {
        match self {
            Prior::Flag(value) => store.set_bool(slot.key(), value),
            Prior::Choice(Some(tag)) => store.set_string(slot.key(), &tag),
            // An unset key cannot be removed through the store contract
            Prior::Choice(None) => Ok(()),
        }
    }
}

/// A set of options of which at most one is selected
pub struct ExclusiveGroup<T> {
    name: &'static str,
    members: Vec<OptionBinding<T>>,
}

impl<T: Copy + PartialEq + fmt::Debug> ExclusiveGroup<T> {
    /// Create a group; member order decides corrupt-state resolution
    pub fn new(name: &'static str, members: Vec<OptionBinding<T>>) -> Self {
        Self { name, members }
    }

    /// Group name used in logs and errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Member values with their selected flags, in declared order
    pub fn members(&self) -> impl Iterator<Item = (T, bool)> + '_ {
        self.members.iter().map(|m| (*m.value(), m.is_selected()))
    }

    /// Whether `value` is a member
    pub fn contains(&self, value: T) -> bool {
        self.position(value).is_some()
    }

    /// Currently selected member, if any
    pub fn selected(&self) -> Option<T> {
        self.members
            .iter()
            .find(|m| m.is_selected())
            .map(|m| *m.value())
    }

    /// Whether `value` is the selected member
    pub fn is_selected(&self, value: T) -> bool {
        self.selected() == Some(value)
    }

    /// Number of members marked selected
    pub fn selected_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_selected()).count()
    }

    /// Store key backing `value`
    pub fn key_of(&self, value: T) -> Option<&'static str> {
        self.position(value).map(|i| self.members[i].key())
    }

    /// Load every member from the store
    ///
    /// If storage marks several members selected, the first in declared
    /// order wins and the rest are cleared in memory only.
    pub fn initialize(&mut self, store: &dyn SettingsStore) {
        for member in &mut self.members {
            member.initialize(store);
        }

        let mut kept = false;
        let mut demoted = Vec::new();
        for member in &mut self.members {
            if !member.is_selected() {
                continue;
            }
            if kept {
                member.set_selected(false);
                demoted.push(member.key());
            } else {
                kept = true;
            }
        }

        if !demoted.is_empty() {
            log::warn!(
                "Group {} had several selected options, ignoring {:?}",
                self.name,
                demoted
            );
        }
        log::debug!("Initialized group {} with {:?}", self.name, self.selected());
    }

    /// Select `value`, persisting it and deselecting every other member
    pub fn select(
        &mut self,
        value: T,
        store: &mut dyn SettingsStore,
        telemetry: &mut dyn TelemetrySink,
    ) -> Result<Selection<T>> {
        let Some(index) = self.position(value) else {
            log::error!("{:?} selected through group {}", value, self.name);
            return Err(Error::NotAMember {
                group: self.name.to_string(),
                option: format!("{:?}", value),
            });
        };

        if self.members[index].is_selected() {
            return Ok(Selection::Unchanged);
        }

        let previous = self.selected();
        self.commit(index, store)?;

        for (i, member) in self.members.iter_mut().enumerate() {
            if i != index {
                member.set_selected(false);
            }
        }
        self.members[index].notify(telemetry);

        log::info!(
            "Group {} changed from {:?} to {:?}",
            self.name,
            previous,
            value
        );
        Ok(Selection::Changed { previous })
    }

    /// Mark `value` selected in memory when nothing else is. No store write.
    pub(crate) fn assume_selected(&mut self, value: T) {
        if self.selected().is_some() {
            return;
        }
        if let Some(index) = self.position(value) {
            self.members[index].set_selected(true);
        }
    }

    /// Persist the target and clear sibling flags, undoing on failure
    fn commit(
        &mut self,
        index: usize,
        store: &mut dyn SettingsStore,
    ) -> std::result::Result<(), PersistenceError> {
        let target = self.members[index].slot();
        let prior = Prior::capture(target, store);
        self.members[index].on_select(store)?;

        let stale_flags: Vec<&'static str> = self
            .members
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .filter_map(|(_, m)| match m.slot() {
                Slot::Flag { key } if store.get_bool(key) => Some(key),
                _ => None,
            })
            .collect();

        let mut cleared = Vec::new();
        for key in stale_flags {
            if let Err(e) = store.set_bool(key, false) {
                self.members[index].set_selected(false);
                for restored in cleared {
                    if let Err(e) = store.set_bool(restored, true) {
                        log::warn!("Failed to restore {}: {}", restored, e);
                    }
                }
                if let Err(e) = prior.restore(target, store) {
                    log::warn!("Failed to restore {}: {}", target.key(), e);
                }
                return Err(e);
            }
            cleared.push(key);
        }

        Ok(())
    }

    fn position(&self, value: T) -> Option<usize> {
        self.members.iter().position(|m| *m.value() == value)
    }
}

impl<T: fmt::Debug> fmt::Debug for ExclusiveGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusiveGroup")
            .field("name", &self.name)
            .field("members", &self.members)
            .finish()
    }
}
