//! Settings persistence contract
//!
//! The engine never owns stored values. It reads and writes them through
//! [`SettingsStore`], which the host backs with its own key-value storage.

pub mod keys;
pub mod memory;

pub use memory::{MemoryStore, StoredValue};

/// A store write was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to persist {key}: {reason}")]
pub struct PersistenceError {
    /// Key whose write failed
    pub key: String,
    /// Store-provided reason
    pub reason: String,
}

impl PersistenceError {
    /// Failed write of `key` for `reason`
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Typed key-value persistence used by every binding
///
/// Reads are infallible: a missing or mistyped key reads as `false` / `None`.
/// Writes are expected to be durable once they return `Ok`.
pub trait SettingsStore {
    /// Boolean under `key`, `false` when unset
    fn get_bool(&self, key: &str) -> bool;

    fn set_bool(&mut self, key: &str, value: bool) -> Result<(), PersistenceError>;

    /// String under `key`, if set
    fn get_string(&self, key: &str) -> Option<String>;

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// An enumerated value persisted as a stable string tag
pub trait StoreEnum: Copy + Sized {
    /// Tag written to the store
    fn tag(self) -> &'static str;

    /// Parse a stored tag, `None` for unknown tags
    fn from_tag(tag: &str) -> Option<Self>;
}

/// Enum accessors for any [`SettingsStore`]
pub trait SettingsStoreExt {
    fn get_enum<T: StoreEnum>(&self, key: &str) -> Option<T>;

    fn set_enum<T: StoreEnum>(&mut self, key: &str, value: T) -> Result<(), PersistenceError>;
}

impl<S: SettingsStore + ?Sized> SettingsStoreExt for S {
    fn get_enum<T: StoreEnum>(&self, key: &str) -> Option<T> {
        self.get_string(key).and_then(|tag| T::from_tag(&tag))
    }

    fn set_enum<T: StoreEnum>(&mut self, key: &str, value: T) -> Result<(), PersistenceError> {
        self.set_string(key, value.tag())
    }
}
