//! Option bindings and exclusive groups
//!
//! An [`OptionBinding`] couples one control to one stored value. An
//! [`ExclusiveGroup`] owns a set of bindings and keeps at most one of them
//! selected, so individual controls never need to know about their siblings.

pub mod group;
pub mod option;
pub mod standalone;

pub use group::ExclusiveGroup;
pub use option::{Listener, OptionBinding, Slot};
pub use standalone::{SwitchBinding, TextBinding};

/// Outcome of a successful selection or value change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    /// A new value was committed
    Changed { previous: Option<T> },
    /// The requested value was already committed; nothing was written
    Unchanged,
}

impl<T> Selection<T> {
    /// Whether anything was committed
    pub fn is_changed(&self) -> bool {
        matches!(self, Selection::Changed { .. })
    }
}
