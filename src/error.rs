//! Error taxonomy for selection and binding operations

use crate::store::PersistenceError;
use crate::theme::AppearanceError;

/// Errors returned by groups, bindings and the controller
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store rejected a write; the selection was rolled back
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    /// An option was selected through a group it does not belong to
    #[error("Option {option} is not a member of group {group}")]
    NotAMember { group: String, option: String },
    /// The binding is hidden by a capability flag
    #[error("Option {option} is not available")]
    NotAvailable { option: String },
    /// The platform refused the new appearance mode
    #[error(transparent)]
    Appearance(#[from] AppearanceError),
    /// A serialized change request could not be parsed
    #[error("Invalid change request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
    /// `apply` was called before `initialize_all`
    #[error("Customization surface is not initialized")]
    NotReady,
}

impl Error {
    /// Whether the error indicates a wiring bug rather than a runtime failure
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Error::NotAMember { .. } | Error::NotReady)
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
