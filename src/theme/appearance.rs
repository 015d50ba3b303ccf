//! Process-wide appearance state
//!
//! Every [`ProcessAppearance`] handle reads and writes the same global mode,
//! so the engine never keeps its own copy of it.

use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{AppearanceError, AppearanceMode, AppearancePlatform};

struct AppearanceState {
    mode: AppearanceMode,
    system_dark: bool,
}

static APPEARANCE: Lazy<Mutex<AppearanceState>> = Lazy::new(|| {
    Mutex::new(AppearanceState {
        mode: AppearanceMode::FollowSystem,
        system_dark: false,
    })
});

/// Handle to the global appearance mode
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessAppearance;

impl ProcessAppearance {
    /// Record whether the system is rendering dark (reported by the host)
    pub fn set_system_dark(&self, dark: bool) {
        state().system_dark = dark;
    }
}

fn state() -> MutexGuard<'static, AppearanceState> {
    APPEARANCE.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AppearancePlatform for ProcessAppearance {
    fn current_mode(&self) -> AppearanceMode {
        state().mode
    }

    fn set_mode(&mut self, mode: AppearanceMode) -> Result<(), AppearanceError> {
        state().mode = mode;
        Ok(())
    }

    fn system_is_dark(&self) -> bool {
        state().system_dark
    }
}
