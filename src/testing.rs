//! Recording collaborators for unit tests
//!
//! Every fake is a cheap handle over shared state: tests box one clone into
//! [`Components`] and keep another to inspect what happened.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::controller::Components;
use crate::store::MemoryStore;
use crate::telemetry::{Event, TelemetryError, TelemetrySink};
use crate::theme::{
    AppearanceError, AppearanceMode, AppearancePlatform, PreferredColorScheme, RenderingEngine,
    SurfaceHost,
};

#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    events: Rc<RefCell<Vec<Event>>>,
    fail: Rc<Cell<bool>>,
}

impl RecordingTelemetry {
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn track(&mut self, event: Event) -> Result<(), TelemetryError> {
        if self.fail.get() {
            return Err(TelemetryError("sink offline".into()));
        }
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

#[derive(Debug)]
struct AppearanceState {
    mode: AppearanceMode,
    system_dark: bool,
    set_calls: usize,
    fail_next: bool,
}

#[derive(Debug, Clone)]
pub struct FakeAppearance {
    state: Rc<RefCell<AppearanceState>>,
}

impl FakeAppearance {
    pub fn new(mode: AppearanceMode) -> Self {
        Self {
            state: Rc::new(RefCell::new(AppearanceState {
                mode,
                system_dark: false,
                set_calls: 0,
                fail_next: false,
            })),
        }
    }

    pub fn mode(&self) -> AppearanceMode {
        self.state.borrow().mode
    }

    pub fn set_calls(&self) -> usize {
        self.state.borrow().set_calls
    }

    pub fn set_system_dark(&self, dark: bool) {
        self.state.borrow_mut().system_dark = dark;
    }

    pub fn fail_next_set(&self) {
        self.state.borrow_mut().fail_next = true;
    }
}

impl AppearancePlatform for FakeAppearance {
    fn current_mode(&self) -> AppearanceMode {
        self.state.borrow().mode
    }

    fn set_mode(&mut self, mode: AppearanceMode) -> Result<(), AppearanceError> {
        let mut state = self.state.borrow_mut();
        state.set_calls += 1;
        if std::mem::take(&mut state.fail_next) {
            return Err(AppearanceError("night mode locked".into()));
        }
        state.mode = mode;
        Ok(())
    }

    fn system_is_dark(&self) -> bool {
        self.state.borrow().system_dark
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeSurface {
    recreated: Rc<Cell<usize>>,
}

impl FakeSurface {
    pub fn recreated(&self) -> usize {
        self.recreated.get()
    }
}

impl SurfaceHost for FakeSurface {
    fn recreate(&mut self) {
        self.recreated.set(self.recreated.get() + 1);
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeEngine {
    schemes: Rc<RefCell<Vec<PreferredColorScheme>>>,
    reloads: Rc<Cell<usize>>,
}

impl FakeEngine {
    pub fn schemes(&self) -> Vec<PreferredColorScheme> {
        self.schemes.borrow().clone()
    }

    pub fn reloads(&self) -> usize {
        self.reloads.get()
    }
}

impl RenderingEngine for FakeEngine {
    fn set_preferred_color_scheme(&mut self, scheme: PreferredColorScheme) {
        self.schemes.borrow_mut().push(scheme);
    }

    fn reload(&mut self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

/// One of each fake, sharing state with the [`Components`] it hands out
pub struct Harness {
    pub store: MemoryStore,
    pub appearance: FakeAppearance,
    pub surface: FakeSurface,
    pub engine: FakeEngine,
    pub telemetry: RecordingTelemetry,
}

impl Harness {
    pub fn new(mode: AppearanceMode) -> Self {
        Self::with_store(mode, MemoryStore::new())
    }

    pub fn with_store(mode: AppearanceMode, store: MemoryStore) -> Self {
        Self {
            store,
            appearance: FakeAppearance::new(mode),
            surface: FakeSurface::default(),
            engine: FakeEngine::default(),
            telemetry: RecordingTelemetry::default(),
        }
    }

    pub fn components(&self) -> Components {
        Components {
            store: Box::new(self.store.clone()),
            appearance: Box::new(self.appearance.clone()),
            surface: Box::new(self.surface.clone()),
            engine: Box::new(self.engine.clone()),
            telemetry: Box::new(self.telemetry.clone()),
        }
    }
}
