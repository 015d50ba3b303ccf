//! Telemetry events emitted by customization changes
//!
//! Delivery is fire-and-forget: a failing sink is logged and otherwise
//! ignored, it never affects a committed selection.

use serde::{Deserialize, Serialize};

use crate::config::ToolbarPosition;

/// Where a selection originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The customization screen
    Settings,
    /// The first-run onboarding flow
    Onboarding,
}

/// Discrete named telemetry events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    DarkThemeSelected { source: Source },
    ToolbarPositionChanged { position: ToolbarPosition },
}

impl Event {
    /// Stable event name
    pub fn name(&self) -> &'static str {
        match self {
            Event::DarkThemeSelected { .. } => "dark_theme_selected",
            Event::ToolbarPositionChanged { .. } => "toolbar_position_changed",
        }
    }
}

/// The sink rejected an event
#[derive(Debug, thiserror::Error)]
#[error("Telemetry sink failed: {0}")]
pub struct TelemetryError(pub String);

/// Receiver of telemetry events
pub trait TelemetrySink {
    fn track(&mut self, event: Event) -> Result<(), TelemetryError>;
}

/// Track an event, swallowing sink failures
pub fn track(sink: &mut dyn TelemetrySink, event: Event) {
    if let Err(e) = sink.track(event) {
        log::warn!("Dropping {} event: {}", event.name(), e);
    }
}

/// Sink that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    fn track(&mut self, _event: Event) -> Result<(), TelemetryError> {
        Ok(())
    }
}

/// Sink that writes events to the log as JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn track(&mut self, event: Event) -> Result<(), TelemetryError> {
        let payload =
            serde_json::to_string(&event).map_err(|e| TelemetryError(e.to_string()))?;
        log::info!("telemetry: {}", payload);
        Ok(())
    }
}
