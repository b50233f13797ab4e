//! Read-only status snapshot
//!
//! Consumed by an external monitoring endpoint, which serializes it as
//! `{"enabled": ..., "running": ..., "buttons": [...]}`.

use serde::Serialize;

use crate::identity::ButtonId;

/// Point-in-time view of the button subsystem
///
/// Safe to request from any thread; the only way to observe that the
/// feature disabled itself after a hardware failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonStatus {
    /// Hardware present and not disabled by configuration or failure
    pub enabled: bool,
    /// Whether the poll loop is currently running
    pub running: bool,
    /// The fixed set of known button labels
    pub buttons: Vec<&'static str>,
}

impl ButtonStatus {
    pub(crate) fn snapshot(enabled: bool, running: bool) -> Self {
        Self {
            enabled,
            running,
            buttons: ButtonId::ALL.iter().map(|b| b.label()).collect(),
        }
    }
}
