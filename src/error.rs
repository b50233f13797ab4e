//! Error types for the button subsystem

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, ButtonError>;

/// Failures surfaced by the button subsystem
///
/// Hardware- and callback-level failures inside the poll loop are contained
/// and logged there; only registration with an unknown label is returned
/// synchronously to callers.
#[derive(Debug, Clone, Error)]
pub enum ButtonError {
    /// The GPIO driver is missing or the line request failed. Fatal to the
    /// button feature, not to the process.
    #[error("GPIO hardware unavailable: {reason}")]
    HardwareUnavailable { reason: String },

    /// Registration used a label outside the fixed button set.
    #[error("unknown button {label:?}, expected one of A, B, C, D")]
    InvalidIdentity { label: String },
}
