//! Button input service for Raspberry Pi e-ink display HATs
//!
//! Reads the four front-panel buttons (A, B, C, D) through the GPIO
//! character device and dispatches presses to registered callbacks from a
//! dedicated background thread. The poll loop is start/stoppable at any
//! time from the application thread; a monitoring endpoint can query the
//! subsystem state through [`ButtonStatus`].

/// Rppal-backed GPIO line interface
#[cfg(feature = "hardware-gpio")]
pub mod backend;

/// Build-time information (git SHA, target triple, compiler version)
pub mod build_info;

/// Profile-based application configuration
pub mod config;

/// Error taxonomy for the button subsystem
pub mod error;

/// Health checks for startup validation and on-device diagnostics
pub mod health;

/// Button identities and the fixed label/pin mapping
pub mod identity;

/// Hardware line interface seam (traits and edge events)
pub mod lines;

/// Poll-loop controller and lifecycle
pub mod manager;

/// Callback handler registry
pub mod registry;

/// Read-only status snapshot for monitoring endpoints
pub mod status;

#[cfg(feature = "hardware-gpio")]
pub use backend::GpioLines;
pub use config::{AppConfig, ButtonsConfig};
pub use error::{ButtonError, Result};
pub use identity::ButtonId;
pub use lines::{EdgeEvent, LineInterface, LineRequest};
pub use manager::ButtonManager;
pub use registry::{ButtonHandler, HandlerRegistry};
pub use status::ButtonStatus;
