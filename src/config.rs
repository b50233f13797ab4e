//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Button subsystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonsConfig {
    /// Whether button input is enabled at all. Turned off for dev
    /// environments without the button header.
    pub enabled: bool,
    /// Upper bound on a single blocking edge-event read, in milliseconds.
    /// Also bounds worst-case shutdown latency of the poll thread.
    pub poll_timeout_ms: u64,
    /// How long stop() waits for the poll thread to exit, in milliseconds
    pub stop_grace_ms: u64,
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_timeout_ms: 1000,
            stop_grace_ms: 2000,
        }
    }
}

impl ButtonsConfig {
    /// Poll timeout as a [`Duration`]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Stop grace period as a [`Duration`]
    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Button subsystem configuration
    #[serde(default)]
    pub buttons: ButtonsConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{profile}.toml (profile-specific overrides)
    /// 3. Environment variables with prefix INKY_ (e.g.
    ///    INKY_BUTTONS__POLL_TIMEOUT_MS=500)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Add profile-specific configuration
            .add_source(File::with_name(&format!("config/{}", profile)).required(false))
            // Add environment variables with INKY_ prefix
            // Use __ as separator for nested fields (e.g. INKY_BUTTONS__ENABLED)
            .add_source(
                Environment::with_prefix("INKY")
                    .separator("__")
                    .try_parsing(true),
            )
            // Set the profile
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration using the INKY_PROFILE environment variable,
    /// defaulting to "debug" if not set
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("INKY_PROFILE").unwrap_or_else(|_| "debug".to_string());
        Self::load(&profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("debug").unwrap_or_else(|_| Self {
            profile: "debug".to_string(),
            buttons: ButtonsConfig::default(),
        })
    }
}
