//! GPIO availability health check

use crate::backend::GpioLines;
use crate::health::check::{CheckResult, SystemCheck};

/// Probes the GPIO character device
///
/// Warns rather than fails when the device is absent, so the suite stays
/// green on development machines and in CI.
pub struct GpioCheck;

impl GpioCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GpioCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for GpioCheck {
    fn name(&self) -> &'static str {
        "GPIO"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Probes the GPIO character device used for button input")
    }

    fn check(&self) -> CheckResult {
        match GpioLines::detect() {
            Ok(_) => CheckResult::pass("GPIO device available"),
            Err(e) => CheckResult::warn("GPIO device unavailable (expected off-device)")
                .with_details(format!("  {}", e)),
        }
    }
}
