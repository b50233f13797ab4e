//! Health checks for validating service startup and device state
//!
//! This module provides a framework for testing system health, useful for:
//! - Validating the service before enabling it on a device
//! - CI health checks
//! - Debugging a board where buttons stopped working
//!
//! # Example
//!
//! ```no_run
//! use inky_buttons::health::{HealthRunner, checks::*};
//!
//! let report = HealthRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(ButtonMapCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("Ready to start");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthReport, HealthRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthReport {
    let runner = HealthRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::ButtonMapCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new());

    #[cfg(feature = "hardware-gpio")]
    let runner = runner.add_check(checks::GpioCheck::new());

    runner.run()
}
