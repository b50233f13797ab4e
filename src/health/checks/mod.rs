//! Built-in health checks for the button service

pub mod build_info;
pub mod button_map;
pub mod config;
#[cfg(feature = "hardware-gpio")]
pub mod gpio;
pub mod system_info;

pub use build_info::BuildInfoCheck;
pub use button_map::ButtonMapCheck;
pub use config::ConfigCheck;
#[cfg(feature = "hardware-gpio")]
pub use gpio::GpioCheck;
pub use system_info::SystemInfoCheck;
