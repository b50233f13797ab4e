//! Host system health check

use sysinfo::System;

use crate::health::check::{CheckResult, SystemCheck};

/// Gathers OS and memory information about the device
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates OS and memory information gathering")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new_all();
        sys.refresh_all();

        let mut details = Vec::new();

        let os_name = System::name().unwrap_or_else(|| "Unknown".to_string());
        let os_version = System::os_version().unwrap_or_else(|| "Unknown".to_string());
        let kernel_version = System::kernel_version().unwrap_or_else(|| "Unknown".to_string());

        details.push(format!("  OS: {} {}", os_name, os_version));
        details.push(format!("  Kernel: {}", kernel_version));
        details.push(format!("  Arch: {}", System::cpu_arch()));

        if let Some(hostname) = System::host_name() {
            details.push(format!("  Host: {}", hostname));
        }

        let total_memory_mb = sys.total_memory() / (1024 * 1024);
        details.push(format!("  Memory: {} MB total", total_memory_mb));

        // The smallest supported board ships 512 MB
        if total_memory_mb < 256 {
            return CheckResult::warn("Very low memory for the display service")
                .with_details(details.join("\n"));
        }

        CheckResult::pass("Host info gathered").with_details(details.join("\n"))
    }
}
