//! Button mapping table health check

use std::collections::HashSet;

use crate::health::check::{CheckResult, SystemCheck};
use crate::identity::{BCM_PINS, ButtonId, LABELS};

/// Checks that the label and pin tables describe the same buttons
pub struct ButtonMapCheck;

impl ButtonMapCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ButtonMapCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ButtonMapCheck {
    fn name(&self) -> &'static str {
        "Button Map"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates the fixed label-to-pin mapping tables")
    }

    fn check(&self) -> CheckResult {
        if LABELS.len() != BCM_PINS.len() || LABELS.len() != ButtonId::ALL.len() {
            return CheckResult::fail("Label and pin tables differ in length");
        }

        let unique: HashSet<u8> = BCM_PINS.iter().copied().collect();
        if unique.len() != BCM_PINS.len() {
            return CheckResult::fail("Duplicate BCM pin in button map");
        }

        let details = ButtonId::ALL
            .iter()
            .map(|b| format!("  {} → GPIO{}", b.label(), b.bcm_pin()))
            .collect::<Vec<_>>()
            .join("\n");

        CheckResult::pass(format!("{} buttons mapped", LABELS.len())).with_details(details)
    }
}
