//! Button identities and their fixed wiring
//!
//! The display HAT exposes four buttons on the left edge, labelled A to D
//! from top to bottom. [`LABELS`], [`BCM_PINS`] and [`ButtonId::ALL`] are
//! position-aligned: index `i` in each refers to the same physical button.
//! The mapping is fixed at compile time and never changes at runtime.

use std::fmt;
use std::str::FromStr;

use enum_map::Enum;
use serde::Serialize;

use crate::error::ButtonError;

/// Logical button labels, top to bottom
pub const LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// BCM pin numbers, position-aligned with [`LABELS`]
///
/// Header pins 29, 31, 36 and 18.
pub const BCM_PINS: [u8; 4] = [5, 6, 16, 24];

/// Logical identity of a physical button
///
/// Stable for the process lifetime, independent of the line offset the
/// driver assigns to the underlying pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize)]
pub enum ButtonId {
    A,
    B,
    C,
    D,
}

impl ButtonId {
    /// All buttons, position-aligned with [`LABELS`] and [`BCM_PINS`]
    pub const ALL: [ButtonId; 4] = [ButtonId::A, ButtonId::B, ButtonId::C, ButtonId::D];

    /// Parses a label from the fixed set
    pub fn from_label(label: &str) -> Result<Self, ButtonError> {
        LABELS
            .iter()
            .position(|&l| l == label)
            .and_then(Self::from_index)
            .ok_or_else(|| ButtonError::InvalidIdentity {
                label: label.to_string(),
            })
    }

    /// Returns the button at table position `index`, if any
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The button's label
    pub fn label(self) -> &'static str {
        LABELS[self as usize]
    }

    /// The button's BCM pin number
    pub fn bcm_pin(self) -> u8 {
        BCM_PINS[self as usize]
    }
}

impl fmt::Display for ButtonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ButtonId {
    type Err = ButtonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_tables_are_position_aligned() {
        assert_eq!(LABELS.len(), BCM_PINS.len());
        assert_eq!(LABELS.len(), ButtonId::ALL.len());

        for (index, button) in ButtonId::ALL.iter().enumerate() {
            assert_eq!(button.label(), LABELS[index]);
            assert_eq!(button.bcm_pin(), BCM_PINS[index]);
        }
    }

    #[test]
    fn test_pins_are_unique() {
        let unique: HashSet<u8> = BCM_PINS.iter().copied().collect();
        assert_eq!(unique.len(), BCM_PINS.len());
    }

    #[test]
    fn test_label_round_trip() {
        for button in ButtonId::ALL {
            assert_eq!(ButtonId::from_label(button.label()).unwrap(), button);
        }
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = ButtonId::from_label("E").unwrap_err();
        assert!(matches!(err, ButtonError::InvalidIdentity { label } if label == "E"));

        // Labels are case sensitive
        assert!(ButtonId::from_label("a").is_err());
        assert!(ButtonId::from_label("").is_err());
    }

    #[test]
    fn test_from_str_and_display() {
        let button: ButtonId = "C".parse().unwrap();
        assert_eq!(button, ButtonId::C);
        assert_eq!(button.to_string(), "C");
    }

    #[test]
    fn test_from_index_out_of_range() {
        assert_eq!(ButtonId::from_index(2), Some(ButtonId::C));
        assert_eq!(ButtonId::from_index(4), None);
    }
}
