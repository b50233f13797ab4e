//! Raspberry Pi GPIO backend
//!
//! Implements the line interface seam on top of `rppal`. Only compiled
//! with the `hardware-gpio` feature.

use std::time::Duration;

use rppal::gpio::{Gpio, InputPin, Trigger};
use tracing::debug;

use crate::error::{ButtonError, Result};
use crate::lines::{EdgeEvent, LineInterface, LineRequest};

/// GPIO character device backend
///
/// [`GpioLines::detect`] is the once-per-process availability probe: when
/// it fails the button feature stays disabled for the process lifetime.
pub struct GpioLines {
    gpio: Gpio,
}

impl GpioLines {
    /// Opens the GPIO device, failing when the driver is unavailable
    pub fn detect() -> Result<Self> {
        let gpio = Gpio::new().map_err(|e| ButtonError::HardwareUnavailable {
            reason: e.to_string(),
        })?;
        Ok(Self { gpio })
    }
}

impl LineInterface for GpioLines {
    fn request_lines(&self, pins: &[u8]) -> Result<Box<dyn LineRequest>> {
        let mut inputs = Vec::with_capacity(pins.len());
        for &pin in pins {
            let mut input = self
                .gpio
                .get(pin)
                .map_err(|e| ButtonError::HardwareUnavailable {
                    reason: format!("pin {}: {}", pin, e),
                })?
                .into_input_pullup();
            input
                .set_interrupt(Trigger::FallingEdge, None)
                .map_err(|e| ButtonError::HardwareUnavailable {
                    reason: format!("pin {}: {}", pin, e),
                })?;
            inputs.push(input);
        }
        debug!(?pins, "acquired GPIO lines");
        Ok(Box::new(GpioLineRequest {
            gpio: self.gpio.clone(),
            pins: inputs,
        }))
    }
}

/// A held set of pull-up inputs with falling-edge interrupts
///
/// Dropping the pins clears their interrupt configuration and releases
/// the lines.
struct GpioLineRequest {
    gpio: Gpio,
    pins: Vec<InputPin>,
}

impl LineRequest for GpioLineRequest {
    fn offsets(&self) -> Vec<u32> {
        // With the character device the line offset is the BCM number
        self.pins.iter().map(|p| u32::from(p.pin())).collect()
    }

    fn read_edge_events(&mut self, timeout: Duration) -> Result<Vec<EdgeEvent>> {
        let pins: Vec<&InputPin> = self.pins.iter().collect();
        match self.gpio.poll_interrupts(&pins, false, Some(timeout)) {
            Ok(Some((pin, _event))) => Ok(vec![EdgeEvent {
                line_offset: u32::from(pin.pin()),
            }]),
            Ok(None) => Ok(Vec::new()),
            Err(e) => Err(ButtonError::HardwareUnavailable {
                reason: e.to_string(),
            }),
        }
    }
}
