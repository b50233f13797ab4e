//! Hardware line interface seam
//!
//! The poll loop talks to GPIO through these traits so the production
//! backend and test doubles are interchangeable.

use std::time::Duration;

use crate::error::Result;

/// A falling-edge notification on one watched line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeEvent {
    /// Driver-assigned offset of the line that fired
    pub line_offset: u32,
}

/// Acquires a set of input lines configured for button reads
///
/// Implementations configure every requested pin as a pull-up input with
/// falling-edge detection.
pub trait LineInterface: Send + Sync {
    /// Requests the given BCM pins, returning the held line session
    fn request_lines(&self, pins: &[u8]) -> Result<Box<dyn LineRequest>>;
}

/// A held set of input lines delivering edge events
///
/// Dropping the request releases the lines.
pub trait LineRequest: Send {
    /// Offsets of the held lines, position-aligned with the requested pins
    fn offsets(&self) -> Vec<u32>;

    /// Blocks up to `timeout` waiting for pending edge events
    ///
    /// An empty batch after a timeout is not an error; callers re-check
    /// their shutdown flag and poll again.
    fn read_edge_events(&mut self, timeout: Duration) -> Result<Vec<EdgeEvent>>;
}
