//! Capability traits through which the firmware supplies I/O and time.
//!
//! The controller is generic over these four capabilities. The firmware
//! implements them over GPIO, channels, and the embassy timer; host tests
//! implement them over a recorded timeline and a virtual clock.

use embassy_time::{Duration, Instant};

use crate::signal::SignalConfig;

/// Drives the five signal heads.
pub trait SignalOutput {
    /// Command every head to the given color. For each head, exactly one
    /// line ends up active and the head's other lines inactive in the same
    /// update; no ordering is guaranteed between heads.
    async fn apply(&mut self, config: &SignalConfig);
}

/// Reads the pedestrian push buttons, normalized so that pressed = true.
pub trait RequestInput {
    /// Raw sample; may chatter. Debouncing is the request latch's job.
    fn is_pressed(&mut self) -> bool;
}

/// Drives the audible signal outputs, all buzzers together.
pub trait AudibleOutput {
    async fn set_active(&mut self, on: bool);
}

/// Monotonic time source and cooperative sleep.
pub trait Clock {
    fn now(&self) -> Instant;
    async fn sleep(&mut self, duration: Duration);
}
