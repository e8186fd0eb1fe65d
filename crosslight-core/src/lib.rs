//! Board-agnostic control logic for the crossing controller
//!
//! This crate contains all behavior that does not depend on a specific
//! board:
//!
//! - Closed color types and the per-phase intersection signal configuration
//! - The phase state machine and its timing contracts
//! - The debounced pedestrian request latch
//! - The audible signal sequencer
//! - Capability traits through which the firmware supplies I/O and time
//!
//! All time and I/O reach the controller through the capability traits, so
//! the whole control loop runs against mock capabilities in host tests.

#![no_std]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

pub mod controller;
pub mod latch;
pub mod phase;
pub mod sequencer;
pub mod signal;
pub mod traits;

pub use controller::Controller;
pub use latch::RequestLatch;
pub use phase::Phase;
pub use sequencer::AudibleSequencer;
pub use signal::{PedestrianColor, SignalConfig, VehicleColor};
