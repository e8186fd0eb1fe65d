//! The phase state machine.
//!
//! A single control task runs the fixed phase cycle forever. Every wait is
//! a cooperative sleep of at most one poll period, and the request latch is
//! fed on every slice, so a press during any phase is remembered for the
//! next main-green entry and never stalls the executor.

use embassy_time::Duration;

use crate::latch::RequestLatch;
use crate::phase::Phase;
use crate::sequencer::AudibleSequencer;
use crate::signal::{PedestrianColor, SignalConfig};
use crate::traits::{AudibleOutput, Clock, RequestInput, SignalOutput};

/// How often the demand hold re-checks the request latch. Also the upper
/// bound on any single sleep, so the latch is fed at this granularity in
/// every phase.
pub const REQUEST_POLL_PERIOD: Duration = Duration::from_millis(500);

/// Hold on main green after a request has been consumed.
const MAIN_GREEN_HOLD: Duration = Duration::from_millis(4000);
/// Dwell of both yellow phases.
const YELLOW_DWELL: Duration = Duration::from_millis(1000);
/// Dwell of side green.
const SIDE_GREEN_DWELL: Duration = Duration::from_millis(4000);
/// Red/green repetitions of the end-of-crossing flash.
const FLASH_REPETITIONS: usize = 3;
/// Hold of each flash half-step.
const FLASH_STEP: Duration = Duration::from_millis(500);

/// The intersection controller.
///
/// Owns the current phase and the request latch, and runs the fixed phase
/// cycle against the supplied capabilities. Constructed per intersection
/// and passed by exclusive reference through the loop body; there are no
/// globals, so tests construct isolated instances.
pub struct Controller<S, B, Z, C> {
    signals: S,
    buttons: B,
    buzzers: Z,
    clock: C,
    phase: Phase,
    latch: RequestLatch,
    sequencer: AudibleSequencer,
}

impl<S, B, Z, C> Controller<S, B, Z, C>
where
    S: SignalOutput,
    B: RequestInput,
    Z: AudibleOutput,
    C: Clock,
{
    pub fn new(signals: S, buttons: B, buzzers: Z, clock: C) -> Self {
        Self {
            signals,
            buttons,
            buzzers,
            clock,
            phase: Phase::MainGreen,
            latch: RequestLatch::new(),
            sequencer: AudibleSequencer::standard(),
        }
    }

    /// The phase the controller is currently in.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the controller forever. The only way out is process shutdown.
    pub async fn run(&mut self) -> ! {
        loop {
            self.step().await;
        }
    }

    /// Execute the current phase once and advance to the next one.
    pub async fn step(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("entering {}", self.phase);

        self.signals
            .apply(&SignalConfig::for_phase(self.phase))
            .await;

        match self.phase {
            Phase::MainGreen => {
                self.wait_for_request().await;
                self.dwell(MAIN_GREEN_HOLD).await;
            }
            Phase::MainYellow | Phase::SideYellow => self.dwell(YELLOW_DWELL).await,
            Phase::SideGreen => self.dwell(SIDE_GREEN_DWELL).await,
            Phase::PedestrianGreen => {
                self.audible_sequence().await;
                self.flash_crossing().await;
            }
        }

        self.phase = self.phase.next();
    }

    /// Demand hold: wait, indefinitely, until a request is consumed from
    /// the latch. A request latched in an earlier phase is consumed
    /// without sleeping at all; otherwise a new press is seen at most one
    /// poll period after it lands.
    async fn wait_for_request(&mut self) {
        loop {
            self.sample_request();
            if self.latch.consume() {
                return;
            }
            self.clock.sleep(REQUEST_POLL_PERIOD).await;
        }
    }

    async fn audible_sequence(&mut self) {
        let sequencer = self.sequencer;
        for step in sequencer.steps() {
            self.buzzers.set_active(step.active).await;
            self.dwell(step.hold).await;
        }
    }

    /// Warn that the crossing is ending: blink both pedestrian heads,
    /// leaving them green for the main-green entry to override.
    async fn flash_crossing(&mut self) {
        for _ in 0..FLASH_REPETITIONS {
            self.signals
                .apply(&SignalConfig::pedestrian(PedestrianColor::Red))
                .await;
            self.dwell(FLASH_STEP).await;
            self.signals
                .apply(&SignalConfig::pedestrian(PedestrianColor::Green))
                .await;
            self.dwell(FLASH_STEP).await;
        }
    }

    /// Sleep for `total`, sliced so the latch keeps getting fed.
    async fn dwell(&mut self, total: Duration) {
        let mut remaining = total;
        while remaining.as_ticks() > 0 {
            self.sample_request();
            let slice = remaining.min(REQUEST_POLL_PERIOD);
            self.clock.sleep(slice).await;
            remaining -= slice;
        }
    }

    fn sample_request(&mut self) {
        let pressed = self.buttons.is_pressed();
        self.latch.poll(self.clock.now(), pressed);
    }
}
