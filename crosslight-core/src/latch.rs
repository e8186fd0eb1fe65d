//! Debounced pedestrian request latch.

use embassy_time::{Duration, Instant};

/// Minimum spacing between two accepted button presses. Absorbs both
/// contact bounce and a human holding the button down.
pub const REFRACTORY: Duration = Duration::from_millis(2000);

/// Converts raw, possibly chattering button activity into a single
/// edge-triggered pedestrian request.
///
/// The control loop feeds raw samples through [`poll`](Self::poll); the
/// state machine takes the pending request with
/// [`consume`](Self::consume). A held or bouncing button yields at most
/// one accepted request per refractory window, never a fault. A genuinely
/// new press more than the window after the last accepted one registers
/// even if the pending request has not been consumed yet.
#[derive(Debug)]
pub struct RequestLatch {
    requested: bool,
    last_accepted: Option<Instant>,
}

impl RequestLatch {
    /// A latch with no pending request and no press ever accepted, so the
    /// first press is always accept-eligible.
    pub const fn new() -> Self {
        Self {
            requested: false,
            last_accepted: None,
        }
    }

    /// Feed one raw button sample. Accepts the press if the refractory
    /// window since the last accepted press has elapsed; otherwise the
    /// sample is ignored.
    pub fn poll(&mut self, now: Instant, pressed: bool) {
        if !pressed {
            return;
        }
        let accept = match self.last_accepted {
            None => true,
            Some(last) => now - last > REFRACTORY,
        };
        if accept {
            #[cfg(feature = "defmt")]
            defmt::debug!("pedestrian request accepted");
            self.requested = true;
            self.last_accepted = Some(now);
        }
    }

    /// Take the pending request, clearing it.
    pub fn consume(&mut self) -> bool {
        core::mem::replace(&mut self.requested, false)
    }
}

impl Default for RequestLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn idle_input_never_latches() {
        let mut latch = RequestLatch::new();
        for ms in (0..600_000).step_by(500) {
            latch.poll(at(ms), false);
        }
        assert!(!latch.consume());
    }

    #[test]
    fn first_press_is_accepted_immediately() {
        let mut latch = RequestLatch::new();
        latch.poll(at(0), true);
        assert!(latch.consume());
        assert!(!latch.consume());
    }

    #[test]
    fn press_inside_the_refractory_window_is_ignored() {
        let mut latch = RequestLatch::new();
        latch.poll(at(0), true);
        assert!(latch.consume());
        latch.poll(at(1999), true);
        assert!(!latch.consume());
    }

    #[test]
    fn press_after_the_refractory_window_is_accepted() {
        let mut latch = RequestLatch::new();
        latch.poll(at(0), true);
        assert!(latch.consume());
        latch.poll(at(2001), true);
        assert!(latch.consume());
    }

    #[test]
    fn held_button_is_rate_limited_to_one_accept_per_window() {
        let mut latch = RequestLatch::new();
        let mut accepted: heapless::Vec<u64, 8> = heapless::Vec::new();
        for ms in 0..10_000 {
            latch.poll(at(ms), true);
            if latch.consume() {
                accepted.push(ms).unwrap();
            }
        }
        assert_eq!(accepted.as_slice(), &[0, 2001, 4002, 6003, 8004]);
    }

    #[test]
    fn request_is_remembered_until_consumed() {
        let mut latch = RequestLatch::new();
        latch.poll(at(0), true);
        for ms in (500..60_000).step_by(500) {
            latch.poll(at(ms), false);
        }
        assert!(latch.consume());
        assert!(!latch.consume());
    }

    #[test]
    fn accepted_press_refreshes_the_window_while_pending() {
        let mut latch = RequestLatch::new();
        latch.poll(at(0), true);
        // Accepted again before the first request was consumed; the window
        // now starts at 2500.
        latch.poll(at(2500), true);
        assert!(latch.consume());
        latch.poll(at(3000), true);
        assert!(!latch.consume());
        latch.poll(at(4600), true);
        assert!(latch.consume());
    }
}
