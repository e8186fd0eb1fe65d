//! Audible pedestrian signal sequencer.
//!
//! The pattern is expressed as data and iterated by the controller, which
//! owns the buzzer capability and the clock. Keeping time and outputs
//! outside this module keeps the pattern itself testable.

use embassy_time::Duration;

/// One step of the audible pattern: drive the buzzers to `active` and hold
/// for `hold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeepStep {
    pub active: bool,
    pub hold: Duration,
}

/// The fixed on/off buzzer pattern played once per entry into the
/// pedestrian phase. Not cancellable once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudibleSequencer {
    cycles: u8,
    active: Duration,
    quiet: Duration,
}

impl AudibleSequencer {
    /// Standard crossing pattern: five 1 s beeps separated by 1 s of
    /// silence, 10 s in total.
    pub const fn standard() -> Self {
        Self {
            cycles: 5,
            active: Duration::from_millis(1000),
            quiet: Duration::from_millis(1000),
        }
    }

    /// Total duration of one run of the pattern.
    pub fn total(&self) -> Duration {
        (self.active + self.quiet) * u32::from(self.cycles)
    }

    /// The steps of one run, in order: buzzers on, then off, repeated.
    pub fn steps(&self) -> impl Iterator<Item = BeepStep> + '_ {
        (0..u16::from(self.cycles) * 2).map(|i| {
            if i % 2 == 0 {
                BeepStep {
                    active: true,
                    hold: self.active,
                }
            } else {
                BeepStep {
                    active: false,
                    hold: self.quiet,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pattern_is_five_beeps() {
        let sequencer = AudibleSequencer::standard();
        let steps: heapless::Vec<BeepStep, 16> = sequencer.steps().collect();

        assert_eq!(steps.len(), 10);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.active, i % 2 == 0);
            assert_eq!(step.hold, Duration::from_millis(1000));
        }
    }

    #[test]
    fn standard_pattern_blocks_for_ten_seconds() {
        let sequencer = AudibleSequencer::standard();
        let total: Duration = sequencer
            .steps()
            .fold(Duration::from_ticks(0), |sum, step| sum + step.hold);

        assert_eq!(total, Duration::from_millis(10_000));
        assert_eq!(total, sequencer.total());
    }
}
