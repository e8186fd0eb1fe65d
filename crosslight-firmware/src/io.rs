/*
 * The I/O module for the crossing controller.
 *
 * This module is the only part of the program that is device-specific. It
 * owns all output lines and implements a task that drives them: other
 * tasks command the signal heads and the buzzers through channels. The
 * push buttons are plain pull-up inputs sampled by the control task, and
 * the active-low resolution happens here, so that the control logic only
 * ever sees easy to understand `true` for pressed.
 */

use crosslight_core::signal::{PedestrianColor, SignalConfig, VehicleColor};
use crosslight_core::traits::{AudibleOutput, Clock, RequestInput, SignalOutput};
use embassy_futures::select::{Either, select};
use embassy_stm32::gpio::{Input, Level, Output};
use embassy_sync::{
    blocking_mutex::raw::ThreadModeRawMutex,
    channel::{Receiver, Sender},
};
use embassy_time::{Duration, Instant, Timer};
use enum_ordinalize::Ordinalize;

pub const CHANNEL_CAPACITY: usize = 4;

/// One physical output line. Ordinals index into [`OutputLines`].
#[derive(Ordinalize, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Line {
    // Main approach head plus its left-turn head.
    MainRed,
    MainYellow,
    MainGreen,
    LeftTurnRed,
    LeftTurnYellow,
    LeftTurnGreen,

    // Side approach head.
    SideRed,
    SideYellow,
    SideGreen,

    // The two pedestrian crossing heads.
    PedMainRed,
    PedMainGreen,
    PedSideRed,
    PedSideGreen,

    // One buzzer per crossing; always driven together.
    MainBuzzer,
    SideBuzzer,
}

/// All output lines of the board, indexed by `Line` ordinal.
pub struct OutputLines {
    lines: [Output<'static>; Line::VARIANT_COUNT],
}

impl OutputLines {
    pub fn new(lines: [Output<'static>; Line::VARIANT_COUNT]) -> Self {
        Self { lines }
    }

    fn set(&mut self, line: Line, active: bool) {
        self.lines[line.ordinal()].set_level(if active { Level::High } else { Level::Low });
    }

    /*
     * For each head, the lines that must go inactive drop before the line
     * for the commanded color rises, so a transition never shows two
     * colors of one head at once.
     */
    fn apply(&mut self, config: &SignalConfig) {
        self.set_vehicle_head(Line::MainRed, Line::MainYellow, Line::MainGreen, config.main);
        self.set_vehicle_head(
            Line::LeftTurnRed,
            Line::LeftTurnYellow,
            Line::LeftTurnGreen,
            config.left_turn,
        );
        self.set_vehicle_head(Line::SideRed, Line::SideYellow, Line::SideGreen, config.side);
        self.set_pedestrian_head(Line::PedMainRed, Line::PedMainGreen, config.ped_main);
        self.set_pedestrian_head(Line::PedSideRed, Line::PedSideGreen, config.ped_side);
    }

    fn set_vehicle_head(&mut self, red: Line, yellow: Line, green: Line, color: VehicleColor) {
        let active = match color {
            VehicleColor::Red => red,
            VehicleColor::Yellow => yellow,
            VehicleColor::Green => green,
        };
        for line in [red, yellow, green] {
            if line != active {
                self.set(line, false);
            }
        }
        self.set(active, true);
    }

    fn set_pedestrian_head(&mut self, red: Line, green: Line, color: PedestrianColor) {
        let active = match color {
            PedestrianColor::Red => red,
            PedestrianColor::Green => green,
        };
        for line in [red, green] {
            if line != active {
                self.set(line, false);
            }
        }
        self.set(active, true);
    }

    fn set_buzzers(&mut self, on: bool) {
        self.set(Line::MainBuzzer, on);
        self.set(Line::SideBuzzer, on);
    }
}

#[embassy_executor::task]
pub async fn io_task(
    mut lines: OutputLines,
    configs: Receiver<'static, ThreadModeRawMutex, SignalConfig, CHANNEL_CAPACITY>,
    buzzers: Receiver<'static, ThreadModeRawMutex, bool, CHANNEL_CAPACITY>,
) -> ! {
    loop {
        match select(configs.receive(), buzzers.receive()).await {
            Either::First(config) => lines.apply(&config),
            Either::Second(on) => lines.set_buzzers(on),
        }
    }
}

/// Signal head capability over the config channel into the I/O task.
pub struct SignalSender {
    sender: Sender<'static, ThreadModeRawMutex, SignalConfig, CHANNEL_CAPACITY>,
}

impl SignalSender {
    pub fn new(sender: Sender<'static, ThreadModeRawMutex, SignalConfig, CHANNEL_CAPACITY>) -> Self {
        Self { sender }
    }
}

impl SignalOutput for SignalSender {
    async fn apply(&mut self, config: &SignalConfig) {
        self.sender.send(*config).await;
    }
}

/// Buzzer capability over the buzzer channel into the I/O task.
pub struct BuzzerSender {
    sender: Sender<'static, ThreadModeRawMutex, bool, CHANNEL_CAPACITY>,
}

impl BuzzerSender {
    pub fn new(sender: Sender<'static, ThreadModeRawMutex, bool, CHANNEL_CAPACITY>) -> Self {
        Self { sender }
    }
}

impl AudibleOutput for BuzzerSender {
    async fn set_active(&mut self, on: bool) {
        self.sender.send(on).await;
    }
}

/// The two pedestrian push buttons, one per crossing. Pull-up inputs; a
/// pressed button shorts its line to ground, so pressed reads as
/// electrically low. Either button is a request.
pub struct CrossingButtons {
    main: Input<'static>,
    side: Input<'static>,
}

impl CrossingButtons {
    pub fn new(main: Input<'static>, side: Input<'static>) -> Self {
        Self { main, side }
    }
}

impl RequestInput for CrossingButtons {
    fn is_pressed(&mut self) -> bool {
        self.main.is_low() || self.side.is_low()
    }
}

/// Clock capability over the embassy time driver.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&mut self, duration: Duration) {
        Timer::after(duration).await;
    }
}
