#![no_std]
#![no_main]

use crosslight_core::Controller;
use crosslight_core::signal::SignalConfig;
use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pin, Pull, Speed};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::Channel;
use {defmt_rtt as _, panic_probe as _};

mod io;
use io::{BuzzerSender, CHANNEL_CAPACITY, CrossingButtons, OutputLines, SignalSender, SystemClock};

static SIGNALS: Channel<ThreadModeRawMutex, SignalConfig, CHANNEL_CAPACITY> = Channel::new();
static BUZZERS: Channel<ThreadModeRawMutex, bool, CHANNEL_CAPACITY> = Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let peripherals = embassy_stm32::init(Default::default());
    info!("crossing controller starting");

    // Order matches the `Line` ordinals. Red lines come up active so the
    // intersection is all-red until the first phase entry.
    let lines = OutputLines::new([
        Output::new(peripherals.PE1.degrade(), Level::High, Speed::Low), // main red
        Output::new(peripherals.PB9.degrade(), Level::Low, Speed::Low),  // main yellow
        Output::new(peripherals.PB7.degrade(), Level::Low, Speed::Low),  // main green
        Output::new(peripherals.PE2.degrade(), Level::High, Speed::Low), // left-turn red
        Output::new(peripherals.PE3.degrade(), Level::Low, Speed::Low),  // left-turn yellow
        Output::new(peripherals.PE4.degrade(), Level::Low, Speed::Low),  // left-turn green
        Output::new(peripherals.PB6.degrade(), Level::High, Speed::Low), // side red
        Output::new(peripherals.PB8.degrade(), Level::Low, Speed::Low),  // side yellow
        Output::new(peripherals.PE0.degrade(), Level::Low, Speed::Low),  // side green
        Output::new(peripherals.PE5.degrade(), Level::High, Speed::Low), // ped main red
        Output::new(peripherals.PE6.degrade(), Level::Low, Speed::Low),  // ped main green
        Output::new(peripherals.PE7.degrade(), Level::High, Speed::Low), // ped side red
        Output::new(peripherals.PE8.degrade(), Level::Low, Speed::Low),  // ped side green
        Output::new(peripherals.PE9.degrade(), Level::Low, Speed::Low),  // main buzzer
        Output::new(peripherals.PE10.degrade(), Level::Low, Speed::Low), // side buzzer
    ]);
    spawner
        .spawn(io::io_task(lines, SIGNALS.receiver(), BUZZERS.receiver()))
        .unwrap();

    let buttons = CrossingButtons::new(
        Input::new(peripherals.PE11, Pull::Up),
        Input::new(peripherals.PE13, Pull::Up),
    );

    let mut controller = Controller::new(
        SignalSender::new(SIGNALS.sender()),
        buttons,
        BuzzerSender::new(BUZZERS.sender()),
        SystemClock,
    );
    controller.run().await
}
