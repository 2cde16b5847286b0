//! tank-gauge firmware entry point.
//!
//! One task, one loop: every `TICK_MS` the buttons are sampled and
//! dispatched, settings changes are flushed to flash, the current screen
//! is painted and a fresh distance sample is taken for the next frame.

#![no_std]
#![no_main]

use defmt::{info, warn};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use tank_gauge::config::{INPUT_MODE, TICK_MS};
use tank_gauge::sensor::hcsr04::Hcsr04;
use tank_gauge::storage::flash::FlashEeprom;
use tank_gauge::ui::buttons::ButtonPins;
use tank_gauge::ui::display;
use tank_gauge::{Controller, Error};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("tank-gauge starting");

    // - Display ----------------------------------------------
    let mut twi_config = twim::Config::default();
    twi_config.frequency = twim::Frequency::K400;
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twi_config);
    let mut oled = display::init(i2c);

    // - Inputs -----------------------------------------------
    let buttons = ButtonPins::new(
        p.P0_11.degrade(),
        p.P0_12.degrade(),
        p.P0_24.degrade(),
        p.P0_25.degrade(),
        p.P0_13.degrade(),
    );
    let sonar = Hcsr04::new(
        Output::new(p.P0_03, Level::Low, OutputDrive::Standard),
        Input::new(p.P0_04, Pull::None),
    );

    // - Settings ---------------------------------------------
    let flash = FlashEeprom::load(BlockingAsync::new(Nvmc::new(p.NVMC))).await;
    let mut gauge = Controller::boot(flash, sonar, INPUT_MODE);

    // First frame needs a reading before any button is pressed.
    gauge.sample_distance().await;

    loop {
        gauge
            .handle_buttons(buttons.sample(), Instant::now().as_millis())
            .await;

        if let Err(e) = gauge.storage_mut().sync().await {
            warn!("Settings not flushed: {:?}", Error::from(e));
        }

        if let Err(e) = display::present(&mut oled, &gauge.snapshot()) {
            warn!("Frame dropped: {:?}", e);
        }

        gauge.sample_distance().await;
        Timer::after_millis(TICK_MS).await;
    }
}
