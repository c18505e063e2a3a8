//! pcflcd demo firmware
//!
//! Drives a PCF8576 segment LCD from an RP2040: one readout counts up from
//! -50, the other counts down from 999, and both bars sweep, refreshed
//! every 100 ms. The glass layout comes from board.toml, validated and
//! embedded at build time.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pcflcd_core::config::BoardConfig;
use pcflcd_core::{SegmentLcd, SegmentLcdExt};
use pcflcd_drivers::{HalI2c, Pcf8576};
use pcflcd_hal::I2cConfig;

/// Board image produced by build.rs from board.toml
static BOARD_IMAGE: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/board.bin"));

/// Display refresh period
const REFRESH: Duration = Duration::from_millis(100);

type Lcd = Pcf8576<HalI2c<I2c<'static, I2C0, Blocking>>>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("pcflcd demo starting...");

    let p = embassy_rp::init(Default::default());

    let board = unwrap!(BoardConfig::from_postcard(BOARD_IMAGE));
    info!(
        "Board loaded: {} number group(s), {} bar(s)",
        board.numbers.len(),
        board.bars.len()
    );

    // I2C0 on GP5 (SCL) / GP4 (SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::STANDARD.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let mut lcd = Pcf8576::new(HalI2c::new(i2c), board.chip);
    match lcd.init() {
        Ok(()) => info!("PCF8576 @{=u8:#x} ready", lcd.config().address),
        Err(e) => {
            error!("PCF8576 init failed: {:?}", e);
            return;
        }
    }

    unwrap!(spawner.spawn(counter_task(lcd, board)));
}

/// Demo loop: render every group, then one flush per frame
#[embassy_executor::task]
async fn counter_task(mut lcd: Lcd, board: BoardConfig) {
    let mut large: i32 = -50;
    let mut small: i32 = 999;
    let mut step: usize = 0;

    loop {
        if let Some(number) = board.number("num_large") {
            lcd.render_number(number, large as f64);
        }
        if let Some(number) = board.number("num_small") {
            lcd.render_number(number, small as f64);
        }
        for bar in &board.bars {
            lcd.render_bar(bar, step % (bar.len() + 1));
        }

        // A missed frame is redrawn on the next tick
        if let Err(e) = lcd.flush() {
            warn!("Frame dropped: {:?}", e);
        }

        large += 1;
        small -= 1;
        step += 1;
        Timer::after(REFRESH).await;
    }
}
