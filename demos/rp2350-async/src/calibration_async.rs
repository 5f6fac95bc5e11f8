//! Gyroscope calibration for the MinIMU-9 on Raspberry Pi Pico 2 (Async version)
//!
//! Keep the board still while the gyroscope is sampled. A separate task
//! raises the stop flag after five seconds; the calibration loop awaits a
//! short delay between samples, so that task gets to run.
//!
//! Hardware connections (I2C0):
//! - SDA: GPIO12
//! - SCL: GPIO13
//! - VIN: 3.3V
//! - GND: GND

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::{
    bind_interrupts,
    block::ImageDef,
    config::Config,
    i2c::{Config as I2cConfig, I2c, InterruptHandler as I2cInterruptHandler},
    peripherals::I2C0,
};
use embassy_time::{Delay, Duration, Timer};
use minimu9::{I2cBus, SensorDriver};
use panic_probe as _;

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

// Bind I2C interrupts
bind_interrupts!(struct Irqs {
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

static STOP: AtomicBool = AtomicBool::new(false);

#[embassy_executor::task]
async fn stop_after(duration: Duration) {
    Timer::after(duration).await;
    STOP.store(true, Ordering::Release);
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("MinIMU-9 gyroscope calibration (async)");

    let p = embassy_rp::init(Config::default());

    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_13, p.PIN_12, Irqs, i2c_config);

    let mut gyro = SensorDriver::gyroscope(I2cBus::new(i2c));

    if let Err(e) = gyro.verify().await {
        error!("L3GD20H not found: {:?}", e);
        loop {
            Timer::after_millis(1000).await;
        }
    }
    if let Err(e) = gyro.set_frequency(200.0).await {
        error!("Failed to select gyroscope rate: {:?}", e);
    }
    if let Err(e) = gyro.wake().await {
        error!("Failed to wake gyroscope: {:?}", e);
        loop {
            Timer::after_millis(1000).await;
        }
    }

    info!("Keep the board still for 5 seconds...");
    unwrap!(spawner.spawn(stop_after(Duration::from_secs(5))));

    let mut delay = Delay;
    match gyro.calibrate(&STOP, &mut delay).await {
        Ok(result) => {
            info!("Calibrated over {} samples", result.samples);
            info!(
                "  bias  [dps]: x={} y={} z={}",
                result.bias.x, result.bias.y, result.bias.z
            );
            info!(
                "  noise [dps]: x={} y={} z={}",
                result.range.x, result.range.y, result.range.z
            );
        }
        Err(e) => error!("Calibration failed: {:?}", e),
    }

    loop {
        match gyro.read().await {
            Ok(rate) => info!(
                "gyro [dps] x={} y={} z={}",
                rate.vector.x, rate.vector.y, rate.vector.z
            ),
            Err(e) => error!("Read failed: {:?}", e),
        }
        Timer::after_millis(200).await;
    }
}
