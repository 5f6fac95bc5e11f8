//! Gyroscope calibration for the MinIMU-9 on Raspberry Pi Pico 2 (Blocking version)
//!
//! Keep the board still while the gyroscope is sampled for five seconds.
//! The calibration loop has no duration of its own: it stops when its
//! cancel signal fires, here a deadline checked against the embassy clock.
//! The accelerometer shares the same I2C bus through `RefCellDevice`.
//!
//! Hardware connections (I2C0):
//! - SDA: GPIO12
//! - SCL: GPIO13
//! - VIN: 3.3V
//! - GND: GND

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::{
    block::ImageDef,
    config::Config,
    i2c::{Config as I2cConfig, I2c},
};
use embassy_time::{Delay, Duration, Instant};
use embedded_hal_bus::i2c::RefCellDevice;
use minimu9::{CancelSignal, I2cBus, SensorDriver};
use panic_probe as _;

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Cancels once the clock passes a fixed instant
struct Deadline(Instant);

impl CancelSignal for Deadline {
    fn is_cancelled(&self) -> bool {
        Instant::now() >= self.0
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("MinIMU-9 gyroscope calibration");

    let p = embassy_rp::init(Config::default());

    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = RefCell::new(I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config));

    let mut gyro = SensorDriver::gyroscope(I2cBus::new(RefCellDevice::new(&i2c)));
    let mut accel = SensorDriver::accelerometer(I2cBus::new(RefCellDevice::new(&i2c)));

    if let Err(e) = gyro.verify() {
        error!("L3GD20H not found: {:?}", e);
        loop {
            embassy_time::block_for(Duration::from_millis(1000));
        }
    }

    if let Err(e) = gyro.set_frequency(200.0) {
        error!("Failed to select gyroscope rate: {:?}", e);
    }
    if let Err(e) = gyro.wake() {
        error!("Failed to wake gyroscope: {:?}", e);
        loop {
            embassy_time::block_for(Duration::from_millis(1000));
        }
    }
    if let Err(e) = accel.wake() {
        warn!("Failed to wake accelerometer: {:?}", e);
    }

    info!("Keep the board still for 5 seconds...");
    let deadline = Deadline(Instant::now() + Duration::from_secs(5));
    let mut delay = Delay;

    match gyro.calibrate(&deadline, &mut delay) {
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
        match (gyro.read(), accel.read()) {
            (Ok(rate), Ok(sample)) => info!(
                "gyro [dps] x={} y={} z={}  accel [g] |a|={}",
                rate.vector.x,
                rate.vector.y,
                rate.vector.z,
                sample.vector.magnitude()
            ),
            (Err(e), _) | (_, Err(e)) => error!("Read failed: {:?}", e),
        }
        embassy_time::block_for(Duration::from_millis(200));
    }
}
