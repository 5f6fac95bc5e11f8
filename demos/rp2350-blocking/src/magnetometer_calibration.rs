//! Magnetometer hard-iron calibration for the MinIMU-9 on Raspberry Pi Pico 2 (Blocking version)
//!
//! Rotate the board slowly through every orientation for 30 seconds. The
//! blocking calibration loop runs on core 0; core 1 acts as the timer and
//! raises a shared `AtomicBool` when time is up. The resulting bias is then
//! moved into the LSM303D offset registers, so the chip itself corrects
//! every later sample.
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
    block::ImageDef,
    config::Config,
    i2c::{Config as I2cConfig, I2c},
    multicore::{spawn_core1, Stack},
};
use embassy_time::{Delay, Duration};
use minimu9::{I2cBus, SensorDriver};
use panic_probe as _;

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

const CALIBRATION_TIME: Duration = Duration::from_secs(30);

static mut CORE1_STACK: Stack<4096> = Stack::new();
static STOP: AtomicBool = AtomicBool::new(false);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("MinIMU-9 magnetometer calibration");

    let p = embassy_rp::init(Config::default());

    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config);

    let mut mag = SensorDriver::magnetometer(I2cBus::new(i2c));

    if let Err(e) = mag.verify() {
        error!("LSM303D not found: {:?}", e);
        loop {
            embassy_time::block_for(Duration::from_millis(1000));
        }
    }
    if let Err(e) = mag.set_frequency(100.0) {
        error!("Failed to select magnetometer rate: {:?}", e);
    }
    if let Err(e) = mag.wake() {
        error!("Failed to wake magnetometer: {:?}", e);
        loop {
            embassy_time::block_for(Duration::from_millis(1000));
        }
    }

    // Start from a clean slate so the window sees the uncorrected field
    if let Err(e) = mag.write_offset_registers(minimu9::RawSample::default()) {
        warn!("Failed to clear offset registers: {:?}", e);
    }

    info!("Rotate the board through every orientation for 30 seconds...");
    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            embassy_time::block_for(CALIBRATION_TIME);
            STOP.store(true, Ordering::Release);
            loop {
                cortex_m::asm::wfe();
            }
        },
    );

    let mut delay = Delay;
    let result = match mag.calibrate(&STOP, &mut delay) {
        Ok(result) => result,
        Err(e) => {
            error!("Calibration failed: {:?}", e);
            loop {
                embassy_time::block_for(Duration::from_millis(1000));
            }
        }
    };

    info!("Calibrated over {} samples", result.samples);
    info!(
        "  hard-iron bias [gauss]: x={} y={} z={}",
        result.bias.x, result.bias.y, result.bias.z
    );
    info!(
        "  field span     [gauss]: x={} y={} z={}",
        result.range.x, result.range.y, result.range.z
    );

    match mag.offload_bias(&result) {
        Ok(offset) => info!("Offset registers set to {}", offset),
        Err(e) => warn!("Keeping software bias, offset write failed: {:?}", e),
    }

    loop {
        match mag.read() {
            Ok(reading) => info!(
                "field [gauss] x={} y={} z={} |B|={}",
                reading.vector.x,
                reading.vector.y,
                reading.vector.z,
                reading.vector.magnitude()
            ),
            Err(e) => error!("Read failed: {:?}", e),
        }
        embassy_time::block_for(Duration::from_millis(200));
    }
}
