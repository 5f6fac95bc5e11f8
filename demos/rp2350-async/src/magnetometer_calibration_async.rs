//! Magnetometer hard-iron calibration for the MinIMU-9 on Raspberry Pi Pico 2 (Async version)
//!
//! Rotate the board slowly through every orientation for 30 seconds. A
//! timer task raises the stop flag; the bias found is then written into the
//! LSM303D offset registers.
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
use minimu9::{I2cBus, RawSample, SensorDriver};
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
    info!("MinIMU-9 magnetometer calibration (async)");

    let p = embassy_rp::init(Config::default());

    let mut i2c_config = I2cConfig::default();
    i2c_config.frequency = 400_000;
    let i2c = I2c::new_async(p.I2C0, p.PIN_13, p.PIN_12, Irqs, i2c_config);

    let mut mag = SensorDriver::magnetometer(I2cBus::new(i2c));

    if let Err(e) = mag.verify().await {
        error!("LSM303D not found: {:?}", e);
        loop {
            Timer::after_millis(1000).await;
        }
    }
    if let Err(e) = mag.set_frequency(100.0).await {
        error!("Failed to select magnetometer rate: {:?}", e);
    }
    if let Err(e) = mag.wake().await {
        error!("Failed to wake magnetometer: {:?}", e);
        loop {
            Timer::after_millis(1000).await;
        }
    }
    if let Err(e) = mag.write_offset_registers(RawSample::default()).await {
        warn!("Failed to clear offset registers: {:?}", e);
    }

    info!("Rotate the board through every orientation for 30 seconds...");
    unwrap!(spawner.spawn(stop_after(Duration::from_secs(30))));

    let mut delay = Delay;
    let result = match mag.calibrate(&STOP, &mut delay).await {
        Ok(result) => result,
        Err(e) => {
            error!("Calibration failed: {:?}", e);
            loop {
                Timer::after_millis(1000).await;
            }
        }
    };

    info!("Calibrated over {} samples", result.samples);
    info!(
        "  hard-iron bias [gauss]: x={} y={} z={}",
        result.bias.x, result.bias.y, result.bias.z
    );

    match mag.offload_bias(&result).await {
        Ok(offset) => info!("Offset registers set to {}", offset),
        Err(e) => warn!("Keeping software bias, offset write failed: {:?}", e),
    }

    loop {
        match mag.read().await {
            Ok(reading) => info!(
                "field [gauss] |B|={} ({})",
                reading.vector.magnitude(),
                reading.freshness
            ),
            Err(e) => error!("Read failed: {:?}", e),
        }
        Timer::after_millis(200).await;
    }
}
