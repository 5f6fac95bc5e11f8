//! Integration tests for basic workflow scenarios

use crate::common::{ACCEL_MAG, CancelAfter, GYRO, MockDelay, MockInterface, assert_float_eq};
use minimu9::{Freshness, PowerState, SensorDriver, SensorKind};

#[test]
fn test_complete_board_workflow() {
    // One bus shared by all three roles
    let interface = MockInterface::new();
    let mut gyro = SensorDriver::gyroscope(interface.clone());
    let mut accel = SensorDriver::accelerometer(interface.clone());
    let mut mag = SensorDriver::magnetometer(interface.clone());

    gyro.verify().unwrap();
    accel.verify().unwrap();
    mag.verify().unwrap();

    gyro.set_full_scale(500.0).unwrap();
    accel.set_frequency(100.0).unwrap();
    mag.set_frequency(25.0).unwrap();

    gyro.wake().unwrap();
    accel.wake().unwrap();
    mag.wake().unwrap();

    interface.set_sample(GYRO, 0x27, 100, 0, -100);
    interface.set_sample(ACCEL_MAG, 0x27, 0, 0, 16393);
    interface.set_sample(ACCEL_MAG, 0x07, 2500, 0, 0);

    let rate = gyro.read().unwrap();
    assert_eq!(rate.freshness, Freshness::Fresh);
    assert_float_eq(rate.vector.x, 1.75, 1e-9);
    assert_float_eq(rate.vector.z, -1.75, 1e-9);

    let acceleration = accel.read().unwrap();
    assert_float_eq(acceleration.vector.z, 1.0, 1e-3);

    let field = mag.read().unwrap();
    assert_float_eq(field.vector.x, 0.4, 1e-9);

    gyro.sleep().unwrap();
    accel.sleep().unwrap();
    mag.sleep().unwrap();
    assert_eq!(gyro.state(), PowerState::PoweredDown);
}

#[test]
fn test_calibrate_then_read_workflow() {
    let interface = MockInterface::new();
    let mut gyro = SensorDriver::gyroscope(interface.clone());
    gyro.wake().unwrap();

    // Held still: small noise band around a zero-rate offset of (40, -20, 8)
    interface.set_sample_sequence(
        GYRO,
        0x27,
        vec![[42, -18, 8], [38, -22, 10], [40, -20, 6], [41, -21, 8]],
    );
    let cancel = CancelAfter::new(&interface, GYRO, 0x27, 8);
    let result = gyro.calibrate(&cancel, &mut MockDelay::default()).unwrap();

    assert_eq!(result.samples, 8);
    assert_float_eq(result.bias.x, 40.0 * 0.008_75, 1e-9);
    assert_float_eq(result.bias.y, -20.0 * 0.008_75, 1e-9);
    assert_float_eq(result.bias.z, 8.0 * 0.008_75, 1e-9);
    assert_float_eq(result.range.x, 4.0 * 0.008_75, 1e-9);

    interface.set_sample_sequence(GYRO, 0x27, vec![[40, -20, 8]]);
    let reading = gyro.read().unwrap();
    assert_float_eq(reading.vector.magnitude(), 0.0, 1e-9);
}

#[test]
fn test_release_returns_bus() {
    let interface = MockInterface::new();
    let gyro = SensorDriver::gyroscope(interface.clone());

    assert_eq!(gyro.chip().kind, SensorKind::Gyroscope);
    assert_eq!(gyro.chip().kind.unit(), "dps");

    let released = gyro.release();
    released.set_register(GYRO, 0x20, 0xAA);
    assert_eq!(interface.get_register(GYRO, 0x20), 0xAA);
}

#[test]
fn test_driver_by_mutable_reference() {
    let mut interface = MockInterface::new();
    {
        let mut gyro = SensorDriver::gyroscope(&mut interface);
        gyro.wake().unwrap();
    }
    assert_eq!(interface.get_register(GYRO, 0x20), 0x0F);
}
