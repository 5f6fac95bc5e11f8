//! Unit tests for power state handling and read-modify-write preservation

use crate::common::{ACCEL_MAG, GYRO, create_accelerometer, create_gyroscope, create_magnetometer};
use minimu9::PowerState;

#[test]
fn test_new_driver_is_powered_down_without_bus_traffic() {
    let (driver, interface) = create_gyroscope();

    assert_eq!(driver.state(), PowerState::PoweredDown);
    assert!(interface.operations().is_empty());
}

#[test]
fn test_gyro_wake_sets_power_and_defaults() {
    let (mut driver, interface) = create_gyroscope();

    driver.wake().unwrap();

    assert_eq!(driver.state(), PowerState::Active);
    // PD | Zen | Yen | Xen, DR = 00 for 100 Hz
    assert_eq!(interface.get_register(GYRO, 0x20), 0x0F);
    // 245 dps
    assert_eq!(interface.get_register(GYRO, 0x23), 0x00);
    // Normal rate set
    assert_eq!(interface.get_register(GYRO, 0x39), 0x00);
}

#[test]
fn test_gyro_wake_preserves_unrelated_bits() {
    let (mut driver, interface) = create_gyroscope();

    // Bandwidth bits in CTRL1, block data update in CTRL4
    interface.set_register(GYRO, 0x20, 0x30);
    interface.set_register(GYRO, 0x23, 0x80);

    driver.wake().unwrap();

    assert_eq!(interface.get_register(GYRO, 0x20), 0x3F);
    assert_eq!(interface.get_register(GYRO, 0x23), 0x80);
}

#[test]
fn test_gyro_sleep_clears_only_power_bit() {
    let (mut driver, interface) = create_gyroscope();

    interface.set_register(GYRO, 0x20, 0x30);
    driver.wake().unwrap();
    driver.sleep().unwrap();

    assert_eq!(driver.state(), PowerState::PoweredDown);
    assert_eq!(interface.get_register(GYRO, 0x20), 0x37);
}

#[test]
fn test_sleep_wake_cycle_restores_registers() {
    let (mut driver, interface) = create_gyroscope();

    interface.set_register(GYRO, 0x20, 0x30);
    driver.wake().unwrap();
    let awake = interface.get_register(GYRO, 0x20);

    driver.sleep().unwrap();
    driver.wake().unwrap();

    assert_eq!(interface.get_register(GYRO, 0x20), awake);
}

#[test]
fn test_accel_wake_defaults() {
    let (mut driver, interface) = create_accelerometer();

    driver.wake().unwrap();

    // 50 Hz, all axes
    assert_eq!(interface.get_register(ACCEL_MAG, 0x20), 0x57);
    // +/-2 g, 773 Hz anti-alias
    assert_eq!(interface.get_register(ACCEL_MAG, 0x21), 0x00);
}

#[test]
fn test_accel_sleep_clears_rate_and_keeps_axes() {
    let (mut driver, interface) = create_accelerometer();

    driver.wake().unwrap();
    driver.sleep().unwrap();

    assert_eq!(interface.get_register(ACCEL_MAG, 0x20), 0x07);

    driver.wake().unwrap();
    assert_eq!(interface.get_register(ACCEL_MAG, 0x20), 0x57);
}

#[test]
fn test_mag_wake_and_sleep() {
    let (mut driver, interface) = create_magnetometer();

    driver.wake().unwrap();

    // High resolution, 6.25 Hz
    assert_eq!(interface.get_register(ACCEL_MAG, 0x24), 0x64);
    // +/-4 gauss
    assert_eq!(interface.get_register(ACCEL_MAG, 0x25), 0x20);
    // Continuous conversion
    assert_eq!(interface.get_register(ACCEL_MAG, 0x26), 0x00);

    driver.sleep().unwrap();
    assert_eq!(interface.get_register(ACCEL_MAG, 0x26), 0x02);
    // Sleep leaves the rate alone
    assert_eq!(interface.get_register(ACCEL_MAG, 0x24), 0x64);
}

#[test]
fn test_accel_and_mag_share_address_without_clobbering() {
    let interface = crate::common::MockInterface::new();
    let mut accel = minimu9::SensorDriver::accelerometer(interface.clone());
    let mut mag = minimu9::SensorDriver::magnetometer(interface.clone());

    accel.wake().unwrap();
    mag.wake().unwrap();
    mag.sleep().unwrap();

    assert_eq!(interface.get_register(ACCEL_MAG, 0x20), 0x57);
    assert_eq!(accel.state(), PowerState::Active);
    assert_eq!(mag.state(), PowerState::PoweredDown);
}

#[test]
fn test_setters_while_powered_down_only_store() {
    let (mut driver, interface) = create_gyroscope();

    assert!((driver.set_frequency(200.0).unwrap() - 200.0).abs() < f64::EPSILON);
    assert!((driver.set_full_scale(2000.0).unwrap() - 2000.0).abs() < f64::EPSILON);
    assert!(interface.operations().is_empty());

    driver.wake().unwrap();

    assert_eq!(interface.get_register(GYRO, 0x20), 0x4F);
    assert_eq!(interface.get_register(GYRO, 0x23), 0x20);
}

#[test]
fn test_setters_while_active_write_immediately() {
    let (mut driver, interface) = create_gyroscope();

    driver.wake().unwrap();
    interface.clear_operations();

    driver.set_frequency(25.0).unwrap();

    // DR = 01 in CTRL1, LOW_ODR set
    assert_eq!(interface.get_register(GYRO, 0x20), 0x4F);
    assert_eq!(interface.get_register(GYRO, 0x39), 0x01);
    assert_eq!(interface.writes_to(GYRO), vec![(0x20, 0x4F), (0x39, 0x01)]);
}

#[test]
fn test_failed_wake_leaves_configuring() {
    let (mut driver, interface) = create_gyroscope();

    interface.fail_next_write();
    assert!(driver.wake().is_err());
    assert_eq!(driver.state(), PowerState::Configuring);

    // Stored settings are not written while configuring
    interface.clear_operations();
    driver.set_full_scale(500.0).unwrap();
    assert!(interface.operations().is_empty());

    driver.wake().unwrap();
    assert_eq!(driver.state(), PowerState::Active);
    assert_eq!(interface.get_register(GYRO, 0x23), 0x10);
}

#[test]
fn test_failed_setter_write_drops_to_configuring() {
    let (mut driver, interface) = create_gyroscope();

    driver.wake().unwrap();
    interface.fail_next_write();

    assert!(driver.set_full_scale(2000.0).is_err());
    assert_eq!(driver.state(), PowerState::Configuring);
    assert!((driver.full_scale() - 245.0).abs() < f64::EPSILON);

    // Wake rewrites the selection that was last confirmed
    driver.wake().unwrap();
    assert_eq!(interface.get_register(GYRO, 0x23), 0x00);

    driver.set_full_scale(2000.0).unwrap();
    assert_eq!(interface.get_register(GYRO, 0x23), 0x20);
}
