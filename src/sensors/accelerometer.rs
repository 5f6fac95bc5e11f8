//! LSM303D accelerometer tables and configuration
//!
//! Powering the accelerometer down means AODR = 0000, so the rate field
//! doubles as the power switch: sleep clears it and wake rewrites the
//! stored rate.

use super::{ChipConfig, Field, SensorKind, Setting};
use crate::power::{PowerControl, RegisterWrite};
use crate::registers::lsm303d::{
    CTRL1, CTRL2, Ctrl1, Ctrl2, STATUS_A, WHO_AM_I, WHO_AM_I_VALUE,
};
use crate::scale::{ScaleEntry, ScaleTable};

/// Output data rate, Hz (AODR 0001..1010)
pub const FREQUENCY: ScaleTable = ScaleTable::new(&[
    ScaleEntry::rate(3.125, 0x10),
    ScaleEntry::rate(6.25, 0x20),
    ScaleEntry::rate(12.5, 0x30),
    ScaleEntry::rate(25.0, 0x40),
    ScaleEntry::rate(50.0, 0x50),
    ScaleEntry::rate(100.0, 0x60),
    ScaleEntry::rate(200.0, 0x70),
    ScaleEntry::rate(400.0, 0x80),
    ScaleEntry::rate(800.0, 0x90),
    ScaleEntry::rate(1600.0, 0xA0),
]);

/// Full scale, g, with datasheet sensitivities (0.061 .. 0.732 mg/LSB)
pub const FULL_SCALE: ScaleTable = ScaleTable::new(&[
    ScaleEntry::range(2.0, 0x00, 0.000_061),
    ScaleEntry::range(4.0, 0x08, 0.000_122),
    ScaleEntry::range(6.0, 0x10, 0.000_183),
    ScaleEntry::range(8.0, 0x18, 0.000_244),
    ScaleEntry::range(16.0, 0x20, 0.000_732),
]);

/// Anti-alias filter bandwidth, Hz. ABW codes are not monotonic in bandwidth.
pub const ANTI_ALIAS_BANDWIDTH: ScaleTable = ScaleTable::new(&[
    ScaleEntry::rate(50.0, 0xC0),
    ScaleEntry::rate(194.0, 0x40),
    ScaleEntry::rate(362.0, 0x80),
    ScaleEntry::rate(773.0, 0x00),
]);

/// LSM303D accelerometer
pub static LSM303D_ACCELEROMETER: ChipConfig = ChipConfig {
    name: "LSM303D accelerometer",
    kind: SensorKind::Accelerometer,
    who_am_i_register: WHO_AM_I,
    who_am_i_value: WHO_AM_I_VALUE,
    status_register: STATUS_A,
    // Above 100 Hz the readings get noticeably less consistent
    frequency: Setting {
        table: FREQUENCY,
        fields: &[Field::new(CTRL1, Ctrl1::AODR.bits())],
        default: 50.0,
    },
    full_scale: Setting {
        table: FULL_SCALE,
        fields: &[Field::new(CTRL2, Ctrl2::AFS.bits())],
        default: 2.0,
    },
    bandwidth: Some(Setting {
        table: ANTI_ALIAS_BANDWIDTH,
        fields: &[Field::new(CTRL2, Ctrl2::ABW.bits())],
        default: 773.0,
    }),
    power: PowerControl {
        wake: &[RegisterWrite::new(
            CTRL1,
            Ctrl1::AXYZ_EN.bits(),
            Ctrl1::AXYZ_EN.bits(),
        )],
        sleep: &[RegisterWrite::new(CTRL1, Ctrl1::AODR.bits(), 0)],
    },
    offset_register: None,
};
