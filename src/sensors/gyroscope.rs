//! L3GD20H gyroscope tables and configuration
//!
//! The output data rate is split across two registers: `LOW_ODR` selects
//! between the low (12.5/25/50 Hz) and the normal (100..800 Hz) rate set,
//! and `CTRL1` DR\[7:6\] picks the rate within the set. Codes below carry
//! DR in bits 7:6 and `LOW_ODR` in bit 0.

use super::{ChipConfig, Field, SensorKind, Setting};
use crate::power::{PowerControl, RegisterWrite};
use crate::registers::l3gd20h::{
    CTRL1, CTRL4, Ctrl1, Ctrl4, LOW_ODR, LowOdr, STATUS, WHO_AM_I, WHO_AM_I_VALUE,
};
use crate::scale::{ScaleEntry, ScaleTable};

/// Output data rate, Hz
pub const FREQUENCY: ScaleTable = ScaleTable::new(&[
    ScaleEntry::rate(12.5, 0x01),
    ScaleEntry::rate(25.0, 0x41),
    ScaleEntry::rate(50.0, 0x81),
    ScaleEntry::rate(100.0, 0x00),
    ScaleEntry::rate(200.0, 0x40),
    ScaleEntry::rate(400.0, 0x80),
    ScaleEntry::rate(800.0, 0xC0),
]);

/// Full scale, °/s, with datasheet sensitivities (8.75 / 17.5 / 70 mdps/LSB)
pub const FULL_SCALE: ScaleTable = ScaleTable::new(&[
    ScaleEntry::range(245.0, 0x00, 0.008_75),
    ScaleEntry::range(500.0, 0x10, 0.0175),
    ScaleEntry::range(2000.0, 0x20, 0.070),
]);

/// L3GD20H gyroscope
pub static L3GD20H_GYROSCOPE: ChipConfig = ChipConfig {
    name: "L3GD20H gyroscope",
    kind: SensorKind::Gyroscope,
    who_am_i_register: WHO_AM_I,
    who_am_i_value: WHO_AM_I_VALUE,
    status_register: STATUS,
    frequency: Setting {
        table: FREQUENCY,
        fields: &[
            Field::new(CTRL1, Ctrl1::DR.bits()),
            Field::new(LOW_ODR, LowOdr::LOW_ODR.bits()),
        ],
        default: 100.0,
    },
    full_scale: Setting {
        table: FULL_SCALE,
        fields: &[Field::new(CTRL4, Ctrl4::FS.bits())],
        default: 245.0,
    },
    bandwidth: None,
    power: PowerControl {
        // Normal mode, all axes on
        wake: &[RegisterWrite::new(
            CTRL1,
            Ctrl1::PD.union(Ctrl1::XYZ_EN).bits(),
            Ctrl1::PD.union(Ctrl1::XYZ_EN).bits(),
        )],
        // Power-down rather than sleep: lower consumption, slower wake
        sleep: &[RegisterWrite::new(CTRL1, Ctrl1::PD.bits(), 0)],
    },
    offset_register: None,
};
