//! LSM303D magnetometer tables and configuration
//!
//! The magnetometer is the only role with on-chip offset registers
//! (`OFFSET_X_L_M`..`OFFSET_Z_H_M`), which the chip subtracts from its
//! output in raw counts.

use super::{ChipConfig, Field, SensorKind, Setting};
use crate::power::{PowerControl, RegisterWrite};
use crate::registers::lsm303d::{
    CTRL5, CTRL6, CTRL7, Ctrl5, Ctrl6, Ctrl7, OFFSET_X_L_M, STATUS_M, WHO_AM_I, WHO_AM_I_VALUE,
};
use crate::scale::{ScaleEntry, ScaleTable};

/// Output data rate, Hz (M_ODR 000..101)
///
/// 100 Hz is only available while the accelerometer runs above 50 Hz or is
/// powered down.
pub const FREQUENCY: ScaleTable = ScaleTable::new(&[
    ScaleEntry::rate(3.125, 0x00),
    ScaleEntry::rate(6.25, 0x04),
    ScaleEntry::rate(12.5, 0x08),
    ScaleEntry::rate(25.0, 0x0C),
    ScaleEntry::rate(50.0, 0x10),
    ScaleEntry::rate(100.0, 0x14),
]);

/// Full scale, gauss, with datasheet sensitivities (0.080 .. 0.479 mgauss/LSB)
pub const FULL_SCALE: ScaleTable = ScaleTable::new(&[
    ScaleEntry::range(2.0, 0x00, 0.000_080),
    ScaleEntry::range(4.0, 0x20, 0.000_160),
    ScaleEntry::range(8.0, 0x40, 0.000_320),
    ScaleEntry::range(12.0, 0x60, 0.000_479),
]);

/// LSM303D magnetometer
pub static LSM303D_MAGNETOMETER: ChipConfig = ChipConfig {
    name: "LSM303D magnetometer",
    kind: SensorKind::Magnetometer,
    who_am_i_register: WHO_AM_I,
    who_am_i_value: WHO_AM_I_VALUE,
    status_register: STATUS_M,
    frequency: Setting {
        table: FREQUENCY,
        fields: &[Field::new(CTRL5, Ctrl5::M_ODR.bits())],
        default: 6.25,
    },
    full_scale: Setting {
        table: FULL_SCALE,
        fields: &[Field::new(CTRL6, Ctrl6::MFS.bits())],
        default: 4.0,
    },
    bandwidth: None,
    power: PowerControl {
        wake: &[
            // High resolution
            RegisterWrite::new(CTRL5, Ctrl5::M_RES.bits(), Ctrl5::M_RES.bits()),
            // Low-power mode off, continuous conversion
            RegisterWrite::new(
                CTRL7,
                Ctrl7::MLP.union(Ctrl7::MD).bits(),
                Ctrl7::empty().bits(),
            ),
        ],
        sleep: &[RegisterWrite::new(
            CTRL7,
            Ctrl7::MD.bits(),
            Ctrl7::MD_POWER_DOWN.bits(),
        )],
    },
    offset_register: Some(OFFSET_X_L_M),
};
