//! Per-chip configuration records
//!
//! Each sensor role on the MinIMU-9 is described by one static
//! [`ChipConfig`]:
//! - Gyroscope (L3GD20H)
//! - Accelerometer (LSM303D)
//! - Magnetometer (LSM303D)
//!
//! The generic [`SensorDriver`](crate::SensorDriver) reads everything
//! chip-specific from these records.

pub mod accelerometer;
pub mod gyroscope;
pub mod magnetometer;

pub use accelerometer::LSM303D_ACCELEROMETER;
pub use gyroscope::L3GD20H_GYROSCOPE;
pub use magnetometer::LSM303D_MAGNETOMETER;

use crate::power::PowerControl;
use crate::scale::ScaleTable;

/// Physical quantity a sensor role measures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorKind {
    /// Angular rate in °/s
    Gyroscope,
    /// Linear acceleration in g
    Accelerometer,
    /// Magnetic field in gauss
    Magnetometer,
}

impl SensorKind {
    /// Unit of the physical readings
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Gyroscope => "dps",
            Self::Accelerometer => "g",
            Self::Magnetometer => "gauss",
        }
    }
}

/// Register field written with the code of a selected setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Register address
    pub register: u8,
    /// Bits of the code that belong in this register
    pub mask: u8,
}

impl Field {
    /// Create a field description
    #[must_use]
    pub const fn new(register: u8, mask: u8) -> Self {
        Self { register, mask }
    }
}

/// A configurable quantity: its table, where its code goes, and its default
///
/// A code may span several registers (the L3GD20H rate is split between
/// `CTRL1` and `LOW_ODR`); each [`Field`] takes the code bits under its mask.
#[derive(Debug, Clone, Copy)]
pub struct Setting {
    /// Supported values, ascending
    pub table: ScaleTable,
    /// Registers receiving the code
    pub fields: &'static [Field],
    /// Value requested when the driver is created
    pub default: f64,
}

/// Everything the generic driver needs to know about one chip role
#[derive(Debug, Clone, Copy)]
pub struct ChipConfig {
    /// Human-readable chip and role name
    pub name: &'static str,
    /// Quantity measured
    pub kind: SensorKind,
    /// Identification register address
    pub who_am_i_register: u8,
    /// Expected identification value
    pub who_am_i_value: u8,
    /// Status register; the X/Y/Z output block follows it directly
    pub status_register: u8,
    /// Output data rate (Hz)
    pub frequency: Setting,
    /// Full scale, in the sensor's physical unit
    pub full_scale: Setting,
    /// Anti-alias filter bandwidth (Hz), if the chip has one
    pub bandwidth: Option<Setting>,
    /// Power-control writes
    pub power: PowerControl,
    /// First register of an on-chip offset block, if the chip has one
    pub offset_register: Option<u8>,
}
