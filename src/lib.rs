#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod calibration;
pub mod codec;
pub mod device;
pub mod interface;
pub mod power;
pub mod registers;
pub mod scale;
pub mod sensors;

// Re-export main types
pub use calibration::{CalibrationResult, CancelSignal, RawCalibration};
pub use codec::{Freshness, PhysicalVector, RawSample};
pub use device::{Reading, SensorDriver};
pub use interface::{I2cBus, RegisterBus};
#[cfg(feature = "async")]
pub use interface::AsyncRegisterBus;
pub use power::PowerState;
pub use scale::{ScaleEntry, ScaleSelection, ScaleTable};
pub use sensors::{ChipConfig, SensorKind};

/// L3GD20H I2C address when SA0 is high (default on the MinIMU-9 board: 0x6B)
pub const L3GD20H_ADDRESS_SA0_HIGH: u8 = 0x6B;

/// L3GD20H I2C address when SA0 is pulled low (0x6A)
pub const L3GD20H_ADDRESS_SA0_LOW: u8 = 0x6A;

/// LSM303D I2C address when SA0 is high (default on the MinIMU-9 board: 0x1D)
///
/// The accelerometer and the magnetometer share this address.
pub const LSM303D_ADDRESS_SA0_HIGH: u8 = 0x1D;

/// LSM303D I2C address when SA0 is pulled low (0x1E)
pub const LSM303D_ADDRESS_SA0_LOW: u8 = 0x1E;

/// Driver errors
///
/// Every variant aborts the operation in progress. Data freshness is not an
/// error; see [`Freshness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error on the bus
    Bus(E),
    /// A register block was shorter than required
    ShortBlock {
        /// Number of bytes the decoder needs
        expected: usize,
        /// Number of bytes supplied
        actual: usize,
    },
    /// Unexpected `WHO_AM_I` value (contains the value read)
    InvalidDevice(u8),
    /// The chip does not support the requested setting
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
            Self::ShortBlock { expected, actual } => {
                write!(f, "register block too short: expected {expected} bytes, got {actual}")
            }
            Self::InvalidDevice(id) => write!(f, "unexpected WHO_AM_I value {id:#04x}"),
            Self::InvalidConfig => f.write_str("setting not supported by this chip"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}
