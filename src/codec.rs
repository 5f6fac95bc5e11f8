//! Register block encoding and decoding
//!
//! The chips report each measurement as a status byte followed by three
//! signed 16-bit little-endian values in X, Y, Z order. This module turns
//! those bytes into [`RawSample`]s and [`Freshness`] verdicts; it performs
//! no I/O.

use crate::Error;
use crate::registers::StatusFlags;

/// Size of an X/Y/Z output block in bytes
pub const VECTOR_BLOCK_LEN: usize = 6;

/// Raw sensor counts for the three axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X-axis (raw)
    pub x: i16,
    /// Y-axis (raw)
    pub y: i16,
    /// Z-axis (raw)
    pub z: i16,
}

impl RawSample {
    /// Create a sample from its three axes
    #[must_use]
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode a little-endian X/Y/Z block
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; VECTOR_BLOCK_LEN]) -> Self {
        Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            z: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Encode as a little-endian X/Y/Z block
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; VECTOR_BLOCK_LEN] {
        let [x_l, x_h] = self.x.to_le_bytes();
        let [y_l, y_h] = self.y.to_le_bytes();
        let [z_l, z_h] = self.z.to_le_bytes();
        [x_l, x_h, y_l, y_h, z_l, z_h]
    }

    /// Axes as an array, X first
    #[must_use]
    pub const fn to_array(self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }

    /// Per-axis sum, clamped to the `i16` range
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
            z: self.z.saturating_add(other.z),
        }
    }

    /// Convert to physical units by multiplying every axis by `ratio`
    #[must_use]
    pub fn scaled(self, ratio: f64) -> PhysicalVector {
        PhysicalVector {
            x: f64::from(self.x) * ratio,
            y: f64::from(self.y) * ratio,
            z: f64::from(self.z) * ratio,
        }
    }
}

/// Three axes in physical units (°/s, g or gauss depending on the sensor)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhysicalVector {
    /// X-axis
    pub x: f64,
    /// Y-axis
    pub y: f64,
    /// Z-axis
    pub z: f64,
}

impl PhysicalVector {
    /// The zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector from its three axes
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the vector
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        libm::sqrt(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

impl core::ops::Sub for PhysicalVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Freshness of a sample, decoded from the chip's status byte
///
/// `Overrun` and `Stale` are advisories: the sample is still returned and
/// usable, but the poll rate and the configured output data rate disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Freshness {
    /// A new sample was available and nothing was lost
    Fresh,
    /// A new sample overwrote one that was never read (polling too slowly)
    Overrun,
    /// No new sample since the last read (polling faster than the output data rate)
    Stale,
}

impl Freshness {
    /// Interpret a status byte
    ///
    /// The high nibble carries the per-axis overrun flags and the low nibble
    /// the data-available flags. Overrun wins over data-available.
    #[must_use]
    pub const fn from_status(status: u8) -> Self {
        let flags = StatusFlags::from_bits_retain(status);
        if flags.intersects(StatusFlags::OVERRUN) {
            Self::Overrun
        } else if flags.intersects(StatusFlags::DATA_AVAILABLE) {
            Self::Fresh
        } else {
            Self::Stale
        }
    }

    /// `true` for [`Freshness::Fresh`]
    #[must_use]
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// Decode the first six bytes of `bytes` as an X/Y/Z sample
///
/// # Errors
///
/// Returns [`Error::ShortBlock`] if fewer than six bytes are supplied.
pub fn decode_vector<E>(bytes: &[u8]) -> Result<RawSample, Error<E>> {
    match bytes.first_chunk::<VECTOR_BLOCK_LEN>() {
        Some(block) => Ok(RawSample::from_le_bytes(*block)),
        None => Err(Error::ShortBlock {
            expected: VECTOR_BLOCK_LEN,
            actual: bytes.len(),
        }),
    }
}

/// Decode a status byte and the X/Y/Z block that follows it
///
/// # Errors
///
/// Returns [`Error::ShortBlock`] if fewer than six data bytes are supplied.
pub fn decode_status_and_vector<E>(
    status: u8,
    bytes: &[u8],
) -> Result<(RawSample, Freshness), Error<E>> {
    let sample = decode_vector(bytes)?;
    Ok((sample, Freshness::from_status(status)))
}

/// Encode a sample as a six-byte little-endian block
#[must_use]
pub const fn encode_vector(sample: RawSample) -> [u8; VECTOR_BLOCK_LEN] {
    sample.to_le_bytes()
}
