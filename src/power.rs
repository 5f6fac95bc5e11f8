//! Power state tracking and power-control register writes
//!
//! Sleeping and waking a sensor only touches its power bits. Every write is
//! a masked read-modify-write, so other fields that share the control
//! register (bandwidth, block data update, filter settings) survive a
//! sleep/wake cycle.

/// Logical power state of a sensor driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Powered down; setting changes are stored and applied on wake
    PoweredDown,
    /// A wake sequence was started but did not complete (a bus write failed).
    /// Setting changes are stored; call `wake()` again to finish.
    Configuring,
    /// Measuring; setting changes are written to the chip immediately
    Active,
}

impl PowerState {
    /// `true` when setting changes must be written to the chip immediately
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Masked write to one register
///
/// Only the bits in `mask` are changed: `new = (old & !mask) | (bits & mask)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterWrite {
    /// Register address
    pub register: u8,
    /// Bits owned by this write
    pub mask: u8,
    /// New value of the owned bits
    pub bits: u8,
}

impl RegisterWrite {
    /// Create a masked write
    #[must_use]
    pub const fn new(register: u8, mask: u8, bits: u8) -> Self {
        Self {
            register,
            mask,
            bits,
        }
    }

    /// Merge the owned bits into a previously read register value
    #[must_use]
    pub const fn apply(&self, previous: u8) -> u8 {
        merge_bits(previous, self.mask, self.bits)
    }
}

/// Replace the bits selected by `mask` in `previous` with those of `value`
#[must_use]
pub const fn merge_bits(previous: u8, mask: u8, value: u8) -> u8 {
    (previous & !mask) | (value & mask)
}

/// Register writes that wake or power down a chip role
#[derive(Debug, Clone, Copy)]
pub struct PowerControl {
    /// Writes applied, in order, before the stored settings on wake
    pub wake: &'static [RegisterWrite],
    /// Writes applied, in order, on sleep
    pub sleep: &'static [RegisterWrite],
}
