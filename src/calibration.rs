//! Min/max calibration of sensor bias and range
//!
//! The calibrator samples until the caller cancels it, tracking the
//! smallest and largest raw value seen on each axis. The bias is the
//! midpoint of that window and the range its width. For a magnetometer
//! this removes hard-iron offset when the board is rotated through every
//! orientation; for a gyroscope held still it captures the zero-rate
//! offset and noise band.
//!
//! There is no built-in duration. The loop runs until [`CancelSignal`]
//! reports cancellation, so callers that need a deadline must signal it
//! themselves (a timer task, a button, a fixed sleep on another thread).

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use crate::codec::{PhysicalVector, RawSample};

/// Pause between calibration samples, in microseconds
///
/// Keeps the loop from monopolising the bus and lets other tasks run.
pub const SAMPLE_YIELD_US: u32 = 1_000;

/// Cooperative cancellation flag polled by the calibration loop
pub trait CancelSignal {
    /// `true` once the loop should stop
    fn is_cancelled(&self) -> bool;
}

impl CancelSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl CancelSignal for Cell<bool> {
    fn is_cancelled(&self) -> bool {
        self.get()
    }
}

impl<T: CancelSignal + ?Sized> CancelSignal for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Calibration outcome in raw counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawCalibration {
    /// Per-axis midpoint of the observed window, rounded down
    pub bias: RawSample,
    /// Per-axis `max - min`
    pub range: [u16; 3],
    /// Number of samples taken
    pub samples: u32,
}

/// Calibration outcome in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationResult {
    /// Bias subtracted from subsequent readings
    pub bias: PhysicalVector,
    /// Per-axis width of the observed window
    pub range: PhysicalVector,
    /// Number of samples taken
    pub samples: u32,
    /// The same result in raw counts, for writing to offset registers
    pub raw: RawCalibration,
}

impl CalibrationResult {
    /// Convert a raw result using the count-to-unit `ratio` of the active full scale
    #[must_use]
    pub fn from_raw(raw: &RawCalibration, ratio: f64) -> Self {
        let [rx, ry, rz] = raw.range;
        Self {
            bias: raw.bias.scaled(ratio),
            range: PhysicalVector::new(
                f64::from(rx) * ratio,
                f64::from(ry) * ratio,
                f64::from(rz) * ratio,
            ),
            samples: raw.samples,
            raw: *raw,
        }
    }
}

/// Running per-axis minimum and maximum
#[derive(Debug, Clone, Copy)]
pub struct MinMax {
    min: [i16; 3],
    max: [i16; 3],
    samples: u32,
}

impl Default for MinMax {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMax {
    /// Empty window
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: [i16::MAX; 3],
            max: [i16::MIN; 3],
            samples: 0,
        }
    }

    /// Widen the window to include `sample`
    pub fn update(&mut self, sample: &RawSample) {
        for (axis, value) in sample.to_array().into_iter().enumerate() {
            if value < self.min[axis] {
                self.min[axis] = value;
            }
            if value > self.max[axis] {
                self.max[axis] = value;
            }
        }
        self.samples = self.samples.saturating_add(1);
    }

    /// Number of samples seen
    #[must_use]
    pub const fn samples(&self) -> u32 {
        self.samples
    }

    /// Bias and range of the window
    ///
    /// An empty window yields a zero bias and zero range.
    #[must_use]
    pub fn finish(&self) -> RawCalibration {
        if self.samples == 0 {
            return RawCalibration::default();
        }

        let mut bias = [0i16; 3];
        let mut range = [0u16; 3];
        for axis in 0..3 {
            let (lo, hi) = (i32::from(self.min[axis]), i32::from(self.max[axis]));
            // Floor of the midpoint always lies within [lo, hi]
            #[allow(clippy::cast_possible_truncation)]
            let midpoint = (lo + hi).div_euclid(2) as i16;
            bias[axis] = midpoint;
            // max - min of two i16 values fits in u16
            #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
            let width = (hi - lo) as u16;
            range[axis] = width;
        }

        RawCalibration {
            bias: RawSample::new(bias[0], bias[1], bias[2]),
            range,
            samples: self.samples,
        }
    }
}

/// Sample until cancelled and return the raw bias and range
///
/// Cancellation is checked before every sample; after each sample the loop
/// pauses for [`SAMPLE_YIELD_US`]. A sampling error aborts the loop and is
/// returned unchanged; the partial window is discarded.
///
/// # Errors
///
/// Returns the first error produced by `sample`.
pub fn calibrate<F, E, C, D>(mut sample: F, cancel: &C, delay: &mut D) -> Result<RawCalibration, E>
where
    F: FnMut() -> Result<RawSample, E>,
    C: CancelSignal + ?Sized,
    D: embedded_hal::delay::DelayNs,
{
    let mut window = MinMax::new();
    while !cancel.is_cancelled() {
        window.update(&sample()?);
        delay.delay_us(SAMPLE_YIELD_US);
    }
    Ok(window.finish())
}
