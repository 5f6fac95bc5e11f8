//! Quantization of physical settings to hardware register codes
//!
//! Output data rate, full scale and bandwidth can only take a handful of
//! discrete values on each chip. A [`ScaleTable`] lists them in ascending
//! order; [`ScaleTable::select`] rounds a requested value up to the next
//! supported setting and clamps at the highest one, so the sensor is never
//! configured below the requested rate or range.

/// One supported hardware setting
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleEntry {
    /// Nominal physical value of the setting (Hz, °/s, g or gauss)
    pub threshold: f64,
    /// Register bits selecting this setting, already shifted into place
    pub code: u8,
    /// Multiplier from raw counts to physical units
    ///
    /// Only full-scale tables convert counts; rate and bandwidth tables
    /// carry `1.0`.
    pub ratio: f64,
}

impl ScaleEntry {
    /// Entry for a setting that does not affect the count-to-unit conversion
    #[must_use]
    pub const fn rate(threshold: f64, code: u8) -> Self {
        Self {
            threshold,
            code,
            ratio: 1.0,
        }
    }

    /// Full-scale entry with its count-to-unit ratio
    #[must_use]
    pub const fn range(threshold: f64, code: u8, ratio: f64) -> Self {
        Self {
            threshold,
            code,
            ratio,
        }
    }
}

/// Index of the chosen entry in a [`ScaleTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleSelection(usize);

impl ScaleSelection {
    /// Position of the entry in its table
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Ordered table of supported settings for one (chip, quantity) pair
#[derive(Debug, Clone, Copy)]
pub struct ScaleTable {
    entries: &'static [ScaleEntry],
}

impl ScaleTable {
    /// Create a table from entries sorted ascending by threshold
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `const`/`static`) if `entries`
    /// is empty or not strictly ascending.
    #[must_use]
    pub const fn new(entries: &'static [ScaleEntry]) -> Self {
        assert!(!entries.is_empty(), "scale table must not be empty");
        let mut i = 1;
        while i < entries.len() {
            assert!(
                entries[i - 1].threshold < entries[i].threshold,
                "scale table must be sorted ascending"
            );
            i += 1;
        }
        Self { entries }
    }

    /// Select the first entry whose threshold is at least `requested`
    ///
    /// Requests above the largest threshold (and NaN) clamp to the last entry.
    #[must_use]
    pub fn select(&self, requested: f64) -> ScaleSelection {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.threshold >= requested)
            .unwrap_or(self.entries.len() - 1);
        ScaleSelection(index)
    }

    /// Entry for a selection
    ///
    /// A selection taken from a longer table clamps to the last entry.
    #[must_use]
    pub fn entry(&self, selection: ScaleSelection) -> &ScaleEntry {
        let last = self.entries.len() - 1;
        &self.entries[selection.0.min(last)]
    }

    /// Raw-count-to-physical-unit multiplier for a selection
    #[must_use]
    pub fn ratio_for(&self, selection: ScaleSelection) -> f64 {
        self.entry(selection).ratio
    }

    /// Register code for a selection
    #[must_use]
    pub fn code_for(&self, selection: ScaleSelection) -> u8 {
        self.entry(selection).code
    }

    /// Nominal physical value for a selection
    #[must_use]
    pub fn value_for(&self, selection: ScaleSelection) -> f64 {
        self.entry(selection).threshold
    }

    /// All entries, ascending
    #[must_use]
    pub const fn entries(&self) -> &'static [ScaleEntry] {
        self.entries
    }
}
