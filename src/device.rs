//! High-level driver API for the MinIMU-9 sensors
//!
//! One generic [`SensorDriver`] serves all three sensor roles. Everything
//! chip-specific (register addresses, rate and full-scale tables, power
//! bits) comes from the static [`ChipConfig`] the driver is built with.
//!
//! A driver owns its bus handle, its selected settings and its bias. It is
//! meant to have a single owner; wrap it in a mutex if several tasks need
//! it. Calibration is the one long-running call: move the driver into its
//! own thread or task and stop it through the cancellation signal.

use crate::calibration::{CalibrationResult, CancelSignal, RawCalibration};
use crate::codec::{
    Freshness, PhysicalVector, RawSample, VECTOR_BLOCK_LEN, decode_status_and_vector,
    decode_vector, encode_vector,
};
use crate::power::{PowerState, RegisterWrite, merge_bits};
use crate::registers::AUTO_INCREMENT;
use crate::scale::ScaleSelection;
use crate::sensors::{
    ChipConfig, L3GD20H_GYROSCOPE, LSM303D_ACCELEROMETER, LSM303D_MAGNETOMETER, Setting,
};
use crate::{Error, L3GD20H_ADDRESS_SA0_HIGH, LSM303D_ADDRESS_SA0_HIGH};

// Only import RegisterBus when not using async feature
#[cfg(not(feature = "async"))]
use crate::interface::RegisterBus;

#[cfg(feature = "async")]
use crate::calibration::{MinMax, SAMPLE_YIELD_US};
#[cfg(feature = "async")]
use crate::interface::AsyncRegisterBus;

/// A scaled, bias-corrected measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Measurement in the sensor's physical unit, bias removed
    pub vector: PhysicalVector,
    /// Whether the sample was new, overwritten, or a repeat
    pub freshness: Freshness,
}

/// Driver for one sensor role (gyroscope, accelerometer or magnetometer)
pub struct SensorDriver<B> {
    bus: B,
    address: u8,
    chip: &'static ChipConfig,
    state: PowerState,
    frequency: ScaleSelection,
    full_scale: ScaleSelection,
    bandwidth: Option<ScaleSelection>,
    bias: PhysicalVector,
    calibration: Option<CalibrationResult>,
}

impl<B> SensorDriver<B> {
    /// Create a driver for `chip` at `address`
    ///
    /// No bus traffic happens here. The driver starts in
    /// [`PowerState::PoweredDown`] with the chip's default settings selected;
    /// call [`wake`](Self::wake) to start measuring.
    pub fn new(bus: B, address: u8, chip: &'static ChipConfig) -> Self {
        let frequency = chip.frequency.table.select(chip.frequency.default);
        let full_scale = chip.full_scale.table.select(chip.full_scale.default);
        let bandwidth = chip
            .bandwidth
            .as_ref()
            .map(|setting| setting.table.select(setting.default));

        Self {
            bus,
            address,
            chip,
            state: PowerState::PoweredDown,
            frequency,
            full_scale,
            bandwidth,
            bias: PhysicalVector::ZERO,
            calibration: None,
        }
    }

    /// L3GD20H gyroscope at its default address (0x6B)
    pub fn gyroscope(bus: B) -> Self {
        Self::new(bus, L3GD20H_ADDRESS_SA0_HIGH, &L3GD20H_GYROSCOPE)
    }

    /// LSM303D accelerometer at its default address (0x1D)
    pub fn accelerometer(bus: B) -> Self {
        Self::new(bus, LSM303D_ADDRESS_SA0_HIGH, &LSM303D_ACCELEROMETER)
    }

    /// LSM303D magnetometer at its default address (0x1D)
    pub fn magnetometer(bus: B) -> Self {
        Self::new(bus, LSM303D_ADDRESS_SA0_HIGH, &LSM303D_MAGNETOMETER)
    }

    /// Chip configuration this driver was built with
    #[must_use]
    pub const fn chip(&self) -> &'static ChipConfig {
        self.chip
    }

    /// Bus address of the chip
    #[must_use]
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Current power state
    #[must_use]
    pub const fn state(&self) -> PowerState {
        self.state
    }

    /// Selected output data rate, in Hz
    #[must_use]
    pub fn frequency(&self) -> f64 {
        self.chip.frequency.table.value_for(self.frequency)
    }

    /// Selected full scale, in the sensor's physical unit
    #[must_use]
    pub fn full_scale(&self) -> f64 {
        self.chip.full_scale.table.value_for(self.full_scale)
    }

    /// Selected anti-alias bandwidth in Hz, for chips that have the filter
    #[must_use]
    pub fn anti_alias_bandwidth(&self) -> Option<f64> {
        let setting = self.chip.bandwidth.as_ref()?;
        self.bandwidth.map(|selection| setting.table.value_for(selection))
    }

    /// Selected output data rate as a table selection
    #[must_use]
    pub const fn frequency_selection(&self) -> ScaleSelection {
        self.frequency
    }

    /// Selected full scale as a table selection
    #[must_use]
    pub const fn full_scale_selection(&self) -> ScaleSelection {
        self.full_scale
    }

    /// Raw-count-to-physical-unit multiplier of the selected full scale
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.chip.full_scale.table.ratio_for(self.full_scale)
    }

    /// Bias subtracted from every reading
    #[must_use]
    pub const fn bias(&self) -> PhysicalVector {
        self.bias
    }

    /// Replace the bias
    ///
    /// The bias is in physical units, so it stays valid across full-scale
    /// changes.
    pub fn set_bias(&mut self, bias: PhysicalVector) {
        self.bias = bias;
    }

    /// Reset the bias to zero
    pub fn clear_bias(&mut self) {
        self.set_bias(PhysicalVector::ZERO);
    }

    /// Result of the last completed calibration
    #[must_use]
    pub const fn calibration(&self) -> Option<&CalibrationResult> {
        self.calibration.as_ref()
    }

    /// Consume the driver and return the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn to_physical(&self, raw: RawSample) -> PhysicalVector {
        raw.scaled(self.ratio()) - self.bias
    }

    fn bandwidth_setting<E>(&self) -> Result<&'static Setting, Error<E>> {
        let chip: &'static ChipConfig = self.chip;
        chip.bandwidth.as_ref().ok_or(Error::InvalidConfig)
    }

    fn offset_register<E>(&self) -> Result<u8, Error<E>> {
        self.chip
            .offset_register
            .map(|register| register | AUTO_INCREMENT)
            .ok_or(Error::InvalidConfig)
    }

    fn commit_calibration(&mut self, raw: &RawCalibration) -> CalibrationResult {
        let result = CalibrationResult::from_raw(raw, self.ratio());
        self.set_bias(result.bias);
        self.calibration = Some(result);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "{}: calibrated over {} samples, bias {}, range {}",
            self.chip.name,
            result.samples,
            result.bias,
            result.range
        );

        result
    }
}

#[cfg(not(feature = "async"))]
impl<B> SensorDriver<B>
where
    B: RegisterBus,
{
    /// Check the chip's `WHO_AM_I` register
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value
    pub fn verify(&mut self) -> Result<(), Error<B::Error>> {
        let id = self
            .bus
            .read_byte(self.address, self.chip.who_am_i_register)?;
        if id != self.chip.who_am_i_value {
            return Err(Error::InvalidDevice(id));
        }
        Ok(())
    }

    /// Read a register, replace the bits under `mask` with `value`, write it back
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn modify_register(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Error<B::Error>> {
        let previous = self.bus.read_byte(self.address, register)?;
        let next = merge_bits(previous, mask, value);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}: reg {=u8:#04x} {=u8:#04x} -> {=u8:#04x}",
            self.chip.name,
            register,
            previous,
            next
        );

        self.bus.write_byte(self.address, register, next)?;
        Ok(())
    }

    fn apply(&mut self, write: &RegisterWrite) -> Result<(), Error<B::Error>> {
        self.modify_register(write.register, write.mask, write.bits)
    }

    fn write_setting(
        &mut self,
        setting: &Setting,
        selection: ScaleSelection,
    ) -> Result<(), Error<B::Error>> {
        let code = setting.table.code_for(selection);
        for field in setting.fields {
            self.modify_register(field.register, field.mask, code)?;
        }
        Ok(())
    }

    /// Write a changed setting if the chip is active
    ///
    /// A failed write leaves the chip's configuration unknown: the driver
    /// drops back to `Configuring` and the stored selection is not replaced.
    fn reapply(
        &mut self,
        setting: &Setting,
        selection: ScaleSelection,
    ) -> Result<(), Error<B::Error>> {
        if !self.state.is_active() {
            return Ok(());
        }
        if let Err(e) = self.write_setting(setting, selection) {
            self.state = PowerState::Configuring;
            return Err(e);
        }
        Ok(())
    }

    /// Power the chip up and write every stored setting
    ///
    /// Only the power bits and the setting fields are modified; other bits
    /// in the same registers keep their values.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The driver
    /// is then left in [`PowerState::Configuring`]; call `wake()` again.
    pub fn wake(&mut self) -> Result<(), Error<B::Error>> {
        let chip = self.chip;
        self.state = PowerState::Configuring;

        for write in chip.power.wake {
            self.apply(write)?;
        }
        self.write_setting(&chip.frequency, self.frequency)?;
        self.write_setting(&chip.full_scale, self.full_scale)?;
        if let (Some(setting), Some(selection)) = (chip.bandwidth.as_ref(), self.bandwidth) {
            self.write_setting(setting, selection)?;
        }

        self.state = PowerState::Active;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "{}: active at {} Hz, full scale {}",
            chip.name,
            self.frequency(),
            self.full_scale()
        );

        Ok(())
    }

    /// Put the chip into power-down mode
    ///
    /// Stored settings are kept and rewritten by the next [`wake`](Self::wake).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn sleep(&mut self) -> Result<(), Error<B::Error>> {
        let chip = self.chip;
        for write in chip.power.sleep {
            self.apply(write)?;
        }
        self.state = PowerState::PoweredDown;

        #[cfg(feature = "defmt")]
        defmt::info!("{}: powered down", chip.name);

        Ok(())
    }

    /// Select the output data rate
    ///
    /// The rate is rounded up to the next supported value (clamped to the
    /// fastest). Written immediately if the chip is active, otherwise on the
    /// next wake. Returns the rate actually selected, in Hz.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_frequency(&mut self, hz: f64) -> Result<f64, Error<B::Error>> {
        let chip = self.chip;
        let selection = chip.frequency.table.select(hz);
        self.reapply(&chip.frequency, selection)?;
        self.frequency = selection;
        Ok(self.frequency())
    }

    /// Select the full scale, in the sensor's physical unit
    ///
    /// Rounded up to the next supported range (clamped to the widest).
    /// The bias is kept. Returns the range actually selected.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_full_scale(&mut self, value: f64) -> Result<f64, Error<B::Error>> {
        let chip = self.chip;
        let selection = chip.full_scale.table.select(value);
        self.reapply(&chip.full_scale, selection)?;
        self.full_scale = selection;
        Ok(self.full_scale())
    }

    /// Select the anti-alias filter bandwidth, in Hz
    ///
    /// Returns the bandwidth actually selected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no anti-alias filter,
    /// or an error if communication with the device fails.
    pub fn set_anti_alias_bandwidth(&mut self, hz: f64) -> Result<f64, Error<B::Error>> {
        let setting = self.bandwidth_setting::<B::Error>()?;
        let selection = setting.table.select(hz);
        self.reapply(setting, selection)?;
        self.bandwidth = Some(selection);
        Ok(setting.table.value_for(selection))
    }

    /// Read the status byte and the raw X/Y/Z block
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_raw(&mut self) -> Result<(RawSample, Freshness), Error<B::Error>> {
        let mut block = [0u8; 1 + VECTOR_BLOCK_LEN];
        self.bus.read_block(
            self.address,
            self.chip.status_register | AUTO_INCREMENT,
            &mut block,
        )?;
        decode_status_and_vector(block[0], &block[1..])
    }

    /// Read a scaled, bias-corrected measurement
    ///
    /// A stale or overrun sample is still returned; check
    /// [`Reading::freshness`].
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read(&mut self) -> Result<Reading, Error<B::Error>> {
        let (raw, freshness) = self.read_raw()?;

        #[cfg(feature = "defmt")]
        if !freshness.is_fresh() {
            defmt::trace!("{}: {} sample", self.chip.name, freshness);
        }

        Ok(Reading {
            vector: self.to_physical(raw),
            freshness,
        })
    }

    /// Sample until `cancel` fires, then store the midpoint as the new bias
    ///
    /// Blocks the caller for as long as the signal stays clear. Between
    /// samples the loop waits on `delay` for
    /// [`SAMPLE_YIELD_US`](crate::calibration::SAMPLE_YIELD_US). The result
    /// is converted with the full scale selected when sampling ends.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; the bias is
    /// left unchanged.
    pub fn calibrate<C, D>(
        &mut self,
        cancel: &C,
        delay: &mut D,
    ) -> Result<CalibrationResult, Error<B::Error>>
    where
        C: CancelSignal + ?Sized,
        D: embedded_hal::delay::DelayNs,
    {
        let raw = crate::calibration::calibrate(
            || self.read_raw().map(|(sample, _)| sample),
            cancel,
            delay,
        )?;
        Ok(self.commit_calibration(&raw))
    }

    /// Write a raw offset into the chip's offset registers
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no offset registers,
    /// or an error if communication with the device fails.
    pub fn write_offset_registers(&mut self, offset: RawSample) -> Result<(), Error<B::Error>> {
        let register = self.offset_register::<B::Error>()?;
        self.bus
            .write_block(self.address, register, &encode_vector(offset))?;
        Ok(())
    }

    /// Read the raw offset stored in the chip's offset registers
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no offset registers,
    /// or an error if communication with the device fails.
    pub fn read_offset_registers(&mut self) -> Result<RawSample, Error<B::Error>> {
        let register = self.offset_register::<B::Error>()?;
        let mut block = [0u8; VECTOR_BLOCK_LEN];
        self.bus.read_block(self.address, register, &mut block)?;
        decode_vector(&block)
    }

    /// Move a calibration's bias from software into the offset registers
    ///
    /// The raw bias is added to the offsets already programmed, the sum is
    /// written back and the software bias is cleared, so readings stay
    /// corrected by the chip itself. Returns the offsets now programmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no offset registers,
    /// or an error if communication with the device fails; the software bias
    /// is then left unchanged.
    pub fn offload_bias(
        &mut self,
        calibration: &CalibrationResult,
    ) -> Result<RawSample, Error<B::Error>> {
        let current = self.read_offset_registers()?;
        let offset = current.saturating_add(calibration.raw.bias);
        self.write_offset_registers(offset)?;
        self.clear_bias();

        #[cfg(feature = "defmt")]
        defmt::info!("{}: offset registers now {}", self.chip.name, offset);

        Ok(offset)
    }
}

#[cfg(feature = "async")]
impl<B> SensorDriver<B>
where
    B: AsyncRegisterBus,
{
    /// Check the chip's `WHO_AM_I` register
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Communication with the device fails
    /// - The `WHO_AM_I` register contains an unexpected value
    pub async fn verify(&mut self) -> Result<(), Error<B::Error>> {
        let id = self
            .bus
            .read_byte(self.address, self.chip.who_am_i_register)
            .await?;
        if id != self.chip.who_am_i_value {
            return Err(Error::InvalidDevice(id));
        }
        Ok(())
    }

    /// Read a register, replace the bits under `mask` with `value`, write it back
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn modify_register(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), Error<B::Error>> {
        let previous = self.bus.read_byte(self.address, register).await?;
        let next = merge_bits(previous, mask, value);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "{}: reg {=u8:#04x} {=u8:#04x} -> {=u8:#04x}",
            self.chip.name,
            register,
            previous,
            next
        );

        self.bus.write_byte(self.address, register, next).await?;
        Ok(())
    }

    async fn apply(&mut self, write: &RegisterWrite) -> Result<(), Error<B::Error>> {
        self.modify_register(write.register, write.mask, write.bits)
            .await
    }

    async fn write_setting(
        &mut self,
        setting: &Setting,
        selection: ScaleSelection,
    ) -> Result<(), Error<B::Error>> {
        let code = setting.table.code_for(selection);
        for field in setting.fields {
            self.modify_register(field.register, field.mask, code)
                .await?;
        }
        Ok(())
    }

    async fn reapply(
        &mut self,
        setting: &Setting,
        selection: ScaleSelection,
    ) -> Result<(), Error<B::Error>> {
        if !self.state.is_active() {
            return Ok(());
        }
        if let Err(e) = self.write_setting(setting, selection).await {
            self.state = PowerState::Configuring;
            return Err(e);
        }
        Ok(())
    }

    /// Power the chip up and write every stored setting
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. The driver
    /// is then left in [`PowerState::Configuring`]; call `wake()` again.
    pub async fn wake(&mut self) -> Result<(), Error<B::Error>> {
        let chip = self.chip;
        self.state = PowerState::Configuring;

        for write in chip.power.wake {
            self.apply(write).await?;
        }
        self.write_setting(&chip.frequency, self.frequency).await?;
        self.write_setting(&chip.full_scale, self.full_scale).await?;
        if let (Some(setting), Some(selection)) = (chip.bandwidth.as_ref(), self.bandwidth) {
            self.write_setting(setting, selection).await?;
        }

        self.state = PowerState::Active;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "{}: active at {} Hz, full scale {}",
            chip.name,
            self.frequency(),
            self.full_scale()
        );

        Ok(())
    }

    /// Put the chip into power-down mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn sleep(&mut self) -> Result<(), Error<B::Error>> {
        let chip = self.chip;
        for write in chip.power.sleep {
            self.apply(write).await?;
        }
        self.state = PowerState::PoweredDown;

        #[cfg(feature = "defmt")]
        defmt::info!("{}: powered down", chip.name);

        Ok(())
    }

    /// Select the output data rate; returns the rate actually selected, in Hz
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_frequency(&mut self, hz: f64) -> Result<f64, Error<B::Error>> {
        let chip = self.chip;
        let selection = chip.frequency.table.select(hz);
        self.reapply(&chip.frequency, selection).await?;
        self.frequency = selection;
        Ok(self.frequency())
    }

    /// Select the full scale; returns the range actually selected
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_full_scale(&mut self, value: f64) -> Result<f64, Error<B::Error>> {
        let chip = self.chip;
        let selection = chip.full_scale.table.select(value);
        self.reapply(&chip.full_scale, selection).await?;
        self.full_scale = selection;
        Ok(self.full_scale())
    }

    /// Select the anti-alias filter bandwidth; returns the bandwidth actually selected, in Hz
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no anti-alias filter,
    /// or an error if communication with the device fails.
    pub async fn set_anti_alias_bandwidth(&mut self, hz: f64) -> Result<f64, Error<B::Error>> {
        let setting = self.bandwidth_setting::<B::Error>()?;
        let selection = setting.table.select(hz);
        self.reapply(setting, selection).await?;
        self.bandwidth = Some(selection);
        Ok(setting.table.value_for(selection))
    }

    /// Read the status byte and the raw X/Y/Z block
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_raw(&mut self) -> Result<(RawSample, Freshness), Error<B::Error>> {
        let mut block = [0u8; 1 + VECTOR_BLOCK_LEN];
        self.bus
            .read_block(
                self.address,
                self.chip.status_register | AUTO_INCREMENT,
                &mut block,
            )
            .await?;
        decode_status_and_vector(block[0], &block[1..])
    }

    /// Read a scaled, bias-corrected measurement
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read(&mut self) -> Result<Reading, Error<B::Error>> {
        let (raw, freshness) = self.read_raw().await?;

        #[cfg(feature = "defmt")]
        if !freshness.is_fresh() {
            defmt::trace!("{}: {} sample", self.chip.name, freshness);
        }

        Ok(Reading {
            vector: self.to_physical(raw),
            freshness,
        })
    }

    /// Sample until `cancel` fires, then store the midpoint as the new bias
    ///
    /// Awaits `delay` between samples so other tasks on the executor keep
    /// running.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails; the bias is
    /// left unchanged.
    pub async fn calibrate<C, D>(
        &mut self,
        cancel: &C,
        delay: &mut D,
    ) -> Result<CalibrationResult, Error<B::Error>>
    where
        C: CancelSignal + ?Sized,
        D: embedded_hal_async::delay::DelayNs,
    {
        let mut window = MinMax::new();
        while !cancel.is_cancelled() {
            let (sample, _) = self.read_raw().await?;
            window.update(&sample);
            delay.delay_us(SAMPLE_YIELD_US).await;
        }
        Ok(self.commit_calibration(&window.finish()))
    }

    /// Write a raw offset into the chip's offset registers
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no offset registers,
    /// or an error if communication with the device fails.
    pub async fn write_offset_registers(
        &mut self,
        offset: RawSample,
    ) -> Result<(), Error<B::Error>> {
        let register = self.offset_register::<B::Error>()?;
        self.bus
            .write_block(self.address, register, &encode_vector(offset))
            .await?;
        Ok(())
    }

    /// Read the raw offset stored in the chip's offset registers
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no offset registers,
    /// or an error if communication with the device fails.
    pub async fn read_offset_registers(&mut self) -> Result<RawSample, Error<B::Error>> {
        let register = self.offset_register::<B::Error>()?;
        let mut block = [0u8; VECTOR_BLOCK_LEN];
        self.bus
            .read_block(self.address, register, &mut block)
            .await?;
        decode_vector(&block)
    }

    /// Move a calibration's bias from software into the offset registers
    ///
    /// Returns the offsets now programmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the chip has no offset registers,
    /// or an error if communication with the device fails; the software bias
    /// is then left unchanged.
    pub async fn offload_bias(
        &mut self,
        calibration: &CalibrationResult,
    ) -> Result<RawSample, Error<B::Error>> {
        let current = self.read_offset_registers().await?;
        let offset = current.saturating_add(calibration.raw.bias);
        self.write_offset_registers(offset).await?;
        self.clear_bias();

        #[cfg(feature = "defmt")]
        defmt::info!("{}: offset registers now {}", self.chip.name, offset);

        Ok(offset)
    }
}
