//! Bus interface for the MinIMU-9 chips
//!
//! Every transaction names the device address and the register, so one bus
//! can serve the L3GD20H and the LSM303D. Serialising access to the shared
//! bus is the bus implementation's job (for example `embedded-hal-bus`
//! sharing wrappers); the driver performs no locking and no retries.

use embedded_hal::i2c::Operation;

/// Register-addressed access to a two-wire bus
///
/// For block transfers the caller sets the high bit of `register` when the
/// chip needs it to auto-increment the register address.
pub trait RegisterBus {
    /// Transport error type
    type Error;

    /// Read one register
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error>;

    /// Write one register
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error>;

    /// Read `buffer.len()` bytes starting at `register`
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write `data` starting at `register`
    ///
    /// # Errors
    ///
    /// Returns the transport error if the transaction fails.
    fn write_block(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        (**self).read_byte(address, register)
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        (**self).write_byte(address, register, value)
    }

    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).read_block(address, register, buffer)
    }

    fn write_block(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_block(address, register, data)
    }
}

/// Async register-addressed access to a two-wire bus
///
/// Same contract as [`RegisterBus`].
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait AsyncRegisterBus {
    /// Transport error type
    type Error;

    /// Read one register
    async fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error>;

    /// Write one register
    async fn write_byte(&mut self, address: u8, register: u8, value: u8)
    -> Result<(), Self::Error>;

    /// Read `buffer.len()` bytes starting at `register`
    async fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Write `data` starting at `register`
    async fn write_block(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;
}

/// I2C implementation of the register bus
///
/// Wraps anything implementing `embedded_hal::i2c::I2c` (or the async
/// equivalent with the `async` feature). To put both chips on one physical
/// bus, wrap a shared device:
///
/// ```ignore
/// let bus = core::cell::RefCell::new(i2c);
/// let gyro_bus = I2cBus::new(embedded_hal_bus::i2c::RefCellDevice::new(&bus));
/// let accel_bus = I2cBus::new(embedded_hal_bus::i2c::RefCellDevice::new(&bus));
/// ```
pub struct I2cBus<I2C> {
    i2c: I2C,
}

impl<I2C> I2cBus<I2C> {
    /// Create a new register bus on top of an I2C peripheral
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Consume the bus and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterBus for I2cBus<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;

    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut value = [0u8];
        self.i2c.write_read(address, &[register], &mut value)?;
        Ok(value[0])
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(address, &[register, value])
    }

    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buffer)
    }

    fn write_block(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        // Adjacent writes go out back to back, without a repeated start
        self.i2c.transaction(
            address,
            &mut [Operation::Write(&[register]), Operation::Write(data)],
        )
    }
}

#[cfg(feature = "async")]
impl<I2C, E> AsyncRegisterBus for I2cBus<I2C>
where
    I2C: embedded_hal_async::i2c::I2c<Error = E>,
{
    type Error = E;

    async fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut value = [0u8];
        self.i2c.write_read(address, &[register], &mut value).await?;
        Ok(value[0])
    }

    async fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> Result<(), Self::Error> {
        self.i2c.write(address, &[register, value]).await
    }

    async fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, &[register], buffer).await
    }

    async fn write_block(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        self.i2c
            .transaction(
                address,
                &mut [Operation::Write(&[register]), Operation::Write(data)],
            )
            .await
    }
}
