//! Mock register bus for testing the MinIMU-9 drivers

#[cfg(feature = "async")]
use minimu9::AsyncRegisterBus;
use minimu9::RegisterBus;
use minimu9::registers::AUTO_INCREMENT;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Gyroscope address on the board
pub const GYRO: u8 = 0x6B;
/// Accelerometer/magnetometer address on the board
pub const ACCEL_MAG: u8 = 0x1D;

/// Records operations performed on the mock bus
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Operation {
    /// Single register read
    Read {
        /// Device address
        address: u8,
        /// Register address
        register: u8,
        /// Value that was returned
        value: u8,
    },
    /// Single register write
    Write {
        /// Device address
        address: u8,
        /// Register address
        register: u8,
        /// Value that was written
        value: u8,
    },
    /// Block read (register as sent, auto-increment bit included)
    ReadBlock {
        /// Device address
        address: u8,
        /// Register address as sent
        register: u8,
        /// Number of bytes read
        len: usize,
    },
    /// Block write (register as sent, auto-increment bit included)
    WriteBlock {
        /// Device address
        address: u8,
        /// Register address as sent
        register: u8,
        /// Bytes written
        data: Vec<u8>,
    },
}

/// Scripted sample source behind one status register
#[derive(Debug, Default)]
struct Sequence {
    samples: Vec<[i16; 3]>,
    index: usize,
    reads: usize,
}

/// Shared state for mock bus (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values (device address, register) -> value
    registers: HashMap<(u8, u8), u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,
    always_fail: bool,

    /// Sample sequences keyed by (device address, status register)
    sequences: HashMap<(u8, u8), Sequence>,
}

impl MockState {
    fn new() -> Self {
        let mut state = Self {
            registers: HashMap::new(),
            operations: Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
            always_fail: false,
            sequences: HashMap::new(),
        };

        // WHO_AM_I values
        state.registers.insert((GYRO, 0x0F), 0xD7);
        state.registers.insert((ACCEL_MAG, 0x0F), 0x49);

        // Status registers report fresh data on all axes
        state.registers.insert((GYRO, 0x27), 0x0F);
        state.registers.insert((ACCEL_MAG, 0x27), 0x0F);
        state.registers.insert((ACCEL_MAG, 0x07), 0x0F);

        state
    }

    fn check_read(&mut self) -> Result<(), MockError> {
        if self.always_fail || self.fail_next_read {
            self.fail_next_read = false;
            return Err(MockError::Communication);
        }
        Ok(())
    }

    fn check_write(&mut self) -> Result<(), MockError> {
        if self.always_fail || self.fail_next_write {
            self.fail_next_write = false;
            return Err(MockError::Communication);
        }
        Ok(())
    }

    /// Write sample bytes after a status register (little-endian X, Y, Z)
    fn set_sample(&mut self, address: u8, status_register: u8, sample: [i16; 3]) {
        let bytes = sample.iter().flat_map(|axis| axis.to_le_bytes());
        for (offset, byte) in bytes.enumerate() {
            self.registers
                .insert((address, status_register + 1 + offset as u8), byte);
        }
    }

    /// Advance the sequence behind a status register, if one is set
    fn advance_sequence(&mut self, address: u8, status_register: u8) {
        let Some(sequence) = self.sequences.get_mut(&(address, status_register)) else {
            return;
        };
        sequence.reads += 1;
        if sequence.samples.is_empty() {
            return;
        }
        let sample = sequence.samples[sequence.index];
        sequence.index = (sequence.index + 1) % sequence.samples.len();
        self.set_sample(address, status_register, sample);
    }
}

/// Mock bus for testing
#[derive(Clone)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a new mock bus with default register values
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState::new())),
        }
    }

    /// Set a register value
    pub fn set_register(&self, address: u8, register: u8, value: u8) {
        self.state
            .borrow_mut()
            .registers
            .insert((address, register), value);
    }

    /// Get a register value
    pub fn get_register(&self, address: u8, register: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&(address, register))
            .copied()
            .unwrap_or(0)
    }

    /// Set the sample returned after `status_register` on the next reads
    pub fn set_sample(&self, address: u8, status_register: u8, x: i16, y: i16, z: i16) {
        self.state
            .borrow_mut()
            .set_sample(address, status_register, [x, y, z]);
    }

    /// Set a repeating sequence of samples behind `status_register`
    pub fn set_sample_sequence(&self, address: u8, status_register: u8, samples: Vec<[i16; 3]>) {
        self.state.borrow_mut().sequences.insert(
            (address, status_register),
            Sequence {
                samples,
                index: 0,
                reads: 0,
            },
        );
    }

    /// Number of block reads starting at `status_register` since the sequence was set
    pub fn sample_reads(&self, address: u8, status_register: u8) -> usize {
        self.state
            .borrow()
            .sequences
            .get(&(address, status_register))
            .map_or(0, |sequence| sequence.reads)
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Make every transaction fail until cleared
    pub fn set_always_fail(&self, enable: bool) {
        self.state.borrow_mut().always_fail = enable;
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Registers written on `address`, in order
    pub fn writes_to(&self, address: u8) -> Vec<(u8, u8)> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match op {
                Operation::Write {
                    address: a,
                    register,
                    value,
                } if *a == address => Some((*register, *value)),
                _ => None,
            })
            .collect()
    }
}

/// Mock error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl RegisterBus for MockInterface {
    type Error = MockError;

    fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_read()?;

        let value = state
            .registers
            .get(&(address, register))
            .copied()
            .unwrap_or(0);
        state.operations.push(Operation::Read {
            address,
            register,
            value,
        });
        Ok(value)
    }

    fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_write()?;

        state.registers.insert((address, register), value);
        state.operations.push(Operation::Write {
            address,
            register,
            value,
        });
        Ok(())
    }

    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_read()?;

        let start = register & !AUTO_INCREMENT;
        state.advance_sequence(address, start);

        for (i, byte) in buffer.iter_mut().enumerate() {
            // Without the auto-increment bit the chip repeats the same register
            let reg = if register & AUTO_INCREMENT == 0 {
                start
            } else {
                start.wrapping_add(i as u8)
            };
            *byte = state.registers.get(&(address, reg)).copied().unwrap_or(0);
        }

        state.operations.push(Operation::ReadBlock {
            address,
            register,
            len: buffer.len(),
        });
        Ok(())
    }

    fn write_block(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        state.check_write()?;

        let start = register & !AUTO_INCREMENT;
        for (i, &byte) in data.iter().enumerate() {
            let reg = if register & AUTO_INCREMENT == 0 {
                start
            } else {
                start.wrapping_add(i as u8)
            };
            state.registers.insert((address, reg), byte);
        }

        state.operations.push(Operation::WriteBlock {
            address,
            register,
            data: data.to_vec(),
        });
        Ok(())
    }
}

#[cfg(feature = "async")]
impl AsyncRegisterBus for MockInterface {
    type Error = MockError;

    async fn read_byte(&mut self, address: u8, register: u8) -> Result<u8, Self::Error> {
        // Delegate to synchronous implementation
        RegisterBus::read_byte(self, address, register)
    }

    async fn write_byte(&mut self, address: u8, register: u8, value: u8) -> Result<(), Self::Error> {
        RegisterBus::write_byte(self, address, register, value)
    }

    async fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        RegisterBus::read_block(self, address, register, buffer)
    }

    async fn write_block(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), Self::Error> {
        RegisterBus::write_block(self, address, register, data)
    }
}

impl Default for MockInterface {
    fn default() -> Self {
        Self::new()
    }
}
