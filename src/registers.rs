//! Register definitions for the L3GD20H and the LSM303D
//!
//! Both chips use ST's 8-bit register addressing: when reading or writing
//! more than one register in a single I2C transaction, bit 7 of the
//! register address must be set so the chip auto-increments through the
//! block ([`AUTO_INCREMENT`]).
//!
//! Only the registers and bit fields the driver touches are listed here.
//! Multi-bit fields are declared as one flag covering the whole field.

use bitflags::bitflags;

/// Sub-address bit requesting register auto-increment for block transfers
pub const AUTO_INCREMENT: u8 = 0x80;

bitflags! {
    /// Status register layout shared by the gyroscope, the accelerometer
    /// and the magnetometer
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        /// X, Y and Z overrun
        const ZYXOR = 1 << 7;
        /// Z overrun
        const ZOR = 1 << 6;
        /// Y overrun
        const YOR = 1 << 5;
        /// X overrun
        const XOR = 1 << 4;
        /// X, Y and Z data available
        const ZYXDA = 1 << 3;
        /// Z data available
        const ZDA = 1 << 2;
        /// Y data available
        const YDA = 1 << 1;
        /// X data available
        const XDA = 1 << 0;

        /// Any overrun flag
        const OVERRUN = Self::ZYXOR.bits() | Self::ZOR.bits() | Self::YOR.bits() | Self::XOR.bits();
        /// Any data-available flag
        const DATA_AVAILABLE =
            Self::ZYXDA.bits() | Self::ZDA.bits() | Self::YDA.bits() | Self::XDA.bits();
    }
}

/// L3GD20H 3-axis gyroscope
pub mod l3gd20h {
    use bitflags::bitflags;

    /// `WHO_AM_I` - Device identification (0x0F)
    pub const WHO_AM_I: u8 = 0x0F;
    /// Expected value of `WHO_AM_I`
    pub const WHO_AM_I_VALUE: u8 = 0xD7;

    /// `CTRL1` - Output data rate, bandwidth, power-down, axis enables (0x20)
    pub const CTRL1: u8 = 0x20;
    /// `CTRL4` - Block data update, endianness, full scale (0x23)
    pub const CTRL4: u8 = 0x23;
    /// `STATUS` - Data available / overrun flags (0x27), followed by the output block
    pub const STATUS: u8 = 0x27;
    /// `OUT_X_L` - First byte of the X/Y/Z output block (0x28)
    pub const OUT_X_L: u8 = 0x28;
    /// `LOW_ODR` - Low output data rate selection (0x39)
    pub const LOW_ODR: u8 = 0x39;

    bitflags! {
        /// `CTRL1` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct Ctrl1: u8 {
            /// DR\[7:6\] output data rate selection
            const DR = 0b1100_0000;
            /// BW\[5:4\] bandwidth selection
            const BW = 0b0011_0000;
            /// Normal mode (clear for power-down)
            const PD = 1 << 3;
            /// Z axis enable
            const ZEN = 1 << 2;
            /// Y axis enable
            const YEN = 1 << 1;
            /// X axis enable
            const XEN = 1 << 0;
            /// All axes enabled
            const XYZ_EN = Self::ZEN.bits() | Self::YEN.bits() | Self::XEN.bits();
        }
    }

    bitflags! {
        /// `CTRL4` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct Ctrl4: u8 {
            /// Block data update
            const BDU = 1 << 7;
            /// Big/little endian data selection
            const BLE = 1 << 6;
            /// FS\[5:4\] full-scale selection
            const FS = 0b0011_0000;
        }
    }

    bitflags! {
        /// `LOW_ODR` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct LowOdr: u8 {
            /// Selects the 12.5/25/50 Hz rate set
            const LOW_ODR = 1 << 0;
        }
    }
}

/// LSM303D 3-axis accelerometer and 3-axis magnetometer
pub mod lsm303d {
    use bitflags::bitflags;

    /// `STATUS_M` - Magnetometer status (0x07), followed by the output block
    pub const STATUS_M: u8 = 0x07;
    /// `OUT_X_L_M` - First byte of the magnetometer output block (0x08)
    pub const OUT_X_L_M: u8 = 0x08;

    /// `WHO_AM_I` - Device identification (0x0F)
    pub const WHO_AM_I: u8 = 0x0F;
    /// Expected value of `WHO_AM_I`
    pub const WHO_AM_I_VALUE: u8 = 0x49;

    /// `OFFSET_X_L_M` - First byte of the magnetometer hard-iron offset block (0x16..0x1B)
    ///
    /// The chip subtracts these signed 16-bit little-endian values from the
    /// magnetometer output.
    pub const OFFSET_X_L_M: u8 = 0x16;

    /// `CTRL1` - Accelerometer data rate, block data update, axis enables (0x20)
    pub const CTRL1: u8 = 0x20;
    /// `CTRL2` - Accelerometer anti-alias bandwidth and full scale (0x21)
    pub const CTRL2: u8 = 0x21;
    /// `CTRL5` - Temperature enable, magnetic resolution, magnetic data rate (0x24)
    pub const CTRL5: u8 = 0x24;
    /// `CTRL6` - Magnetic full scale (0x25)
    pub const CTRL6: u8 = 0x25;
    /// `CTRL7` - High-pass filter, low-power and magnetic sensor mode (0x26)
    pub const CTRL7: u8 = 0x26;

    /// `STATUS_A` - Accelerometer status (0x27), followed by the output block
    pub const STATUS_A: u8 = 0x27;
    /// `OUT_X_L_A` - First byte of the accelerometer output block (0x28)
    pub const OUT_X_L_A: u8 = 0x28;

    bitflags! {
        /// `CTRL1` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct Ctrl1: u8 {
            /// AODR\[7:4\] accelerometer data rate; 0000 = power-down
            const AODR = 0b1111_0000;
            /// Block data update
            const BDU = 1 << 3;
            /// Z axis enable
            const AZEN = 1 << 2;
            /// Y axis enable
            const AYEN = 1 << 1;
            /// X axis enable
            const AXEN = 1 << 0;
            /// All axes enabled
            const AXYZ_EN = Self::AZEN.bits() | Self::AYEN.bits() | Self::AXEN.bits();
        }
    }

    bitflags! {
        /// `CTRL2` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct Ctrl2: u8 {
            /// ABW\[7:6\] anti-alias filter bandwidth
            const ABW = 0b1100_0000;
            /// AFS\[5:3\] accelerometer full scale
            const AFS = 0b0011_1000;
            /// Accelerometer self-test
            const AST = 1 << 1;
            /// SPI mode selection
            const SIM = 1 << 0;
        }
    }

    bitflags! {
        /// `CTRL5` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct Ctrl5: u8 {
            /// Temperature sensor enable
            const TEMP_EN = 1 << 7;
            /// M_RES\[6:5\] magnetic resolution; 11 = high resolution
            const M_RES = 0b0110_0000;
            /// M_ODR\[4:2\] magnetic data rate
            const M_ODR = 0b0001_1100;
            /// Latch interrupt request on INT2_SRC
            const LIR2 = 1 << 1;
            /// Latch interrupt request on INT1_SRC
            const LIR1 = 1 << 0;
        }
    }

    bitflags! {
        /// `CTRL6` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct Ctrl6: u8 {
            /// MFS\[6:5\] magnetic full scale
            const MFS = 0b0110_0000;
        }
    }

    bitflags! {
        /// `CTRL7` bits
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct Ctrl7: u8 {
            /// AHPM\[7:6\] high-pass filter mode
            const AHPM = 0b1100_0000;
            /// Filtered acceleration data selection
            const AFDS = 1 << 5;
            /// Temperature-only mode
            const T_ONLY = 1 << 4;
            /// Magnetic low-power mode (forces 3.125 Hz)
            const MLP = 1 << 2;
            /// MD\[1:0\] magnetic sensor mode; 00 = continuous conversion
            const MD = 0b0000_0011;
            /// MD = 10: power-down mode
            const MD_POWER_DOWN = 0b0000_0010;
        }
    }
}
