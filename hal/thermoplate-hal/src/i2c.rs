//! I2C bus abstractions
//!
//! Provides the raw transfer primitives plus the SMBus-style byte and
//! word helpers that register-oriented peripherals are driven with.

use embedded_hal::i2c;

/// 7-bit I2C device address
pub type Address = u8;

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error: i2c::Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: Address, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: Address, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically a command or register)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: Address,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Send a single command byte (SMBus "send byte")
    fn write_byte(&mut self, address: Address, command: u8) -> Result<(), Self::Error> {
        self.write(address, &[command])
    }

    /// Write one data byte after a command byte (SMBus "write byte data")
    fn write_byte_data(
        &mut self,
        address: Address,
        command: u8,
        value: u8,
    ) -> Result<(), Self::Error> {
        self.write(address, &[command, value])
    }

    /// Read one data byte after a command byte (SMBus "read byte data")
    fn read_byte_data(&mut self, address: Address, command: u8) -> Result<u8, Self::Error> {
        let mut data = [0u8];
        self.write_read(address, &[command], &mut data)?;
        Ok(data[0])
    }

    /// Read a 16-bit word after a command byte (SMBus "read word data")
    ///
    /// SMBus words are little-endian: the first byte on the wire becomes
    /// the low byte of the result. A device that sends its register
    /// MSB-first therefore arrives with its bytes swapped.
    fn read_word(&mut self, address: Address, command: u8) -> Result<u16, Self::Error> {
        let mut data = [0u8; 2];
        self.write_read(address, &[command], &mut data)?;
        Ok(u16::from_le_bytes(data))
    }
}

impl<T: i2c::I2c> I2cBus for T {
    type Error = T::Error;

    fn write(&mut self, address: Address, data: &[u8]) -> Result<(), Self::Error> {
        i2c::I2c::write(self, address, data)
    }

    fn read(&mut self, address: Address, buf: &mut [u8]) -> Result<(), Self::Error> {
        i2c::I2c::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: Address,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        i2c::I2c::write_read(self, address, write_data, read_buf)
    }
}
