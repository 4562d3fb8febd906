//! DS1624 digital thermometer
//!
//! Two-wire thermometer with 13-bit resolution (0.03125°C). A conversion
//! is started with a command byte, takes up to a second at full
//! resolution, and the most recent result is read back as a big-endian
//! register word. In continuous mode (the power-on default) one
//! start command keeps the device converting.
//!
//! The driver owns the bus handle for the lifetime of the session; use
//! [`Ds1624::release`] to get it back.

use embedded_hal::i2c::{Error as _, ErrorKind};
use embedded_hal_async::delay::DelayNs;

use thermoplate_core::temperature::{decode, RawReading, Temperature};
use thermoplate_core::traits::{SensorError, TemperatureSensor};
use thermoplate_hal::{Address, I2cBus};

/// Address with A2..A0 tied low
pub const DEFAULT_ADDRESS: Address = 0x48;

/// Delay between starting a conversion and reading it back
pub const DEFAULT_SETTLE_MS: u32 = 100;

/// EEPROM write cycle of the configuration register
const CONFIG_WRITE_MS: u32 = 10;

/// Command bytes
#[derive(Clone, Copy)]
enum Command {
    ReadTemperature = 0xAA,
    StartConvert = 0xEE,
    StopConvert = 0x22,
    AccessConfig = 0xAC,
}

/// Configuration/status register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ds1624Config(pub u8);

impl Ds1624Config {
    /// Conversion complete
    pub const DONE: u8 = 0x80;
    /// One conversion per start command instead of continuous
    pub const ONE_SHOT: u8 = 0x01;

    /// The last conversion has finished
    pub fn is_done(self) -> bool {
        self.0 & Self::DONE != 0
    }

    /// Conversions run only on a start command
    pub fn is_one_shot(self) -> bool {
        self.0 & Self::ONE_SHOT != 0
    }

    /// Copy with the one-shot bit set or cleared
    pub fn with_one_shot(self, one_shot: bool) -> Self {
        if one_shot {
            Self(self.0 | Self::ONE_SHOT)
        } else {
            Self(self.0 & !Self::ONE_SHOT)
        }
    }
}

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bus transfer failed
    Bus(E),
}

/// DS1624 session on an I2C bus
#[derive(Debug)]
pub struct Ds1624<I2C, D> {
    i2c: I2C,
    address: Address,
    delay: D,
    settle_ms: u32,
}

impl<I2C: I2cBus, D: DelayNs> Ds1624<I2C, D> {
    /// Create a session for the device at `address`
    pub fn new(i2c: I2C, address: Address, delay: D) -> Self {
        Self {
            i2c,
            address,
            delay,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }

    /// Override the start-to-read delay
    pub fn with_settle_time(mut self, settle_ms: u32) -> Self {
        self.settle_ms = settle_ms;
        self
    }

    /// Device address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Begin temperature conversion
    pub fn start_conversion(&mut self) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_byte(self.address, Command::StartConvert as u8)
            .map_err(Error::Bus)
    }

    /// Halt continuous conversion after the current one
    pub fn stop_conversion(&mut self) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_byte(self.address, Command::StopConvert as u8)
            .map_err(Error::Bus)
    }

    /// Read the last completed conversion without starting a new one
    ///
    /// The device sends MSB first; the SMBus word read swaps it into the
    /// [`RawReading`] layout (integer in the low byte).
    pub fn read_register(&mut self) -> Result<RawReading, Error<I2C::Error>> {
        self.i2c
            .read_word(self.address, Command::ReadTemperature as u8)
            .map(RawReading)
            .map_err(Error::Bus)
    }

    /// Start a conversion, wait for it to settle and read the register
    pub async fn sample(&mut self) -> Result<RawReading, Error<I2C::Error>> {
        self.start_conversion()?;
        self.delay.delay_ms(self.settle_ms).await;
        self.read_register()
    }

    /// Start a conversion and decode the result
    pub async fn measure(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.sample().await.map(decode)
    }

    /// Read the configuration/status register
    pub fn configuration(&mut self) -> Result<Ds1624Config, Error<I2C::Error>> {
        self.i2c
            .read_byte_data(self.address, Command::AccessConfig as u8)
            .map(Ds1624Config)
            .map_err(Error::Bus)
    }

    /// Select one-shot or continuous conversion
    ///
    /// The register is EEPROM backed; this waits out the write cycle.
    pub async fn set_one_shot(&mut self, one_shot: bool) -> Result<(), Error<I2C::Error>> {
        let config = self.configuration()?.with_one_shot(one_shot);
        self.i2c
            .write_byte_data(self.address, Command::AccessConfig as u8, config.0)
            .map_err(Error::Bus)?;
        self.delay.delay_ms(CONFIG_WRITE_MS).await;
        Ok(())
    }

    /// End the session and return the bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2cBus, D: DelayNs> TemperatureSensor for Ds1624<I2C, D> {
    async fn read_raw(&mut self) -> Result<RawReading, SensorError> {
        self.sample().await.map_err(|Error::Bus(e)| match e.kind() {
            ErrorKind::NoAcknowledge(_) => SensorError::NotResponding,
            _ => SensorError::Bus,
        })
    }
}
