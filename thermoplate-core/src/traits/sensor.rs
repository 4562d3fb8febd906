//! Temperature sensor trait

use core::future::Future;

use crate::temperature::{RawReading, Temperature};

/// Errors that can occur with temperature sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Device did not acknowledge its address
    NotResponding,
    /// Other bus failure
    Bus,
}

/// Latest known state of a sensor, as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorStatus {
    /// No reading has completed yet
    #[default]
    Waiting,
    /// The last reading failed
    Fault(SensorError),
    /// The last reading succeeded
    Ready(Temperature),
}

impl From<Result<Temperature, SensorError>> for SensorStatus {
    fn from(result: Result<Temperature, SensorError>) -> Self {
        match result {
            Ok(t) => SensorStatus::Ready(t),
            Err(e) => SensorStatus::Fault(e),
        }
    }
}

/// Trait for register-based digital temperature sensors
///
/// Implementations run whatever conversion sequence the device needs
/// and return the raw register word; decoding is shared.
pub trait TemperatureSensor {
    /// Run a conversion and read the raw register word
    fn read_raw(&mut self) -> impl Future<Output = Result<RawReading, SensorError>>;

    /// Run a conversion and decode the result
    fn read_temperature(&mut self) -> impl Future<Output = Result<Temperature, SensorError>> {
        async move { self.read_raw().await.map(Temperature::from) }
    }
}
