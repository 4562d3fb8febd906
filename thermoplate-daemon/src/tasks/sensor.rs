//! Temperature sensor task
//!
//! Polls the DS1624 on its own cadence and publishes each result for the
//! controller.

use embassy_time::{Delay, Duration, Ticker};
use linux_embedded_hal::I2cdev;
use log::*;

use thermoplate_core::traits::{SensorError, TemperatureSensor};
use thermoplate_core::{decode, Temperature};
use thermoplate_drivers::sensor::Ds1624;

use crate::channels::TEMP_READING;

/// DS1624 on a Linux I2C device
pub type PlateSensor = Ds1624<I2cdev, Delay>;

/// Sensor task - one sample per poll interval
#[embassy_executor::task]
pub async fn sensor_task(mut sensor: PlateSensor, poll_ms: u32, log_raw: bool) {
    info!("Sensor task started (address {:#04x})", sensor.address());

    let mut ticker = Ticker::every(Duration::from_millis(poll_ms as u64));
    let mut last_fault: Option<SensorError> = None;

    loop {
        let reading = poll(&mut sensor, log_raw).await;

        match reading {
            Ok(t) => {
                if last_fault.take().is_some() {
                    info!("Sensor recovered");
                }
                debug!("Temperature {} C", t);
            }
            Err(e) => {
                // Log once per fault, not every poll
                if last_fault != Some(e) {
                    warn!("Sensor read failed: {:?}", e);
                }
                last_fault = Some(e);
            }
        }

        TEMP_READING.signal(reading);
        ticker.next().await;
    }
}

/// Take one sample and decode it
pub async fn poll<S: TemperatureSensor>(
    sensor: &mut S,
    log_raw: bool,
) -> Result<Temperature, SensorError> {
    let raw = sensor.read_raw().await?;
    if log_raw {
        debug!(
            "Raw reading {:#06x} ({:016b}): integer {:#04x}, fraction {}/32",
            raw.0,
            raw.0,
            raw.integer_byte(),
            raw.fraction_units()
        );
    }
    Ok(decode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use thermoplate_core::RawReading;

    struct Scripted {
        reading: Result<RawReading, SensorError>,
        reads: u32,
    }

    impl TemperatureSensor for Scripted {
        async fn read_raw(&mut self) -> Result<RawReading, SensorError> {
            self.reads += 1;
            self.reading
        }
    }

    #[test]
    fn test_poll_decodes() {
        let mut sensor = Scripted {
            reading: Ok(RawReading(0xF0E6)),
            reads: 0,
        };
        let t = block_on(poll(&mut sensor, true)).unwrap();
        assert_eq!(t.celsius(), -25.0625);
        assert_eq!(sensor.reads, 1);
    }

    #[test]
    fn test_poll_passes_fault() {
        let mut sensor = Scripted {
            reading: Err(SensorError::NotResponding),
            reads: 0,
        };
        assert_eq!(
            block_on(poll(&mut sensor, false)),
            Err(SensorError::NotResponding)
        );
    }
}
