//! Thermoplate - LCD plate controller daemon
//!
//! Drives a 16x2 character display with five buttons from a Linux
//! single-board computer: idle banner, a menu of information pages and a
//! shutdown entry. A DS1624 on the I2C bus supplies the temperature page.
//!
//! Usage: `thermoplate-daemon [--config <path>] [--self-test] [--read]`

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use embassy_executor::Spawner;
use embassy_time::Delay;
use linux_embedded_hal::I2cdev;
use log::*;

use thermoplate_core::config::PlateConfig;
use thermoplate_core::temperature;
use thermoplate_core::traits::SensorError;
use thermoplate_drivers::sensor::Ds1624;

use crate::channels::TEMP_READING;
use crate::console::StdinButtons;
use crate::controller::Controller;
use crate::system::LinuxSystem;
use crate::tasks::PlateSensor;

mod channels;
mod config;
mod console;
mod controller;
mod system;
mod tasks;

/// What the command line asked for
#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    self_test: bool,
    read: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--self-test" => parsed.self_test = true,
            "--read" => parsed.read = true,
            other => bail!("unknown argument {:?}", other),
        }
    }
    Ok(parsed)
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(spawner).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(spawner: Spawner) -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    if args.self_test {
        let failures = self_test();
        std::process::exit(if failures == 0 { 0 } else { 1 });
    }

    let config = config::load(args.config.as_deref()).context("loading configuration")?;
    info!(
        "Thermoplate starting: bus {}, sensor {:#04x}",
        config.i2c_bus, config.sensor_address
    );

    if args.read {
        let mut sensor = open_sensor(&config)?;
        let t = sensor
            .measure()
            .await
            .map_err(|e| anyhow!("reading sensor: {:?}", e))?;
        println!("{}", t);
        std::process::exit(0);
    }

    match open_sensor(&config) {
        Ok(sensor) => {
            spawner
                .spawn(tasks::sensor_task(
                    sensor,
                    config.sensor_poll_ms,
                    config.log_raw_readings,
                ))
                .map_err(|e| anyhow!("spawning sensor task: {:?}", e))?;
        }
        Err(e) => {
            // The menu still works without a sensor
            warn!("{:#}", e);
            TEMP_READING.signal(Err(SensorError::Bus));
        }
    }

    let buttons = StdinButtons::spawn().context("starting button input")?;
    let system = LinuxSystem::new(&config.network_interface, &config.shutdown_command);
    let controller = Controller::new(config.banner(), system);

    spawner
        .spawn(tasks::display_task())
        .map_err(|e| anyhow!("spawning display task: {:?}", e))?;
    spawner
        .spawn(tasks::controller_task(controller, buttons, config.tick_ms))
        .map_err(|e| anyhow!("spawning controller task: {:?}", e))?;

    info!("Tasks spawned");
    Ok(())
}

/// Open the bus and report the sensor configuration
fn open_sensor(config: &PlateConfig) -> Result<PlateSensor> {
    let bus = I2cdev::new(config.i2c_bus.as_str())
        .with_context(|| format!("opening I2C bus {}", config.i2c_bus))?;
    let mut sensor =
        Ds1624::new(bus, config.sensor_address, Delay).with_settle_time(config.settle_ms);

    match sensor.configuration() {
        Ok(c) => info!(
            "DS1624 config {:#04x} (one-shot: {}, done: {})",
            c.0,
            c.is_one_shot(),
            c.is_done()
        ),
        Err(e) => warn!("DS1624 not answering at {:#04x}: {:?}", config.sensor_address, e),
    }
    Ok(sensor)
}

/// Decode the datasheet examples; returns the number of mismatches
fn self_test() -> usize {
    let mut failures = 0;
    for (raw, decoded, expected) in temperature::self_test() {
        if decoded.celsius() == expected {
            info!("{:#06x} -> {} C", raw.0, decoded);
        } else {
            error!("{:#06x} -> {} C, expected {}", raw.0, decoded, expected);
            failures += 1;
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(args(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_all_args() {
        let parsed = args(&["--config", "/tmp/plate.toml", "--self-test", "--read"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("/tmp/plate.toml")));
        assert!(parsed.self_test);
        assert!(parsed.read);
    }

    #[test]
    fn test_missing_config_path() {
        assert!(args(&["--config"]).is_err());
    }

    #[test]
    fn test_unknown_argument() {
        let err = args(&["--verbose"]).unwrap_err();
        assert!(err.to_string().contains("--verbose"));
    }

    #[test]
    fn test_self_test_passes() {
        assert_eq!(self_test(), 0);
    }
}
