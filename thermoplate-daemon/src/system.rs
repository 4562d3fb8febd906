//! Linux system information
//!
//! Address, uptime and wall clock for the information pages, and the
//! shutdown command.

use std::fs;
use std::process::Command;

use chrono::{Datelike, Local, Timelike};
use heapless::String;
use log::*;

use thermoplate_core::frame::COLS;
use thermoplate_core::traits::{ClockTime, SystemError, SystemInfo};

const PROC_UPTIME: &str = "/proc/uptime";

/// Host system queried through `ip`, procfs and the local clock
#[derive(Debug, Clone)]
pub struct LinuxSystem {
    interface: std::string::String,
    shutdown_command: std::string::String,
}

impl LinuxSystem {
    pub fn new(interface: &str, shutdown_command: &str) -> Self {
        Self {
            interface: interface.into(),
            shutdown_command: shutdown_command.into(),
        }
    }
}

impl SystemInfo for LinuxSystem {
    fn ip_address(&mut self) -> Result<String<COLS>, SystemError> {
        let output = Command::new("ip")
            .args(["addr", "show", self.interface.as_str()])
            .output()
            .map_err(|e| {
                warn!("Failed to run ip: {}", e);
                SystemError::Unavailable
            })?;
        if !output.status.success() {
            debug!("ip addr show {} exited with {}", self.interface, output.status);
            return Err(SystemError::CommandFailed);
        }
        let stdout = core::str::from_utf8(&output.stdout).map_err(|_| SystemError::Parse)?;
        parse_inet_address(stdout)
    }

    fn uptime_seconds(&mut self) -> Result<u64, SystemError> {
        let text = fs::read_to_string(PROC_UPTIME).map_err(|e| {
            warn!("Failed to read {}: {}", PROC_UPTIME, e);
            SystemError::Unavailable
        })?;
        parse_uptime(&text)
    }

    fn local_time(&mut self) -> ClockTime {
        let now = Local::now();
        ClockTime {
            year: now.year().clamp(0, u16::MAX as i32) as u16,
            month: now.month() as u8,
            day: now.day() as u8,
            hour: now.hour() as u8,
            minute: now.minute() as u8,
            second: now.second() as u8,
        }
    }

    fn shutdown(&mut self) -> Result<(), SystemError> {
        info!("Running shutdown command: {}", self.shutdown_command);
        let status = Command::new("sh")
            .arg("-c")
            .arg(&self.shutdown_command)
            .status()
            .map_err(|e| {
                error!("Failed to run shutdown command: {}", e);
                SystemError::Unavailable
            })?;
        if status.success() {
            Ok(())
        } else {
            error!("Shutdown command exited with {}", status);
            Err(SystemError::CommandFailed)
        }
    }
}

/// First IPv4 address in `ip addr show` output, without prefix length
pub fn parse_inet_address(output: &str) -> Result<String<COLS>, SystemError> {
    let address = output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("inet") => fields.next(),
                _ => None,
            }
        })
        .next()
        .ok_or(SystemError::Unavailable)?;

    let address = address.split('/').next().unwrap_or(address);
    String::try_from(address).map_err(|_| SystemError::Parse)
}

/// Whole seconds from the first field of `/proc/uptime`
pub fn parse_uptime(text: &str) -> Result<u64, SystemError> {
    let seconds: f64 = text
        .split_whitespace()
        .next()
        .ok_or(SystemError::Parse)?
        .parse()
        .map_err(|_| SystemError::Parse)?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(SystemError::Parse);
    }
    Ok(seconds as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_OUTPUT: &str = "\
2: eth0: <BROADCAST,MULTICAST,UP,LOWER_UP> mtu 1500 qdisc mq state UP group default qlen 1000
    link/ether b8:27:eb:12:34:56 brd ff:ff:ff:ff:ff:ff
    inet 192.168.1.42/24 brd 192.168.1.255 scope global dynamic eth0
       valid_lft 85645sec preferred_lft 85645sec
    inet 10.0.0.5/8 scope global secondary eth0
    inet6 fe80::ba27:ebff:fe12:3456/64 scope link
       valid_lft forever preferred_lft forever
";

    #[test]
    fn test_first_inet_address() {
        assert_eq!(parse_inet_address(IP_OUTPUT).unwrap().as_str(), "192.168.1.42");
    }

    #[test]
    fn test_inet6_only_is_unavailable() {
        let output = "    inet6 fe80::1/64 scope link\n";
        assert_eq!(parse_inet_address(output), Err(SystemError::Unavailable));
    }

    #[test]
    fn test_interface_down() {
        assert_eq!(parse_inet_address(""), Err(SystemError::Unavailable));
    }

    #[test]
    fn test_address_without_prefix() {
        assert_eq!(
            parse_inet_address("inet 127.0.0.1 scope host lo").unwrap().as_str(),
            "127.0.0.1"
        );
    }

    #[test]
    fn test_uptime() {
        assert_eq!(parse_uptime("350735.47 234388.90\n"), Ok(350735));
        assert_eq!(parse_uptime("12.99 1.00"), Ok(12));
    }

    #[test]
    fn test_uptime_garbage() {
        assert_eq!(parse_uptime(""), Err(SystemError::Parse));
        assert_eq!(parse_uptime("abc 1.0"), Err(SystemError::Parse));
        assert_eq!(parse_uptime("-1.0 2.0"), Err(SystemError::Parse));
    }

    #[test]
    fn test_local_time_in_range() {
        let now = LinuxSystem::new("lo", "true").local_time();
        assert!((1..=12).contains(&now.month));
        assert!((1..=31).contains(&now.day));
        assert!(now.hour < 24);
    }
}
