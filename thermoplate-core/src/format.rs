//! Text formatting for the information pages

use core::fmt::Write;

use heapless::String;

use crate::frame::{Frame, COLS};
use crate::traits::{ClockTime, SensorStatus};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Format an uptime as `"{days}d HH:MM:SS"`
///
/// Hours are within the current day.
pub fn format_uptime(seconds: u64) -> String<COLS> {
    let days = seconds / SECONDS_PER_DAY;
    let remainder = seconds % SECONDS_PER_DAY;
    let hours = remainder / SECONDS_PER_HOUR;
    let minutes = (remainder % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = remainder % SECONDS_PER_MINUTE;

    let mut out = String::new();
    // Only fails past 16 characters, i.e. more than 10^7 days
    let _ = write!(out, "{}d {:02}:{:02}:{:02}", days, hours, minutes, secs);
    out
}

/// Date on the top row, time on the bottom row
pub fn clock_frame(time: &ClockTime) -> Frame {
    let mut date: String<COLS> = String::new();
    let mut clock: String<COLS> = String::new();
    let _ = write!(
        date,
        "   {:02}.{:02}.{:04}",
        time.day, time.month, time.year
    );
    let _ = write!(
        clock,
        "    {:02}:{:02}:{:02}",
        time.hour, time.minute, time.second
    );
    Frame::new(&date, &clock)
}

/// Page showing the IP address
pub fn ip_frame(address: Option<&str>) -> Frame {
    Frame::page("IP Address:", address.unwrap_or("unavailable"))
}

/// Page showing the uptime
pub fn uptime_frame(seconds: Option<u64>) -> Frame {
    match seconds {
        Some(s) => Frame::page("RPi Uptime:", &format_uptime(s)),
        None => Frame::page("RPi Uptime:", "unavailable"),
    }
}

/// Page showing the latest sensor reading
pub fn temperature_frame(status: SensorStatus) -> Frame {
    let mut value: String<COLS> = String::new();
    match status {
        SensorStatus::Ready(t) => {
            let _ = write!(value, "  {} C", t);
        }
        SensorStatus::Fault(_) => {
            let _ = value.push_str("  sensor fault");
        }
        SensorStatus::Waiting => {
            let _ = value.push_str("  waiting...");
        }
    }
    Frame::page("Temperature:", &value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temperature::{decode, RawReading};
    use crate::traits::SensorError;

    #[test]
    fn test_uptime() {
        assert_eq!(format_uptime(0).as_str(), "0d 00:00:00");
        assert_eq!(format_uptime(59).as_str(), "0d 00:00:59");
        assert_eq!(format_uptime(3 * 3600 + 25 * 60 + 7).as_str(), "0d 03:25:07");
        assert_eq!(
            format_uptime(2 * 86_400 + 13 * 3600 + 5).as_str(),
            "2d 13:00:05"
        );
    }

    #[test]
    fn test_clock() {
        let time = ClockTime {
            year: 2013,
            month: 8,
            day: 4,
            hour: 9,
            minute: 5,
            second: 30,
        };
        let frame = clock_frame(&time);
        assert_eq!(frame.line(0), Some("   04.08.2013   "));
        assert_eq!(frame.line(1), Some("    09:05:30    "));
    }

    #[test]
    fn test_info_pages() {
        let ip = ip_frame(Some("192.168.1.20"));
        assert_eq!(ip.line(0), Some("IP Address:     "));
        assert_eq!(ip.line(1), Some("192.168.1.20    "));

        let uptime = uptime_frame(Some(86_400 + 61));
        assert_eq!(uptime.line(0), Some("RPi Uptime:     "));
        assert_eq!(uptime.line(1), Some("1d 00:01:01     "));

        assert_eq!(ip_frame(None).line(1), Some("unavailable     "));
        assert_eq!(uptime_frame(None).line(1), Some("unavailable     "));
    }

    #[test]
    fn test_temperature_page() {
        let ready = temperature_frame(SensorStatus::Ready(decode(RawReading(0x1019))));
        assert_eq!(ready.line(0), Some("Temperature:    "));
        assert_eq!(ready.line(1), Some("  25.06 C       "));

        let negative = temperature_frame(SensorStatus::Ready(decode(RawReading(0xF0E6))));
        assert_eq!(negative.line(1), Some("  -25.06 C      "));

        let fault = temperature_frame(SensorStatus::Fault(SensorError::Bus));
        assert_eq!(fault.line(1), Some("  sensor fault  "));

        let waiting = temperature_frame(SensorStatus::Waiting);
        assert_eq!(waiting.line(1), Some("  waiting...    "));
    }
}
