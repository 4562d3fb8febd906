//! DS1624 temperature register decoding
//!
//! The DS1624 reports temperature as a 13-bit two's complement value with
//! a resolution of 0.03125°C, left-justified in a 16-bit big-endian
//! register:
//!
//! ```text
//!   MSB (first on the wire)        LSB (second on the wire)
//!  ┌───────────────────────────┐  ┌───────────────────────────┐
//!  │ S  64 32 16  8  4  2  1   │  │ ½  ¼  ⅛ 1/16 1/32 0  0  0 │
//!  └───────────────────────────┘  └───────────────────────────┘
//! ```
//!
//! An SMBus word read on a little-endian host swaps the two bytes, so the
//! [`RawReading`] handed to [`decode`] carries the integer byte in its low
//! half and the fraction byte in its high half.

use core::fmt;

/// Sign bit of the integer byte
const SIGN_BIT: u8 = 0x80;

/// Fraction bits are the top 5 of the fraction byte
const FRACTION_SHIFT: u8 = 3;

/// Mask of a 5-bit fraction field
const FRACTION_MASK: u8 = 0x1F;

/// Raw 16-bit word as returned by an SMBus word read
///
/// Low byte: signed integer degrees. High byte: fraction in 1/32°C steps
/// in bits 7..3, bits 2..0 always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReading(pub u16);

impl RawReading {
    /// Build a reading from the register bytes in wire order (MSB first)
    pub const fn from_register_bytes(msb: u8, lsb: u8) -> Self {
        Self(u16::from_le_bytes([msb, lsb]))
    }

    /// Integer byte (low half of the word)
    pub const fn integer_byte(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// Fraction byte (high half of the word), including the zero padding
    pub const fn fraction_byte(self) -> u8 {
        ((self.0 & 0xFF00) >> 8) as u8
    }

    /// Fraction in 1/32°C units, 0..=31
    pub const fn fraction_units(self) -> u8 {
        self.fraction_byte() >> FRACTION_SHIFT
    }

    /// Whether the sign bit of the integer byte is set
    pub const fn is_negative(self) -> bool {
        self.integer_byte() & SIGN_BIT == SIGN_BIT
    }
}

impl From<u16> for RawReading {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

/// Temperature in 1/32°C fixed-point units
///
/// For example, 25.0625°C is stored as 802 and -0.5°C as -16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(i16);

impl Temperature {
    /// Degrees Celsius per unit
    pub const STEP_CELSIUS: f32 = 0.03125;

    /// Units per whole degree
    pub const UNITS_PER_DEGREE: i16 = 32;

    /// Create a temperature from 1/32°C units
    pub const fn from_units(units: i16) -> Self {
        Self(units)
    }

    /// Temperature in 1/32°C units
    pub const fn units(self) -> i16 {
        self.0
    }

    /// Temperature in degrees Celsius
    ///
    /// Exact: every register value is representable in an `f32`.
    pub fn celsius(self) -> f32 {
        self.0 as f32 * Self::STEP_CELSIUS
    }

    /// Whether the temperature is below zero
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value split into whole degrees and 1/32°C fraction units
    ///
    /// Below zero the register fraction counts down from the next integer
    /// boundary, so the fraction returned here is the 5-bit two's
    /// complement of the raw one: -25.0625°C is stored as -26 + 30/32 and
    /// reported as `(25, 2)`.
    pub const fn magnitude(self) -> (u8, u8) {
        let abs = self.0.unsigned_abs();
        ((abs >> 5) as u8, (abs as u8) & FRACTION_MASK)
    }
}

impl From<RawReading> for Temperature {
    fn from(raw: RawReading) -> Self {
        decode(raw)
    }
}

/// Two decimals, halves rounded away from zero
impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (whole, fraction) = self.magnitude();
        let units = Self::UNITS_PER_DEGREE as u16;
        // 31/32 rounds to 97, so there is never a carry into `whole`
        let hundredths = (fraction as u16 * 100 + units / 2) / units;
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, whole, hundredths)
    }
}

/// Convert a raw register word to 1/32°C units
///
/// Total over all 16-bit inputs. The integer byte is sign-extended through
/// `i8`, so a set sign bit yields `value - 256` whole degrees and the
/// positive fraction then moves the result back up towards zero.
pub const fn decode_units(raw: u16) -> i16 {
    let reading = RawReading(raw);
    let whole = reading.integer_byte() as i8 as i16;
    whole * Temperature::UNITS_PER_DEGREE + reading.fraction_units() as i16
}

/// Convert a raw register word to a temperature
pub const fn decode(raw: RawReading) -> Temperature {
    Temperature(decode_units(raw.0))
}

/// Worked examples from the DS1624 datasheet, as (SMBus word, °C)
///
/// `0x007D` (+125°C) and `0x8000` (+0.5°C) are boundary values rather than
/// typical readings.
pub const DATASHEET_VECTORS: [(u16, f32); 7] = [
    (0x007D, 125.0),
    (0x1019, 25.0625),
    (0x8000, 0.5),
    (0x0000, 0.0),
    (0x80FF, -0.5),
    (0xF0E6, -25.0625),
    (0x00C9, -55.0),
];

/// Decode every datasheet vector
///
/// Yields `(raw, decoded, expected)` so callers can log or compare.
pub fn self_test() -> impl Iterator<Item = (RawReading, Temperature, f32)> {
    DATASHEET_VECTORS
        .iter()
        .map(|&(raw, expected)| (RawReading(raw), decode(RawReading(raw)), expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::string::ToString;

    fn celsius(raw: u16) -> f32 {
        decode(RawReading(raw)).celsius()
    }

    #[test]
    fn test_zero() {
        assert_eq!(celsius(0x0000), 0.0);
    }

    #[test]
    fn test_positive_with_fraction() {
        // integer byte 0x19 (25), fraction byte 0x10 -> 2/32
        assert_eq!(celsius(0x1019), 25.0625);
        assert_eq!(decode_units(0x1019), 802);
    }

    #[test]
    fn test_negative_whole() {
        // integer byte 0xC9 is -55, no fraction
        assert_eq!(celsius(0x00C9), -55.0);
    }

    #[test]
    fn test_negative_with_fraction() {
        // 0xFF = -1, fraction 0x80 >> 3 = 16 -> -1 + 0.5
        assert_eq!(celsius(0x80FF), -0.5);
        // 0xE6 = -26, fraction 0xF0 >> 3 = 30 -> -26 + 0.9375
        assert_eq!(celsius(0xF0E6), -25.0625);
    }

    #[test]
    fn test_boundary_vectors() {
        assert_eq!(celsius(0x007D), 125.0);
        assert_eq!(celsius(0x8000), 0.5);
    }

    #[test]
    fn test_datasheet_table() {
        for (raw, decoded, expected) in self_test() {
            assert_eq!(decoded.celsius(), expected, "raw {:#06x}", raw.0);
        }
    }

    #[test]
    fn test_magnitude_uses_twos_complement_fraction() {
        let t = decode(RawReading(0xF0E6));
        let raw_fraction = RawReading(0xF0E6).fraction_units();
        assert_eq!(raw_fraction, 30);
        assert_eq!(t.magnitude(), (25, (!raw_fraction).wrapping_add(1) & 0x1F));

        assert_eq!(decode(RawReading(0x80FF)).magnitude(), (0, 16));
        assert_eq!(decode(RawReading(0x00C9)).magnitude(), (55, 0));
        assert_eq!(decode(RawReading(0x1019)).magnitude(), (25, 2));
    }

    #[test]
    fn test_register_bytes() {
        let raw = RawReading::from_register_bytes(0x19, 0x10);
        assert_eq!(raw, RawReading(0x1019));
        assert_eq!(raw.integer_byte(), 0x19);
        assert_eq!(raw.fraction_byte(), 0x10);
        assert!(!raw.is_negative());
        assert!(RawReading(0x00C9).is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(decode(RawReading(0x1019)).to_string(), "25.06");
        assert_eq!(decode(RawReading(0x80FF)).to_string(), "-0.50");
        assert_eq!(decode(RawReading(0x00C9)).to_string(), "-55.00");
        assert_eq!(decode(RawReading(0xF0E6)).to_string(), "-25.06");
        assert_eq!(decode(RawReading(0x007D)).to_string(), "125.00");
        assert_eq!(Temperature::from_units(803).to_string(), "25.09");
    }

    #[test]
    fn test_display_rounds_like_printf() {
        // 23.65625°C prints as 23.66 with "%.2f"
        let t = decode(RawReading::from_register_bytes(23, 21 << 3));
        assert_eq!(t.celsius(), 23.65625);
        assert_eq!(t.to_string(), "23.66");
        // 0.96875 stays below 1.00
        assert_eq!(Temperature::from_units(31).to_string(), "0.97");
        assert_eq!(Temperature::from_units(-31).to_string(), "-0.97");
        assert_eq!(Temperature::from_units(4).to_string(), "0.13");
    }

    #[test]
    fn test_whole_domain() {
        for raw in 0..=u16::MAX {
            let reading = RawReading(raw);
            let t = decode(reading);
            let c = t.celsius();
            assert!(c.is_finite());

            // Quantised to exact 1/32 steps
            assert_eq!(c * 32.0, t.units() as f32);

            if reading.is_negative() {
                assert!(c < 0.0, "raw {:#06x} decoded to {}", raw, c);
                let (_, fraction) = t.magnitude();
                assert_eq!(
                    fraction,
                    (!reading.fraction_units()).wrapping_add(1) & FRACTION_MASK
                );
            } else {
                assert!(c >= 0.0);
                assert_eq!(t.magnitude().1, reading.fraction_units());
            }
        }
    }

    proptest! {
        #[test]
        fn prop_matches_big_endian_register(raw in any::<u16>()) {
            let [lo, hi] = raw.to_le_bytes();
            let register = i16::from_be_bytes([lo, hi]) >> 3;
            prop_assert_eq!(decode_units(raw), register);
        }

        #[test]
        fn prop_idempotent(raw in any::<u16>()) {
            prop_assert_eq!(decode(RawReading(raw)), decode(RawReading(raw)));
        }

        #[test]
        fn prop_padding_bits_ignored(raw in any::<u16>(), padding in 0u16..8) {
            let cleared = raw & !0x0700;
            prop_assert_eq!(decode_units(cleared), decode_units(cleared | (padding << 8)));
        }
    }
}
