//! Decimal MAC address decoding.
//!
//! Input records carry a 48-bit MAC address as a plain decimal integer,
//! e.g. `278159193857459` for `FC:FB:FB:F0:DD:B3`.

use std::fmt;

use crate::error::OuiCountError;

/// Largest value representable in 48 bits.
const MAC_MAX: u64 = (1 << 48) - 1;

/// A decoded 6-byte MAC address. Orders by byte tuple, which is numeric order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddress([u8; 6]);

/// The leading 3 bytes of a MAC address.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Prefix([u8; 3]);

impl MacAddress {
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// The OUI portion of this address.
    pub fn prefix(&self) -> Prefix {
        Prefix([self.0[0], self.0[1], self.0[2]])
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl Prefix {
    /// Shared key for every known prefix when vendor folding is on.
    pub const ZERO: Prefix = Prefix([0, 0, 0]);

    pub fn octets(&self) -> [u8; 3] {
        self.0
    }
}

impl From<[u8; 3]> for Prefix {
    fn from(octets: [u8; 3]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}")
    }
}

/// Decode one input record into a MAC address.
///
/// The record must hold exactly one whitespace-delimited token made only of
/// ASCII digits. Surrounding whitespace (including a trailing newline) is
/// ignored.
pub fn decode(record: &str) -> Result<MacAddress, OuiCountError> {
    let tokens: Vec<&str> = record.split_whitespace().collect();
    if tokens.len() != 1 {
        return Err(OuiCountError::MalformedRecord {
            record: record.to_string(),
            reason: format!(
                "expected exactly one string of digits, found {}",
                tokens.len()
            ),
        });
    }

    let digits = tokens[0];
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(OuiCountError::MalformedRecord {
            record: record.to_string(),
            reason: format!("found non-digit in {digits:?}"),
        });
    }

    // Only digits remain, so the sole parse failure is overflow.
    let n: u64 = digits.parse().map_err(|_| OuiCountError::OutOfRange {
        record: digits.to_string(),
    })?;
    if n > MAC_MAX {
        return Err(OuiCountError::OutOfRange {
            record: digits.to_string(),
        });
    }

    let be = n.to_be_bytes();
    Ok(MacAddress([be[2], be[3], be[4], be[5], be[6], be[7]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(record: &str) -> [u8; 6] {
        decode(record).expect("record should decode").octets()
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(bytes("00001"), [0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_trailing_newline() {
        assert_eq!(bytes("00001\n"), [0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(bytes("  00001\t  "), [0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_cisco() {
        assert_eq!(
            bytes("278159193857459"),
            [0xFC, 0xFB, 0xFB, 0xF0, 0xDD, 0xB3]
        );
    }

    #[test]
    fn test_max_48_bit_value() {
        assert_eq!(bytes("281474976710655"), [0xFF; 6]);
        assert_eq!(bytes("0"), [0; 6]);
    }

    #[test]
    fn test_big_endian_reassembly() {
        for n in [1u64, 255, 256, 0x0050_5600_0001, 0x1234_5678_9ABC, MAC_MAX] {
            let octets = bytes(&n.to_string());
            let back = octets.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
            assert_eq!(back, n);
        }
    }

    #[test]
    fn test_malformed_records() {
        for record in ["\n", "", "   ", "123XX456", "123\n456", "123 456", "-5", "+5", "0x10"] {
            let err = decode(record).unwrap_err();
            assert!(
                matches!(err, OuiCountError::MalformedRecord { .. }),
                "{record:?} should be malformed, got {err}"
            );
        }
    }

    #[test]
    fn test_too_big() {
        assert!(matches!(
            decode("1278159193857459"),
            Err(OuiCountError::OutOfRange { .. })
        ));
        assert!(matches!(
            decode("281474976710656"),
            Err(OuiCountError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_beyond_u64_is_out_of_range() {
        assert!(matches!(
            decode("99999999999999999999999999"),
            Err(OuiCountError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_display_and_prefix() {
        let mac = decode("278159193857459").unwrap();
        assert_eq!(mac.to_string(), "FC:FB:FB:F0:DD:B3");
        assert_eq!(mac.prefix().to_string(), "FC:FB:FB");
        assert_eq!(mac.prefix().octets(), [0xFC, 0xFB, 0xFB]);
    }

    #[test]
    fn test_ordering_is_numeric() {
        let low = decode("345040224257").unwrap();
        let high = decode("345051483631").unwrap();
        assert!(low < high);
    }
}
