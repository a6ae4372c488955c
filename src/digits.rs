//! Validated code length.

use core::convert::TryFrom;
use core::fmt;

use crate::error::{ConfigError, Error};

/// Shortest code an engine will produce.
pub const MIN_DIGITS: u8 = 1;

/// Longest code an engine will produce.
///
/// Dynamic truncation yields a 31-bit value, which never has more than ten decimal digits; longer
/// codes would only add constant leading zeros.
pub const MAX_DIGITS: u8 = 10;

/// Number of decimal digits in a generated code.
///
/// [RFC 4226][4226] requires at least six digits and [RFC 6238][6238] uses eight in its test
/// vectors. Shorter lengths are accepted for interoperability with existing deployments, but
/// anything outside [`MIN_DIGITS`]`..=`[`MAX_DIGITS`] is refused at engine construction.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226#section-5.3
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238#appendix-B
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Digits(u8);

impl Digits {
    /// The digit count as a plain integer.
    pub fn get(self) -> u8 {
        self.0
    }

    /// `10^digits`, computed in 64 bits so the largest allowed length cannot overflow.
    pub(crate) fn modulus(self) -> u64 {
        10_u64.pow(u32::from(self.0))
    }

    /// Reduce a truncated digest to a code of this length.
    pub(crate) fn reduce(self, binary: u32) -> u64 {
        u64::from(binary) % self.modulus()
    }

    /// Render a value left-padded with zeros to exactly this many characters.
    pub(crate) fn pad(self, value: impl fmt::Display) -> String {
        format!("{:0>width$}", value, width = usize::from(self.0))
    }
}

impl Default for Digits {
    fn default() -> Self {
        Digits(6)
    }
}

impl TryFrom<u8> for Digits {
    type Error = Error;

    fn try_from(digits: u8) -> Result<Self, Self::Error> {
        if (MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            Ok(Digits(digits))
        } else {
            Err(ConfigError::Digits(digits).into())
        }
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert!(Digits::try_from(0_u8).is_err());
        assert!(Digits::try_from(1_u8).is_ok());
        assert!(Digits::try_from(10_u8).is_ok());
        assert_eq!(
            Digits::try_from(11_u8),
            Err(Error::InvalidConfiguration(ConfigError::Digits(11)))
        );
    }

    #[test]
    fn reduce_at_maximum_length() {
        let digits = Digits::try_from(MAX_DIGITS).unwrap();
        assert_eq!(digits.modulus(), 10_000_000_000);
        assert_eq!(digits.reduce(0x7fff_ffff), 2_147_483_647);
        assert_eq!(digits.pad(digits.reduce(0x7fff_ffff)), "2147483647");
        assert_eq!(digits.pad(digits.reduce(7)), "0000000007");
    }

    #[test]
    fn pad_keeps_leading_zeros() {
        let digits = Digits::default();
        assert_eq!(digits.pad(7), "000007");
        assert_eq!(digits.pad("007"), "000007");
        assert_eq!(digits.pad("123456"), "123456");
    }
}
