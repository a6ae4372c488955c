//! Counter-based one-time passwords ([RFC 4226][4226]).
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226

use core::convert::TryFrom;
use core::fmt;

use log::{debug, trace};
use ring::{constant_time, hmac::Key};

use crate::digest::{self, Algorithm, Digest as _};
use crate::digits::Digits;
use crate::error::Result;
use crate::secret::Secret;

/// HOTP engine parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HotpConfig {
    /// Length of generated codes (default 6).
    pub digits: u8,
    /// HMAC hash function (default SHA-1).
    pub algorithm: Algorithm,
}

impl Default for HotpConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            algorithm: Algorithm::Sha1,
        }
    }
}

/// A generated one-time password: exactly as many decimal characters as the engine's digit
/// count, zero-padded on the left.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Code(String);

impl Code {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&'_ str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// HMAC-based one-time password generator and validator.
///
/// The secret is turned into an HMAC key once, at construction; the engine holds no other state,
/// so a single instance can serve any number of threads.
///
/// ```rust
/// use rfc_6238::Hotp;
///
/// let hotp = Hotp::with_defaults(b"12345678901234567890");
/// assert_eq!(hotp.generate(1), "287082");
/// assert_eq!(hotp.validate("287082", 0, 2), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct Hotp {
    key: Key,
    digits: Digits,
    algorithm: Algorithm,
}

impl Hotp {
    /// Build an engine for `secret`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if
    /// `config.digits` is outside
    /// [`MIN_DIGITS`](crate::digits::MIN_DIGITS)`..=`[`MAX_DIGITS`](crate::digits::MAX_DIGITS).
    pub fn new(secret: impl Into<Secret>, config: HotpConfig) -> Result<Self> {
        let digits = Digits::try_from(config.digits)?;
        Ok(Self::from_parts(secret.into(), digits, config.algorithm))
    }

    /// Build a six-digit HMAC-SHA1 engine, the parameters prescribed by RFC 4226.
    pub fn with_defaults(secret: impl Into<Secret>) -> Self {
        Self::from_parts(secret.into(), Digits::default(), Algorithm::default())
    }

    fn from_parts(secret: Secret, digits: Digits, algorithm: Algorithm) -> Self {
        Self {
            key: algorithm.key(secret.expose()),
            digits,
            algorithm,
        }
    }

    pub fn digits(&self) -> u8 {
        self.digits.get()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Compute the code for `counter`.
    ///
    /// The full 64-bit counter is fed to the HMAC as eight big-endian bytes.
    pub fn generate(&self, counter: u64) -> Code {
        trace!("generating {}-digit code for counter {}", self.digits, counter);
        let binary = digest::sign(&self.key, counter).truncate();
        Code(self.digits.pad(self.digits.reduce(binary)))
    }

    /// Look for `candidate` among the codes for `counter..=counter + window`.
    ///
    /// Returns the counter that produced the match; callers persist its successor to keep a code
    /// from being accepted twice. Only counters at or after `counter` are tried. The candidate is zero-padded to the configured length before the
    /// comparison, which is performed on the decimal strings in constant time.
    pub fn validate(&self, candidate: impl fmt::Display, counter: u64, window: u64) -> Option<u64> {
        let candidate = self.digits.pad(candidate);
        let found = (0..=window)
            .map_while(|i| counter.checked_add(i))
            .find(|&c| self.matches(&candidate, c));
        match found {
            Some(c) => debug!("hotp code matched at counter {} (offset {})", c, c - counter),
            None => debug!("hotp code not found in {} counters after {}", window, counter),
        }
        found
    }

    pub(crate) fn matches(&self, padded: &str, counter: u64) -> bool {
        let expected = self.generate(counter);
        constant_time::verify_slices_are_equal(expected.as_str().as_bytes(), padded.as_bytes())
            .is_ok()
    }

    pub(crate) fn pad(&self, candidate: impl fmt::Display) -> String {
        self.digits.pad(candidate)
    }
}
