//! HMAC algorithm selection and dynamic truncation.

use core::fmt;
use core::str::FromStr;

use ring::hmac::{self, Key, Tag, HMAC_SHA1_FOR_LEGACY_USE_ONLY, HMAC_SHA256, HMAC_SHA512};

use crate::error::{ConfigError, Error};

/// Hash function underlying the HMAC.
///
/// [RFC 4226][4226] prescribes HMAC-SHA1. [RFC 6238][6238] extends TOTP to HMAC-SHA256 and
/// HMAC-SHA512, which authenticator apps advertise through the `algorithm` URI parameter. No other
/// choices exist; names are parsed with [`FromStr`], which ignores case and the separators in
/// spellings like `SHA-256` or `sha_512`.
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226
/// [6238]: https://datatracker.ietf.org/doc/html/rfc6238#section-1.2
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Canonical name, as used in `otpauth` URIs.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha1 => "SHA1",
            Algorithm::Sha256 => "SHA256",
            Algorithm::Sha512 => "SHA512",
        }
    }

    pub(crate) fn key(self, secret: &[u8]) -> Key {
        let algorithm = match self {
            Algorithm::Sha1 => HMAC_SHA1_FOR_LEGACY_USE_ONLY,
            Algorithm::Sha256 => HMAC_SHA256,
            Algorithm::Sha512 => HMAC_SHA512,
        };
        Key::new(algorithm, secret)
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::Sha1
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(*c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "SHA1" => Ok(Algorithm::Sha1),
            "SHA256" => Ok(Algorithm::Sha256),
            "SHA512" => Ok(Algorithm::Sha512),
            _ => Err(ConfigError::UnsupportedAlgorithm(name.to_owned()).into()),
        }
    }
}

/// HMAC digest produced by one of the supported [`Algorithm`]s.
#[derive(Clone, Debug)]
pub struct HmacDigest(pub(crate) Tag);

impl AsRef<[u8]> for HmacDigest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Digest for HmacDigest {}

/// Dynamic truncation of an HMAC digest.
///
/// # Notes
///
/// Implementors should take care that their digests are always at least 20 bytes long (the size
/// of an HMAC-SHA1 tag), or [`Digest::truncate` will panic](#panics).
pub trait Digest: AsRef<[u8]> {
    /// Reduce the digest to the 31-bit value described in [RFC 4226, section 5.3][4226].
    ///
    /// [4226]: https://datatracker.ietf.org/doc/html/rfc4226#section-5.3
    ///
    /// # Panics
    ///
    /// Truncating a digest shorter than 20 bytes panics. This never happens for [`HmacDigest`].
    fn truncate(&self) -> u32 {
        let digest = self.as_ref();
        let len = digest.len();
        // Offsets reach 15 and four bytes are read from there; every supported tag is 20+ bytes
        assert!(len >= 20);
        let index = usize::from(digest[len - 1] & 0xf);
        let bytes = [
            // Strip leading bit to remove signed/unsigned ambiguity
            digest[index] & 0x7f,
            digest[index + 1],
            digest[index + 2],
            digest[index + 3],
        ];
        u32::from_be_bytes(bytes)
    }
}

/// HMAC of an eight-byte, big-endian counter.
pub(crate) fn sign(key: &Key, counter: u64) -> HmacDigest {
    HmacDigest(hmac::sign(key, &counter.to_be_bytes()))
}
