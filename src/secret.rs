//! Shared secret.

use core::fmt;

use crate::base32;
use crate::error::Result;

/// Shared secret keying an HOTP or TOTP engine.
///
/// As per [RFC 4226][4226], "each HOTP generator has a different and unique secret." A `Secret`
/// owns its bytes and is consumed when an engine is built. Its `Debug` output never includes
/// the key material.
///
/// `From` is implemented for byte slices, byte arrays, and `Vec<u8>`, so raw keys can be passed
/// straight to [`Hotp::new`](crate::Hotp::new) and [`Totp::new`](crate::Totp::new). Secrets
/// in their provisioning form go through [`Secret::from_base32`].
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226#section-4
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(Vec<u8>);

impl Secret {
    /// Decode a Base32 secret such as the `secret` parameter of an `otpauth` URI.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidCharacter`](crate::Error::InvalidCharacter) if `encoded` is not
    /// Base32.
    ///
    /// ```rust
    /// use rfc_6238::Secret;
    ///
    /// let secret = Secret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
    /// assert_eq!(secret.len(), 20);
    /// ```
    pub fn from_base32(encoded: &str) -> Result<Self> {
        base32::decode(encoded).map(Secret)
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn expose(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Secret([redacted; {} bytes])", self.0.len())
    }
}

impl From<Vec<u8>> for Secret {
    fn from(bytes: Vec<u8>) -> Self {
        Secret(bytes)
    }
}

impl From<&'_ [u8]> for Secret {
    fn from(bytes: &[u8]) -> Self {
        Secret(bytes.to_vec())
    }
}

impl<const N: usize> From<&'_ [u8; N]> for Secret {
    fn from(bytes: &[u8; N]) -> Self {
        Secret(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Secret {
    fn from(bytes: [u8; N]) -> Self {
        Secret(bytes.to_vec())
    }
}
