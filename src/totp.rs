//! Time-based one-time passwords ([RFC 6238][6238]).
//!
//! A TOTP code is the HOTP code for the number of whole time steps elapsed since the Unix epoch.
//! [`Totp`] wraps a [`Hotp`] engine and only adds the time arithmetic.
//!
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238

use core::convert::TryFrom;
use core::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use ring::rand::SecureRandom;

use crate::digest::Algorithm;
use crate::error::{ConfigError, Result};
use crate::hotp::{Code, Hotp, HotpConfig};
use crate::provision;
use crate::secret::Secret;

/// A point in time, in milliseconds since the Unix epoch.
///
/// Converts from [`SystemTime`] and from a raw `u64` count of epoch milliseconds. Instants before
/// the epoch are clamped to it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    pub fn from_millis(millis: u64) -> Self {
        Timestamp(millis)
    }

    /// Saturates at the largest representable instant.
    pub fn from_secs(secs: u64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs(self) -> u64 {
        self.0 / 1000
    }

    fn checked_add(self, millis: u64) -> Option<Self> {
        self.0.checked_add(millis).map(Timestamp)
    }

    fn checked_sub(self, millis: u64) -> Option<Self> {
        self.0.checked_sub(millis).map(Timestamp)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        let millis = time
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Timestamp(millis)
    }
}

impl From<u64> for Timestamp {
    fn from(millis: u64) -> Self {
        Timestamp(millis)
    }
}

/// TOTP engine parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TotpConfig {
    /// Length of generated codes (default 6).
    pub digits: u8,
    /// HMAC hash function (default SHA-1).
    pub algorithm: Algorithm,
    /// Length of one time step in seconds (default 30).
    pub time_step: u64,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            digits: 6,
            algorithm: Algorithm::Sha1,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

/// Time step recommended by RFC 6238, in seconds.
pub const DEFAULT_TIME_STEP: u64 = 30;

/// Options for [`Totp::verify_with`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyOptions {
    /// Instant to verify at; the current time if `None`.
    pub timestamp: Option<Timestamp>,
    /// Number of steps tolerated on either side of the current one (default 1).
    pub window: u64,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            timestamp: None,
            window: 1,
        }
    }
}

/// Time-based one-time password generator and verifier.
///
/// ```rust
/// use rfc_6238::{Secret, Timestamp, Totp, TotpConfig};
///
/// let secret = Secret::from_base32("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap();
/// let totp = Totp::new(secret, TotpConfig { digits: 8, ..TotpConfig::default() }).unwrap();
/// assert_eq!(totp.generate_at(Timestamp::from_secs(59)), "94287082");
/// assert!(totp.verify_at("94287082", Timestamp::from_secs(89)));
/// ```
#[derive(Clone, Debug)]
pub struct Totp {
    hotp: Hotp,
    time_step: u64,
}

impl Totp {
    /// Build an engine for `secret`.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) for a zero
    /// time step or an unsupported digit count.
    pub fn new(secret: impl Into<Secret>, config: TotpConfig) -> Result<Self> {
        let hotp = Hotp::new(
            secret,
            HotpConfig {
                digits: config.digits,
                algorithm: config.algorithm,
            },
        )?;
        Self::from_hotp(hotp, config.time_step)
    }

    /// Six digits, HMAC-SHA1, 30-second steps: what authenticator apps assume when a URI says
    /// nothing else.
    pub fn with_defaults(secret: impl Into<Secret>) -> Self {
        Self {
            hotp: Hotp::with_defaults(secret),
            time_step: DEFAULT_TIME_STEP,
        }
    }

    /// Drive an existing HOTP engine from the clock.
    pub fn from_hotp(hotp: Hotp, time_step: u64) -> Result<Self> {
        if time_step == 0 {
            return Err(ConfigError::TimeStep.into());
        }
        Ok(Self { hotp, time_step })
    }

    pub fn hotp(&self) -> &Hotp {
        &self.hotp
    }

    pub fn time_step(&self) -> u64 {
        self.time_step
    }

    pub fn digits(&self) -> u8 {
        self.hotp.digits()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.hotp.algorithm()
    }

    /// Index of the time step containing `timestamp`.
    pub fn counter_at(&self, timestamp: impl Into<Timestamp>) -> u64 {
        timestamp.into().as_secs() / self.time_step
    }

    /// Code for the current time step.
    pub fn generate(&self) -> Code {
        self.generate_at(Timestamp::now())
    }

    /// Code for the time step containing `timestamp`.
    pub fn generate_at(&self, timestamp: impl Into<Timestamp>) -> Code {
        self.hotp.generate(self.counter_at(timestamp))
    }

    /// Check `code` against the current time, tolerating one step of clock drift either way.
    pub fn verify(&self, code: impl fmt::Display) -> bool {
        self.verify_with(code, VerifyOptions::default())
    }

    /// Check `code` at `timestamp`, tolerating one step of clock drift either way.
    pub fn verify_at(&self, code: impl fmt::Display, timestamp: impl Into<Timestamp>) -> bool {
        self.verify_with(
            code,
            VerifyOptions {
                timestamp: Some(timestamp.into()),
                ..VerifyOptions::default()
            },
        )
    }

    /// Check `code` against the steps from `-window` to `+window` around the chosen instant,
    /// earliest first.
    ///
    /// The comparison is on zero-padded strings in constant time. Steps that would fall before the
    /// epoch are skipped.
    pub fn verify_with(&self, code: impl fmt::Display, options: VerifyOptions) -> bool {
        let base = options.timestamp.unwrap_or_else(Timestamp::now);
        let candidate = self.hotp.pad(code);
        let window = options.window;

        // Offsets are whole steps; when a step overflows in milliseconds only the base is checked
        let step_millis = self.time_step.checked_mul(1000);
        let offset = |i: u64| step_millis.and_then(|step| step.checked_mul(i));

        let behind = (1..=window).rev().filter_map(|i| {
            let t = base.checked_sub(offset(i)?)?;
            Some((t, -(i as i128)))
        });
        let ahead = (1..=window).filter_map(|i| {
            let t = base.checked_add(offset(i)?)?;
            Some((t, i as i128))
        });
        let found = behind
            .chain(Some((base, 0)))
            .chain(ahead)
            .find(|&(t, _)| self.hotp.matches(&candidate, self.counter_at(t)));

        match found {
            Some((_, step)) => {
                debug!("totp code matched {} step(s) from {}", step, base.as_secs());
                true
            }
            None => {
                debug!("totp code not found within {} step(s) of {}", window, base.as_secs());
                false
            }
        }
    }

    /// Seconds until the current step ends.
    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds_at(Timestamp::now())
    }

    /// Seconds from `timestamp` until its step ends, in `1..=time_step`.
    ///
    /// Exactly on a boundary a new step has just begun, so the whole step remains.
    pub fn remaining_seconds_at(&self, timestamp: impl Into<Timestamp>) -> u64 {
        self.time_step - timestamp.into().as_secs() % self.time_step
    }

    /// See [`provision::generate_secret`].
    pub fn generate_secret<R>(rng: &R, byte_length: usize) -> Result<String>
    where
        R: SecureRandom + ?Sized,
    {
        provision::generate_secret(rng, byte_length)
    }

    /// See [`provision::auth_uri`].
    pub fn auth_uri(account: &str, secret: &str, issuer: Option<&str>) -> String {
        provision::auth_uri(account, secret, issuer)
    }
}
