//! HMAC-based ([RFC 4226][4226]) and time-based ([RFC 6238][6238]) one-time passwords, with the
//! [RFC 4648][4648] Base32 codec used to share their secrets.
//!
//! A [`Hotp`] engine turns a shared [`Secret`] and a 64-bit counter into a fixed-length decimal
//! [`Code`]. A [`Totp`] engine derives that counter from the clock. Both are configured once, at
//! construction, and are otherwise stateless: persisting secrets and counters is left to the
//! caller.
//!
//! # Examples
//!
//! ```rust
//! use ring::rand::SystemRandom;
//! use rfc_6238::{provision, Secret, Totp};
//!
//! # fn main() -> rfc_6238::Result<()> {
//! // Enrolment: make a secret and show it to the user's authenticator app
//! let encoded = provision::generate_secret(&SystemRandom::new(), provision::DEFAULT_SECRET_BYTES)?;
//! let uri = provision::auth_uri("alice@example.com", &encoded, Some("Example"));
//! assert!(uri.starts_with("otpauth://totp/Example%3Aalice%40example.com?secret="));
//!
//! // Login: check what the user typed
//! let totp = Totp::with_defaults(Secret::from_base32(&encoded)?);
//! let typed = totp.generate();
//! assert!(totp.verify(&typed));
//! # Ok(())
//! # }
//! ```
//!
//! [4226]: https://datatracker.ietf.org/doc/html/rfc4226
//! [6238]: https://datatracker.ietf.org/doc/html/rfc6238
//! [4648]: https://datatracker.ietf.org/doc/html/rfc4648

pub mod base32;
pub mod digest;
pub mod digits;
mod error;
mod hotp;
pub mod provision;
mod secret;
mod totp;

pub use digest::Algorithm;
pub use error::{ConfigError, Error, Result};
pub use hotp::{Code, Hotp, HotpConfig};
pub use secret::Secret;
pub use totp::{Timestamp, Totp, TotpConfig, VerifyOptions, DEFAULT_TIME_STEP};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engines_are_shareable() {
        assert_send_sync::<Hotp>();
        assert_send_sync::<Totp>();
    }

    #[test]
    fn shared_engine_across_threads() {
        let totp = std::sync::Arc::new(Totp::with_defaults(b"12345678901234567890"));
        let handles: Vec<_> = (0..4_u64)
            .map(|i| {
                let totp = totp.clone();
                std::thread::spawn(move || totp.generate_at(Timestamp::from_secs(59 + i * 30)))
            })
            .collect();
        let codes: Vec<Code> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for (i, code) in codes.iter().enumerate() {
            assert_eq!(*code, totp.generate_at(Timestamp::from_secs(59 + i as u64 * 30)));
        }
    }
}
