//! Provisioning helpers: fresh secrets and the `otpauth` URIs authenticator apps scan.

use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use ring::rand::SecureRandom;
use url::form_urlencoded;

use crate::base32;
use crate::error::{Error, Result};

/// Secret size recommended by [RFC 4226][4226] (160 bits).
///
/// [4226]: https://datatracker.ietf.org/doc/html/rfc4226#section-4
pub const DEFAULT_SECRET_BYTES: usize = 20;

// Characters left literal by ECMAScript's `encodeURIComponent`, which authenticator apps expect
const LABEL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Draw `byte_length` bytes from `rng` and return them as padded Base32.
///
/// The caller chooses the source; in production this should be [`ring::rand::SystemRandom`].
///
/// # Errors
///
/// Returns [`Error::Random`] if the source fails.
///
/// ```rust
/// use ring::rand::SystemRandom;
/// use rfc_6238::provision::{generate_secret, DEFAULT_SECRET_BYTES};
///
/// let secret = generate_secret(&SystemRandom::new(), DEFAULT_SECRET_BYTES).unwrap();
/// assert_eq!(secret.len(), 32);
/// ```
pub fn generate_secret<R>(rng: &R, byte_length: usize) -> Result<String>
where
    R: SecureRandom + ?Sized,
{
    let mut bytes = vec![0_u8; byte_length];
    rng.fill(&mut bytes).map_err(|_| Error::Random)?;
    debug!("generated {}-byte secret", byte_length);
    Ok(base32::encode(&bytes))
}

/// Build the `otpauth://totp/` URI for an account.
///
/// The label is `issuer:account`, or only `account` when there is no issuer (an empty issuer
/// counts as none), percent-encoded as a single path segment so the colon is escaped. Query
/// values are form-encoded, `secret` first.
///
/// ```rust
/// use rfc_6238::provision::auth_uri;
///
/// assert_eq!(
///     auth_uri("user@example.com", "SECRET123", Some("MyApp")),
///     "otpauth://totp/MyApp%3Auser%40example.com?secret=SECRET123&issuer=MyApp"
/// );
/// ```
pub fn auth_uri(account: &str, secret: &str, issuer: Option<&str>) -> String {
    let issuer = issuer.filter(|i| !i.is_empty());
    let label = match issuer {
        Some(issuer) => format!("{}:{}", issuer, account),
        None => account.to_owned(),
    };

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("secret", secret);
    if let Some(issuer) = issuer {
        query.append_pair("issuer", issuer);
    }

    format!(
        "otpauth://totp/{}?{}",
        utf8_percent_encode(&label, LABEL),
        query.finish()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring::rand::SystemRandom;

    #[test]
    fn default_secret_is_32_symbols() {
        let secret = generate_secret(&SystemRandom::new(), DEFAULT_SECRET_BYTES).unwrap();
        assert_eq!(secret.len(), 32);
        assert!(!secret.contains('='));
        assert_eq!(base32::decode(&secret).unwrap().len(), DEFAULT_SECRET_BYTES);
    }

    #[test]
    fn odd_sized_secret_is_padded() {
        let secret = generate_secret(&SystemRandom::new(), 10).unwrap();
        assert_eq!(secret.len(), 16);
        let secret = generate_secret(&SystemRandom::new(), 11).unwrap();
        assert_eq!(secret.len(), 24);
        assert!(secret.ends_with("======"));
        assert_eq!(base32::decode(&secret).unwrap().len(), 11);
    }

    #[test]
    fn empty_secret() {
        assert_eq!(generate_secret(&SystemRandom::new(), 0).unwrap(), "");
    }

    #[test]
    fn secrets_differ() {
        let rng = SystemRandom::new();
        assert_ne!(
            generate_secret(&rng, DEFAULT_SECRET_BYTES).unwrap(),
            generate_secret(&rng, DEFAULT_SECRET_BYTES).unwrap()
        );
    }

    #[test]
    fn dyn_source() {
        let rng: &dyn SecureRandom = &SystemRandom::new();
        assert_eq!(generate_secret(rng, 5).unwrap().len(), 8);
    }

    #[test]
    fn uri_with_issuer() {
        let uri = auth_uri("user@example.com", "SECRET123", Some("MyApp"));
        assert!(uri.starts_with("otpauth://totp/"));
        assert!(uri.contains("secret=SECRET123"));
        assert!(uri.contains("issuer=MyApp"));
    }

    #[test]
    fn uri_without_issuer() {
        assert_eq!(
            auth_uri("alice", "JBSWY3DP", None),
            "otpauth://totp/alice?secret=JBSWY3DP"
        );
        assert_eq!(
            auth_uri("alice", "JBSWY3DP", Some("")),
            "otpauth://totp/alice?secret=JBSWY3DP"
        );
    }

    #[test]
    fn uri_escaping() {
        assert_eq!(
            auth_uri("a b/c", "JBSWY3DP", Some("Acme & Co")),
            "otpauth://totp/Acme%20%26%20Co%3Aa%20b%2Fc?secret=JBSWY3DP&issuer=Acme+%26+Co"
        );
        assert_eq!(
            auth_uri("o'neil(1)!*~._-", "JBSWY3DP", None),
            "otpauth://totp/o'neil(1)!*~._-?secret=JBSWY3DP"
        );
    }
}
