//! [RFC 4648][4648] Base32, the encoding authenticator apps expect for shared secrets.
//!
//! Only the standard alphabet is supported (not the extended hex variant). Encoding always pads
//! with `=`; decoding accepts padded or unpadded input in either case.
//!
//! [4648]: https://datatracker.ietf.org/doc/html/rfc4648#section-6

use log::debug;

use crate::error::{Error, Result};

/// The RFC 4648 Base32 alphabet.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const PAD: char = '=';

/// Encode bytes as padded Base32.
///
/// ```rust
/// assert_eq!(rfc_6238::base32::encode(b"foobar"), "MZXW6YTBOI======");
/// assert_eq!(rfc_6238::base32::encode(b""), "");
/// ```
pub fn encode(data: &[u8]) -> String {
    let mut output = String::with_capacity((data.len() + 4) / 5 * 8);
    let mut buffer: u16 = 0;
    let mut bits = 0;

    for &byte in data {
        buffer = (buffer << 8) | u16::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            output.push(ALPHABET[usize::from((buffer >> bits) & 0x1f)] as char);
        }
        // At most four bits are still pending; drop the rest so the next shift cannot overflow
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        output.push(ALPHABET[usize::from((buffer << (5 - bits)) & 0x1f)] as char);
    }

    while output.len() % 8 != 0 {
        output.push(PAD);
    }

    output
}

/// Decode Base32, ignoring trailing padding and letter case.
///
/// Trailing bits that do not fill a whole byte are discarded; the encoding carries no length or
/// checksum, so truncated input decodes to a shorter byte string rather than failing.
///
/// # Errors
///
/// Returns [`Error::InvalidCharacter`] for the first symbol outside the alphabet, including `=`
/// anywhere other than the end.
///
/// ```rust
/// assert_eq!(rfc_6238::base32::decode("mzxw6ytboi").unwrap(), b"foobar");
/// assert!(rfc_6238::base32::decode("MZXW1===").is_err());
/// ```
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    let cleaned = encoded.trim_end_matches(PAD);
    let mut output = Vec::with_capacity(cleaned.len() * 5 / 8);
    let mut buffer: u16 = 0;
    let mut bits = 0;

    for (position, character) in cleaned.chars().enumerate() {
        let value = symbol_value(character).ok_or_else(|| {
            debug!("rejecting base32 input: bad symbol at position {}", position);
            Error::InvalidCharacter {
                character,
                position,
            }
        })?;

        buffer = (buffer << 5) | u16::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            output.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    Ok(output)
}

fn symbol_value(character: char) -> Option<u8> {
    if !character.is_ascii() {
        return None;
    }
    let upper = character.to_ascii_uppercase() as u8;
    ALPHABET.iter().position(|&s| s == upper).map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // RFC 4648, section 10
    const VECTORS: [(&[u8], &str); 7] = [
        (b"", ""),
        (b"f", "MY======"),
        (b"fo", "MZXQ===="),
        (b"foo", "MZXW6==="),
        (b"foob", "MZXW6YQ="),
        (b"fooba", "MZXW6YTB"),
        (b"foobar", "MZXW6YTBOI======"),
    ];

    #[test]
    fn test_rfc_4648_encode() {
        for (raw, encoded) in VECTORS.iter() {
            assert_eq!(encode(raw), *encoded);
        }
    }

    #[test]
    fn test_rfc_4648_decode() {
        for (raw, encoded) in VECTORS.iter() {
            assert_eq!(decode(encoded).unwrap(), *raw);
        }
    }

    #[test]
    fn decode_is_case_and_padding_insensitive() {
        assert_eq!(decode("mzxw6yq").unwrap(), b"foob");
        assert_eq!(decode("MzXw6Yq=").unwrap(), b"foob");
    }

    #[test]
    fn decode_rfc_6238_secret() {
        assert_eq!(
            decode("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ").unwrap(),
            b"12345678901234567890"
        );
    }

    #[test]
    fn decode_rejects_symbols_outside_alphabet() {
        for (input, character, position) in [
            ("MZXW1===", '1', 4),
            ("0ZXW6===", '0', 0),
            ("MZ8W", '8', 2),
            ("MZ=W6===", '=', 2),
            ("MZXW é", ' ', 4),
            ("MZXWé", 'é', 4),
        ]
        .iter()
        {
            assert_eq!(
                decode(input),
                Err(Error::InvalidCharacter {
                    character: *character,
                    position: *position
                })
            );
        }
    }

    #[test]
    fn decode_drops_partial_trailing_byte() {
        // A single symbol carries five bits, not enough for a byte
        assert_eq!(decode("M").unwrap(), b"");
    }

    #[test]
    fn encoded_length_is_multiple_of_eight() {
        for len in 0..=12 {
            assert_eq!(encode(&vec![0xa5; len]).len() % 8, 0);
        }
    }

    proptest! {
        #[test]
        fn round_trip(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(decode(&encode(&data)).unwrap(), data);
        }

        #[test]
        fn round_trip_lowercase_unpadded(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            let encoded = encode(&data).trim_end_matches('=').to_ascii_lowercase();
            prop_assert_eq!(decode(&encoded).unwrap(), data);
        }
    }
}
