//! Error types.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding secrets, building engines, or drawing randomness.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// A Base32 string contained a symbol outside `A-Z2-7` (after padding strip and case-fold).
    #[error("invalid base32 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// An engine was built with a configuration it cannot honor.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The secure random source failed to produce bytes.
    #[error("secure random source failed")]
    Random,
}

/// The specific configuration value that was rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("unsupported hash algorithm {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("digit count {0} is outside 1..=10")]
    Digits(u8),

    #[error("time step must be at least one second")]
    TimeStep,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let err: Error = ConfigError::TimeStep.into();
        assert_eq!(err, Error::InvalidConfiguration(ConfigError::TimeStep));
    }

    #[test]
    fn messages() {
        let err = Error::InvalidCharacter {
            character: '1',
            position: 3,
        };
        assert_eq!(err.to_string(), "invalid base32 character '1' at position 3");
        assert_eq!(
            Error::from(ConfigError::Digits(0)).to_string(),
            "invalid configuration: digit count 0 is outside 1..=10"
        );
    }
}
