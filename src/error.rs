use core::fmt;

use crate::params::SpeckParameters;

/// An error returned when creating a cipher.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key length does not match the selected variant.
    InvalidKeyLength,
    /// The variant is known but has no implementation yet.
    NotImplemented(SpeckParameters),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength => write!(f, "invalid key length"),
            Self::NotImplemented(params) => write!(f, "{} is not implemented", params),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[test]
fn test_display() {
    assert_eq!(Error::InvalidKeyLength.to_string(), "invalid key length");
    assert_eq!(
        Error::NotImplemented(SpeckParameters::Speck64_128).to_string(),
        "Speck64/128 is not implemented"
    );
}
