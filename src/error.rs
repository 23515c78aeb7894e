//! Error type shared by the constructors and decoders

use core::fmt;

/// Error constructing a [`Timeflake`](crate::Timeflake) from its parts or from one of its
/// representations.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A required input was empty.
    InvalidArgument(&'static str),

    /// A value exceeds the 128-bit magnitude, or a field exceeds its bit width.
    OutOfRange(&'static str),

    /// A Base62 string contains a character outside the alphabet.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Character offset of the offending character in the input.
        position: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "invalid argument: {}", what),
            Self::OutOfRange(what) => write!(f, "out of range: {}", what),
            Self::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "invalid Base62 character {:?} at position {}",
                character, position
            ),
        }
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    /// Formats each kind with its detail
    #[test]
    fn formats_each_kind_with_its_detail() {
        assert_eq!(
            Error::InvalidArgument("empty string").to_string(),
            "invalid argument: empty string"
        );
        assert_eq!(
            Error::OutOfRange("`random` exceeds 80 bits").to_string(),
            "out of range: `random` exceeds 80 bits"
        );
        assert_eq!(
            Error::InvalidCharacter {
                character: '-',
                position: 3
            }
            .to_string(),
            "invalid Base62 character '-' at position 3"
        );
    }
}
