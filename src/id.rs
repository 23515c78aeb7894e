use core::{fmt, str};
use fstr::FStr;

use crate::{base62, Error, Uuid};

/// Represents a Timeflake, a 128-bit identifier composed of a 48-bit Unix timestamp in
/// milliseconds and 80 random bits.
///
/// Timeflakes are ordered by their 128-bit unsigned value, which puts identifiers created in
/// different milliseconds in chronological order. The [`Display`](fmt::Display) and
/// [`FromStr`](str::FromStr) implementations use the fixed-width Base62 representation, whose
/// lexicographic order agrees with the numeric order.
///
/// # Examples
///
/// ```rust
/// use timeflake::Timeflake;
///
/// let x = "02i1KoFfY3auBS745gImbZ".parse::<Timeflake>()?;
/// assert_eq!(x.timestamp(), 1579091935216);
/// assert_eq!(x.value(), 1909005012028578488143182045514754249);
/// assert_eq!(x.to_uuid().to_string(), "016fa936-bff0-997a-0a3c-428548fee8c9");
/// assert_eq!(x.to_string(), "02i1KoFfY3auBS745gImbZ");
/// # Ok::<(), timeflake::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Timeflake(u128);

/// The maximum value of the 48-bit timestamp field.
pub const MAX_TIMESTAMP: u64 = (1 << 48) - 1;

/// The maximum value of the 80-bit random field.
pub const MAX_RANDOM: u128 = (1 << 80) - 1;

impl Timeflake {
    /// The smallest Timeflake (value `0`).
    pub const MIN: Self = Self(0);

    /// The largest Timeflake (value `2^128 - 1`).
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a Timeflake from its 128-bit value.
    pub const fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Creates a Timeflake from a big-endian magnitude of any length, such as the output of a
    /// generic big-integer-to-bytes conversion that may carry leading zero bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `bytes` is empty, or [`Error::OutOfRange`] if the
    /// magnitude does not fit in 128 bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use timeflake::Timeflake;
    ///
    /// let mut bytes = vec![0u8];
    /// bytes.extend_from_slice(&[0xff; 16]);
    /// assert_eq!(Timeflake::from_be_slice(&bytes), Ok(Timeflake::MAX));
    /// ```
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() {
            return Err(Error::InvalidArgument("empty byte slice"));
        }

        let start = bytes.iter().position(|&e| e != 0).unwrap_or(bytes.len());
        let magnitude = &bytes[start..];
        if magnitude.len() > 16 {
            return Err(Error::OutOfRange("value exceeds 128 bits"));
        }

        let mut buffer = [0u8; 16];
        buffer[16 - magnitude.len()..].copy_from_slice(magnitude);
        Ok(Self(u128::from_be_bytes(buffer)))
    }

    /// Creates a Timeflake from a 48-bit timestamp and an 80-bit random number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `timestamp_millis` exceeds [`MAX_TIMESTAMP`] or `random`
    /// exceeds [`MAX_RANDOM`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use timeflake::Timeflake;
    ///
    /// let x = Timeflake::from_parts(1579091935216, 724773312193627487660233)?;
    /// assert_eq!(x.value(), 1909005012028578488143182045514754249);
    /// assert!(Timeflake::from_parts(1 << 48, 0).is_err());
    /// # Ok::<(), timeflake::Error>(())
    /// ```
    pub const fn from_parts(timestamp_millis: u64, random: u128) -> Result<Self, Error> {
        if timestamp_millis > MAX_TIMESTAMP {
            Err(Error::OutOfRange("`timestamp_millis` exceeds 48 bits"))
        } else if random > MAX_RANDOM {
            Err(Error::OutOfRange("`random` exceeds 80 bits"))
        } else {
            Ok(Self(((timestamp_millis as u128) << 80) | random))
        }
    }

    /// Creates a Timeflake from a UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(crate::uuid::join_magnitude(
            uuid.most_significant_bits(),
            uuid.least_significant_bits(),
        ))
    }

    /// Creates a Timeflake from its Base62 representation.
    ///
    /// # Errors
    ///
    /// Fails as [`base62::decode`] does.
    pub fn from_base62(text: &str) -> Result<Self, Error> {
        base62::decode(text).map(Self)
    }

    /// Returns the 128-bit value.
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// Returns the 48-bit timestamp field in milliseconds since the Unix epoch.
    pub const fn timestamp(&self) -> u64 {
        (self.0 >> 80) as u64
    }

    /// Returns the 80-bit random field.
    pub const fn random(&self) -> u128 {
        self.0 & MAX_RANDOM
    }

    /// Returns the UUID representation.
    pub const fn to_uuid(&self) -> Uuid {
        let (hi, lo) = crate::uuid::split_magnitude(self.0);
        Uuid::from_signed_halves(hi, lo)
    }

    /// Returns the fixed 16-byte big-endian representation.
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// Returns the Base62 representation stored in a stack-allocated string type.
    pub fn to_base62(&self) -> FStr<{ base62::ENCODED_LEN }> {
        base62::encode(self.0)
    }
}

impl fmt::Display for Timeflake {
    /// Returns the fixed-width Base62 representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base62())
    }
}

impl str::FromStr for Timeflake {
    type Err = Error;

    /// Creates an object from the Base62 representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::from_base62(src)
    }
}

impl From<Timeflake> for u128 {
    fn from(src: Timeflake) -> Self {
        src.0
    }
}

impl From<u128> for Timeflake {
    fn from(src: u128) -> Self {
        Self(src)
    }
}

impl From<Timeflake> for [u8; 16] {
    fn from(src: Timeflake) -> Self {
        src.to_bytes()
    }
}

impl From<[u8; 16]> for Timeflake {
    fn from(src: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(src))
    }
}

impl TryFrom<&[u8]> for Timeflake {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_be_slice(src)
    }
}

impl From<Timeflake> for Uuid {
    fn from(src: Timeflake) -> Self {
        src.to_uuid()
    }
}

impl From<Uuid> for Timeflake {
    fn from(src: Uuid) -> Self {
        Self::from_uuid(src)
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{Error, Timeflake, MAX_TIMESTAMP};
    use std::time;

    impl Timeflake {
        /// Creates a Timeflake from a point in time and an 80-bit random number.
        ///
        /// # Errors
        ///
        /// Returns [`Error::OutOfRange`] if `system_time` precedes the Unix epoch or does not fit
        /// in the 48-bit timestamp field, or if `random` exceeds 80 bits.
        pub fn from_system_time(
            system_time: time::SystemTime,
            random: u128,
        ) -> Result<Self, Error> {
            let unix_ts_ms = system_time
                .duration_since(time::UNIX_EPOCH)
                .map_err(|_| Error::OutOfRange("time precedes the Unix epoch"))?
                .as_millis();
            if unix_ts_ms > MAX_TIMESTAMP as u128 {
                return Err(Error::OutOfRange("`timestamp_millis` exceeds 48 bits"));
            }
            Self::from_parts(unix_ts_ms as u64, random)
        }

        /// Returns the timestamp field as a point in time.
        pub fn to_system_time(&self) -> time::SystemTime {
            time::UNIX_EPOCH + time::Duration::from_millis(self.timestamp())
        }
    }

    impl From<Timeflake> for String {
        fn from(src: Timeflake) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Timeflake {
        type Error = Error;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Timeflake;

    impl From<Timeflake> for uuid::Uuid {
        fn from(src: Timeflake) -> Self {
            uuid::Uuid::from_bytes(src.to_bytes())
        }
    }

    impl From<uuid::Uuid> for Timeflake {
        fn from(src: uuid::Uuid) -> Self {
            Self::from(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Timeflake};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Timeflake {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.to_base62())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Timeflake {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Timeflake;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a Timeflake representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Timeflake;
        use serde_test::{assert_de_tokens, assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("0000000000000000000000", &[0u8; 16]),
                (
                    "02i1KoFfY3auBS745gImbZ",
                    &[
                        1, 111, 169, 54, 191, 240, 153, 122, 10, 60, 66, 133, 72, 254, 232, 201,
                    ],
                ),
                ("7n42DGM5Tflk9n8mt7Fhc7", &[0xffu8; 16]),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Timeflake>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }

        /// Deserializes unpadded Base62 string
        #[test]
        fn deserializes_unpadded_base62_string() {
            let e = Timeflake::from_value(1909005012028578488143182045514754249);
            assert_de_tokens(&e.readable(), &[Token::Str("2i1KoFfY3auBS745gImbZ")]);
        }
    }
}
