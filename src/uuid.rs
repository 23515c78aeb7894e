use core::{fmt, str};
use fstr::FStr;

/// Represents a Universally Unique IDentifier.
///
/// A UUID is stored as its 16-byte big-endian layout and can also be viewed as the pair of signed
/// 64-bit halves that many platforms use to hold a UUID (`most_significant_bits` followed by
/// `least_significant_bits`).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUID from its signed 64-bit halves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use timeflake::Uuid;
    ///
    /// let x = Uuid::from_signed_halves(-1, i64::MIN);
    /// assert_eq!(&x.encode() as &str, "ffffffff-ffff-ffff-8000-000000000000");
    /// ```
    pub const fn from_signed_halves(
        most_significant_bits: i64,
        least_significant_bits: i64,
    ) -> Self {
        let hi = most_significant_bits.to_be_bytes();
        let lo = least_significant_bits.to_be_bytes();
        let mut bytes = [0u8; 16];
        let mut i = 0;
        while i < 8 {
            bytes[i] = hi[i];
            bytes[i + 8] = lo[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns the first eight bytes as a signed 64-bit integer.
    pub const fn most_significant_bits(&self) -> i64 {
        let b = &self.0;
        i64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// Returns the last eight bytes as a signed 64-bit integer.
    pub const fn least_significant_bits(&self) -> i64 {
        let b = &self.0;
        i64::from_be_bytes([b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]])
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated string
    /// type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use timeflake::Uuid;
    ///
    /// let x = "016fa936-bff0-997a-0a3c-428548fee8c9".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "016fa936-bff0-997a-0a3c-428548fee8c9");
    /// assert_eq!(format!("{}", y), "016fa936-bff0-997a-0a3c-428548fee8c9");
    /// # Ok::<(), timeflake::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [b'-'; 36];
        for (&byte, &pos) in self.0.iter().zip(HEX_POSITIONS.iter()) {
            buffer[pos] = HEX_DIGITS[(byte >> 4) as usize];
            buffer[pos + 1] = HEX_DIGITS[(byte & 0x0f) as usize];
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_bytes_unchecked(buffer) }
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Offsets of the two-digit hex pair of each byte in the 8-4-4-4-12 form; the gaps hold hyphens.
const HEX_POSITIONS: [usize; 16] = [0, 2, 4, 6, 9, 11, 14, 16, 19, 21, 24, 26, 28, 30, 32, 34];

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// The weight of the most significant half: `2^64`.
const HALF: i128 = 1 << 64;

/// Splits a 128-bit magnitude into the signed halves of a UUID.
///
/// Each unsigned half at or above `2^63` is reinterpreted as its two's complement counterpart by
/// subtracting `2^64`.
pub(crate) const fn split_magnitude(value: u128) -> (i64, i64) {
    (
        to_signed_half(value / HALF as u128),
        to_signed_half(value % HALF as u128),
    )
}

/// Joins the signed halves of a UUID into a 128-bit magnitude.
///
/// Each negative half is brought back to its unsigned value by adding `2^64`.
pub(crate) const fn join_magnitude(
    most_significant_bits: i64,
    least_significant_bits: i64,
) -> u128 {
    to_unsigned_half(least_significant_bits)
        + to_unsigned_half(most_significant_bits) * HALF as u128
}

const fn to_signed_half(half: u128) -> i64 {
    debug_assert!(half < HALF as u128);
    let mut half = half as i128;
    if half > i64::MAX as i128 {
        half -= HALF;
    }
    half as i64
}

const fn to_unsigned_half(half: i64) -> u128 {
    let mut half = half as i128;
    if half < 0 {
        half += HALF;
    }
    half as u128
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation in either case.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = <&[u8; 36]>::try_from(src.as_bytes()).map_err(|_| ParseError {})?;
        if [8, 13, 18, 23].iter().any(|&i| src[i] != b'-') {
            return Err(ParseError {});
        }

        let mut dst = [0u8; 16];
        for (e, &pos) in dst.iter_mut().zip(HEX_POSITIONS.iter()) {
            match (hex_value(src[pos]), hex_value(src[pos + 1])) {
                (Some(hi), Some(lo)) => *e = (hi << 4) | lo,
                _ => return Err(ParseError {}),
            }
        }
        Ok(Self(dst))
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        join_magnitude(src.most_significant_bits(), src.least_significant_bits())
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        let (hi, lo) = split_magnitude(src);
        Self::from_signed_halves(hi, lo)
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation of UUID")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}
