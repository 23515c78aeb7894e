//! Fixed-width Base62 codec for 128-bit magnitudes
//!
//! The alphabet lists digits, then uppercase letters, then lowercase letters, so the index of each
//! symbol follows its ASCII code point. Together with the left padding by `'0'`, this makes the
//! byte-wise order of encoded strings identical to the numeric order of the encoded values.
//!
//! ```rust
//! use timeflake::base62;
//!
//! let text = base62::encode(1909005012028578488143182045514754249);
//! assert_eq!(&text as &str, "02i1KoFfY3auBS745gImbZ");
//! assert_eq!(base62::decode(&text), Ok(1909005012028578488143182045514754249));
//! ```

use crate::Error;
use fstr::FStr;

/// The 62 symbols ordered by their digit value.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// The length of every encoded string: the smallest `L` such that `62^L` exceeds `u128::MAX`.
pub const ENCODED_LEN: usize = encoded_len();

const fn encoded_len() -> usize {
    let mut len = 0;
    let mut power: u128 = 1;
    loop {
        len += 1;
        match power.checked_mul(62) {
            Some(next) => power = next,
            None => return len,
        }
    }
}

/// Maps ASCII code points to digit values; `0xff` marks characters outside the alphabet.
const DECODE_MAP: [u8; 128] = {
    let mut map = [0xff; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

/// Returns the digit value of `c`, or `None` if `c` is not in [`ALPHABET`].
const fn digit_value(c: char) -> Option<u8> {
    if c.is_ascii() {
        match DECODE_MAP[c as usize] {
            0xff => None,
            digit => Some(digit),
        }
    } else {
        None
    }
}

/// Encodes a 128-bit magnitude into its zero-padded Base62 representation stored in a
/// stack-allocated string of [`ENCODED_LEN`] characters.
pub fn encode(value: u128) -> FStr<ENCODED_LEN> {
    let mut buffer = [ALPHABET[0]; ENCODED_LEN];
    let mut quotient = value;
    for e in buffer.iter_mut().rev() {
        if quotient == 0 {
            break;
        }
        *e = ALPHABET[(quotient % 62) as usize];
        quotient /= 62;
    }
    debug_assert!(buffer.is_ascii());
    // SAFETY: ok because buffer consists of ASCII code points
    unsafe { FStr::from_bytes_unchecked(buffer) }
}

/// Decodes a Base62 string into a 128-bit magnitude.
///
/// Strings shorter than [`ENCODED_LEN`] are read as if left-padded with `'0'`.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `text` is empty.
/// - [`Error::InvalidCharacter`] if `text` contains a character outside [`ALPHABET`].
/// - [`Error::OutOfRange`] if the decoded value does not fit in 128 bits.
pub fn decode(text: &str) -> Result<u128, Error> {
    if text.is_empty() {
        return Err(Error::InvalidArgument("empty Base62 string"));
    }

    let mut acc: u128 = 0;
    for (position, character) in text.chars().enumerate() {
        let digit = digit_value(character).ok_or(Error::InvalidCharacter {
            character,
            position,
        })?;
        acc = acc
            .checked_mul(62)
            .and_then(|e| e.checked_add(digit as u128))
            .ok_or(Error::OutOfRange("Base62 string exceeds 128 bits"))?;
    }
    Ok(acc)
}
