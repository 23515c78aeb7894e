//! A Rust implementation of Timeflake, a 128-bit, roughly-ordered, URL-safe identifier
//!
//! ```rust
//! let id = timeflake::timeflake();
//! println!("{}", id); // e.g., "02i1KoFfY3auBS745gImbZ"
//! println!("{}", id.to_uuid()); // e.g., "016fa936-bff0-997a-0a3c-428548fee8c9"
//! println!("{:?}", id.to_bytes()); // as 16-byte big-endian array
//! ```
//!
//! # Field and bit layout
//!
//! A Timeflake is a 128-bit unsigned integer with the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          unix_ts_ms                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          unix_ts_ms           |            random             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                            random                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 48-bit `unix_ts_ms` field is dedicated to the Unix timestamp in milliseconds.
//! - The 80-bit `random` field is filled with a random number.
//!
//! Timeflakes created in later milliseconds compare greater than earlier ones. Two Timeflakes
//! created within the same millisecond are distinguished by the random field only, so their
//! relative order is arbitrary. There is no sequence counter and no coordination between
//! generators; uniqueness is probabilistic.
//!
//! # Representations
//!
//! A Timeflake converts losslessly to and from:
//!
//! - its 128-bit value ([`Timeflake::from_value`], [`Timeflake::value`]);
//! - a 16-byte big-endian array ([`Timeflake::to_bytes`]);
//! - a [`Uuid`], whose canonical form is the 8-4-4-4-12 hexadecimal string and which can also be
//!   viewed as a pair of signed 64-bit halves ([`Timeflake::from_uuid`], [`Timeflake::to_uuid`]);
//! - a 22-character Base62 string that sorts in the same order as the value
//!   ([`Timeflake::from_base62`], [`Timeflake::to_base62`]).
//!
//! ```rust
//! use timeflake::{Timeflake, Uuid};
//!
//! let uuid = "016fa936-bff0-997a-0a3c-428548fee8c9".parse::<Uuid>()?;
//! let id = Timeflake::from_uuid(uuid);
//! assert_eq!(id.value(), 1909005012028578488143182045514754249);
//! assert_eq!(id.timestamp(), 1579091935216);
//! assert_eq!(&id.to_base62() as &str, "02i1KoFfY3auBS745gImbZ");
//! assert_eq!(Timeflake::from_base62("02i1KoFfY3auBS745gImbZ")?.to_uuid(), uuid);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `std`: Enables features that depend on the standard library, such as the system clock.
//! - `global_gen`: Enables the [`timeflake()`] entry point function.
//!
//! Optional features:
//!
//! - `serde`: Enables serialization/deserialization of [`Timeflake`] via serde.
//! - `uuid`: Enables conversion from/to `uuid::Uuid`.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
pub use error::Error;

mod id;
pub use id::{Timeflake, MAX_RANDOM, MAX_TIMESTAMP};

mod uuid;
pub use self::uuid::{ParseError, Uuid};

pub mod base62;

pub mod generator;
pub use generator::Generator;

mod entry;
#[cfg(feature = "global_gen")]
pub use entry::timeflake;
