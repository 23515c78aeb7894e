//! Timeflake generator and related types.

use crate::{Error, Timeflake};

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for [`Generator`].
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;
}

/// A trait that defines the minimum system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

/// Represents a Timeflake generator that combines the current timestamp with 80 bits drawn from a
/// random number generator.
///
/// The generator keeps no state other than its random and time sources: Timeflakes generated in
/// different milliseconds are ordered chronologically, while those generated within the same
/// millisecond are ordered randomly. A generator owned by a single thread needs no
/// synchronization; share one across threads through a lock.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use std::{sync, thread};
/// use timeflake::Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(Generator::with_rand08(OsRng)));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Generator<R, T = StdSystemTime> {
    /// The random number generator used by the generator.
    rng: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R> Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            time_source: StdSystemTime,
        }
    }
}

impl<R, T> Generator<R, T> {
    /// Creates a generator instance with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(rng: R, time_source: T) -> Self {
        Self { rng, time_source }
    }
}

impl<R: RandSource, T> Generator<R, T> {
    /// Generates a new Timeflake from the `unix_ts_ms` passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `unix_ts_ms` does not fit in 48 bits.
    pub fn generate_core(&mut self, unix_ts_ms: u64) -> Result<Timeflake, Error> {
        Timeflake::from_parts(unix_ts_ms, self.next_random())
    }

    /// Draws exactly 80 bits: a full `u64` below the low 16 bits of a `u32`.
    fn next_random(&mut self) -> u128 {
        let lo = self.rng.next_u64() as u128;
        let hi = (self.rng.next_u32() & 0xffff) as u128;
        (hi << 64) | lo
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Generates a new Timeflake from the current timestamp.
    ///
    /// # Panics
    ///
    /// Panics if the time source reports a timestamp that does not fit in 48 bits, which the
    /// system clock does not until the year 10889.
    pub fn generate(&mut self) -> Timeflake {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_core(unix_ts_ms)
            .expect("timestamp out of the 48-bit range")
    }
}

/// Supports operations as an infinite iterator that produces a new Timeflake for each call of
/// `next()`.
///
/// # Examples
///
/// ```rust
/// use timeflake::Generator;
///
/// Generator::with_rand08(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RandSource, T: TimeSource> Iterator for Generator<R, T> {
    type Item = Timeflake;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource> core::iter::FusedIterator for Generator<R, T> {}

#[cfg(test)]
mod tests {
    use super::{Generator, RandSource, TimeSource};
    use crate::{Error, MAX_RANDOM, MAX_TIMESTAMP};

    /// Returns the same pair of numbers on every call
    struct ConstRandSource(u32, u64);

    impl RandSource for ConstRandSource {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            self.1
        }
    }

    /// Advances by eight milliseconds on every call
    struct MockTimeSource(u64);

    impl TimeSource for MockTimeSource {
        fn unix_ts_ms(&mut self) -> u64 {
            self.0 += 8;
            self.0
        }
    }

    type MockGen = Generator<ConstRandSource, MockTimeSource>;

    /// Draws exactly 80 unsigned random bits
    #[test]
    fn draws_exactly_80_unsigned_random_bits() {
        let ts = 0x0123_4567_89abu64;
        let mut g = MockGen::with_rand_and_time_sources(
            ConstRandSource(u32::MAX, u64::MAX),
            MockTimeSource(0),
        );
        let e = g.generate_core(ts).unwrap();
        assert_eq!(e.timestamp(), ts);
        assert_eq!(e.random(), MAX_RANDOM);

        let mut g = MockGen::with_rand_and_time_sources(
            ConstRandSource(0xdead_beef, 0x0123_4567_89ab_cdef),
            MockTimeSource(0),
        );
        let e = g.generate_core(ts).unwrap();
        assert_eq!(e.timestamp(), ts);
        assert_eq!(e.random(), 0xbeef_0123_4567_89ab_cdef);
    }

    /// Reads timestamp from time source
    #[test]
    fn reads_timestamp_from_time_source() {
        let ts = 0x0123_4567_89abu64;
        let mut g = MockGen::with_rand_and_time_sources(ConstRandSource(0, 0), MockTimeSource(ts));
        assert_eq!(g.generate().timestamp(), ts + 8);
        assert_eq!(g.generate().timestamp(), ts + 16);
        assert_eq!(g.generate().value(), ((ts + 24) as u128) << 80);
    }

    /// Generates increasing Timeflakes as iterator over increasing timestamps
    #[test]
    fn generates_increasing_timeflakes_as_iterator_over_increasing_timestamps() {
        let g = MockGen::with_rand_and_time_sources(
            ConstRandSource(u32::MAX, u64::MAX),
            MockTimeSource(0),
        );
        let samples: Vec<_> = g.take(1_000).collect();
        for w in samples.windows(2) {
            assert!(w[0] < w[1]);
            assert!(w[0].to_string() < w[1].to_string());
        }
    }

    /// Returns error if timestamp exceeds 48 bits
    #[test]
    fn returns_error_if_timestamp_exceeds_48_bits() {
        let mut g = MockGen::with_rand_and_time_sources(ConstRandSource(0, 0), MockTimeSource(0));
        assert!(g.generate_core(MAX_TIMESTAMP).is_ok());
        assert!(matches!(
            g.generate_core(MAX_TIMESTAMP + 1),
            Err(Error::OutOfRange(_))
        ));
        assert!(matches!(
            g.generate_core(u64::MAX),
            Err(Error::OutOfRange(_))
        ));
    }

    /// Panics if time source goes beyond 48 bits
    #[test]
    #[should_panic(expected = "timestamp out of the 48-bit range")]
    fn panics_if_time_source_goes_beyond_48_bits() {
        let mut g = MockGen::with_rand_and_time_sources(
            ConstRandSource(0, 0),
            MockTimeSource(MAX_TIMESTAMP),
        );
        g.generate();
    }

    /// Encodes up-to-date timestamp with system clock
    #[cfg(feature = "std")]
    #[test]
    fn encodes_up_to_date_timestamp_with_system_clock() {
        use std::time;
        let mut g = Generator::with_rand08(rand::thread_rng());
        for _ in 0..10_000 {
            let ts_now = (time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis()) as i64;
            let timestamp = g.generate().timestamp() as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }
}
