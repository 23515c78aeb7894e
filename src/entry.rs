//! Default generator and entry point function

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use crate::{Generator, Timeflake};

/// Generates a Timeflake object.
///
/// This function draws the random field from the thread-local random number generator of `rand`
/// crate. Timeflakes generated in different milliseconds are ordered chronologically as long as
/// the system clock does not move backwards. On Unix, this function reseeds the thread-local
/// generator when the process ID changes (i.e. upon process forks) to prevent collisions across
/// processes.
///
/// # Examples
///
/// ```rust
/// let id = timeflake::timeflake();
/// println!("{}", id); // e.g., "02i1KoFfY3auBS745gImbZ"
/// println!("{}", id.to_uuid()); // e.g., "016fa936-bff0-997a-0a3c-428548fee8c9"
///
/// let id_string: String = timeflake::timeflake().to_string();
/// ```
pub fn timeflake() -> Timeflake {
    unix_fork_safety::reseed_thread_rng_upon_pid_change();
    Generator::with_rand08(rand::thread_rng()).generate()
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Reseeds ThreadRng immediately when the process ID changes (i.e. upon process forks).
    pub fn reseed_thread_rng_upon_pid_change() {
        PID.with(|last_pid| {
            let pid = process::id();
            if pid != last_pid.replace(pid) {
                // As of rand v0.8.5 and rand_chacha v0.3.1, up to 63 `u32` values have to be used
                // before reseeding after a fork.
                // See https://github.com/rust-random/rand/pull/1317
                let _: [[u32; 32]; 2] = rand::random();
            }
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn reseed_thread_rng_upon_pid_change() {}
}
