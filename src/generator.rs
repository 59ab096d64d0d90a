//! Random strong-password synthesis.
//!
//! Stateless and independent of the vault: each call draws uniformly
//! from the combined alphabet (upper + lower letters, digits, and the
//! same symbol set the master password policy uses).  All randomness
//! comes from the OS CSPRNG, never a general-purpose PRNG.

use rand::rngs::OsRng;
use rand::Rng;

/// Characters a generated secret is drawn from.
pub const ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789@#$%^&+=";

/// Length used when the requested length is below the floor.
pub const DEFAULT_LENGTH: usize = 12;

/// Shortest length honored as requested.
const MIN_LENGTH: usize = 8;

/// Generate a random secret of `length` characters.
///
/// Requests below 8 are silently raised to the default of 12 — a
/// policy floor, not an error.
pub fn generate(length: usize) -> String {
    let length = if length < MIN_LENGTH {
        DEFAULT_LENGTH
    } else {
        length
    };

    (0..length)
        .map(|_| {
            let idx = OsRng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}
