//! Short code generation.
//!
//! Codes are sampled uniformly from a fixed alphanumeric alphabet using the
//! thread-local CSPRNG, so they carry no sequential or otherwise predictable
//! component even though they are exposed publicly.

use rand::Rng;

/// Alphabet short codes are drawn from: `[A-Za-z0-9]`, 62 characters.
pub const CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Fixed length of every generated code.
///
/// 62^7 is roughly 3.5 * 10^12 combinations, which keeps the collision
/// probability negligible at any realistic record count.
pub const CODE_LENGTH: usize = 7;

/// Generates a random short code.
///
/// Pure function of the thread-local randomness source; never fails and has
/// no side effects.
///
/// # Examples
///
/// ```
/// use snaplink::utils::code_generator::{generate_code, CODE_LENGTH};
///
/// let code = generate_code();
/// assert_eq!(code.len(), CODE_LENGTH);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
