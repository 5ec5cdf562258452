//! Class-preserving substitution of the base password.

use crate::pools::{ALL, DIGITS_AND_SYMBOLS, LETTERS};
use crate::sequence::Mulberry32;

/// Substitute every UTF-16 code unit of `base`, consuming one draw each.
///
/// Letters rotate within [`LETTERS`], known digits and symbols within
/// [`DIGITS_AND_SYMBOLS`], by `shift + position`. Anything else falls back to
/// [`ALL`] at `(code unit + shift) mod 88`. The result is ASCII and has one
/// character per input code unit.
#[must_use]
pub fn remap(base: &str, rng: Mulberry32) -> (String, Mulberry32) {
    let mut rng = rng;
    let mut mapped = String::with_capacity(base.len());
    for (idx, unit) in base.encode_utf16().enumerate() {
        let (shift, next) = rng.shift();
        rng = next;
        mapped.push(map_unit(unit, idx, shift));
    }
    (mapped, rng)
}

#[allow(clippy::arithmetic_side_effects)]
fn map_unit(unit: u16, idx: usize, shift: usize) -> char {
    let ascii = u8::try_from(unit).ok().filter(u8::is_ascii);
    let pool = if ascii.is_some_and(|b| b.is_ascii_alphabetic()) {
        LETTERS
    } else {
        DIGITS_AND_SYMBOLS
    };

    match ascii.and_then(|b| pool.iter().position(|&p| p == b)) {
        // Pool lengths are non-zero constants.
        Some(pos) => char::from(pool[(pos + shift + idx) % pool.len()]),
        None => char::from(ALL[(usize::from(unit) + shift) % ALL.len()]),
    }
}
