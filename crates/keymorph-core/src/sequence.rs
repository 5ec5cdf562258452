//! Deterministic draw sequence (mulberry32).
//!
//! [`Mulberry32`] is a plain `Copy` value: every draw consumes the current
//! state and hands back the next one, so a single generation run threads one
//! owner through remap and repair and nothing can interleave draws behind its
//! back. Two generators built from the same seed yield identical sequences.
//!
//! Not a CSPRNG. It is here for bit-exact reproducibility only.

/// Divisor mapping a 32-bit output onto `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Mulberry32 generator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Odd constant added to the accumulator before each mix (Weyl step).
    pub const INCREMENT: u32 = 0x6D2B_79F5;

    /// Create a generator whose accumulator starts at `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current accumulator value.
    #[must_use]
    pub const fn state(self) -> u32 {
        self.state
    }

    /// Advance once and return the mixed 32-bit output.
    #[must_use = "the advanced generator must be used for the next draw"]
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn next_u32(self) -> (u32, Self) {
        let state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        (t ^ (t >> 14), Self { state })
    }

    /// Advance once and return a value in `[0, 1)`.
    #[must_use = "the advanced generator must be used for the next draw"]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn draw(self) -> (f64, Self) {
        let (bits, next) = self.next_u32();
        (f64::from(bits) / TWO_POW_32, next)
    }

    /// Draw a character from `pool` at index `floor(value * pool.len())`.
    ///
    /// # Panics
    ///
    /// Panics if `pool` is empty. All engine pools are non-empty constants.
    #[must_use = "the advanced generator must be used for the next draw"]
    pub fn pick(self, pool: &[u8]) -> (char, Self) {
        let (value, next) = self.draw();
        (char::from(pool[scale(value, pool.len())]), next)
    }

    /// Draw a remap shift in `1..=10`.
    #[must_use = "the advanced generator must be used for the next draw"]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn shift(self) -> (usize, Self) {
        let (value, next) = self.draw();
        // scale(_, 10) <= 9
        (scale(value, 10) + 1, next)
    }

    /// Infinite iterator over the values this generator would draw.
    #[must_use]
    pub const fn draws(self) -> Draws {
        Draws { rng: self }
    }
}

/// `floor(value * len)` for `value` in `[0, 1)`; always `< len`.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
fn scale(value: f64, len: usize) -> usize {
    (value * len as f64).floor() as usize
}

/// Iterator adapter produced by [`Mulberry32::draws`].
#[derive(Debug, Clone)]
pub struct Draws {
    rng: Mulberry32,
}

impl Draws {
    /// Generator state after the draws taken so far.
    #[must_use]
    pub const fn generator(&self) -> Mulberry32 {
        self.rng
    }
}

impl Iterator for Draws {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let (value, next) = self.rng.draw();
        self.rng = next;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_zero_outputs() {
        let mut rng = Mulberry32::new(0);
        let mut out = Vec::new();
        for _ in 0..4 {
            let (bits, next) = rng.next_u32();
            out.push(bits);
            rng = next;
        }
        assert_eq!(out, [1_144_304_738, 1_416_247, 958_946_056, 627_933_444]);
    }

    #[test]
    fn state_advances_by_increment() {
        let (_, next) = Mulberry32::new(0).draw();
        assert_eq!(next.state(), Mulberry32::INCREMENT);
        let (_, wrapped) = Mulberry32::new(u32::MAX).draw();
        assert_eq!(wrapped.state(), Mulberry32::INCREMENT.wrapping_sub(1));
    }

    #[test]
    fn draw_is_a_pure_transition() {
        let rng = Mulberry32::new(7);
        assert_eq!(rng.draw(), rng.draw());
    }

    #[test]
    fn draws_stay_in_unit_interval() {
        for value in Mulberry32::new(42).draws().take(10_000) {
            assert!((0.0..1.0).contains(&value), "out of range: {value}");
        }
    }

    #[test]
    fn draws_match_manual_stepping() {
        let rng = Mulberry32::new(99);
        let from_iter: Vec<f64> = rng.draws().take(16).collect();
        let mut manual = Vec::new();
        let mut cur = rng;
        for _ in 0..16 {
            let (v, next) = cur.draw();
            manual.push(v);
            cur = next;
        }
        assert_eq!(from_iter, manual);
    }

    #[test]
    fn iterator_tracks_generator() {
        let mut draws = Mulberry32::new(5).draws();
        draws.by_ref().take(3).for_each(drop);
        let mut expected = Mulberry32::new(5);
        for _ in 0..3 {
            expected = expected.draw().1;
        }
        assert_eq!(draws.generator(), expected);
    }

    #[test]
    fn shift_range() {
        let mut rng = Mulberry32::new(1234);
        for _ in 0..5_000 {
            let (shift, next) = rng.shift();
            assert!((1..=10).contains(&shift));
            rng = next;
        }
    }

    #[test]
    fn pick_stays_in_pool() {
        let pool = b"xyz";
        let mut rng = Mulberry32::new(3);
        for _ in 0..1_000 {
            let (c, next) = rng.pick(pool);
            assert!("xyz".contains(c));
            rng = next;
        }
    }

    #[test]
    fn scale_extremes() {
        assert_eq!(scale(0.0, 88), 0);
        assert_eq!(scale(f64::from(u32::MAX) / TWO_POW_32, 88), 87);
    }
}
