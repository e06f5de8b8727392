//! RNG module - piece randomizer
//!
//! Draws piece kinds uniformly from the six kinds that differ from the
//! previous draw, so the same kind never appears twice in a row. This is a
//! house rule kept for feel, not a fairness guarantee.
//!
//! Also provides a simple LCG so a seed fully determines the sequence.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Piece generator that never repeats the previous kind
#[derive(Debug, Clone)]
pub struct PieceRandomizer {
    rng: SimpleRng,
    last: Option<PieceKind>,
}

impl PieceRandomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            last: None,
        }
    }

    /// Draw the next kind
    pub fn draw(&mut self) -> PieceKind {
        let kind = match self.last {
            None => PieceKind::ALL[self.rng.next_range(7) as usize],
            Some(last) => {
                // Pick among the six others by skipping over the previous kind.
                let mut idx = self.rng.next_range(6) as usize;
                if idx >= last.index() {
                    idx += 1;
                }
                PieceKind::ALL[idx]
            }
        };
        self.last = Some(kind);
        kind
    }

    /// The most recent draw
    pub fn last(&self) -> Option<PieceKind> {
        self.last
    }

    /// Current RNG state, usable as a seed to continue the same stream
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceRandomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(6) < 6);
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_never_repeats_previous_kind() {
        let mut randomizer = PieceRandomizer::new(42);
        let mut prev = randomizer.draw();
        for _ in 0..1000 {
            let next = randomizer.draw();
            assert_ne!(next, prev);
            prev = next;
        }
    }

    #[test]
    fn test_every_kind_appears() {
        let mut randomizer = PieceRandomizer::new(9);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[randomizer.draw().index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceRandomizer::new(2024);
        let mut b = PieceRandomizer::new(2024);
        for _ in 0..50 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
