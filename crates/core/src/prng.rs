//! Deterministic randomness for scene setup.
//!
//! Everything random in cellblob (initial point positions, noise offsets,
//! per-blob noise seeds and shape ranges) is drawn through [`RandomSource`],
//! so tests can inject a fixed sequence while the CLI seeds from the clock
//! or the command line.

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) for freshly drawn noise-space offsets.
///
/// Large enough that independently drawn offsets land in unrelated regions
/// of the noise field.
pub const OFFSET_RANGE: f64 = 10_000.0;

/// A source of uniform random values.
pub trait RandomSource {
    /// Returns the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a fresh noise-space offset in [0, [`OFFSET_RANGE`]).
    fn next_offset(&mut self) -> f64 {
        self.next_range(0.0, OFFSET_RANGE)
    }

    /// Returns a seed for a freshly constructed noise field.
    fn next_noise_seed(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Shifts (13, 7, 17). A seed of 0 is replaced with a non-zero fallback to
/// avoid the all-zeros fixed point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Derives an independent generator from this one.
    ///
    /// Used to hand a sub-component its own stream without sharing state.
    pub fn fork(&mut self) -> Self {
        Self::new(self.next_u64() ^ 0x9E37_79B9_7F4A_7C15)
    }
}

impl RandomSource for Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, every recorded scene seed replays differently.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(1234);
        let mut b = Xorshift64::new(1234);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at {i}");
        }
    }

    #[test]
    fn next_offset_stays_in_offset_range() {
        let mut rng = Xorshift64::new(99);
        for _ in 0..10_000 {
            let v = rng.next_offset();
            assert!((0.0..OFFSET_RANGE).contains(&v), "offset {v} out of range");
        }
    }

    #[test]
    fn fork_yields_a_different_stream() {
        let mut parent = Xorshift64::new(5);
        let mut child = parent.fork();
        let parent_next: Vec<u64> = (0..8).map(|_| parent.next_u64()).collect();
        let child_next: Vec<u64> = (0..8).map(|_| child.next_u64()).collect();
        assert_ne!(parent_next, child_next);
    }

    #[test]
    fn mutable_reference_is_a_random_source() {
        fn draw(mut rng: impl RandomSource) -> f64 {
            rng.next_f64()
        }
        let mut rng = Xorshift64::new(8);
        let mut copy = rng.clone();
        let v = draw(&mut rng);
        assert_eq!(v, copy.next_f64());
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_range_in_bounds_for_any_seed_and_range(
                seed: u64,
                min in -1e6_f64..1e6,
                max in -1e6_f64..1e6,
            ) {
                prop_assume!(min < max);
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_range(min, max);
                    prop_assert!(v >= min && v < max, "next_range({min}, {max}) = {v}");
                }
            }

            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }
        }
    }
}
