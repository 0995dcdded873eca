//! RNG oracle for deterministic random number generation.
//!
//! This module provides a trait-based RNG system that ensures deterministic
//! random number generation for game mechanics like miss/critical rolls,
//! damage variance, and encounter selection.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same value. This is what makes battles replayable
//! from `(game_seed, intent sequence)` alone.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a uniform value in `[0, 1)`.
    ///
    /// Common for probability checks and multiplicative variance.
    fn unit(&self, seed: u64) -> f64 {
        f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0)
    }

    /// Pick an index in `[0, len)`. Returns 0 for an empty range.
    fn pick_index(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32(seed) as usize % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
/// - Implementation based on PCG-XSH-RR variant
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    ///
    /// Uses LCG (Linear Congruential Generator) formula:
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        // XOR upper bits with lower bits, shift right
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;

        // Use upper bits to determine rotation amount
        let rot = (state >> 59) as u32;

        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute deterministic seed from game state components.
///
/// Combines multiple entropy sources to ensure unique seeds for each
/// random event in the game.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at session start (for replay/determinism)
/// * `nonce` - Intent sequence number (increments each accepted intent)
/// * `entity` - Entity the draw concerns (player = 0, enemies by id)
/// * `context` - Additional context for multiple draws in the same intent
///
/// # Context Values
///
/// Use different context values when the same intent needs multiple
/// independent draws:
///
/// - `0`: Primary draw (e.g., damage variance)
/// - `1`: Secondary draw (e.g., miss/critical check)
/// - `2`: Tertiary draw (e.g., flavor sub-roll)
/// - etc.
pub fn compute_seed(game_seed: u64, nonce: u64, entity: u32, context: u32) -> u64 {
    // Mix all inputs using simple hash combiners
    // These constants are based on SplitMix64 and FxHash multipliers
    let mut hash = game_seed;

    // Mix in nonce (intent sequence)
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);

    // Mix in entity id
    hash ^= u64::from(entity).wrapping_mul(0x517cc1b727220a95);

    // Mix in context
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn unit_stays_in_half_open_range() {
        let rng = PcgRng;
        for seed in 0..1000 {
            let v = rng.unit(seed);
            assert!((0.0..1.0).contains(&v), "seed {seed} produced {v}");
        }
    }

    #[test]
    fn compute_seed_separates_contexts() {
        let a = compute_seed(7, 1, 0, 0);
        let b = compute_seed(7, 1, 0, 1);
        let c = compute_seed(7, 2, 0, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn pick_index_handles_empty_range() {
        let rng = PcgRng;
        assert_eq!(rng.pick_index(9, 0), 0);
        assert!(rng.pick_index(9, 3) < 3);
    }
}
