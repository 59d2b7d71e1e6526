//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ for fast, high-quality, deterministic randomness.
//! Board layouts are a pure function of the seed, so a recorded session
//! seed reproduces every level layout exactly.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Deterministic PRNG using the Xorshift128+ algorithm.
///
/// # Determinism Guarantee
///
/// Given the same seed, this RNG produces the exact same sequence of
/// random numbers on any platform.
///
/// # Example
///
/// ```
/// use emoji_match::core::rng::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(12345);
/// let value = rng.next_u64();
/// assert_eq!(value, 6233086606872742541); // Always the same!
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, ensuring
    /// good distribution even from weak seeds.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // Ensure state is never all zeros
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Create the RNG that shuffles a given level's board.
    pub fn for_level(session_seed: u64, level_index: usize) -> Self {
        Self::new(derive_board_seed(session_seed, level_index))
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Simple modulo - slight bias for very large max, but acceptable
        // for the tile counts involved here (at most 64).
        (self.next_u64() % max as u64) as u32
    }

    /// Shuffle a slice in place using Fisher-Yates.
    ///
    /// This is a full-permutation shuffle: every ordering of the slice is
    /// reachable, not just pair swaps.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.next_int((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// SplitMix64 for seed initialization.
/// Produces well-distributed values from sequential seeds.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Derive the board-shuffle seed for one level of a session.
///
/// Hashing the session seed together with the level index gives every
/// level an independent layout while keeping the whole session replayable
/// from a single recorded seed. A restart reuses the same session seed, so
/// a restarted session replays the same layouts.
pub fn derive_board_seed(session_seed: u64, level_index: usize) -> u64 {
    let mut hasher = Sha256::new();

    // Domain separator
    hasher.update(b"EMOJI_MATCH_BOARD_V1");
    hasher.update(session_seed.to_le_bytes());
    hasher.update((level_index as u64).to_le_bytes());

    let hash = hasher.finalize();

    // Take first 8 bytes as seed
    u64::from_le_bytes(hash[0..8].try_into().unwrap())
}

// =============================================================================
// TESTS
// =============================================================================
