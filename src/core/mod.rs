//! Core deterministic primitives.
//!
//! Everything here is seed-driven and platform independent, so boards can be
//! regenerated exactly for tests and replays.

pub mod rng;

// Re-export core types
pub use rng::{derive_board_seed, DeterministicRng};
