//! # Emoji Match Engine
//!
//! Deterministic match engine for the emoji memory game: five levels of
//! face-down tile pairs, revealed two at a time, scored per match.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   EMOJI MATCH ENGINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  └── rng.rs      - Xorshift128+ PRNG, board seed derivation  │
//! │                                                              │
//! │  game/           - Match engine (deterministic)              │
//! │  ├── level.rs    - Level specs, validation, standard levels  │
//! │  ├── board.rs    - Board generation and tile state           │
//! │  ├── state.rs    - Session state and selection pair          │
//! │  ├── engine.rs   - select / resolve / restart transitions    │
//! │  └── events.rs   - Events emitted toward the presentation    │
//! │                                                              │
//! │  session/        - Async session controller                  │
//! │  └── (tokio task, command channel, reveal delay, timer)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules are **100% deterministic**:
//! - No system time dependencies
//! - All randomness from seeded Xorshift128+, per-level seeds derived
//!   with SHA-256 from the session seed
//!
//! Given the same session seed and level sequence, the boards and every
//! engine transition are identical on any platform. Wall-clock time and
//! the reveal delay live exclusively in the `session` layer.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod session;

// Re-export commonly used types
pub use crate::core::rng::DeterministicRng;
pub use game::board::{Board, Tile, TileFace};
pub use game::engine::{load_level, new_game, resolve, restart, select, PairOutcome};
pub use game::events::GameEvent;
pub use game::level::{ConfigError, LevelSequence, LevelSpec};
pub use game::state::{GamePhase, GameState, Selection};
pub use session::{Command, SessionConfig, SessionError, SessionEvent, SessionHandle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Delay between completing a selection pair and resolving it (milliseconds).
///
/// The observation window during which both symbols stay visible.
pub const REVEAL_DELAY_MS: u64 = 700;

/// Points awarded per matched pair.
pub const SCORE_PER_MATCH: u32 = 10;

/// Cadence of the display timer (seconds).
pub const TIMER_TICK_SECS: u64 = 1;
