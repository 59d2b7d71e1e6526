//! Game Events
//!
//! Everything the engine tells the presentation layer. Events are plain
//! data, serialized as tagged JSON so any frontend (or a remote one) can
//! render tile flips, counters, and end-of-level notices.
//!
//! Emission ordering within one transition is part of the contract:
//! reveal before move count, tile outcomes before score, level complete
//! before the next level's load.

use serde::{Deserialize, Serialize};

/// An event emitted by the match engine.
///
/// `level` fields carry the 1-based level number shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh board is in place; the grid should be rebuilt concealed.
    LevelLoaded {
        /// 1-based level number.
        level: usize,
        /// Grid side length of the new board.
        side: usize,
    },

    /// A tile was selected and now shows its symbol.
    ///
    /// Emitted immediately on selection, never delayed.
    TileRevealed {
        /// Slot index of the tile.
        index: usize,
        /// Glyph to render.
        symbol: String,
    },

    /// A mismatched tile turned face-down again.
    TileHidden {
        /// Slot index of the tile.
        index: usize,
    },

    /// A tile found its partner. Terminal highlight.
    TileMatched {
        /// Slot index of the tile.
        index: usize,
    },

    /// Cumulative score changed.
    ScoreChanged {
        /// New cumulative score.
        score: u32,
    },

    /// Cumulative move count changed.
    MovesChanged {
        /// New cumulative move count.
        moves: u32,
    },

    /// All pairs of the current level were found.
    LevelComplete {
        /// 1-based level number.
        level: usize,
        /// Moves spent on this level.
        level_moves: u32,
        /// Whole seconds spent on this level.
        level_seconds: u64,
        /// Cumulative score after the level.
        score: u32,
    },

    /// The final level was completed; the session is over.
    GameComplete {
        /// Cumulative moves across all levels.
        total_moves: u32,
        /// Final score.
        total_score: u32,
        /// Whole seconds since session start.
        total_seconds: u64,
    },
}
