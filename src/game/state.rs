//! Game State Definitions
//!
//! The single owned state object for a session: current board, selection
//! pair, counters, and the pending event buffer. No ambient globals; the
//! session controller owns exactly one `GameState`.

use serde::{Deserialize, Serialize};

use crate::game::board::Board;
use crate::game::events::GameEvent;

/// The transient bookkeeping between tile selections.
///
/// While a `Pair` is held, a comparison is pending and no further
/// selections are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Selection {
    /// No tile selected.
    #[default]
    Empty,
    /// First tile of a pair is face-up.
    One(usize),
    /// Both tiles are face-up, comparison pending.
    Pair(usize, usize),
}

impl Selection {
    /// Whether a comparison is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Selection::Pair(_, _))
    }
}

/// Coarse phase of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// A level is in progress.
    #[default]
    Playing,
    /// All levels finished; only restart revives the session.
    Complete,
}

/// Complete state of a game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Seed all per-level board seeds derive from.
    pub session_seed: u64,

    /// Zero-based index into the level sequence.
    pub level_index: usize,

    /// Current phase.
    pub phase: GamePhase,

    /// Current level's board.
    pub board: Board,

    /// Current selection pair.
    pub selection: Selection,

    /// Pairs found on the current level.
    pub matches_found: u32,

    /// Cumulative score across levels.
    pub score: u32,

    /// Cumulative moves across levels (a move = one completed pair).
    pub total_moves: u32,

    /// Moves spent on the current level.
    pub level_moves: u32,

    /// Events generated by the current transition (drained by the caller).
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Create state for a new session. The board is empty until
    /// [`load_level`](crate::game::engine::load_level) runs.
    pub fn new(session_seed: u64) -> Self {
        Self {
            session_seed,
            level_index: 0,
            phase: GamePhase::Playing,
            board: Board::default(),
            selection: Selection::Empty,
            matches_found: 0,
            score: 0,
            total_moves: 0,
            level_moves: 0,
            pending_events: Vec::new(),
        }
    }

    /// 1-based level number for display.
    #[inline]
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
