//! Match Engine Transitions
//!
//! The state machine itself: level loading, tile selection, pair
//! resolution, restart. All functions are synchronous and deterministic;
//! the 700ms observation window between a completed pair and its
//! resolution is scheduled by the session layer, which simply calls
//! [`resolve`] when the delay fires.

use crate::core::rng::DeterministicRng;
use crate::game::board::{Board, TileFace};
use crate::game::events::GameEvent;
use crate::game::level::LevelSequence;
use crate::game::state::{GamePhase, GameState, Selection};
use crate::SCORE_PER_MATCH;

/// Result of a [`select`] call.
#[derive(Debug, Default)]
pub struct SelectResult {
    /// Whether the selection was accepted. Rejections are silent no-ops.
    pub accepted: bool,
    /// Whether this selection completed a pair; the caller must schedule
    /// [`resolve`] after the reveal delay.
    pub comparison_pending: bool,
    /// Events generated by this selection.
    pub events: Vec<GameEvent>,
}

/// How a resolved pair compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairOutcome {
    /// Same symbol: both tiles are now terminal.
    Matched,
    /// Different symbols: both tiles are face-down again.
    Mismatched,
}

/// Result of a [`resolve`] call.
#[derive(Debug, Default)]
pub struct ResolveResult {
    /// Outcome of the comparison, `None` if nothing was pending.
    pub outcome: Option<PairOutcome>,
    /// Whether this resolution completed the current level.
    pub level_complete: bool,
    /// Whether this resolution completed the whole game.
    pub game_complete: bool,
    /// Events generated by this resolution.
    pub events: Vec<GameEvent>,
}

/// Create the state for a fresh session and load level 0.
///
/// Returns the state together with the initial events (the first
/// `LevelLoaded`).
pub fn new_game(levels: &LevelSequence, session_seed: u64) -> (GameState, Vec<GameEvent>) {
    let mut state = GameState::new(session_seed);
    load_level(&mut state, levels, 0);
    let events = state.take_events();
    (state, events)
}

/// Load the level at `level_index`, discarding any prior board state.
///
/// Resets the per-level counters and the selection pair; the generated
/// `LevelLoaded` event stays in `state.pending_events` (the higher-level
/// transitions drain it). An index past the end of the sequence is the
/// game-complete condition and is handled by [`resolve`], not here; such
/// a call is a no-op.
pub fn load_level(state: &mut GameState, levels: &LevelSequence, level_index: usize) {
    let Some(spec) = levels.get(level_index) else {
        return;
    };

    let mut rng = DeterministicRng::for_level(state.session_seed, level_index);
    state.level_index = level_index;
    state.board = Board::generate(spec, &mut rng);
    state.selection = Selection::Empty;
    state.matches_found = 0;
    state.level_moves = 0;

    state.push_event(GameEvent::LevelLoaded {
        level: state.level_number(),
        side: spec.side,
    });
}

/// Select the tile at `index`.
///
/// Accepted only while the game is in progress, no comparison is pending,
/// and the tile is face-down. Everything else (already revealed, already
/// matched, out of range, mid-comparison) is a silent no-op. An accepted
/// selection reveals the tile immediately; a second selection also counts
/// a move and leaves a comparison pending for the caller to resolve after
/// the reveal delay.
pub fn select(state: &mut GameState, levels: &LevelSequence, index: usize) -> SelectResult {
    let mut result = SelectResult::default();

    if state.phase != GamePhase::Playing || state.selection.is_pending() {
        return result;
    }
    let Some(spec) = levels.get(state.level_index) else {
        return result;
    };
    let Some(tile) = state.board.tile_mut(index) else {
        return result;
    };
    if !tile.is_selectable() {
        return result;
    }

    tile.face = TileFace::Up;
    let symbol = spec.symbol(tile.symbol).to_string();
    state.push_event(GameEvent::TileRevealed { index, symbol });

    state.selection = match state.selection {
        Selection::Empty => Selection::One(index),
        Selection::One(first) => {
            state.total_moves += 1;
            state.level_moves += 1;
            state.push_event(GameEvent::MovesChanged {
                moves: state.total_moves,
            });
            result.comparison_pending = true;
            Selection::Pair(first, index)
        }
        // Unreachable: is_pending() was checked above.
        pair @ Selection::Pair(_, _) => pair,
    };

    result.accepted = true;
    result.events = state.take_events();
    result
}

/// Resolve the pending selection pair.
///
/// Called by the session layer once the reveal delay elapses. A call with
/// no pair pending (a stale or cancelled resolution) is a no-op. The
/// elapsed-seconds arguments are display values carried into the
/// completion events; they do not influence the comparison.
pub fn resolve(
    state: &mut GameState,
    levels: &LevelSequence,
    level_seconds: u64,
    total_seconds: u64,
) -> ResolveResult {
    let mut result = ResolveResult::default();

    let Selection::Pair(first, second) = state.selection else {
        return result;
    };
    state.selection = Selection::Empty;

    // Both tiles are face-up; indices were validated at selection time.
    let first_symbol = state.board.tiles()[first].symbol;
    let second_symbol = state.board.tiles()[second].symbol;

    if first_symbol == second_symbol {
        state.matches_found += 1;
        state.score += SCORE_PER_MATCH;
        for index in [first, second] {
            if let Some(tile) = state.board.tile_mut(index) {
                tile.face = TileFace::Matched;
            }
            state.push_event(GameEvent::TileMatched { index });
        }
        state.push_event(GameEvent::ScoreChanged { score: state.score });
        result.outcome = Some(PairOutcome::Matched);
    } else {
        for index in [first, second] {
            if let Some(tile) = state.board.tile_mut(index) {
                tile.face = TileFace::Down;
            }
            state.push_event(GameEvent::TileHidden { index });
        }
        result.outcome = Some(PairOutcome::Mismatched);
    }

    if state.matches_found as usize == state.board.pair_count() {
        result.level_complete = true;
        state.push_event(GameEvent::LevelComplete {
            level: state.level_number(),
            level_moves: state.level_moves,
            level_seconds,
            score: state.score,
        });

        let next = state.level_index + 1;
        if next < levels.len() {
            load_level(state, levels, next);
        } else {
            state.phase = GamePhase::Complete;
            result.game_complete = true;
            state.push_event(GameEvent::GameComplete {
                total_moves: state.total_moves,
                total_score: state.score,
                total_seconds,
            });
        }
    }

    result.events = state.take_events();
    result
}

/// Reset the session to level 0 with zeroed counters.
///
/// Callable at any point; a pending selection pair is discarded with the
/// old board. The caller owns cancellation of any scheduled resolution.
pub fn restart(state: &mut GameState, levels: &LevelSequence) -> Vec<GameEvent> {
    state.phase = GamePhase::Playing;
    state.score = 0;
    state.total_moves = 0;
    load_level(state, levels, 0);
    state.push_event(GameEvent::ScoreChanged { score: 0 });
    state.push_event(GameEvent::MovesChanged { moves: 0 });
    state.take_events()
}

// =============================================================================
// TESTS
// =============================================================================
