//! Game Logic Module
//!
//! The match engine proper. 100% deterministic: no clocks, no timers,
//! no I/O. Scheduling of the reveal delay belongs to the session layer.
//!
//! ## Module Structure
//!
//! - `level`: Level specifications and fail-fast validation
//! - `board`: Board generation and tile state
//! - `state`: Session-wide game state and the selection pair
//! - `engine`: The select / resolve / restart transitions
//! - `events`: Events emitted toward the presentation layer

pub mod board;
pub mod engine;
pub mod events;
pub mod level;
pub mod state;

// Re-export key types
pub use board::{Board, SymbolId, Tile, TileFace};
pub use events::GameEvent;
pub use level::{ConfigError, LevelSequence, LevelSpec};
pub use state::{GamePhase, GameState, Selection};
