//! Board Generation and Tile State
//!
//! A board is a flat row-major vector of tiles. Generation assigns every
//! chosen symbol to exactly two slots, then applies a full Fisher-Yates
//! shuffle over all slots.

use serde::{Deserialize, Serialize};

use crate::core::rng::DeterministicRng;
use crate::game::level::LevelSpec;

/// Identifier of a symbol within a level's pool.
///
/// The board never stores glyphs directly; the presentation layer resolves
/// ids through [`LevelSpec::symbol`](crate::game::level::LevelSpec::symbol).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SymbolId(pub u16);

/// Which way a tile is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TileFace {
    /// Concealed, selectable.
    #[default]
    Down,
    /// Revealed, awaiting comparison.
    Up,
    /// Paired off. Terminal: a matched tile is never hidden again.
    Matched,
}

/// One board slot: its assigned symbol and current face.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tile {
    /// Assigned symbol id.
    pub symbol: SymbolId,
    /// Current face.
    pub face: TileFace,
}

impl Tile {
    fn new(symbol: SymbolId) -> Self {
        Self {
            symbol,
            face: TileFace::Down,
        }
    }

    /// A tile accepts selection only while face-down.
    #[inline]
    pub fn is_selectable(&self) -> bool {
        self.face == TileFace::Down
    }
}

/// The full tile arrangement for one level.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Board {
    side: usize,
    tiles: Vec<Tile>,
}

impl Board {
    /// Generate a fresh board for a level spec.
    ///
    /// Takes the first `pair_count()` symbols of the pool, lays each down
    /// twice, and shuffles the whole arrangement.
    pub fn generate(spec: &LevelSpec, rng: &mut DeterministicRng) -> Self {
        let pairs = spec.pair_count();
        let mut symbols: Vec<SymbolId> = (0..pairs)
            .flat_map(|i| {
                let id = SymbolId(i as u16);
                [id, id]
            })
            .collect();
        rng.shuffle(&mut symbols);

        Self {
            side: spec.side,
            tiles: symbols.into_iter().map(Tile::new).collect(),
        }
    }

    /// Grid side length.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Total tile count (side²).
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of pairs on the board.
    #[inline]
    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get a tile by slot index.
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub(crate) fn tile_mut(&mut self, index: usize) -> Option<&mut Tile> {
        self.tiles.get_mut(index)
    }

    /// Indices of tiles still face-down.
    pub fn face_down_indices(&self) -> Vec<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.face == TileFace::Down)
            .map(|(i, _)| i)
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
