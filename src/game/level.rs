//! Level Specifications
//!
//! The fixed level progression: grid side length plus the symbol pool the
//! board draws its pairs from. Validation is fail-fast at construction;
//! an undersized or duplicated pool is a configuration defect, never
//! something to paper over at board-generation time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::board::SymbolId;

/// Errors in level configuration, reported at sequence construction.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The sequence contains no levels.
    #[error("level sequence is empty")]
    EmptySequence,

    /// Grid side must be even so the tile count splits into pairs.
    #[error("level {level}: grid side {side} is odd, tile count must be even")]
    OddGridSide {
        /// Zero-based level index.
        level: usize,
        /// Configured grid side length.
        side: usize,
    },

    /// Grid side must be at least 2.
    #[error("level {level}: grid side {side} is too small")]
    GridTooSmall {
        /// Zero-based level index.
        level: usize,
        /// Configured grid side length.
        side: usize,
    },

    /// The symbol pool cannot fill the board with distinct pairs.
    #[error("level {level}: pool has {available} symbols, {required} required")]
    PoolTooSmall {
        /// Zero-based level index.
        level: usize,
        /// Pairs the grid needs (side² / 2).
        required: usize,
        /// Symbols actually available.
        available: usize,
    },

    /// The same symbol appears twice in one pool.
    #[error("level {level}: duplicate symbol {symbol:?} in pool")]
    DuplicateSymbol {
        /// Zero-based level index.
        level: usize,
        /// The repeated symbol.
        symbol: String,
    },

    /// A level file could not be parsed.
    #[error("failed to parse level sequence: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Specification of a single level: grid side and symbol pool.
///
/// The board uses the first `pair_count()` symbols of the pool; a pool may
/// be larger than required.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Grid side length N (board has N² tiles).
    pub side: usize,
    /// Candidate symbols, all distinct.
    pub symbols: Vec<String>,
}

impl LevelSpec {
    /// Create a level spec. Validation happens in [`LevelSequence::new`].
    pub fn new<I, S>(side: usize, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            side,
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Total tiles on this level's board.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.side * self.side
    }

    /// Number of symbol pairs the board holds.
    #[inline]
    pub fn pair_count(&self) -> usize {
        self.tile_count() / 2
    }

    /// Resolve a symbol id to its glyph.
    ///
    /// Ids are indices into the pool; the board only ever assigns ids
    /// below `pair_count()`.
    pub fn symbol(&self, id: SymbolId) -> &str {
        &self.symbols[id.0 as usize]
    }

    fn validate(&self, level: usize) -> Result<(), ConfigError> {
        if self.side < 2 {
            return Err(ConfigError::GridTooSmall { level, side: self.side });
        }
        if self.side % 2 != 0 {
            return Err(ConfigError::OddGridSide { level, side: self.side });
        }

        let mut seen = BTreeSet::new();
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol {
                    level,
                    symbol: symbol.clone(),
                });
            }
        }

        let required = self.pair_count();
        if self.symbols.len() < required {
            return Err(ConfigError::PoolTooSmall {
                level,
                required,
                available: self.symbols.len(),
            });
        }

        Ok(())
    }
}

/// A validated, ordered sequence of levels.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelSpec>", into = "Vec<LevelSpec>")]
pub struct LevelSequence {
    levels: Vec<LevelSpec>,
}

impl LevelSequence {
    /// Validate and wrap a sequence of level specs.
    pub fn new(levels: Vec<LevelSpec>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        for (index, level) in levels.iter().enumerate() {
            level.validate(index)?;
        }
        Ok(Self { levels })
    }

    /// The standard five-level progression: 4×4, 6×6, 6×6, 8×8, 8×8.
    pub fn standard() -> Self {
        let levels = vec![
            // 4x4 -> 8 pairs
            LevelSpec::new(4, ["🍎", "🍌", "🍇", "🍉", "🍓", "🍒", "🥝", "🍍"]),
            // 6x6 -> 18 pairs
            LevelSpec::new(
                6,
                [
                    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁",
                    "🐸", "🐵", "🐔", "🐧", "🐦", "🦉", "🦄",
                ],
            ),
            // 6x6 -> 18 pairs
            LevelSpec::new(
                6,
                [
                    "⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🏉", "🎱", "🏓", "🏸", "🥅",
                    "🎯", "🏹", "🪀", "🎳", "🥏", "🛼", "🛹",
                ],
            ),
            // 8x8 -> 32 pairs
            LevelSpec::new(
                8,
                [
                    "🍔", "🍕", "🌭", "🍟", "🥪", "🥗", "🍣", "🍤", "🍩", "🍪", "🍰",
                    "🎂", "🍫", "🍿", "🥟", "🥞", "🧁", "🥧", "🍜", "🍲", "🥣", "🥠",
                    "🥡", "🍝", "🍛", "🍚", "🍙", "🍘", "🥮", "🫔", "🥯", "🫓",
                ],
            ),
            // 8x8 -> 32 pairs
            LevelSpec::new(
                8,
                [
                    "🚗", "🚕", "🚙", "🚌", "🚎", "🏎️", "🚓", "🚑", "🚒", "🚐", "🛻",
                    "🚚", "🚛", "🚜", "🛺", "🛵", "🏍️", "🛶", "⛵", "🚤", "🛥️", "🛳️",
                    "✈️", "🚁", "🛸", "🚀", "🚲", "🛴", "🛹", "🚂", "🚝", "🚠",
                ],
            ),
        ];

        // Static data, validated by tests below.
        Self::new(levels).expect("standard level sequence is valid")
    }

    /// Load a sequence from a JSON array of `{ "side": N, "symbols": [...] }`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelSpec> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Get a level by index. `None` past the end means the game is complete.
    pub fn get(&self, index: usize) -> Option<&LevelSpec> {
        self.levels.get(index)
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the sequence is empty (never true for a constructed sequence).
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate over the level specs in order.
    pub fn iter(&self) -> impl Iterator<Item = &LevelSpec> {
        self.levels.iter()
    }
}

impl TryFrom<Vec<LevelSpec>> for LevelSequence {
    type Error = ConfigError;

    fn try_from(levels: Vec<LevelSpec>) -> Result<Self, ConfigError> {
        Self::new(levels)
    }
}

impl From<LevelSequence> for Vec<LevelSpec> {
    fn from(sequence: LevelSequence) -> Self {
        sequence.levels
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_sequence_is_valid() {
        let levels = LevelSequence::standard();
        assert_eq!(levels.len(), 5);

        let sides: Vec<usize> = levels.iter().map(|l| l.side).collect();
        assert_eq!(sides, vec![4, 6, 6, 8, 8]);

        // Every pool covers its board exactly or with slack
        for level in levels.iter() {
            assert!(level.symbols.len() >= level.pair_count());
        }
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let err = LevelSequence::new(vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySequence));
    }

    #[test]
    fn test_odd_side_rejected() {
        let spec = LevelSpec::new(3, ["a", "b", "c", "d", "e"]);
        let err = LevelSequence::new(vec![spec]).unwrap_err();
        assert!(matches!(err, ConfigError::OddGridSide { level: 0, side: 3 }));
    }

    #[test]
    fn test_zero_side_rejected() {
        let spec = LevelSpec::new(0, ["a"]);
        let err = LevelSequence::new(vec![spec]).unwrap_err();
        assert!(matches!(err, ConfigError::GridTooSmall { level: 0, side: 0 }));
    }

    #[test]
    fn test_undersized_pool_rejected() {
        // 4x4 needs 8 pairs, pool has 7
        let spec = LevelSpec::new(4, ["a", "b", "c", "d", "e", "f", "g"]);
        let err = LevelSequence::new(vec![spec]).unwrap_err();
        match err {
            ConfigError::PoolTooSmall { level, required, available } => {
                assert_eq!(level, 0);
                assert_eq!(required, 8);
                assert_eq!(available, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        // A duplicate inside the pool would break "every symbol exactly
        // twice" even when the pool looks big enough.
        let spec = LevelSpec::new(
            4,
            ["a", "b", "c", "d", "e", "f", "g", "b", "h"],
        );
        let err = LevelSequence::new(vec![spec]).unwrap_err();
        match err {
            ConfigError::DuplicateSymbol { level, symbol } => {
                assert_eq!(level, 0);
                assert_eq!(symbol, "b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_reports_offending_level() {
        let good = LevelSpec::new(4, ["a", "b", "c", "d", "e", "f", "g", "h"]);
        let bad = LevelSpec::new(6, ["a", "b"]);
        let err = LevelSequence::new(vec![good, bad]).unwrap_err();
        assert!(matches!(err, ConfigError::PoolTooSmall { level: 1, .. }));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            { "side": 2, "symbols": ["🍎", "🍌"] },
            { "side": 4, "symbols": ["a", "b", "c", "d", "e", "f", "g", "h"] }
        ]"#;
        let levels = LevelSequence::from_json_str(json).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels.get(0).unwrap().pair_count(), 2);
    }

    #[test]
    fn test_from_json_rejects_invalid_config() {
        let json = r#"[{ "side": 4, "symbols": ["a"] }]"#;
        assert!(LevelSequence::from_json_str(json).is_err());
    }
}
