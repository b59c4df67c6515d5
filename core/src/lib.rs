//! Minesweeper game engine: board generation, reveal propagation, flag
//! cycling, win/loss detection and timer state.
//!
//! The engine is a pure state-transition machine over a [`Game`] value.
//! Rendering, input capture and the periodic tick cadence belong to the
//! caller, which dispatches intents one at a time ([`Game::open_cell`],
//! [`Game::toggle_flag`], [`Game::restart`], [`Game::change_difficulty`],
//! [`Game::tick`]) and renders from the state afterwards. The current time
//! and the random seed are injected, so transitions are deterministic under
//! test.

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

/// Board parameters. Immutable once a game starts; changing them always goes
/// through a full reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl Difficulty {
    /// Validated constructor. Never clamps: an impossible combination is an
    /// error for the caller to handle.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let difficulty = Self {
            width,
            height,
            mines,
        };
        difficulty.validate()?;
        Ok(difficulty)
    }

    /// Rejects empty boards and boards without at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.mines >= self.total_cells() {
            return Err(GameError::InvalidDifficulty);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.width, self.height)
    }

    /// Grid shape as `(rows, cols)`.
    pub const fn dim(&self) -> Pos {
        (self.height, self.width)
    }
}

impl Default for Difficulty {
    // the classic intermediate board
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            mines: 40,
        }
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of opening one or more cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the game.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Used to merge outcomes when a chord opens several cells.
impl BitOr for OpenOutcome {
    type Output = OpenOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use OpenOutcome::*;
        match (self, rhs) {
            // an explosion trumps everything
            (Exploded, _) => Exploded,
            (_, Exploded) => Exploded,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_rejects_zero_dimensions_and_full_boards() {
        assert_eq!(Difficulty::new(0, 5, 1), Err(GameError::InvalidDifficulty));
        assert_eq!(Difficulty::new(5, 0, 1), Err(GameError::InvalidDifficulty));
        assert_eq!(
            Difficulty::new(5, 5, 25),
            Err(GameError::InvalidDifficulty)
        );
        assert!(Difficulty::new(5, 5, 24).is_ok());
        assert!(Difficulty::new(1, 1, 0).is_ok());
    }

    #[test]
    fn default_difficulty_is_valid() {
        assert!(Difficulty::default().validate().is_ok());
    }

    #[test]
    fn open_outcomes_merge_by_severity() {
        use OpenOutcome::*;
        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Revealed | Won, Won);
        assert_eq!(Won | Exploded, Exploded);
        assert_eq!(NoChange | NoChange, NoChange);
    }
}
