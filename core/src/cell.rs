use serde::{Deserialize, Serialize};

/// Player-facing cell state, the only grid a renderer consumes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden,
    Flagged,
    Questioned,
    /// An unflagged mine, uncovered when the game is lost.
    Mine,
    /// The mine the player stepped on.
    Exploded,
    /// A flag that turned out not to cover a mine.
    MineWrong,
    /// A revealed safe cell with its adjacent-mine count (0..=8).
    Count(u8),
}

impl VisibleCell {
    /// Whether the player has not revealed this cell yet.
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::Questioned)
    }

    /// Whether an open is allowed to reveal this cell.
    pub const fn is_openable(self) -> bool {
        matches!(self, Self::Hidden | Self::Questioned)
    }
}

impl Default for VisibleCell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Back-layout cell, kept out of sight until revealed or the game ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiddenCell {
    Mine,
    Count(u8),
}

impl HiddenCell {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// The face this cell shows once uncovered.
    pub(crate) const fn uncovered(self) -> VisibleCell {
        match self {
            Self::Mine => VisibleCell::Mine,
            Self::Count(n) => VisibleCell::Count(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covered_states_are_exactly_the_unrevealed_ones() {
        assert!(VisibleCell::Hidden.is_covered());
        assert!(VisibleCell::Flagged.is_covered());
        assert!(VisibleCell::Questioned.is_covered());
        assert!(!VisibleCell::Count(3).is_covered());
        assert!(!VisibleCell::Mine.is_covered());
        assert!(!VisibleCell::Exploded.is_covered());
        assert!(!VisibleCell::MineWrong.is_covered());
    }

    #[test]
    fn flagged_cells_are_covered_but_not_openable() {
        assert!(!VisibleCell::Flagged.is_openable());
        assert!(VisibleCell::Questioned.is_openable());
    }
}
