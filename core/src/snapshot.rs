use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs for one frame, detached from the engine.
///
/// The presentation layer is expected to draw from this and feed intents
/// back; it never sees the hidden layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub grid: Array2<VisibleCell>,
    pub mines_left: CellCount,
    pub elapsed_secs: u32,
    pub outcome: Outcome,
    pub smile: SmileIndicator,
}

impl Snapshot {
    pub fn from_game(game: &Game) -> Self {
        Self {
            grid: game.board().visible().clone(),
            mines_left: game.mines_left(),
            elapsed_secs: game.elapsed_secs(),
            outcome: game.outcome(),
            smile: game.smile(),
        }
    }
}

impl Game {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_game(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn snapshot_carries_the_render_state() {
        let mut game = Game::from_layout(layout_from_mines(2, 2, &[(0, 0)]), 0).unwrap();
        let t0 = DateTime::from_timestamp_millis(5_000).unwrap();
        game.open_cell((1, 1), t0);
        game.toggle_flag((0, 0));
        game.tick(DateTime::from_timestamp_millis(7_200).unwrap());

        let snapshot = game.snapshot();

        assert_eq!(snapshot.grid[(1usize, 1usize)], VisibleCell::Count(1));
        assert_eq!(snapshot.grid[(0usize, 0usize)], VisibleCell::Flagged);
        assert_eq!(snapshot.mines_left, 0);
        assert_eq!(snapshot.elapsed_secs, 2);
        assert_eq!(snapshot.outcome, Outcome::InProgress);
        assert_eq!(snapshot.smile, SmileIndicator::Default);
    }
}
