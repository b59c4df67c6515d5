use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;

/// The two equal-dimension grids plus the counters derived from them.
///
/// The back layout is populated lazily: `hidden` stays `None` until the first
/// open places the mines, and is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub(crate) visible: Array2<VisibleCell>,
    pub(crate) hidden: Option<Array2<HiddenCell>>,
    /// Cells still in `{Hidden, Flagged, Questioned}`; the game is won when
    /// this drops to the mine count.
    pub(crate) hidden_cells: CellCount,
    pub(crate) flagged: CellCount,
}

impl Board {
    pub(crate) fn new(difficulty: &Difficulty) -> Self {
        let (rows, cols) = difficulty.dim();
        Self {
            visible: Array2::default((rows as usize, cols as usize)),
            hidden: None,
            hidden_cells: difficulty.total_cells(),
            flagged: 0,
        }
    }

    /// The grid a renderer draws from.
    pub fn visible(&self) -> &Array2<VisibleCell> {
        &self.visible
    }

    pub fn visible_at(&self, pos: Pos) -> VisibleCell {
        self.visible[pos.grid_index()]
    }

    /// Whether the back layout has been placed yet.
    pub fn is_populated(&self) -> bool {
        self.hidden.is_some()
    }

    pub fn hidden_cells(&self) -> CellCount {
        self.hidden_cells
    }

    pub fn flagged(&self) -> CellCount {
        self.flagged
    }

    pub(crate) fn populate(&mut self, layout: Array2<HiddenCell>) {
        debug_assert_eq!(layout.dim(), self.visible.dim());
        debug_assert!(self.hidden.is_none(), "layout placed twice");
        self.hidden = Some(layout);
    }

    pub(crate) fn hidden_at(&self, pos: Pos) -> HiddenCell {
        self.layout()[pos.grid_index()]
    }

    fn layout(&self) -> &Array2<HiddenCell> {
        self.hidden
            .as_ref()
            .expect("back layout is placed before any reveal")
    }

    /// Reveals `pos` and flood-fills through zero-adjacency cells, returning
    /// how many cells were uncovered.
    ///
    /// Only cells in `{Hidden, Questioned}` change. The work queue re-checks
    /// that membership when a position is popped, so every cell transitions at
    /// most once and the sweep stays linear in the number of revealed cells,
    /// whatever the board size.
    pub(crate) fn reveal(&mut self, pos: Pos) -> CellCount {
        let mut revealed = 0;
        let mut queue = VecDeque::from([pos]);

        while let Some(pos) = queue.pop_front() {
            if !self.visible[pos.grid_index()].is_openable() {
                continue;
            }

            let face = self.layout()[pos.grid_index()].uncovered();
            self.visible[pos.grid_index()] = face;
            self.hidden_cells -= 1;
            revealed += 1;
            log::trace!("uncovered {:?} as {:?}", pos, face);

            if face == VisibleCell::Count(0) {
                queue.extend(
                    self.visible
                        .neighbors(pos)
                        .filter(|&neighbor| self.visible[neighbor.grid_index()].is_openable()),
                );
            }
        }

        revealed
    }

    /// End-of-game sweep after stepping on a mine: unflagged mines come up as
    /// `Mine`, flags without a mine under them as `MineWrong`, correct flags
    /// stay flags, and the stepped-on cell becomes `Exploded`.
    pub(crate) fn reveal_loss(&mut self, exploded: Pos) {
        let (rows, cols) = self.visible.dim();
        for row in 0..rows as Coord {
            for col in 0..cols as Coord {
                let pos = (row, col);
                let has_mine = self.layout()[pos.grid_index()].is_mine();
                let face = self.visible[pos.grid_index()];
                if has_mine && face != VisibleCell::Flagged {
                    self.visible[pos.grid_index()] = VisibleCell::Mine;
                } else if !has_mine && face == VisibleCell::Flagged {
                    self.visible[pos.grid_index()] = VisibleCell::MineWrong;
                }
            }
        }
        self.visible[exploded.grid_index()] = VisibleCell::Exploded;
    }
}
