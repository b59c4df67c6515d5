use chrono::{DateTime, Utc};
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Terminal classification of a game.
///
/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// A full reset is the only way back to `InProgress`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Face shown on the restart button.
///
/// The engine computes the resting values (`Default`, `Won`, `Lost`);
/// `Pressed` and `Shocked` are transient states the input layer requests
/// around pointer press/release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmileIndicator {
    Default,
    Pressed,
    Shocked,
    Won,
    Lost,
}

impl Default for SmileIndicator {
    fn default() -> Self {
        Self::Default
    }
}

/// Clock bookkeeping for the elapsed-seconds display.
///
/// The engine never reads a clock itself; `start` and `tick` receive the
/// current time from the caller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    started_at: Option<DateTime<Utc>>,
    now: Option<DateTime<Utc>>,
}

impl Timer {
    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn start(&mut self, now: DateTime<Utc>) {
        self.started_at = Some(now);
        self.now = Some(now);
    }

    pub(crate) fn tick(&mut self, now: DateTime<Utc>) {
        if self.is_started() {
            self.now = Some(now);
        }
    }

    /// Whole seconds since start, 0 while the timer has not started.
    pub fn elapsed_secs(&self) -> u32 {
        match (self.started_at, self.now) {
            (Some(started_at), Some(now)) => (now - started_at).num_seconds().max(0) as u32,
            _ => 0,
        }
    }
}

/// A game from construction to a terminal outcome and back through resets.
///
/// Single-writer: intents are applied one at a time and the caller renders
/// from the state afterwards. Nothing here blocks or spawns, and no
/// synchronization is provided; wrap the whole value in a mutex or hand it to
/// an actor if it must cross threads.
#[derive(Clone, Debug)]
pub struct Game {
    difficulty: Difficulty,
    board: Board,
    timer: Timer,
    outcome: Outcome,
    smile: SmileIndicator,
    rng: SmallRng,
}

impl Game {
    /// New unstarted game. Fails on an impossible difficulty; never clamps.
    pub fn new(difficulty: Difficulty, seed: u64) -> Result<Self> {
        difficulty.validate()?;
        Ok(Self {
            difficulty,
            board: Board::new(&difficulty),
            timer: Timer::default(),
            outcome: Outcome::InProgress,
            smile: SmileIndicator::Default,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// Game over a fixed, pre-populated layout, for puzzles and tests.
    ///
    /// The difficulty is derived from the layout. No generation happens, so
    /// the safe-first-click guarantee is whatever the layout says it is; the
    /// first open still starts the timer.
    pub fn from_layout(layout: Array2<HiddenCell>, seed: u64) -> Result<Self> {
        let (rows, cols) = layout.dim();
        let mines = layout.iter().filter(|cell| cell.is_mine()).count() as CellCount;
        let difficulty = Difficulty::new(cols as Coord, rows as Coord, mines)?;
        let mut game = Self::new(difficulty, seed)?;
        game.board.populate(layout);
        Ok(game)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn smile(&self) -> SmileIndicator {
        self.smile
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.timer.elapsed_secs()
    }

    /// Remaining-mine counter: configured mines minus placed flags. Never
    /// goes negative because the flagging step is refused at zero.
    pub fn mines_left(&self) -> CellCount {
        self.difficulty.mines - self.board.flagged
    }

    /// Opens a cell. The first open of a game places the mines (with the
    /// opened cell excluded) and starts the timer.
    ///
    /// Defined no-ops, not errors: opening after the game ended, opening a
    /// flagged cell, opening an already-revealed cell.
    pub fn open_cell(&mut self, pos: Pos, now: DateTime<Utc>) -> OpenOutcome {
        if self.outcome.is_terminal() {
            return OpenOutcome::NoChange;
        }
        if self.board.visible_at(pos) == VisibleCell::Flagged {
            return OpenOutcome::NoChange;
        }

        if !self.board.is_populated() {
            let layout = generate(&self.difficulty, pos, &mut self.rng)
                .expect("difficulty was validated on construction");
            self.board.populate(layout);
        }
        if !self.timer.is_started() {
            self.timer.start(now);
            log::debug!("first open at {:?}, timer started", pos);
        }

        if self.board.hidden_at(pos).is_mine() {
            self.board.reveal_loss(pos);
            self.outcome = Outcome::Lost;
            self.smile = SmileIndicator::Lost;
            log::debug!("mine hit at {:?}", pos);
            return OpenOutcome::Exploded;
        }

        if self.board.reveal(pos) == 0 {
            return OpenOutcome::NoChange;
        }

        if self.board.hidden_cells == self.difficulty.mines {
            self.outcome = Outcome::Won;
            self.smile = SmileIndicator::Won;
            log::debug!("all safe cells revealed");
            OpenOutcome::Won
        } else {
            OpenOutcome::Revealed
        }
    }

    /// Cycles a covered cell: `Hidden -> Flagged -> Questioned -> Hidden`.
    ///
    /// The first step is refused once the remaining-mine counter reaches
    /// zero. Revealed cells never change, and marking is allowed before the
    /// first open.
    pub fn toggle_flag(&mut self, pos: Pos) -> FlagOutcome {
        use VisibleCell::*;

        if self.outcome.is_terminal() {
            return FlagOutcome::NoChange;
        }

        match self.board.visible_at(pos) {
            Hidden if self.mines_left() > 0 => {
                self.board.visible[pos.grid_index()] = Flagged;
                self.board.flagged += 1;
                FlagOutcome::Changed
            }
            Hidden => FlagOutcome::NoChange,
            Flagged => {
                self.board.visible[pos.grid_index()] = Questioned;
                self.board.flagged -= 1;
                FlagOutcome::Changed
            }
            Questioned => {
                self.board.visible[pos.grid_index()] = Hidden;
                FlagOutcome::Changed
            }
            _ => FlagOutcome::NoChange,
        }
    }

    /// Opens every coverable neighbor of a satisfied numbered cell: the
    /// count must match the adjacent flags and no neighbor may carry a
    /// question mark. Any other target falls back to a plain open.
    pub fn chord_open(&mut self, pos: Pos, now: DateTime<Utc>) -> OpenOutcome {
        if self.outcome.is_terminal() {
            return OpenOutcome::NoChange;
        }

        match self.board.visible_at(pos) {
            VisibleCell::Count(count)
                if count == self.flagged_neighbors(pos) && !self.has_questioned_neighbor(pos) =>
            {
                let neighbors: Vec<Pos> = self.board.visible.neighbors(pos).collect();
                neighbors
                    .into_iter()
                    .map(|neighbor| self.open_cell(neighbor, now))
                    .reduce(core::ops::BitOr::bitor)
                    .unwrap_or(OpenOutcome::NoChange)
            }
            _ => self.open_cell(pos, now),
        }
    }

    /// Fresh board under the current difficulty. Unconditional: press-arming
    /// of the restart button is the input layer's concern.
    pub fn restart(&mut self) {
        self.reset(self.difficulty);
    }

    /// Validates the new difficulty, then restarts under it. The running
    /// game is untouched when validation fails.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) -> Result<()> {
        difficulty.validate()?;
        self.reset(difficulty);
        Ok(())
    }

    /// Advances the displayed clock. A no-op before the first open and after
    /// the game ends; the external tick driver is expected to stop on its own
    /// once `outcome` turns terminal.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if self.outcome.is_terminal() {
            return;
        }
        self.timer.tick(now);
    }

    /// Applies a smile request from the input layer. While the game runs any
    /// request sticks; after it ends the face locks to `Won`/`Lost`, with
    /// `Pressed` still allowed so the restart button can depress.
    pub fn set_smile(&mut self, requested: SmileIndicator) {
        self.smile = match (self.outcome, requested) {
            (Outcome::InProgress, _) => requested,
            (_, SmileIndicator::Pressed) => SmileIndicator::Pressed,
            (Outcome::Won, _) => SmileIndicator::Won,
            (Outcome::Lost, _) => SmileIndicator::Lost,
        };
    }

    fn reset(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.board = Board::new(&difficulty);
        self.timer = Timer::default();
        self.outcome = Outcome::InProgress;
        self.smile = SmileIndicator::Default;
        log::debug!(
            "reset to {}x{}, {} mines",
            difficulty.width,
            difficulty.height,
            difficulty.mines
        );
    }

    fn flagged_neighbors(&self, pos: Pos) -> u8 {
        self.board
            .visible
            .neighbors(pos)
            .filter(|&neighbor| self.board.visible_at(neighbor) == VisibleCell::Flagged)
            .count() as u8
    }

    fn has_questioned_neighbor(&self, pos: Pos) -> bool {
        self.board
            .visible
            .neighbors(pos)
            .any(|neighbor| self.board.visible_at(neighbor) == VisibleCell::Questioned)
    }
}
