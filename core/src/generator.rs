use ndarray::Array2;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::*;

/// Produces the hidden layout for `difficulty`, with `safe` guaranteed
/// mine-free.
///
/// The placement is drawn uniformly over all layouts that respect the
/// safe-cell exclusion: a pool of `total - 1` cells with the mines at the
/// front is shuffled, then the safe cell is spliced back in at its row-major
/// index. Adjacency counts are filled in afterwards.
pub fn generate<R: Rng + ?Sized>(
    difficulty: &Difficulty,
    safe: Pos,
    rng: &mut R,
) -> Result<Array2<HiddenCell>> {
    difficulty.validate()?;

    let total = difficulty.total_cells() as usize;
    let mines = difficulty.mines as usize;

    let mut pool = vec![HiddenCell::Count(0); total - 1];
    pool[..mines].fill(HiddenCell::Mine);
    pool.shuffle(rng);

    let safe_index = (safe.0 * difficulty.width + safe.1) as usize;
    pool.insert(safe_index, HiddenCell::Count(0));

    let mut grid = Array2::from_shape_vec(
        (difficulty.height as usize, difficulty.width as usize),
        pool,
    )
    .expect("pool length matches the board area");
    fill_counts(&mut grid);

    log::debug!(
        "generated {}x{} layout, {} mines, safe cell {:?}",
        difficulty.width,
        difficulty.height,
        difficulty.mines,
        safe
    );
    Ok(grid)
}

/// Builds a layout with mines at exactly the given positions.
///
/// Useful for fixed puzzles and tests. Panics if a position is out of bounds.
pub fn layout_from_mines(width: Coord, height: Coord, mines: &[Pos]) -> Array2<HiddenCell> {
    let mut grid = Array2::from_elem(
        (height as usize, width as usize),
        HiddenCell::Count(0),
    );
    for &pos in mines {
        grid[pos.grid_index()] = HiddenCell::Mine;
    }
    fill_counts(&mut grid);
    grid
}

/// Second pass: every non-mine cell gets the count of mines among its
/// edge-clipped neighbors.
fn fill_counts(grid: &mut Array2<HiddenCell>) {
    let (rows, cols) = grid.dim();
    for row in 0..rows as Coord {
        for col in 0..cols as Coord {
            let pos = (row, col);
            if grid[pos.grid_index()].is_mine() {
                continue;
            }
            let count = grid
                .neighbors(pos)
                .filter(|&neighbor| grid[neighbor.grid_index()].is_mine())
                .count() as u8;
            grid[pos.grid_index()] = HiddenCell::Count(count);
        }
    }
}
