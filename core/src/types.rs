use ndarray::Array2;

/// Single grid axis, used for board width, height and cell positions.
pub type Coord = u32;

/// Count type used for mine totals and cell totals.
pub type CellCount = u32;

/// Board position as `(row, col)`, zero-based from the top-left corner.
pub type Pos = (Coord, Coord);

/// Conversion from a `(row, col)` position into an `ndarray` index.
pub trait ToGridIndex {
    type Output;
    fn grid_index(self) -> Self::Output;
}

impl ToGridIndex for Pos {
    type Output = [usize; 2];

    fn grid_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Total cell count of a `width` by `height` board.
pub const fn area(width: Coord, height: Coord) -> CellCount {
    width.saturating_mul(height)
}

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up-to-8 neighbors of `pos` on a `rows` by `cols` grid, edge clipped.
pub fn neighbors_within(pos: Pos, (rows, cols): Pos) -> impl Iterator<Item = Pos> {
    NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
        let row = pos.0.checked_add_signed(dr)?;
        let col = pos.1.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some((row, col))
    })
}

pub trait NeighborhoodExt {
    /// Iterates the in-bounds neighbors of `pos` on this grid.
    fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos>;
}

impl<T> NeighborhoodExt for Array2<T> {
    fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        let (rows, cols) = self.dim();
        neighbors_within(pos, (rows as Coord, cols as Coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(pos: Pos, bounds: Pos) -> Vec<Pos> {
        neighbors_within(pos, bounds).collect()
    }

    #[test]
    fn center_cell_has_eight_neighbors() {
        let neighbors = collect((1, 1), (3, 3));
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(1, 1)));
    }

    #[test]
    fn corner_and_edge_cells_are_clipped() {
        assert_eq!(collect((0, 0), (3, 3)).len(), 3);
        assert_eq!(collect((0, 1), (3, 3)).len(), 5);
        assert_eq!(collect((2, 2), (3, 3)).len(), 3);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert!(collect((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn area_saturates_instead_of_overflowing() {
        assert_eq!(area(4, 5), 20);
        assert_eq!(area(Coord::MAX, Coord::MAX), CellCount::MAX);
    }
}
