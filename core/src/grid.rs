use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Builds a `side × side` board where every cell is hidden, unflagged and mine-free.
pub fn create_grid(side: Coord) -> Result<Grid> {
    if side == 0 {
        return Err(ConfigIssue::EmptyBoard.into());
    }
    Ok(Grid::empty(side))
}

/// Square matrix of cells together with the running counters the session needs.
///
/// Deserialization is checked, so a restored board always has a `side × side`
/// shape, a safe cell, neighbor counts matching its mines and counters matching its cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    side: Coord,
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Grid {
    pub(crate) fn empty(side: Coord) -> Self {
        let dim = usize::from(side);
        Self {
            side,
            cells: Array2::default((dim, dim)),
            mine_count: 0,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Builds a board with a fixed mine layout, duplicates in `mine_coords` count once.
    pub fn from_mine_coords(side: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = create_grid(side)?;

        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid.place_mine(coords);
        }

        GameConfig::new_unchecked(side, grid.mine_count).validate()?;
        grid.compute_neighbor_counts();
        Ok(grid)
    }

    pub fn side(&self) -> Coord {
        self.side
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }

    /// Number of mines actually placed on this board.
    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flagged_count)
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        row < self.side && col < self.side
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
                side: self.side,
            })
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords)
            .then(|| self.cells[coords.to_nd_index()])
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.side)
    }

    /// All cells in row-major order with their coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    /// Returns `false` when the cell already held a mine.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_mine() {
            return false;
        }
        cell.set_mine();
        self.mine_count = self.mine_count.saturating_add(1);
        true
    }

    pub(crate) fn compute_neighbor_counts(&mut self) {
        for row in 0..self.side {
            for col in 0..self.side {
                let coords = (row, col);
                if self[coords].is_mine() {
                    continue;
                }
                let count = self.adjacent_mine_count(coords);
                self.cells[coords.to_nd_index()].set_neighbor_mines(count);
            }
        }
    }

    pub(crate) fn mark_revealed(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_revealed() {
            cell.set_revealed();
            self.revealed_count = self.revealed_count.saturating_add(1);
        }
    }

    pub(crate) fn set_flag(&mut self, coords: Coord2, flagged: bool) {
        let cell = &mut self.cells[coords.to_nd_index()];
        match (cell.is_flagged(), flagged) {
            (false, true) => self.flagged_count = self.flagged_count.saturating_add(1),
            (true, false) => self.flagged_count = self.flagged_count.saturating_sub(1),
            _ => return,
        }
        cell.set_flagged(flagged);
    }
}

/// Serialized form of a [`Grid`]; the counters are rebuilt from the cells on load.
#[derive(Deserialize)]
struct GridRepr {
    side: Coord,
    cells: Array2<Cell>,
}

impl TryFrom<GridRepr> for Grid {
    type Error = GameError;

    fn try_from(GridRepr { side, cells }: GridRepr) -> Result<Self> {
        if side == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }
        let dim = usize::from(side);
        if cells.dim() != (dim, dim) {
            return Err(ConfigIssue::InvalidBoardShape.into());
        }

        let mut grid = Self {
            side,
            cells,
            mine_count: 0,
            revealed_count: 0,
            flagged_count: 0,
        };

        let (mut mines, mut revealed, mut flagged): (CellCount, CellCount, CellCount) = (0, 0, 0);
        for ((row, col), cell) in grid.iter_cells() {
            let expected_count = if cell.is_mine() {
                0
            } else {
                grid.adjacent_mine_count((row, col))
            };
            if cell.neighbor_mines() != expected_count || (cell.is_revealed() && cell.is_flagged())
            {
                return Err(ConfigIssue::InconsistentCell { row, col }.into());
            }
            mines += CellCount::from(cell.is_mine());
            revealed += CellCount::from(cell.is_revealed());
            flagged += CellCount::from(cell.is_flagged());
        }
        GameConfig::new_unchecked(side, mines).validate()?;

        grid.mine_count = mines;
        grid.revealed_count = revealed;
        grid.flagged_count = flagged;
        Ok(grid)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn create_grid_starts_blank() {
        let grid = create_grid(4).unwrap();

        assert_eq!(grid.side(), 4);
        assert_eq!(grid.total_cells(), 16);
        assert!(grid.iter_cells().all(|(_, cell)| cell == Cell::default()));
        assert_eq!(grid.iter_cells().count(), 16);
    }

    #[test]
    fn create_grid_rejects_zero_side() {
        assert_eq!(
            create_grid(0),
            Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard))
        );
    }

    #[test]
    fn checked_access_reports_out_of_bounds() {
        let grid = create_grid(3).unwrap();

        assert_eq!(grid.get((2, 2)), Some(Cell::default()));
        assert_eq!(grid.get((3, 0)), None);
        assert_eq!(
            grid.cell((0, 3)),
            Err(GameError::OutOfBounds {
                row: 0,
                col: 3,
                side: 3
            })
        );
    }

    #[test]
    fn fixed_layout_counts_neighbors() {
        let grid = Grid::from_mine_coords(3, &[(0, 0), (1, 1), (0, 0)]).unwrap();

        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid[(0, 1)].neighbor_mines(), 2);
        assert_eq!(grid[(2, 2)].neighbor_mines(), 1);
        assert_eq!(grid[(2, 0)].neighbor_mines(), 1);
        assert_eq!(grid[(1, 1)].neighbor_mines(), 0);
    }

    #[test]
    fn fixed_layout_must_leave_a_safe_cell() {
        let err = Grid::from_mine_coords(1, &[(0, 0)]).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidConfiguration(ConfigIssue::TooManyMines { mines: 1, cells: 1 })
        );
    }

    #[test]
    fn flag_counter_follows_flag_changes() {
        let mut grid = Grid::from_mine_coords(2, &[(0, 0)]).unwrap();

        grid.set_flag((0, 0), true);
        grid.set_flag((0, 0), true);
        assert_eq!(grid.flagged_count(), 1);
        assert_eq!(grid.mines_left(), 0);

        grid.set_flag((1, 1), true);
        assert_eq!(grid.mines_left(), -1);

        grid.set_flag((0, 0), false);
        grid.set_flag((1, 1), false);
        assert_eq!(grid.flagged_count(), 0);
    }

    fn reload(json: &str) -> core::result::Result<Grid, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn restored_grid_rebuilds_counters() {
        let mut grid = Grid::from_mine_coords(3, &[(0, 0)]).unwrap();
        grid.set_flag((0, 0), true);
        grid.mark_revealed((2, 2));
        let json = serde_json::to_string(&grid)
            .unwrap()
            .replacen("\"flagged_count\":1", "\"flagged_count\":0", 1)
            .replacen("\"revealed_count\":1", "\"revealed_count\":7", 1);

        let mut restored = reload(&json).unwrap();

        assert_eq!(restored, grid);
        restored.set_flag((0, 0), false);
        assert_eq!(restored.flagged_count(), 0);
    }

    #[test]
    fn restored_grid_must_match_its_side() {
        let grid = Grid::from_mine_coords(3, &[(0, 0)]).unwrap();
        let json = serde_json::to_string(&grid)
            .unwrap()
            .replacen("\"side\":3", "\"side\":4", 1);

        let err = reload(&json).unwrap_err();
        assert!(err.to_string().contains("shape"), "{err}");
    }

    #[test]
    fn restored_grid_needs_a_safe_cell() {
        let grid = create_grid(1).unwrap();
        let json = serde_json::to_string(&grid)
            .unwrap()
            .replacen("\"is_mine\":false", "\"is_mine\":true", 1);

        let err = reload(&json).unwrap_err();
        assert!(err.to_string().contains("no safe cell"), "{err}");
    }

    #[test]
    fn restored_grid_rejects_wrong_neighbor_counts() {
        let grid = Grid::from_mine_coords(2, &[(0, 0)]).unwrap();
        let json = serde_json::to_string(&grid)
            .unwrap()
            .replacen("\"neighbor_mines\":1", "\"neighbor_mines\":3", 1);

        let err = reload(&json).unwrap_err();
        assert!(err.to_string().contains("(0, 1)"), "{err}");
    }
}
