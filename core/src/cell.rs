use serde::{Deserialize, Serialize};

/// One board position.
///
/// The flag only matters while the cell is hidden and `neighbor_mines` is only meaningful for cells
/// without a mine. Fields are written by the generator and the reveal engine, everyone else reads.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    neighbor_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    pub const fn neighbor_mines(self) -> u8 {
        self.neighbor_mines
    }

    /// Hidden and not protected by a flag, i.e. a reveal would open it.
    pub const fn is_openable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// What a player is allowed to see of this cell.
    pub const fn view(self) -> CellView {
        match (self.is_revealed, self.is_mine, self.is_flagged) {
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Revealed(self.neighbor_mines),
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Hidden,
        }
    }

    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn set_neighbor_mines(&mut self, count: u8) {
        self.neighbor_mines = count;
    }

    pub(crate) fn set_revealed(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.is_flagged = flagged;
    }
}

/// Player-visible state of a cell, as handed to a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
