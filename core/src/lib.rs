#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod grid;
mod score;
mod session;
mod types;

/// Side length and mine count of a square board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub side: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(side: Coord, mines: CellCount) -> Self {
        Self { side, mines }
    }

    /// Accepts only boards with at least one cell and at least one safe cell.
    pub fn new(side: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(side, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.side == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }
        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(ConfigIssue::TooManyMines {
                mines: self.mines,
                cells,
            }
            .into());
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.side, self.side)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// What a single reveal did to the board, the caller decides what a mine means for the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_requires_a_safe_cell() {
        assert!(GameConfig::new(5, 24).is_ok());
        assert_eq!(
            GameConfig::new(5, 25),
            Err(GameError::InvalidConfiguration(ConfigIssue::TooManyMines {
                mines: 25,
                cells: 25
            }))
        );
        assert_eq!(
            GameConfig::new(0, 0),
            Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard))
        );
    }

    #[test]
    fn config_allows_mine_free_boards() {
        let config = GameConfig::new(3, 0).unwrap();
        assert_eq!(config.safe_cell_count(), 9);
    }
}
