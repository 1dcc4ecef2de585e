use thiserror::Error;

use crate::{CellCount, Coord, SessionAction, SessionStatus};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigIssue),
    #[error("Coordinates ({row}, {col}) are outside the {side}x{side} board")]
    OutOfBounds { row: Coord, col: Coord, side: Coord },
    #[error("Cannot {action} while the session is {status}")]
    InvalidState {
        action: SessionAction,
        status: SessionStatus,
    },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board size must be positive")]
    EmptyBoard,
    #[error("{mines} mines leave no safe cell among {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("unknown difficulty name")]
    UnknownDifficulty,
    #[error("cell data does not match the board shape")]
    InvalidBoardShape,
    #[error("cell ({row}, {col}) disagrees with the mines around it")]
    InconsistentCell { row: Coord, col: Coord },
    #[error("board already has revealed cells")]
    BoardInProgress,
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
