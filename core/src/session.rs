use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Selecting -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Selecting (reset)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// No board yet, waiting for a difficulty
    #[default]
    Selecting,
    /// Board active, moves are accepted
    Playing,
    /// Every safe cell revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl SessionStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Session operations that are only valid in some states.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    ChooseDifficulty,
    Click,
    ToggleFlag,
    RecordScore,
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ChooseDifficulty => "choose a difficulty",
            Self::Click => "click a cell",
            Self::ToggleFlag => "toggle a flag",
            Self::RecordScore => "record a score",
        })
    }
}

/// Emitted once when a session enters `Won` or `Lost`.
///
/// On a win the UI is expected to ask for a name and hand it to [`Session::record_score`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameEnded {
    pub status: SessionStatus,
    pub difficulty: Difficulty,
    pub triggered_mine: Option<Coord2>,
}

impl GameEnded {
    pub const fn is_win(&self) -> bool {
        matches!(self.status, SessionStatus::Won)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    pub status: SessionStatus,
    pub was_mine_hit: bool,
    pub reveal: RevealOutcome,
    pub ended: Option<GameEnded>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct ActiveGame {
    difficulty: Difficulty,
    grid: Grid,
    triggered_mine: Option<Coord2>,
    score_recorded: bool,
}

/// One player's game from difficulty selection to win or loss; the only owner of its grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    status: SessionStatus,
    game: Option<ActiveGame>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a new session that immediately picks `difficulty`.
    pub fn new_game<S: MineSource>(difficulty: Difficulty, source: S) -> Result<Self> {
        let mut session = Self::new();
        session.choose_difficulty(difficulty, source)?;
        Ok(session)
    }

    /// Starts playing on a prepared board, e.g. to replay a known layout.
    ///
    /// The board must not have any revealed cell yet. The win check always uses the mines actually
    /// on `grid`, whatever `difficulty` says.
    pub fn with_grid(difficulty: Difficulty, grid: Grid) -> Result<Self> {
        if grid.revealed_count() != 0 {
            return Err(ConfigIssue::BoardInProgress.into());
        }
        Ok(Self::playing(difficulty, grid))
    }

    fn playing(difficulty: Difficulty, grid: Grid) -> Self {
        Self {
            status: SessionStatus::Playing,
            game: Some(ActiveGame {
                difficulty,
                grid,
                triggered_mine: None,
                score_recorded: false,
            }),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.game.as_ref().map(|game| game.difficulty)
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.game.as_ref().map(|game| &game.grid)
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.game.as_ref().and_then(|game| game.triggered_mine)
    }

    pub fn choose_difficulty<S: MineSource>(
        &mut self,
        difficulty: Difficulty,
        source: S,
    ) -> Result<()> {
        self.check_status(SessionAction::ChooseDifficulty, SessionStatus::Selecting)?;

        let grid = RandomMinefieldGenerator::new(source).generate(difficulty.config())?;
        log::debug!("Started {} game", difficulty);

        *self = Self::playing(difficulty, grid);
        Ok(())
    }

    pub fn click(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        let game = self.active_game(SessionAction::Click)?;
        let revealed = reveal(&mut game.grid, coords)?;

        let status = match revealed {
            RevealOutcome::HitMine => {
                game.triggered_mine = Some(coords);
                SessionStatus::Lost
            }
            _ if revealed.has_update() && check_win(&game.grid, game.grid.mine_count()) => {
                SessionStatus::Won
            }
            _ => SessionStatus::Playing,
        };

        let ended = status.is_terminal().then(|| GameEnded {
            status,
            difficulty: game.difficulty,
            triggered_mine: game.triggered_mine,
        });
        if let Some(ended) = &ended {
            log::debug!("Game ended: {} on {}", ended.status, ended.difficulty);
        }
        self.status = status;

        Ok(ClickOutcome {
            status,
            was_mine_hit: matches!(revealed, RevealOutcome::HitMine),
            reveal: revealed,
            ended,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let game = self.active_game(SessionAction::ToggleFlag)?;
        let outcome = toggle_flag(&mut game.grid, coords)?;
        if outcome.has_update() {
            log::trace!("Flag toggled at {:?}, mines left: {}", coords, game.grid.mines_left());
        }
        Ok(outcome)
    }

    /// Drops the current board, whatever state the session is in.
    pub fn reset(&mut self) {
        log::debug!("Session reset from {}", self.status);
        *self = Self::new();
    }

    /// Produces the score entry of a won game, at most once per game.
    pub fn record_score(&mut self, name: impl Into<String>) -> Result<ScoreEntry> {
        self.check_status(SessionAction::RecordScore, SessionStatus::Won)?;
        let rejected = GameError::InvalidState {
            action: SessionAction::RecordScore,
            status: self.status,
        };

        let game = self.game.as_mut().ok_or(rejected)?;
        if game.score_recorded {
            log::warn!("Score for this game was already recorded");
            return Err(rejected);
        }
        game.score_recorded = true;

        Ok(ScoreEntry {
            name: name.into(),
            difficulty: game.difficulty,
        })
    }

    fn active_game(&mut self, action: SessionAction) -> Result<&mut ActiveGame> {
        self.check_status(action, SessionStatus::Playing)?;
        let status = self.status;
        self.game
            .as_mut()
            .ok_or(GameError::InvalidState { action, status })
    }

    fn check_status(&self, action: SessionAction, expected: SessionStatus) -> Result<()> {
        if self.status == expected {
            return Ok(());
        }
        log::warn!("Rejected attempt to {} while {}", action, self.status);
        Err(GameError::InvalidState {
            action,
            status: self.status,
        })
    }
}
