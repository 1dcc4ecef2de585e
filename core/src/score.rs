use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::Difficulty;

/// A player name recorded against the difficulty of a won game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub difficulty: Difficulty,
}

/// Append-only list of wins, oldest first. Lives only as long as its owner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ScoreEntry) {
        log::debug!("Recorded win for {:?} on {}", entry.name, entry.difficulty);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &ScoreEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.difficulty == difficulty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn entry(name: &str, difficulty: Difficulty) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            difficulty,
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let mut board = Scoreboard::new();
        assert!(board.is_empty());

        board.push(entry("ada", Difficulty::Hard));
        board.push(entry("bob", Difficulty::Easy));
        board.push(entry("ada", Difficulty::Easy));

        assert_eq!(board.len(), 3);
        assert_eq!(board.entries()[0], entry("ada", Difficulty::Hard));
        let easy: Vec<_> = board
            .for_difficulty(Difficulty::Easy)
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(easy, ["bob", "ada"]);
    }
}
