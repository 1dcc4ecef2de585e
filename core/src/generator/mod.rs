use crate::*;
pub use random::*;

mod random;

/// Source of uniformly distributed board positions used to place mines.
pub trait MineSource {
    /// Returns a value in `0..bound`, `bound` is never zero.
    fn pick(&mut self, bound: Coord) -> Coord;
}

impl<S: MineSource + ?Sized> MineSource for &mut S {
    fn pick(&mut self, bound: Coord) -> Coord {
        (**self).pick(bound)
    }
}

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid>;
}

/// Builds a `side × side` board holding exactly `mine_count` randomly placed mines.
pub fn generate<S: MineSource>(side: Coord, mine_count: CellCount, source: S) -> Result<Grid> {
    RandomMinefieldGenerator::new(source).generate(GameConfig::new(side, mine_count)?)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use alloc::vec::Vec;

    /// Replays a fixed list of positions, one coordinate per pick.
    pub(crate) struct ScriptedSource {
        picks: Vec<Coord>,
        next: usize,
    }

    impl ScriptedSource {
        pub(crate) fn from_positions(positions: &[Coord2]) -> Self {
            Self {
                picks: positions.iter().flat_map(|&(row, col)| [row, col]).collect(),
                next: 0,
            }
        }
    }

    impl MineSource for ScriptedSource {
        fn pick(&mut self, bound: Coord) -> Coord {
            let value = *self.picks.get(self.next).expect("script exhausted");
            assert!(value < bound, "scripted pick {value} out of 0..{bound}");
            self.next += 1;
            value
        }
    }
}
