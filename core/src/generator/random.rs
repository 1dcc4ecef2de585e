use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Seeded pseudo-random positions, the same seed always yields the same board.
#[derive(Clone, Debug)]
pub struct SeededMineSource {
    rng: SmallRng,
}

impl SeededMineSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineSource for SeededMineSource {
    fn pick(&mut self, bound: Coord) -> Coord {
        self.rng.random_range(0..bound)
    }
}

/// Purely random placement by rejection sampling: draw a row and a column, retry on an occupied cell.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator<S> {
    source: S,
}

impl<S: MineSource> RandomMinefieldGenerator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

impl<S: MineSource> MinefieldGenerator for RandomMinefieldGenerator<S> {
    fn generate(mut self, config: GameConfig) -> Result<Grid> {
        config.validate()?;

        let mut grid = Grid::empty(config.side);
        let mut draws: u32 = 0;

        while grid.mine_count() < config.mines {
            let row = self.source.pick(config.side);
            let col = self.source.pick(config.side);
            draws += 1;

            let coords = grid.validate_coords((row, col))?;
            if !grid.place_mine(coords) {
                log::trace!("Mine already at {:?}, drawing again", coords);
            }
        }

        grid.compute_neighbor_counts();
        log::debug!(
            "Generated {side}x{side} board with {} mines after {draws} draws",
            grid.mine_count(),
            side = config.side,
        );
        Ok(grid)
    }
}
