use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let mut seed = 0;
        group.bench_function(difficulty.name(), |b| {
            b.iter(|| {
                seed += 1;
                generate(config.side, config.mines, SeededMineSource::new(black_box(seed)))
            })
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    // a single mine in the corner leaves one zero region covering almost the whole board
    for side in [16, 64, 255] {
        let Ok(grid) = Grid::from_mine_coords(side, &[(side - 1, side - 1)]) else {
            continue;
        };
        group.bench_function(format!("{side}x{side}"), |b| {
            b.iter_batched(
                || grid.clone(),
                |mut grid| reveal(&mut grid, black_box((0, 0))),
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
