use alloc::vec::Vec;

use crate::*;

/// Opens a cell, flooding outwards through cells without adjacent mines.
///
/// Revealed and flagged cells are left alone. A mine opens only itself and is reported as
/// [`RevealOutcome::HitMine`]; deciding that the game is over is up to the caller.
pub fn reveal(grid: &mut Grid, coords: Coord2) -> Result<RevealOutcome> {
    let coords = grid.validate_coords(coords)?;
    let cell = grid[coords];

    if !cell.is_openable() {
        return Ok(RevealOutcome::NoChange);
    }

    grid.mark_revealed(coords);

    if cell.is_mine() {
        log::debug!("Revealed mine at {:?}", coords);
        return Ok(RevealOutcome::HitMine);
    }

    log::debug!(
        "Revealed cell at {:?}, neighbor mines: {}",
        coords,
        cell.neighbor_mines()
    );
    if cell.neighbor_mines() == 0 {
        flood_from(grid, coords);
    }

    Ok(RevealOutcome::Revealed)
}

/// Work-list flood fill over the zero region around an already revealed zero cell.
///
/// Every cell goes from hidden to revealed at most once, so the stack never holds more than eight
/// entries per revealed cell.
fn flood_from(grid: &mut Grid, origin: Coord2) {
    let mut to_visit: Vec<Coord2> = grid
        .iter_neighbors(origin)
        .filter(|&pos| grid[pos].is_openable())
        .collect();
    log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", origin, to_visit);

    while let Some(visit_coords) = to_visit.pop() {
        let cell = grid[visit_coords];

        // reached twice through different zero cells, or protected by a flag
        if !cell.is_openable() {
            continue;
        }

        grid.mark_revealed(visit_coords);
        log::trace!(
            "Flood revealed cell at {:?}, neighbor mines: {}",
            visit_coords,
            cell.neighbor_mines()
        );

        // neighbors of a zero cell are never mines
        if cell.neighbor_mines() == 0 {
            to_visit.extend(
                grid.iter_neighbors(visit_coords)
                    .filter(|&pos| grid[pos].is_openable()),
            );
        }
    }
}

/// Flips the flag on a hidden cell, revealed cells are left unchanged.
pub fn toggle_flag(grid: &mut Grid, coords: Coord2) -> Result<FlagOutcome> {
    let coords = grid.validate_coords(coords)?;
    let cell = grid[coords];

    if cell.is_revealed() {
        return Ok(FlagOutcome::NoChange);
    }

    grid.set_flag(coords, !cell.is_flagged());
    Ok(FlagOutcome::Changed)
}

/// True once every cell except the `mine_count` mined ones has been revealed.
pub fn check_win(grid: &Grid, mine_count: CellCount) -> bool {
    grid.total_cells()
        .checked_sub(mine_count)
        .is_some_and(|safe_cells| grid.revealed_count() == safe_cells)
}
