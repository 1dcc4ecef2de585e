/// Single coordinate axis used for the board side length and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays on a `side × side` board.
fn apply_delta(coords: Coord2, delta: (i8, i8), side: Coord) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row)?;
    if next_row >= side {
        return None;
    }

    let next_col = col.checked_add_signed(d_col)?;
    if next_col >= side {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the in-bounds Moore neighborhood of a cell, clipped at the edges.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    side: Coord,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, side: Coord) -> Self {
        Self {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, *delta, self.side) {
                return Some(next_item);
            }
        }
    }
}
