use serde::{Deserialize, Serialize};

/// The shape of the area an ant senses around itself.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborhoodKind {
    /// Cells within the given Manhattan distance (4 cells at radius 1).
    #[default]
    VonNeumann,
    /// Cells within the given Chebyshev distance (8 cells at radius 1).
    Moore,
}

/// A fixed set of relative `(row, col)` offsets that define the cells near a given cell.
///
/// Offsets are ordered ring by ring, each ring clockwise. At radius 1 a Von Neumann
/// neighborhood is North, East, South, West.
#[derive(Clone, Debug, PartialEq)]
pub struct Neighborhood {
    offsets: Vec<(isize, isize)>,
}

impl Neighborhood {
    pub fn new(kind: NeighborhoodKind, radius: usize) -> Neighborhood {
        match kind {
            NeighborhoodKind::VonNeumann => Neighborhood::von_neumann(radius),
            NeighborhoodKind::Moore => Neighborhood::moore(radius),
        }
    }

    pub fn von_neumann(radius: usize) -> Neighborhood {
        let mut offsets = Vec::new();

        for d in 1..=radius as isize {
            // North to East, East to South, South to West, West to North
            offsets.extend((0..d).map(|k| (-d + k, k)));
            offsets.extend((0..d).map(|k| (k, d - k)));
            offsets.extend((0..d).map(|k| (d - k, -k)));
            offsets.extend((0..d).map(|k| (-k, -d + k)));
        }

        Neighborhood { offsets }
    }

    pub fn moore(radius: usize) -> Neighborhood {
        let mut offsets = Vec::new();

        for d in 1..=radius as isize {
            // Top edge, right edge, bottom edge, left edge, starting at the top-left corner
            offsets.extend((-d..d).map(|col| (-d, col)));
            offsets.extend((-d..d).map(|row| (row, d)));
            offsets.extend((-d..d).rev().map(|col| (d, col + 1)));
            offsets.extend((-d..d).rev().map(|row| (row + 1, -d)));
        }

        Neighborhood { offsets }
    }

    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    /// The absolute coordinates around `(row, col)` that lie inside a grid of `size` cells per side.
    pub fn neighbors(&self, row: usize, col: usize, size: usize) -> Vec<(usize, usize)> {
        self.offsets
            .iter()
            .filter_map(|&(d_row, d_col)| {
                let n_row = row.checked_add_signed(d_row)?;
                let n_col = col.checked_add_signed(d_col)?;

                if n_row >= size || n_col >= size {
                    return None;
                }

                Some((n_row, n_col))
            })
            .collect()
    }

    /// Neighbor lists for every cell of a grid, indexed row-major.
    pub fn table(&self, size: usize) -> Vec<Vec<(usize, usize)>> {
        (0..size * size)
            .map(|index| self.neighbors(index / size, index % size, size))
            .collect()
    }
}
