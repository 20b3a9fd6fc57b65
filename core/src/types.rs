use ndarray::Array2;
use smallvec::SmallVec;

/// Single coordinate axis used for board width, length, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional board coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// A cell together with its in-bounds neighbours, at most nine entries.
pub type CellSet = SmallVec<[Coord2; 9]>;

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

/// Whether `coords` lies on a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;

    /// `index` followed by its neighbours, clipped to the board.
    fn neighborhood(&self, index: Coord2) -> CellSet {
        let mut cells = CellSet::new();
        cells.push(index);
        cells.extend(self.iter_neighbors(index));
        cells
    }
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (x, y) = self.dim();
        let size = (
            Coord::try_from(x).unwrap_or(Coord::MAX),
            Coord::try_from(y).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(delta.0)?;
    let next_y = coords.1.checked_add_signed(delta.1)?;
    in_bounds((next_x, next_y), bounds).then_some((next_x, next_y))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: SmallVec<[Coord2; 8]> = NeighborIter::new((0, 0), (8, 8)).collect();
        assert_eq!(neighbors.as_slice(), &[(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn neighborhood_includes_center_first() {
        let grid: Array2<u8> = Array2::default((3, 3));
        let cells = grid.neighborhood((1, 1));
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], (1, 1));
    }

    #[test]
    fn far_edge_is_clipped() {
        let grid: Array2<u8> = Array2::default((4, 2));
        let cells = grid.neighborhood((3, 1));
        assert_eq!(cells.as_slice(), &[(3, 1), (2, 0), (3, 0), (2, 1)]);
    }
}
