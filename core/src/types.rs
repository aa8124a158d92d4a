/// Single coordinate axis used for the board side length and for row/column positions.
pub type Coord = u8;

/// Count type used for mine counts, cell counts and move budgets.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, both 0-indexed.
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

/// `ceil(count / divisor)` for a positive, finite divisor, without relying on `std` float ops.
pub fn ceil_div(count: CellCount, divisor: f64) -> CellCount {
    let exact = f64::from(count) / divisor;
    let truncated = exact as CellCount;
    if f64::from(truncated) < exact {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}

/// Row and column offsets of the eight neighbours, read row by row: the row above, the two
/// sides, then the row below.
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The up to eight neighbours of `center` on a `size` board, clipped at the edges.
pub fn neighbors(center: Coord2, size: Coord2) -> impl Iterator<Item = Coord2> {
    let (row, col) = center;
    let (rows, cols) = size;
    NEIGHBOR_OFFSETS
        .into_iter()
        .filter_map(move |(d_row, d_col)| {
            let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
            let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
            Some((row, col))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = neighbors((0, 0), (4, 4)).collect();

        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(neighbors((2, 2), (5, 5)).count(), 8);
    }

    #[test]
    fn edge_is_clipped() {
        let neighbors: Vec<_> = neighbors((3, 1), (4, 4)).collect();

        assert_eq!(neighbors.len(), 5);
        assert!(neighbors.iter().all(|&(row, col)| row < 4 && col < 4));
    }

    #[test]
    fn ceil_div_rounds_up_fractional_capacity() {
        assert_eq!(ceil_div(14, 1.0), 14);
        assert_eq!(ceil_div(26, 1.5), 18);
        assert_eq!(ceil_div(38, 2.0), 19);
        assert_eq!(ceil_div(54, 2.5), 22);
    }
}
