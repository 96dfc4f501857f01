use super::types::{Coord, Matrix};

/// Edge-preserving 2x magnification (scale2x / AdvMAME2x)
///
/// ```text
///  A B C
///  D E F  ->  E0 E1
///  G H I      E2 E3
/// ```
///
/// Each output cell is a copy of some input cell, so label and sentinel
/// values survive unchanged. Neighbours outside the matrix clamp to the edge.
pub fn scale2x<T: Copy + PartialEq>(src: &Matrix<T>) -> Matrix<T> {
    let (rows, cols) = src.shape();
    // Only called for in-range output cells, so rows and cols are non-zero
    let at = |row: isize, col: isize| -> T {
        let row = row.clamp(0, rows as isize - 1) as usize;
        let col = col.clamp(0, cols as isize - 1) as usize;
        src[Coord::new(row, col)]
    };

    Matrix::from_fn(rows * 2, cols * 2, |out| {
        let (r, c) = ((out.row / 2) as isize, (out.col / 2) as isize);
        let b = at(r - 1, c);
        let d = at(r, c - 1);
        let e = at(r, c);
        let f = at(r, c + 1);
        let h = at(r + 1, c);

        if b == h || d == f {
            return e;
        }
        match (out.row % 2, out.col % 2) {
            (0, 0) if d == b => d,
            (0, 1) if b == f => f,
            (1, 0) if d == h => d,
            (1, 1) if h == f => f,
            _ => e,
        }
    })
}

/// Apply [`scale2x`] `times` times
pub fn scale2x_n<T: Copy + PartialEq>(src: Matrix<T>, times: u32) -> Matrix<T> {
    (0..times).fold(src, |m, _| scale2x(&m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::types::MaskState;

    #[test]
    fn test_uniform_matrix_stays_uniform() {
        let m = Matrix::filled(3, 5, MaskState::Interior);
        let up = scale2x(&m);
        assert_eq!(up.shape(), (6, 10));
        assert!(up.as_slice().iter().all(|&s| s == MaskState::Interior));
    }

    #[test]
    fn test_twice_is_four_by_four_expansion_of_uniform() {
        let m = Matrix::filled(2, 3, 9u32);
        let up = scale2x_n(m, 2);
        assert_eq!(up, Matrix::filled(8, 12, 9u32));
    }

    #[test]
    fn test_zero_times_is_identity() {
        let m = Matrix::from_fn(3, 3, |c| (c.row * 3 + c.col) as u32);
        assert_eq!(scale2x_n(m.clone(), 0), m);
    }

    #[test]
    fn test_diagonal_edge_is_smoothed_not_blurred() {
        // 0 1
        // 1 1
        let m = Matrix::from_vec(2, 2, vec![0u32, 1, 1, 1]).expect("Should build matrix");
        let up = scale2x(&m);
        // Top-left source cell: B=0 (clamped), D=0, F=1, H=1 -> E3 takes F
        assert_eq!(up[Coord::new(0, 0)], 0);
        assert_eq!(up[Coord::new(0, 1)], 0);
        assert_eq!(up[Coord::new(1, 0)], 0);
        assert_eq!(up[Coord::new(1, 1)], 1);
        assert!(up.as_slice().iter().all(|&v| v == 0 || v == 1));
    }

    #[test]
    fn test_isolated_pixel_expands_to_block() {
        let mut m = Matrix::filled(3, 3, 0u32);
        m.set(Coord::new(1, 1), 1);
        let up = scale2x(&m);
        for (at, &v) in up.iter_cells() {
            let inside = (2..4).contains(&at.row) && (2..4).contains(&at.col);
            assert_eq!(v, u32::from(inside), "at {at:?}");
        }
    }
}
