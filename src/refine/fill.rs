use std::collections::{HashSet, VecDeque};

use super::types::{Coord, Matrix};
use crate::error::{Result, StickerError};

/// 4-connected flood fill from `seed`
///
/// Every reachable cell that is neither `boundary` nor already `fill` is set
/// to `fill`. A seed sitting on a boundary cell leaves the matrix unchanged.
pub fn flood_fill<T: Clone + PartialEq>(
    mut matrix: Matrix<T>,
    seed: Coord,
    fill: T,
    boundary: T,
) -> Result<Matrix<T>> {
    if !matrix.contains(seed) {
        return Err(StickerError::SeedOutOfBounds {
            row: seed.row,
            col: seed.col,
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    if matrix[seed] == boundary {
        return Ok(matrix);
    }

    let (rows, cols) = matrix.shape();
    let mut painted = 0usize;
    let mut queue = VecDeque::new();
    if matrix[seed] != fill {
        painted += 1;
    }
    matrix.set(seed, fill.clone());
    queue.push_back(seed);

    while let Some(p) = queue.pop_front() {
        let up = (p.row > 0).then(|| Coord::new(p.row - 1, p.col));
        let left = (p.col > 0).then(|| Coord::new(p.row, p.col - 1));
        let down = (p.row + 1 < rows).then(|| Coord::new(p.row + 1, p.col));
        let right = (p.col + 1 < cols).then(|| Coord::new(p.row, p.col + 1));

        for n in [up, left, down, right].into_iter().flatten() {
            let value = &matrix[n];
            if *value != boundary && *value != fill {
                matrix.set(n, fill.clone());
                painted += 1;
                queue.push_back(n);
            }
        }
    }

    tracing::debug!("Flood fill painted {} cells", painted);
    Ok(matrix)
}

/// Top-left search window for [`find_interior_seed`], in cells
///
/// `None` on either axis means the whole extent of the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedWindow {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
}

impl SeedWindow {
    pub const WHOLE: SeedWindow = SeedWindow {
        rows: None,
        cols: None,
    };

    pub fn square(side: usize) -> Self {
        Self {
            rows: Some(side),
            cols: Some(side),
        }
    }
}

/// First cell in row-major order, inside `window`, that is `foreground` in
/// `silhouette` and not part of `border`
pub fn find_interior_seed<T: PartialEq>(
    silhouette: &Matrix<T>,
    foreground: &T,
    border: &[Coord],
    window: SeedWindow,
) -> Option<Coord> {
    let rows = window.rows.map_or(silhouette.rows(), |r| r.min(silhouette.rows()));
    let cols = window.cols.map_or(silhouette.cols(), |c| c.min(silhouette.cols()));
    let on_border: HashSet<Coord> = border.iter().copied().collect();

    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| Coord::new(row, col)))
        .find(|at| &silhouette[*at] == foreground && !on_border.contains(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refine::types::MaskState;

    fn ring(side: usize) -> Matrix<MaskState> {
        Matrix::from_fn(side, side, |c| {
            if c.row == 0 || c.col == 0 || c.row == side - 1 || c.col == side - 1 {
                MaskState::Border
            } else {
                MaskState::Background
            }
        })
    }

    #[test]
    fn test_fill_stops_at_boundary() {
        let mut m = Matrix::filled(7, 7, MaskState::Background);
        for i in 1..6 {
            m.set(Coord::new(1, i), MaskState::Border);
            m.set(Coord::new(5, i), MaskState::Border);
            m.set(Coord::new(i, 1), MaskState::Border);
            m.set(Coord::new(i, 5), MaskState::Border);
        }
        let filled = flood_fill(m, Coord::new(3, 3), MaskState::Interior, MaskState::Border)
            .expect("Should fill");
        for (at, state) in filled.iter_cells() {
            let inside = (2..5).contains(&at.row) && (2..5).contains(&at.col);
            if inside {
                assert_eq!(*state, MaskState::Interior, "at {at:?}");
            } else {
                assert_ne!(*state, MaskState::Interior, "at {at:?}");
            }
        }
    }

    #[test]
    fn test_ring_with_interior_seed_fills_solid() {
        let filled = flood_fill(ring(6), Coord::new(2, 3), MaskState::Interior, MaskState::Border)
            .expect("Should fill");
        assert!(filled.as_slice().iter().all(|&s| s != MaskState::Background));
        assert_eq!(
            filled.as_slice().iter().filter(|&&s| s == MaskState::Interior).count(),
            16
        );
    }

    #[test]
    fn test_fill_is_idempotent() {
        let once = flood_fill(ring(6), Coord::new(2, 2), MaskState::Interior, MaskState::Border)
            .expect("Should fill");
        let twice = flood_fill(once.clone(), Coord::new(3, 3), MaskState::Interior, MaskState::Border)
            .expect("Should fill");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fill_from_boundary_seed_is_noop() {
        let m = ring(5);
        let filled = flood_fill(m.clone(), Coord::new(0, 0), MaskState::Interior, MaskState::Border)
            .expect("Should fill");
        assert_eq!(filled, m);
    }

    #[test]
    fn test_seed_outside_matrix_is_rejected() {
        let m = ring(4);
        assert!(matches!(
            flood_fill(m, Coord::new(4, 0), MaskState::Interior, MaskState::Border),
            Err(StickerError::SeedOutOfBounds { row: 4, col: 0, .. })
        ));
    }

    #[test]
    fn test_same_fill_and_boundary_value() {
        let m = Matrix::from_fn(5, 5, |c| u32::from(c.row == 0 || c.row == 4 || c.col == 0 || c.col == 4));
        let filled = flood_fill(m, Coord::new(2, 2), 1, 1).expect("Should fill");
        assert!(filled.as_slice().iter().all(|&v| v == 1));
    }

    #[test]
    fn test_seed_skips_border_cells() {
        let silhouette = Matrix::filled(4, 4, MaskState::Interior);
        let border = vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2), Coord::new(0, 3), Coord::new(1, 0)];
        let seed = find_interior_seed(&silhouette, &MaskState::Interior, &border, SeedWindow::WHOLE);
        assert_eq!(seed, Some(Coord::new(1, 1)));
    }

    #[test]
    fn test_seed_search_respects_window() {
        let mut silhouette = Matrix::filled(8, 8, MaskState::Background);
        silhouette.set(Coord::new(6, 6), MaskState::Interior);
        assert_eq!(
            find_interior_seed(&silhouette, &MaskState::Interior, &[], SeedWindow::square(4)),
            None
        );
        assert_eq!(
            find_interior_seed(&silhouette, &MaskState::Interior, &[], SeedWindow::WHOLE),
            Some(Coord::new(6, 6))
        );
    }

    #[test]
    fn test_no_seed_when_everything_is_border() {
        let silhouette = Matrix::filled(2, 2, MaskState::Interior);
        let border: Vec<Coord> = silhouette.iter_cells().map(|(c, _)| c).collect();
        assert_eq!(
            find_interior_seed(&silhouette, &MaskState::Interior, &border, SeedWindow::WHOLE),
            None
        );
    }
}
