use super::types::{Coord, Matrix};

/// Paint a circular ring pattern of `radius` around every border cell
///
/// The structuring element spans offsets `-radius..radius` on both axes and
/// keeps the cells whose Euclidean distance from the centre is at least
/// `radius`. Cells falling outside the matrix are skipped.
pub fn grow_border<T: Clone>(mut mask: Matrix<T>, border: &[Coord], radius: u32, value: T) -> Matrix<T> {
    let pattern = ring_offsets(radius);
    let (rows, cols) = (mask.rows() as i64, mask.cols() as i64);

    for p in border {
        for &(dr, dc) in &pattern {
            let row = p.row as i64 + dr;
            let col = p.col as i64 + dc;
            if (0..rows).contains(&row) && (0..cols).contains(&col) {
                mask.set(Coord::new(row as usize, col as usize), value.clone());
            }
        }
    }
    mask
}

fn ring_offsets(radius: u32) -> Vec<(i64, i64)> {
    let r = i64::from(radius);
    let min_sq = u64::from(radius).pow(2);
    let mut offsets = Vec::new();
    for dr in -r..r {
        for dc in -r..r {
            if dr.unsigned_abs().pow(2) + dc.unsigned_abs().pow(2) >= min_sq {
                offsets.push((dr, dc));
            }
        }
    }
    offsets
}
