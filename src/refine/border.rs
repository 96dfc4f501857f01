use std::collections::{HashMap, VecDeque};

use super::types::{Coord, Matrix};
use crate::error::{Result, StickerError};

/// Foreground cells that sit on the matrix edge or next to background
///
/// Returned in row-major scan order; consecutive elements are not
/// necessarily adjacent.
pub fn find_border<T: PartialEq>(mask: &Matrix<T>, background: &T) -> Vec<Coord> {
    let (rows, cols) = mask.shape();
    let is_bg = |row: usize, col: usize| &mask[Coord::new(row, col)] == background;

    let mut border = Vec::new();
    for (at, value) in mask.iter_cells() {
        if value == background {
            continue;
        }
        let (r, c) = (at.row, at.col);
        let on_edge = r == 0 || c == 0 || r + 1 == rows || c + 1 == cols;
        if on_edge || is_bg(r - 1, c) || is_bg(r, c - 1) || is_bg(r + 1, c) || is_bg(r, c + 1) {
            border.push(at);
        }
    }
    border
}

/// Keep the largest 8-connected piece of a border
///
/// Pieces are discovered in input order; on equal sizes the first one wins.
pub fn refine_border(border: &[Coord]) -> Result<Vec<Coord>> {
    if border.is_empty() {
        return Err(StickerError::EmptyBorder);
    }

    let index: HashMap<Coord, usize> = border.iter().enumerate().map(|(i, &c)| (c, i)).collect();
    let mut visited = vec![false; border.len()];
    let mut queue = VecDeque::new();
    let mut best: Vec<Coord> = Vec::new();
    let mut pieces = 0usize;

    for start in 0..border.len() {
        if visited[start] {
            continue;
        }
        pieces += 1;
        visited[start] = true;
        queue.push_back(start);

        let mut piece = Vec::new();
        while let Some(i) = queue.pop_front() {
            let p = border[i];
            piece.push(p);
            for n in neighbours(p) {
                if let Some(&j) = index.get(&n) {
                    if !visited[j] {
                        visited[j] = true;
                        queue.push_back(j);
                    }
                }
            }
        }

        if piece.len() > best.len() {
            best = piece;
        }
    }

    tracing::debug!(
        "Border split into {} pieces, kept {} of {} pixels",
        pieces,
        best.len(),
        border.len()
    );
    Ok(best)
}

/// The up to eight cells that touch `p` and have non-negative coordinates
fn neighbours(p: Coord) -> impl Iterator<Item = Coord> {
    let rows = p.row.saturating_sub(1)..=p.row + 1;
    rows.flat_map(move |row| (p.col.saturating_sub(1)..=p.col + 1).map(move |col| Coord::new(row, col)))
        .filter(move |n| p.touches(n))
}
