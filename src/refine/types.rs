use crate::error::{Result, StickerError};

/// A cell position inside a [`Matrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// True when `other` is one of the eight cells surrounding `self`
    pub fn touches(&self, other: &Coord) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }
}

/// Logical state of a mask cell
///
/// Kept separate from real colour values so that compositing can never
/// confuse a photo pixel with a mask sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskState {
    #[default]
    Background,
    Interior,
    Border,
}

/// Dense row-major 2D matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Integer matrix where `0` is background and positive values are labels
pub type LabelMatrix = Matrix<u32>;

/// Tri-state mask produced by the refinement stages
pub type MaskMatrix = Matrix<MaskState>;

impl<T: Clone> Matrix<T> {
    /// Matrix of the given shape with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Matrix<T> {
    /// Wrap a row-major buffer; its length must equal `rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(StickerError::DimensionMismatch {
                expected: (rows, cols),
                actual: (data.len(), 1),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(Coord) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(Coord::new(row, col)));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn area(&self) -> usize {
        self.data.len()
    }

    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    pub fn get(&self, at: Coord) -> Option<&T> {
        if self.contains(at) {
            Some(&self.data[at.row * self.cols + at.col])
        } else {
            None
        }
    }

    /// Panics if `at` is out of bounds
    pub fn set(&mut self, at: Coord, value: T) {
        assert!(self.contains(at), "{at:?} outside {}x{}", self.rows, self.cols);
        self.data[at.row * self.cols + at.col] = value;
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Cells in row-major order together with their coordinates
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        let cols = self.cols.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (Coord::new(i / cols, i % cols), v))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    pub(crate) fn index_of(&self, at: Coord) -> usize {
        at.row * self.cols + at.col
    }

    pub(crate) fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> std::ops::Index<Coord> for Matrix<T> {
    type Output = T;

    fn index(&self, at: Coord) -> &T {
        &self.data[self.index_of(at)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_is_eight_connected_and_irreflexive() {
        let c = Coord::new(5, 5);
        assert!(c.touches(&Coord::new(4, 4)));
        assert!(c.touches(&Coord::new(6, 5)));
        assert!(!c.touches(&Coord::new(5, 7)));
        assert!(!c.touches(&c));
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        assert!(Matrix::from_vec(2, 2, vec![0u32; 3]).is_err());
        let m = Matrix::from_vec(2, 3, vec![1u32, 2, 3, 4, 5, 6]).expect("Should build matrix");
        assert_eq!(m[Coord::new(1, 0)], 4);
        assert_eq!(m.get(Coord::new(2, 0)), None);
    }

    #[test]
    fn test_iter_cells_is_row_major() {
        let m = Matrix::from_fn(2, 2, |c| c.row * 10 + c.col);
        let cells: Vec<_> = m.iter_cells().map(|(c, v)| (c.row, c.col, *v)).collect();
        assert_eq!(cells, vec![(0, 0, 0), (0, 1, 1), (1, 0, 10), (1, 1, 11)]);
    }
}
