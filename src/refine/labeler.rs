use super::types::{Coord, LabelMatrix, Matrix};
use crate::error::{Result, StickerError};

/// Array-backed disjoint-set forest
///
/// Handles are indices into `parent`. Slot 0 is reserved for background, so
/// `parent.len() - 1` is both the number of sets made so far and the last
/// label handed out.
#[derive(Debug, Clone)]
struct DisjointSet {
    parent: Vec<u32>,
}

impl DisjointSet {
    fn new() -> Self {
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression
        while self.parent[x as usize] != root {
            let next = self.parent[x as usize];
            self.parent[x as usize] = root;
            x = next;
        }
        root
    }

    /// Merge the sets of `x` and `y`; the root of `y` represents the union
    fn union(&mut self, x: u32, y: u32) -> u32 {
        let root = self.find(y);
        let other = self.find(x);
        self.parent[other as usize] = root;
        root
    }

    fn len(&self) -> usize {
        self.parent.len() - 1
    }
}

/// Hoshen-Kopelman connected component labeler (4-connectivity)
///
/// Labelling happens on construction. Afterwards the matrix holds dense labels
/// `1..=K` in first-encountered scan order and `sizes[k]` is the pixel count
/// of label `k` (`sizes[0]` counts background).
#[derive(Debug, Clone)]
pub struct ComponentLabeler {
    labels: LabelMatrix,
    sizes: Vec<usize>,
}

impl ComponentLabeler {
    /// Label a matrix where `0` marks background and any other value is foreground
    pub fn new(matrix: &LabelMatrix) -> Self {
        let _span = tracing::debug_span!("label_components").entered();

        let (rows, cols) = matrix.shape();
        let mut labels = matrix.map(|&v| u32::from(v != 0));
        let mut sets = DisjointSet::new();

        for row in 0..rows {
            for col in 0..cols {
                let at = Coord::new(row, col);
                if labels[at] == 0 {
                    continue;
                }

                let up = if row == 0 { 0 } else { labels[Coord::new(row - 1, col)] };
                let left = if col == 0 { 0 } else { labels[Coord::new(row, col - 1)] };

                let label = match (up, left) {
                    (0, 0) => sets.make_set(),
                    (0, l) => l,
                    (u, 0) => u,
                    (u, l) => sets.union(u, l),
                };
                labels.set(at, label);
            }
        }

        // Resolve to roots and renumber densely
        let mut dense = vec![0u32; sets.len() + 1];
        let mut next = 0u32;
        let mut sizes = vec![0usize];
        for cell in labels.data_mut() {
            if *cell == 0 {
                sizes[0] += 1;
                continue;
            }
            let root = sets.find(*cell) as usize;
            if dense[root] == 0 {
                next += 1;
                dense[root] = next;
                sizes.push(0);
            }
            *cell = dense[root];
            sizes[*cell as usize] += 1;
        }

        tracing::debug!(
            "Labelled {} components from {} provisional labels",
            next,
            sets.len()
        );

        Self { labels, sizes }
    }

    /// Relabelled matrix
    pub fn labels(&self) -> &LabelMatrix {
        &self.labels
    }

    /// Number of components found
    pub fn component_count(&self) -> usize {
        self.sizes.len() - 1
    }

    /// Pixel count of `label`, or `None` when no such label exists
    pub fn component_size(&self, label: u32) -> Option<usize> {
        self.sizes.get(label as usize).copied()
    }

    /// Label and pixel count of the largest component, lowest label on ties
    pub fn largest_component(&self) -> Option<(u32, usize)> {
        let mut best: Option<(u32, usize)> = None;
        for (label, &size) in self.sizes.iter().enumerate().skip(1) {
            if best.map_or(true, |(_, s)| size > s) {
                best = Some((label as u32, size));
            }
        }
        best
    }

    /// Keep only the largest component
    ///
    /// Cells of the largest component become `foreground`, every other cell
    /// becomes `background`. Fails with [`StickerError::SubjectTooSmall`] when
    /// that component covers less than `tolerance_percent` of the matrix.
    pub fn filter_to_largest<T: Clone>(
        &self,
        foreground: T,
        background: T,
        tolerance_percent: u32,
    ) -> Result<Matrix<T>> {
        if tolerance_percent > 100 {
            return Err(StickerError::ToleranceOutOfRange(tolerance_percent));
        }

        let area = self.labels.area();
        let (label, size) = self.largest_component().unwrap_or((0, 0));
        if label == 0 || (size as u64) * 100 < u64::from(tolerance_percent) * area as u64 {
            tracing::debug!(
                "Largest component {} has {} of {} pixels, below {}%",
                label,
                size,
                area,
                tolerance_percent
            );
            return Err(StickerError::SubjectTooSmall {
                size,
                area,
                tolerance: tolerance_percent,
            });
        }

        Ok(self.labels.map(|&l| {
            if l == label {
                foreground.clone()
            } else {
                background.clone()
            }
        }))
    }
}
