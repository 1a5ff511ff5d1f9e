//! One grid buffer plus its denormalized caches.
//!
//! A [`Board`](crate::Board) owns two of these: the live state and the backup used for
//! undo. Cells are stored flat in row-major order (`y * width + x`), row 0 first.

use thiserror::Error;

/// A cache entry that disagrees with the raw grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("column {x} height is cached as {cached} but the grid says {actual}")]
    ColumnHeight { x: usize, cached: usize, actual: usize },
    #[error("row {y} width is cached as {cached} but the grid says {actual}")]
    RowWidth { y: usize, cached: usize, actual: usize },
    #[error("max height is cached as {cached} but the grid says {actual}")]
    MaxHeight { cached: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    pub(crate) cells: Vec<bool>,
    /// Filled cells per row
    pub(crate) widths: Vec<usize>,
    /// One past the topmost filled cell per column
    pub(crate) heights: Vec<usize>,
    pub(crate) max_height: usize,
}

impl GridState {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![false; width * height],
            widths: vec![0; height],
            heights: vec![0; width],
            max_height: 0,
        }
    }

    /// Overwrite this buffer with `other` without reallocating
    pub fn copy_from(&mut self, other: &GridState) {
        self.cells.copy_from_slice(&other.cells);
        self.widths.copy_from_slice(&other.widths);
        self.heights.copy_from_slice(&other.heights);
        self.max_height = other.max_height;
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    fn board_width(&self) -> usize {
        self.heights.len()
    }

    /// Rebuild every cache from the raw cells and compare with the cached values.
    ///
    /// Reports the first mismatch: columns, then rows, then the max height.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let width = self.board_width();

        for (x, &cached) in self.heights.iter().enumerate() {
            let actual = self
                .cells
                .chunks_exact(width)
                .rposition(|row| row[x])
                .map_or(0, |y| y + 1);
            if actual != cached {
                return Err(InvariantViolation::ColumnHeight { x, cached, actual });
            }
        }

        for (y, row) in self.cells.chunks_exact(width).enumerate() {
            let actual = row.iter().filter(|&&c| c).count();
            let cached = self.widths[y];
            if actual != cached {
                return Err(InvariantViolation::RowWidth { y, cached, actual });
            }
        }

        let actual = self.heights.iter().copied().max().unwrap_or(0);
        if actual != self.max_height {
            return Err(InvariantViolation::MaxHeight {
                cached: self.max_height,
                actual,
            });
        }

        Ok(())
    }
}
