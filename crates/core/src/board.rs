//! Board module - the placement state machine
//!
//! The board is a fixed `width x height` grid of filled/empty cells. Coordinates are
//! `(x, y)` with `x` in `0..width` left to right and `y` in `0..height` bottom to top.
//!
//! Alongside the raw cells the board keeps three caches (row widths, column heights and
//! the max height) and a commit state. A mutation starting from `Committed` first backs
//! up the whole grid; `undo()` brings the backup back by flipping which of the two
//! buffers is live, so it costs O(1).
//!
//! Required call discipline: `place()` → optional `clear_rows()` → `commit()` or `undo()`.
//! Calling `place()` again before committing or undoing panics.

use std::fmt;

use crate::piece::Piece;
use crate::snapshot::{GridState, InvariantViolation};
use crate::types::{
    CommitState, PlaceResult, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, EMPTY_GLYPH,
    FILLED_GLYPH, FLOOR_GLYPH, WALL_GLYPH,
};

#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    /// Live and backup buffers; `live` selects the current one
    buffers: [GridState; 2],
    live: usize,
    state: CommitState,
    sanity_checks: bool,
}

impl Board {
    /// Create an empty, committed board.
    ///
    /// Consistency checks are on in debug builds and off in release builds.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            height,
            buffers: [GridState::new(width, height), GridState::new(width, height)],
            live: 0,
            state: CommitState::Committed,
            sanity_checks: cfg!(debug_assertions),
        }
    }

    pub fn with_sanity_checks(mut self, enabled: bool) -> Self {
        self.sanity_checks = enabled;
        self
    }

    pub fn set_sanity_checks(&mut self, enabled: bool) {
        self.sanity_checks = enabled;
    }

    pub fn sanity_checks(&self) -> bool {
        self.sanity_checks
    }

    #[inline(always)]
    fn grid(&self) -> &GridState {
        &self.buffers[self.live]
    }

    #[inline(always)]
    fn grid_mut(&mut self) -> &mut GridState {
        &mut self.buffers[self.live]
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of filled cells in row `y`
    pub fn row_width(&self, y: usize) -> usize {
        self.grid().widths[y]
    }

    /// One past the topmost filled cell of column `x`, 0 when empty
    pub fn column_height(&self, x: usize) -> usize {
        self.grid().heights[x]
    }

    pub fn max_height(&self) -> usize {
        self.grid().max_height
    }

    /// All column heights, left to right
    pub fn heights(&self) -> &[usize] {
        &self.grid().heights
    }

    /// All row widths, bottom to top
    pub fn widths(&self) -> &[usize] {
        &self.grid().widths
    }

    /// Is `(x, y)` filled? Anything outside the board counts as filled.
    pub fn cell(&self, x: i32, y: i32) -> bool {
        if self.is_out_of_bounds(x, y) {
            return true;
        }
        self.grid().cells[self.index(x as usize, y as usize)]
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    /// Do the columns `x..x + piece.width()` all lie on the board?
    pub fn columns_fit(&self, piece: &Piece, x: i32) -> bool {
        x >= 0
            && (x as usize) < self.width
            && x as i64 + piece.width() as i64 <= self.width as i64
    }

    /// Live grid buffer, for diagnostics
    pub fn grid_state(&self) -> &GridState {
        self.grid()
    }

    pub fn commit_state(&self) -> CommitState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        self.state == CommitState::Committed
    }

    /// The y at which `piece` comes to rest when dropped at column `x`.
    ///
    /// Looks only at the columns `x..x + piece.width()`: the column where
    /// `height - skirt` is largest decides, and the result is `height + 1 - skirt` there.
    ///
    /// # Panics
    ///
    /// Panics if the piece's columns do not all lie on the board.
    pub fn drop_height(&self, piece: &Piece, x: i32) -> i32 {
        assert!(
            self.columns_fit(piece, x),
            "drop column {x} puts a {}-wide piece off the board",
            piece.width()
        );
        let heights = &self.grid().heights;
        let skirt = piece.skirt();
        let x = x as usize;
        let gap = |i: usize| heights[x + i] as i64 - skirt[i] as i64;

        let mut best = 0;
        for i in 1..skirt.len() {
            if gap(i) > gap(best) {
                best = i;
            }
        }
        heights[x + best] as i32 + 1 - skirt.get(best).copied().unwrap_or(0)
    }

    /// Add `piece` with its origin at `(x, y)`.
    ///
    /// Every body cell is processed even after an error, so a failed placement may leave
    /// a partial piece behind; `undo()` is the only way back. Out-of-bounds outranks a
    /// collision, and either outranks a filled row.
    ///
    /// # Panics
    ///
    /// Panics if the board is not committed.
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) -> PlaceResult {
        if !self.is_committed() {
            panic!("place() on an uncommitted board: call commit() or undo() first\n{self}");
        }
        self.backup();
        self.state = CommitState::Uncommitted;

        let width = self.width;
        let mut result = PlaceResult::Ok;
        let mut row_filled = false;

        for p in piece.body() {
            let (Some(px), Some(py)) = (x.checked_add(p.x), y.checked_add(p.y)) else {
                result = result.worst(PlaceResult::OutBounds);
                continue;
            };
            if self.is_out_of_bounds(px, py) {
                result = result.worst(PlaceResult::OutBounds);
                continue;
            }
            let (px, py) = (px as usize, py as usize);
            let idx = self.index(px, py);
            let grid = self.grid_mut();
            if grid.cells[idx] {
                result = result.worst(PlaceResult::Bad);
                continue;
            }

            grid.cells[idx] = true;
            grid.widths[py] += 1;
            if grid.widths[py] == width {
                row_filled = true;
            }
            grid.heights[px] = grid.heights[px].max(py + 1);
            grid.max_height = grid.max_height.max(grid.heights[px]);
        }

        if row_filled && result == PlaceResult::Ok {
            result = PlaceResult::RowFilled;
        }
        log::trace!("place {} at ({x}, {y}) -> {}", piece, result.as_str());

        if !result.is_error() {
            self.sanity_check();
        }
        result
    }

    /// Remove every full row, shifting the rows above down. Returns the number removed.
    ///
    /// On a committed board there is nothing pending to clear: the board is backed up,
    /// marked uncommitted and 0 is returned.
    pub fn clear_rows(&mut self) -> usize {
        if self.is_committed() {
            self.backup();
            self.state = CommitState::Uncommitted;
            return 0;
        }

        let width = self.width;
        let top = self.grid().max_height;
        let grid = self.grid_mut();

        let mut cleared = 0;
        for y in 0..top {
            if grid.widths[y] == width {
                cleared += 1;
            } else if cleared > 0 {
                let dst = y - cleared;
                grid.cells
                    .copy_within(y * width..(y + 1) * width, dst * width);
                grid.widths[dst] = grid.widths[y];
            }
        }

        if cleared == 0 {
            return 0;
        }

        for y in top - cleared..top {
            grid.cells[y * width..(y + 1) * width].fill(false);
            grid.widths[y] = 0;
        }

        // Holes below the remaining rows survive a clear, so heights are rescanned.
        let new_top = top - cleared;
        let mut max_height = 0;
        for x in 0..width {
            let h = (0..new_top)
                .rev()
                .find(|&y| grid.cells[y * width + x])
                .map_or(0, |y| y + 1);
            grid.heights[x] = h;
            max_height = max_height.max(h);
        }
        grid.max_height = max_height;

        log::debug!("cleared {cleared} row(s), max height now {max_height}");
        self.sanity_check();
        cleared
    }

    /// Keep the current state; the backup becomes stale.
    pub fn commit(&mut self) {
        self.state = CommitState::Committed;
    }

    /// Restore the state saved when the board last left `Committed`.
    ///
    /// A no-op on a committed board.
    pub fn undo(&mut self) {
        if self.is_committed() {
            return;
        }
        self.live ^= 1;
        log::debug!("undo restored max height {}", self.max_height());
        self.sanity_check();
        self.commit();
    }

    /// Rebuild the caches from the raw grid and compare them with the stored values.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.grid().verify()
    }

    fn backup(&mut self) {
        let [first, second] = &mut self.buffers;
        if self.live == 0 {
            second.copy_from(first);
        } else {
            first.copy_from(second);
        }
    }

    fn sanity_check(&self) {
        if !self.sanity_checks {
            return;
        }
        if let Err(violation) = self.check_invariants() {
            panic!("board invariant violated: {violation}\n{self}");
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

/// Debug rendering: row 0 at the bottom, walls on both sides, a floor line below.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid();
        for row in grid.cells.chunks_exact(self.width).rev() {
            write!(f, "{WALL_GLYPH}")?;
            for &filled in row {
                let glyph = if filled { FILLED_GLYPH } else { EMPTY_GLYPH };
                write!(f, "{glyph}")?;
            }
            writeln!(f, "{WALL_GLYPH}")?;
        }
        for _ in 0..self.width + 2 {
            write!(f, "{FLOOR_GLYPH}")?;
        }
        Ok(())
    }
}
