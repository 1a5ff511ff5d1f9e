//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used by the piece model, the board
//! engine and the command adapter. All types are pure data with no external dependencies.
//!
//! # Coordinates
//!
//! Coordinates are `(x, y)` integer pairs. `x` grows to the right, `y` grows upward:
//! row 0 is the floor of the board, and piece bodies are expressed relative to their
//! lower-left bounding-box corner.
//!
//! # Board Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_BOARD_WIDTH` | 10 | Columns on a standard board |
//! | `DEFAULT_BOARD_HEIGHT` | 20 | Rows on a standard board |
//! | `FILLED_GLYPH` | `+` | Diagnostic rendering of a filled cell |
//! | `EMPTY_GLYPH` | ` ` | Diagnostic rendering of an empty cell |
//!
//! # Examples
//!
//! ```
//! use tetris_board_types::{PieceKind, PlaceResult, DEFAULT_BOARD_WIDTH};
//!
//! // Parse a piece kind (case-insensitive)
//! let kind = PieceKind::from_str("Pyramid").unwrap();
//! assert_eq!(kind, PieceKind::Pyramid);
//! assert_eq!(kind.body_str(), "0 0  1 0  1 1  2 0");
//!
//! // Placement results are ordered by severity
//! assert!(PlaceResult::OutBounds.severity() > PlaceResult::Bad.severity());
//! assert!(PlaceResult::Bad.is_error());
//!
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! ```

use std::fmt;

/// Board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Glyph used for filled cells in the diagnostic rendering
pub const FILLED_GLYPH: char = '+';

/// Glyph used for empty cells in the diagnostic rendering
pub const EMPTY_GLYPH: char = ' ';

/// Glyph framing the left and right edges of the diagnostic rendering
pub const WALL_GLYPH: char = '|';

/// Glyph used for the floor line of the diagnostic rendering
pub const FLOOR_GLYPH: char = '-';

/// Maximum number of distinct 90° orientations of any shape
pub const MAX_ROTATIONS: usize = 4;

/// An immutable integer coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Textual body of the vertical 1x4 stick
pub const STICK_STR: &str = "0 0  0 1  0 2  0 3";
/// Textual body of the first L variant
pub const L1_STR: &str = "0 0  0 1  0 2  1 0";
/// Textual body of the second (mirrored) L variant
pub const L2_STR: &str = "0 0  1 0  1 1  1 2";
/// Textual body of the first S variant
pub const S1_STR: &str = "0 0  1 0  1 1  2 1";
/// Textual body of the second (mirrored) S variant
pub const S2_STR: &str = "0 1  1 1  1 0  2 0";
/// Textual body of the 2x2 square
pub const SQUARE_STR: &str = "0 0  0 1  1 0  1 1";
/// Textual body of the pyramid
pub const PYRAMID_STR: &str = "0 0  1 0  1 1  2 0";

/// The seven canonical tetromino kinds
///
/// The declaration order is the registry order:
/// stick, L1, L2, S1, S2, square, pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Stick,
    L1,
    L2,
    S1,
    S2,
    Square,
    Pyramid,
}

impl PieceKind {
    /// All kinds in registry order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Stick,
        PieceKind::L1,
        PieceKind::L2,
        PieceKind::S1,
        PieceKind::S2,
        PieceKind::Square,
        PieceKind::Pyramid,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Stick => 0,
            PieceKind::L1 => 1,
            PieceKind::L2 => 2,
            PieceKind::S1 => 3,
            PieceKind::S2 => 4,
            PieceKind::Square => 5,
            PieceKind::Pyramid => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_board_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("stick"), Some(PieceKind::Stick));
    /// assert_eq!(PieceKind::from_str("S2"), Some(PieceKind::S2));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "stick" => Some(PieceKind::Stick),
            "l1" => Some(PieceKind::L1),
            "l2" => Some(PieceKind::L2),
            "s1" => Some(PieceKind::S1),
            "s2" => Some(PieceKind::S2),
            "square" => Some(PieceKind::Square),
            "pyramid" => Some(PieceKind::Pyramid),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Stick => "stick",
            PieceKind::L1 => "l1",
            PieceKind::L2 => "l2",
            PieceKind::S1 => "s1",
            PieceKind::S2 => "s2",
            PieceKind::Square => "square",
            PieceKind::Pyramid => "pyramid",
        }
    }

    /// Canonical textual body (whitespace separated x,y pairs)
    pub fn body_str(&self) -> &'static str {
        match self {
            PieceKind::Stick => STICK_STR,
            PieceKind::L1 => L1_STR,
            PieceKind::L2 => L2_STR,
            PieceKind::S1 => S1_STR,
            PieceKind::S2 => S2_STR,
            PieceKind::Square => SQUARE_STR,
            PieceKind::Pyramid => PYRAMID_STR,
        }
    }
}

/// Outcome of a single placement
///
/// Variants keep the classic constant order (`OK`, `ROW_FILLED`, `OUT_BOUNDS`, `BAD`).
/// Use [`PlaceResult::severity`] for the priority rule `OutBounds > Bad > RowFilled > Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceResult {
    /// Placement succeeded, no row became full
    Ok,
    /// Placement succeeded and at least one row is now full
    RowFilled,
    /// Part of the piece landed outside the board
    OutBounds,
    /// Part of the piece collided with a filled cell
    Bad,
}

impl PlaceResult {
    /// True for `OutBounds` and `Bad`
    pub fn is_error(self) -> bool {
        matches!(self, PlaceResult::OutBounds | PlaceResult::Bad)
    }

    /// Severity rank used by the priority rule
    pub fn severity(self) -> u8 {
        match self {
            PlaceResult::Ok => 0,
            PlaceResult::RowFilled => 1,
            PlaceResult::Bad => 2,
            PlaceResult::OutBounds => 3,
        }
    }

    /// Keep the more severe of two results
    pub fn worst(self, other: PlaceResult) -> PlaceResult {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceResult::Ok => "ok",
            PlaceResult::RowFilled => "row_filled",
            PlaceResult::OutBounds => "out_bounds",
            PlaceResult::Bad => "bad",
        }
    }
}

/// Whether the board currently holds a restorable backup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CommitState {
    #[default]
    Committed,
    Uncommitted,
}

impl CommitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitState::Committed => "committed",
            CommitState::Uncommitted => "uncommitted",
        }
    }
}
