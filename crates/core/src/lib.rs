//! Core placement engine - pure, deterministic, and testable
//!
//! This crate holds the piece geometry model and the board state machine. It has no
//! dependencies on rendering, input, or I/O.
//!
//! # Module Structure
//!
//! - [`piece`]: immutable piece bodies with width, height and skirt, plus ccw rotation
//! - [`rotation`]: process-wide table of rotation cycles for the 7 canonical pieces
//! - [`snapshot`]: one grid buffer with its row-width / column-height caches
//! - [`board`]: placement, row clearing, commit and one-level undo
//!
//! # Protocol
//!
//! A caller drives the board with a strict sequence:
//!
//! 1. `place()` a piece (the board must be committed),
//! 2. optionally `clear_rows()` if the result was [`PlaceResult::RowFilled`],
//! 3. `commit()` to keep the change, or `undo()` to restore the previous board.
//!
//! # Example
//!
//! ```
//! use tetris_board_core::{Board, PieceRef};
//! use tetris_board_core::types::{PieceKind, PlaceResult};
//!
//! let mut board = Board::new(4, 6);
//! let flat_stick = PieceRef::root(PieceKind::Stick).next();
//!
//! assert_eq!(board.place(flat_stick.piece(), 0, 0), PlaceResult::RowFilled);
//! assert_eq!(board.clear_rows(), 1);
//! board.commit();
//! assert_eq!(board.max_height(), 0);
//!
//! // A failed placement is rolled back with undo()
//! assert_eq!(board.place(flat_stick.piece(), 1, 0), PlaceResult::OutBounds);
//! board.undo();
//! assert!(!board.cell(1, 0));
//! ```

pub mod board;
pub mod piece;
pub mod rotation;
pub mod snapshot;

pub use tetris_board_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use piece::{Piece, PieceParseError, MAX_PIECE_EXTENT};
pub use rotation::{build_rotation_cycle, pieces, PieceRef, RotationCycle, RotationTable};
pub use snapshot::{GridState, InvariantViolation};
pub use types::PlaceResult;
