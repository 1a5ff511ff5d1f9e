use thiserror::Error;

use tetris_board_core::{Board, Piece};
use tetris_board_types::PlaceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("piece would land outside the board")]
    OutOfBounds,
    #[error("piece would overlap filled cells")]
    Collision,
    #[error("target column puts the piece off the board")]
    ColumnOutOfRange,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::OutOfBounds | PlaceError::ColumnOutOfRange => "out_bounds",
            PlaceError::Collision => "bad",
        }
    }
}

/// Result of a committed drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    pub x: i32,
    pub y: i32,
    pub result: PlaceResult,
    pub rows_cleared: usize,
}

/// Place `piece` at `(x, y)`, undoing on `OutBounds`/`Bad`.
///
/// On success the board is left uncommitted so the caller can still clear rows,
/// commit, or undo.
pub fn try_place(
    board: &mut Board,
    piece: &Piece,
    x: i32,
    y: i32,
) -> Result<PlaceResult, PlaceError> {
    match board.place(piece, x, y) {
        PlaceResult::OutBounds => {
            board.undo();
            Err(PlaceError::OutOfBounds)
        }
        PlaceResult::Bad => {
            board.undo();
            Err(PlaceError::Collision)
        }
        ok => Ok(ok),
    }
}

/// Drop `piece` at column `x`, clear any full rows and commit.
///
/// The piece is placed at [`Board::drop_height`], which is one row above the cells it
/// would rest on: on an empty board it lands at `y = 1 - min(skirt)`, so drops alone
/// never fill row 0.
///
/// The board must be committed. On error it is restored and stays committed.
pub fn drop_piece(board: &mut Board, piece: &Piece, x: i32) -> Result<DropOutcome, PlaceError> {
    if !board.columns_fit(piece, x) {
        return Err(PlaceError::ColumnOutOfRange);
    }

    let y = board.drop_height(piece, x);
    let result = try_place(board, piece, x, y)?;
    let rows_cleared = if result == PlaceResult::RowFilled {
        board.clear_rows()
    } else {
        0
    };
    board.commit();

    log::debug!(
        "dropped {} at ({x}, {y}): {} with {rows_cleared} row(s) cleared",
        piece,
        result.as_str()
    );
    Ok(DropOutcome {
        x,
        y,
        result,
        rows_cleared,
    })
}
