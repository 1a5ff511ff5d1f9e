//! Session - applies decoded commands to one board
//!
//! The session guards the board's call discipline: a `place` or `drop` on an
//! uncommitted board is answered with `protocol_violation` instead of reaching the
//! core, where it would abort.

use anyhow::{Context, Result};
use thiserror::Error;

use tetris_board_engine::drop_piece;

use crate::core::{Board, PieceRef};
use crate::protocol::{AckMessage, BoardView, Command, ErrorMessage, PieceName, Response};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("{piece} has no rotation {rotation}")]
    BadRotation { piece: &'static str, rotation: usize },
    #[error("board is uncommitted; send commit or undo first")]
    Uncommitted,
    #[error("column {x} puts the piece off the board")]
    ColumnOutOfRange { x: i32 },
    #[error(transparent)]
    Place(#[from] tetris_board_engine::PlaceError),
}

impl ProtocolError {
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::InvalidCommand(_) => "invalid_command",
            ProtocolError::BadRotation { .. } => "bad_rotation",
            ProtocolError::Uncommitted => "protocol_violation",
            ProtocolError::ColumnOutOfRange { .. } => "out_bounds",
            ProtocolError::Place(e) => e.code(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    board: Board,
}

impl Session {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Decode one line and apply it. Malformed input yields an error response.
    pub fn handle_line(&mut self, line: &str) -> Response {
        match decode_line(line) {
            Ok(cmd) => self.handle(cmd),
            Err(resp) => resp,
        }
    }

    pub fn handle(&mut self, cmd: Command) -> Response {
        let seq = cmd.seq();
        match self.apply(cmd) {
            Ok(ack) => Response::Ack(ack),
            Err(e) => {
                log::debug!("command {seq} rejected: {e}");
                error_response(seq, e)
            }
        }
    }

    fn apply(&mut self, cmd: Command) -> Result<AckMessage, ProtocolError> {
        let seq = cmd.seq();
        let mut ack = match cmd {
            Command::Place {
                piece,
                rotation,
                x,
                y,
                ..
            } => {
                let piece = resolve(piece, rotation)?;
                self.require_committed()?;
                let result = self.board.place(piece.piece(), x, y);
                let mut ack = AckMessage::new(seq, false);
                ack.result = Some(result.as_str().to_string());
                ack
            }
            Command::Drop {
                piece, rotation, x, ..
            } => {
                let piece = resolve(piece, rotation)?;
                self.require_committed()?;
                let outcome = drop_piece(&mut self.board, piece.piece(), x)?;
                let mut ack = AckMessage::new(seq, false);
                ack.result = Some(outcome.result.as_str().to_string());
                ack.rows_cleared = Some(outcome.rows_cleared);
                ack.x = Some(outcome.x);
                ack.y = Some(outcome.y);
                ack
            }
            Command::DropHeight {
                piece, rotation, x, ..
            } => {
                let piece = resolve(piece, rotation)?.piece();
                if !self.board.columns_fit(piece, x) {
                    return Err(ProtocolError::ColumnOutOfRange { x });
                }
                let mut ack = AckMessage::new(seq, false);
                ack.x = Some(x);
                ack.y = Some(self.board.drop_height(piece, x));
                ack
            }
            Command::ClearRows { .. } => {
                let mut ack = AckMessage::new(seq, false);
                ack.rows_cleared = Some(self.board.clear_rows());
                ack
            }
            Command::Commit { .. } => {
                self.board.commit();
                AckMessage::new(seq, false)
            }
            Command::Undo { .. } => {
                self.board.undo();
                AckMessage::new(seq, false)
            }
            Command::Query { .. } => {
                let mut ack = AckMessage::new(seq, false);
                ack.board = Some(BoardView {
                    width: self.board.width(),
                    height: self.board.height(),
                    max_height: self.board.max_height(),
                    heights: self.board.heights().to_vec(),
                    widths: self.board.widths().to_vec(),
                });
                ack
            }
            Command::Render { .. } => {
                let mut ack = AckMessage::new(seq, false);
                ack.render = Some(self.board.to_string());
                ack
            }
        };
        ack.committed = self.board.is_committed();
        Ok(ack)
    }

    fn require_committed(&self) -> Result<(), ProtocolError> {
        if self.board.is_committed() {
            Ok(())
        } else {
            Err(ProtocolError::Uncommitted)
        }
    }
}

/// Decode one protocol line.
///
/// On failure the ready-to-send `invalid_command` response is returned, carrying the
/// line's `seq` when one could be read.
pub fn decode_line(line: &str) -> Result<Command, Response> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| error_response(0, ProtocolError::InvalidCommand(e.to_string())))?;
    let seq = value.get("seq").and_then(|s| s.as_u64()).unwrap_or(0);
    serde_json::from_value(value)
        .map_err(|e| error_response(seq, ProtocolError::InvalidCommand(e.to_string())))
}

fn resolve(name: PieceName, rotation: usize) -> Result<PieceRef, ProtocolError> {
    PieceRef::new(name.0, rotation).ok_or(ProtocolError::BadRotation {
        piece: name.0.as_str(),
        rotation,
    })
}

fn error_response(seq: u64, err: ProtocolError) -> Response {
    Response::Error(ErrorMessage {
        seq,
        code: err.code().to_string(),
        message: err.to_string(),
    })
}

/// Encode a response as a single JSON line (no trailing newline)
pub fn encode_response(resp: &Response) -> Result<String> {
    serde_json::to_string(resp).with_context(|| format!("encoding response {}", resp.seq()))
}
