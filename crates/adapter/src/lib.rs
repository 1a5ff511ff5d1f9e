//! Adapter - drive a board with a line-delimited JSON command protocol
//!
//! # Message Types
//!
//! ## Client → Board
//!
//! - **place**: place a piece at `(x, y)`; the result code is reported, the board is
//!   left uncommitted
//! - **drop**: drop a piece at column `x`, clear full rows and commit
//! - **drop_height**: report the landing row for a piece at column `x`
//! - **clear_rows**, **commit**, **undo**: the rest of the placement protocol
//! - **query**: dimensions, column heights, row widths, max height
//! - **render**: the diagnostic text rendering
//!
//! ## Board → Client
//!
//! - **ack**: success, with `committed` and any command-specific payload
//! - **error**: `code` and `message`
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Board: {"type":"place","seq":1,"piece":"stick","rotation":1,"x":0,"y":0}
//! Board -> Client: {"type":"ack","seq":1,"committed":false,"result":"ok"}
//! Client -> Board: {"type":"commit","seq":2}
//! Board -> Client: {"type":"ack","seq":2,"committed":true}
//! Client -> Board: {"type":"drop","seq":3,"piece":"square","x":4}
//! Board -> Client: {"type":"ack","seq":3,"committed":true,"result":"ok","rows_cleared":0,"x":4,"y":1}
//! ```

pub mod protocol;
pub mod session;

pub use tetris_board_core as core;
pub use tetris_board_types as types;

pub use protocol::*;
pub use session::{decode_line, encode_response, ProtocolError, Session};
