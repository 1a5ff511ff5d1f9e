//! Protocol module - JSON message types for the board command adapter
//!
//! One JSON object per line. Every message has `type` and `seq`.

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Canonical piece name on the wire (`"stick"`, `"l1"`, ..., case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceName(pub PieceKind);

impl<'de> Deserialize<'de> for PieceName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PieceKind::from_str(&s)
            .map(PieceName)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown piece {s:?}")))
    }
}

impl Serialize for PieceName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

// ============== Client -> Board Commands ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Place a piece with its origin at `(x, y)`
    Place {
        seq: u64,
        piece: PieceName,
        #[serde(default)]
        rotation: usize,
        x: i32,
        y: i32,
    },
    /// Drop a piece at column `x`, clear rows and commit
    Drop {
        seq: u64,
        piece: PieceName,
        #[serde(default)]
        rotation: usize,
        x: i32,
    },
    /// Report where a piece would land at column `x`
    DropHeight {
        seq: u64,
        piece: PieceName,
        #[serde(default)]
        rotation: usize,
        x: i32,
    },
    ClearRows {
        seq: u64,
    },
    Commit {
        seq: u64,
    },
    Undo {
        seq: u64,
    },
    /// Report dimensions, caches and commit state
    Query {
        seq: u64,
    },
    /// Return the diagnostic board rendering
    Render {
        seq: u64,
    },
}

impl Command {
    pub fn seq(&self) -> u64 {
        match *self {
            Command::Place { seq, .. }
            | Command::Drop { seq, .. }
            | Command::DropHeight { seq, .. }
            | Command::ClearRows { seq }
            | Command::Commit { seq }
            | Command::Undo { seq }
            | Command::Query { seq }
            | Command::Render { seq } => seq,
        }
    }

    /// True for commands that can change the board
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::DropHeight { .. } | Command::Query { .. } | Command::Render { .. }
        )
    }
}

// ============== Board -> Client Responses ==============

/// Board caches as reported by `query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub width: usize,
    pub height: usize,
    pub max_height: usize,
    pub heights: Vec<usize>,
    pub widths: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckMessage {
    pub seq: u64,
    /// Commit state after the command
    pub committed: bool,
    /// Placement result code (`ok`, `row_filled`, `out_bounds`, `bad`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_cleared: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,
}

impl AckMessage {
    pub fn new(seq: u64, committed: bool) -> Self {
        Self {
            seq,
            committed,
            result: None,
            rows_cleared: None,
            x: None,
            y: None,
            board: None,
            render: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub seq: u64,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ack(AckMessage),
    Error(ErrorMessage),
}

impl Response {
    pub fn seq(&self) -> u64 {
        match self {
            Response::Ack(ack) => ack.seq,
            Response::Error(err) => err.seq,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}
