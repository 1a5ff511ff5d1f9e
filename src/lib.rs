//! Tetris board engine (workspace facade crate).
//!
//! This package exposes the `tetris_board::{core,engine,adapter,types}` API while the
//! implementation lives in dedicated crates under `crates/`.

pub use tetris_board_adapter as adapter;
pub use tetris_board_core as core;
pub use tetris_board_engine as engine;
pub use tetris_board_types as types;
