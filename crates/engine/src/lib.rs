//! Placement transactions built on the public [`Board`](tetris_board_core::Board) API.
//!
//! [`try_place`] places and rolls back on failure; [`drop_piece`] runs the full
//! drop-height → place → clear → commit sequence for one piece.

pub mod place;

pub use place::{drop_piece, try_place, DropOutcome, PlaceError};
