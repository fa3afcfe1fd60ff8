// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A two-player chess rules engine: legal move generation, check, checkmate and stalemate
//! detection, castling, en passant and promotion, with a move log and undo.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
mod console;
mod error;
mod game;
mod history;
pub mod movegen;
mod moves;
mod perft;
mod position;
mod types;

pub use board::Board;
pub use console::Console;
pub use error::ChessError;
pub use game::{ByColor, Game, GameOverReason, GameSnapshot, MoveOutcome};
pub use history::MoveRecord;
pub use moves::{Move, MoveVec};
pub use perft::perft;
pub use position::{Position, Simulation};
pub use types::{
    is_valid_square, piece_color, piece_kind, CastleSide, CastleStatus, Color, Piece, PieceKind,
    Square, TableIndex, CASTLE_SIDES, COLORS, PIECE_KINDS, PROMOTION_KINDS,
};
