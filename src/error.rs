// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use thiserror::Error;

use crate::types::{Color, PieceKind, Square};

/// Rule violations reported to the caller. A call that returns one of these has not modified
/// the game.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("square ({row}, {col}) is off the board")]
    InvalidSquare { row: i32, col: i32 },

    #[error("invalid square name: {0:?}")]
    InvalidSquareName(String),

    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("the game is already over")]
    GameOver,

    #[error("a promotion on {0} must be resolved first")]
    PromotionPending(Square),

    #[error("there is no pawn awaiting promotion")]
    NoPromotionPending,

    #[error("no promotion is pending on {0}")]
    PromotionSquareMismatch(Square),

    #[error("cannot promote to a {0}")]
    InvalidPromotion(PieceKind),

    #[error("no moves to undo")]
    NothingToUndo,

    #[error("{0} is already occupied")]
    SquareOccupied(Square),

    #[error("{color} has {count} kings on the board, expected exactly one")]
    KingCount { color: Color, count: usize },

    #[error("{0} is in check but it is not their turn")]
    OpponentInCheck(Color),
}
