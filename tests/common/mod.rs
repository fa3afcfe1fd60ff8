// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![allow(dead_code)]

use regent::{CastleStatus, Color, Game, Piece, Position, Square};
use std::convert::TryFrom;

pub fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

/// Builds a position from the piece-placement field of a FEN string.
pub fn position(placement: &str, side: Color, castle: CastleStatus) -> Position {
    let mut pos = Position::empty();
    for (row, rank) in placement.split('/').enumerate() {
        let mut col = 0;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10) {
                col += skip as i32;
                continue;
            }

            let square = Square::new(row as i32, col).unwrap();
            pos.add_piece(square, Piece::try_from(c).unwrap()).unwrap();
            col += 1;
        }
    }

    pos.set_side_to_move(side);
    pos.set_castle_status(castle);
    pos
}

pub fn game(placement: &str, side: Color, castle: CastleStatus) -> Game {
    Game::from_position(position(placement, side, castle)).unwrap()
}

/// Plays coordinate moves (`e2e4`) that must all be legal and complete.
pub fn play(game: &mut Game, moves: &[&str]) {
    for mov in moves {
        let (from, to) = mov.split_at(2);
        game.make_move(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{} failed: {}", mov, e));
    }
}

pub fn destinations(game: &Game, square: &str) -> Vec<Square> {
    let mut dests: Vec<_> = game
        .valid_moves(sq(square))
        .iter()
        .map(|m| m.destination())
        .collect();
    dests.sort_by_key(|s| (s.row(), s.col()));
    dests
}

pub fn squares(names: &[&str]) -> Vec<Square> {
    let mut squares: Vec<_> = names.iter().map(|n| sq(n)).collect();
    squares.sort_by_key(|s| (s.row(), s.col()));
    squares
}
