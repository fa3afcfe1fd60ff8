// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pseudo-legal move generation.
//!
//! Generated moves respect each piece's movement pattern and the occupancy of the board, but
//! not whether the mover's own king is left in check; that is the legality filter's job (see
//! `Position::legal_moves`).
//!
//! Attack detection is itself built on this generator, and castling legality depends on attack
//! detection. To keep that from recursing, generation runs in one of two modes. `GenMode::Full`
//! produces the moves a player may choose from, castling included. `GenMode::AttacksOnly`
//! produces the squares a piece attacks: pawns contribute their two diagonals, kings only their
//! eight neighbours, and nothing in this mode ever asks whether a square is attacked.
use crate::moves::{Move, MoveVec};
use crate::position::Position;
use crate::types::{CastleSide, Color, Piece, PieceKind, Square, CASTLE_SIDES};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenMode {
    Full,
    AttacksOnly,
}

static KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

static KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

static BISHOP_DIRECTIONS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

static ROOK_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Generates the pseudo-legal moves of the piece on `square` into `moves`. Does nothing if the
/// square is empty. The side to move is not consulted.
pub fn pseudolegal_moves(pos: &Position, square: Square, mode: GenMode, moves: &mut MoveVec) {
    let piece = match pos.piece_at(square) {
        Some(piece) => piece,
        None => return,
    };

    match piece.kind {
        PieceKind::Pawn => match mode {
            GenMode::Full => pawn_moves(pos, square, piece.color, moves),
            GenMode::AttacksOnly => pawn_attacks(square, piece.color, moves),
        },
        PieceKind::Knight => step_moves(pos, square, piece.color, &KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => slide_moves(pos, square, piece.color, &BISHOP_DIRECTIONS, moves),
        PieceKind::Rook => slide_moves(pos, square, piece.color, &ROOK_DIRECTIONS, moves),
        PieceKind::Queen => {
            slide_moves(pos, square, piece.color, &BISHOP_DIRECTIONS, moves);
            slide_moves(pos, square, piece.color, &ROOK_DIRECTIONS, moves);
        }
        PieceKind::King => {
            step_moves(pos, square, piece.color, &KING_OFFSETS, moves);
            if mode == GenMode::Full {
                castle_moves(pos, square, piece.color, moves);
            }
        }
    }
}

fn pawn_moves(pos: &Position, square: Square, color: Color, moves: &mut MoveVec) {
    let dir = color.pawn_direction();
    if let Some(one_step) = square.offset(dir, 0) {
        if pos.board().is_empty(one_step) {
            moves.push(Move::new(square, one_step));

            // Double push from the start rank; both squares must be empty.
            if square.row() == color.pawn_start_row() {
                if let Some(two_step) = one_step.offset(dir, 0) {
                    if pos.board().is_empty(two_step) {
                        moves.push(Move::new(square, two_step));
                    }
                }
            }
        }
    }

    for &dcol in &[-1, 1] {
        let target = match square.offset(dir, dcol) {
            Some(target) => target,
            None => continue,
        };

        match pos.piece_at(target) {
            Some(victim) if victim.color != color => moves.push(Move::new(square, target)),
            Some(_) => {}
            None if pos.en_passant_square() == Some(target) => {
                if has_en_passant_victim(pos, target, color) {
                    moves.push(Move::en_passant(square, target));
                }
            }
            None => {}
        }
    }
}

/// The pawn captured en passant sits directly behind the target square, from the mover's point
/// of view.
fn has_en_passant_victim(pos: &Position, target: Square, color: Color) -> bool {
    let victim = Piece::new(PieceKind::Pawn, color.toggle());
    target
        .offset(-color.pawn_direction(), 0)
        .map_or(false, |sq| pos.piece_at(sq) == Some(victim))
}

fn pawn_attacks(square: Square, color: Color, moves: &mut MoveVec) {
    let dir = color.pawn_direction();
    for &dcol in &[-1, 1] {
        if let Some(target) = square.offset(dir, dcol) {
            moves.push(Move::new(square, target));
        }
    }
}

fn step_moves(
    pos: &Position,
    square: Square,
    color: Color,
    offsets: &[(i32, i32)],
    moves: &mut MoveVec,
) {
    for &(drow, dcol) in offsets {
        if let Some(target) = square.offset(drow, dcol) {
            match pos.piece_at(target) {
                Some(occupant) if occupant.color == color => {}
                _ => moves.push(Move::new(square, target)),
            }
        }
    }
}

fn slide_moves(
    pos: &Position,
    square: Square,
    color: Color,
    directions: &[(i32, i32)],
    moves: &mut MoveVec,
) {
    for &(drow, dcol) in directions {
        let mut cursor = square.offset(drow, dcol);
        while let Some(target) = cursor {
            match pos.piece_at(target) {
                None => moves.push(Move::new(square, target)),
                Some(occupant) => {
                    // Blocked. The blocker is capturable only if it belongs to the enemy.
                    if occupant.color != color {
                        moves.push(Move::new(square, target));
                    }
                    break;
                }
            }

            cursor = target.offset(drow, dcol);
        }
    }
}

fn castle_moves(pos: &Position, square: Square, color: Color, moves: &mut MoveVec) {
    let back_row = color.back_row();
    if square != Square::at(back_row, 4) || pos.is_check(color) {
        return;
    }

    for &side in CASTLE_SIDES.iter() {
        if can_castle_now(pos, color, side) {
            let destination = Square::at(back_row, side.king_destination_col());
            moves.push(Move::castle(square, destination, side));
        }
    }
}

fn can_castle_now(pos: &Position, color: Color, side: CastleSide) -> bool {
    let back_row = color.back_row();
    if !pos.can_castle(color, side) {
        return false;
    }

    let rook = Piece::new(PieceKind::Rook, color);
    if pos.piece_at(Square::at(back_row, side.rook_col())) != Some(rook) {
        return false;
    }

    let path_clear = side
        .between_cols()
        .iter()
        .all(|&col| pos.board().is_empty(Square::at(back_row, col)));
    if !path_clear {
        return false;
    }

    side.king_path_cols()
        .iter()
        .all(|&col| !pos.is_square_under_attack(Square::at(back_row, col), color))
}
