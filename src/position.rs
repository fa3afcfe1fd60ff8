// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::board::Board;
use crate::error::ChessError;
use crate::movegen::{self, GenMode};
use crate::moves::{Move, MoveVec};
use crate::types::TableIndex;
use crate::types::{CastleSide, CastleStatus, Color, Piece, PieceKind, Square};
use crate::types::{CASTLE_SIDES, COLORS};

/// The rules state of a chess position: the board plus everything needed to decide which moves
/// are legal in it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castle_status: CastleStatus,
    en_passant_square: Option<Square>,
    // Mirrors the board: always the square each color's king stands on.
    king_squares: [Square; 2],
    check_state: [bool; 2],
}

//
// Construction and board state getters
//

impl Position {
    /// The standard starting position, White to move.
    pub fn new() -> Position {
        Position {
            board: Board::starting(),
            side_to_move: Color::White,
            castle_status: CastleStatus::WHITE | CastleStatus::BLACK,
            en_passant_square: None,
            king_squares: [Square::at(7, 4), Square::at(0, 4)],
            check_state: [false, false],
        }
    }

    /// An empty board with no castling rights, White to move. Pieces are placed with
    /// `add_piece`; the result is checked when it is handed to `Game::from_position`.
    pub fn empty() -> Position {
        Position {
            board: Board::empty(),
            castle_status: CastleStatus::NONE,
            ..Position::new()
        }
    }

    pub fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), ChessError> {
        if self.board.piece_at(square).is_some() {
            return Err(ChessError::SquareOccupied(square));
        }

        self.board.put(square, Some(piece));
        if piece.kind == PieceKind::King {
            self.king_squares[piece.color.as_index()] = square;
        }
        Ok(())
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn set_castle_status(&mut self, status: CastleStatus) {
        self.castle_status = status;
    }

    pub fn set_en_passant_square(&mut self, square: Option<Square>) {
        self.en_passant_square = square;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.castle_status.contains(CastleStatus::side_mask(color, side))
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.as_index()]
    }

    /// Whether `color` was in check after the last completed move. See `is_check` for a live
    /// answer.
    pub fn check_state(&self, color: Color) -> bool {
        self.check_state[color.as_index()]
    }

    /// Checks the king invariants of a hand-built position and brings the derived state (king
    /// squares, check flags, en-passant window) in line with the board.
    pub(crate) fn sync(&mut self) -> Result<(), ChessError> {
        for &color in COLORS.iter() {
            let kings = self.board.kings(color);
            if kings.len() != 1 {
                return Err(ChessError::KingCount {
                    color,
                    count: kings.len(),
                });
            }

            self.king_squares[color.as_index()] = kings[0];
        }

        // An en-passant square is only meaningful with the enemy pawn that skipped it in place.
        if let Some(target) = self.en_passant_square {
            let mover = self.side_to_move;
            let victim = Piece::new(PieceKind::Pawn, mover.toggle());
            let behind = target.offset(-mover.pawn_direction(), 0);
            if behind.and_then(|sq| self.board.piece_at(sq)) != Some(victim) {
                self.en_passant_square = None;
            }
        }

        self.refresh_check_state();
        let waiting = self.side_to_move.toggle();
        if self.check_state(waiting) {
            return Err(ChessError::OpponentInCheck(waiting));
        }

        Ok(())
    }
}

//
// Board analysis (attack and check detection)
//

impl Position {
    /// Returns whether `square` is attacked by any piece of `color`'s opponent.
    pub fn is_square_under_attack(&self, square: Square, color: Color) -> bool {
        let opponent = color.toggle();
        self.board
            .pieces()
            .filter(|&(_, piece)| piece.color == opponent)
            .any(|(from, _)| {
                let mut attacks = MoveVec::new();
                movegen::pseudolegal_moves(self, from, GenMode::AttacksOnly, &mut attacks);
                attacks.iter().any(|m| m.destination() == square)
            })
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.is_square_under_attack(self.king_square(color), color)
    }

    pub(crate) fn refresh_check_state(&mut self) {
        for &color in COLORS.iter() {
            self.check_state[color.as_index()] = self.is_check(color);
        }
    }
}

//
// Legality filter
//

/// A move applied to the board on trial. Dropping the guard puts back the moving piece, the
/// destination's previous occupant, a pawn lifted by en passant and the king square cache, so
/// the position is identical to what it was before `Position::simulate`.
pub struct Simulation<'a> {
    pos: &'a mut Position,
    mov: Move,
    moved: Piece,
    displaced: Option<Piece>,
    lifted: Option<(Square, Piece)>,
    king_before: Square,
}

impl<'a> Simulation<'a> {
    /// The position with the move applied.
    pub fn position(&self) -> &Position {
        &*self.pos
    }

    pub fn leaves_king_in_check(&self) -> bool {
        self.pos.is_check(self.moved.color)
    }
}

impl<'a> Drop for Simulation<'a> {
    fn drop(&mut self) {
        let board = &mut self.pos.board;
        board.put(self.mov.source(), Some(self.moved));
        board.put(self.mov.destination(), self.displaced);
        if let Some((square, pawn)) = self.lifted {
            board.put(square, Some(pawn));
        }

        self.pos.king_squares[self.moved.color.as_index()] = self.king_before;
    }
}

impl Position {
    /// Starts a trial of `mov`. Only the board and king cache are touched; castling rights, the
    /// en-passant window and the side to move stay as they are. Returns `None` if the source
    /// square is empty.
    pub fn simulate(&mut self, mov: Move) -> Option<Simulation<'_>> {
        let moved = self.board.piece_at(mov.source())?;
        let king_before = self.king_square(moved.color);

        let lifted = if mov.is_en_passant() {
            mov.destination()
                .offset(-moved.color.pawn_direction(), 0)
                .and_then(|sq| self.board.take(sq).map(|pawn| (sq, pawn)))
        } else {
            None
        };

        let displaced = self.board.put(mov.destination(), Some(moved));
        self.board.take(mov.source());
        if moved.kind == PieceKind::King {
            self.king_squares[moved.color.as_index()] = mov.destination();
        }

        Some(Simulation {
            pos: self,
            mov,
            moved,
            displaced,
            lifted,
            king_before,
        })
    }

    /// The legal moves of the piece on `square`. Empty if the square is empty or holds a piece
    /// of the side not to move.
    pub fn legal_moves(&self, square: Square) -> MoveVec {
        let mut legal = MoveVec::new();
        match self.piece_at(square) {
            Some(piece) if piece.color == self.side_to_move => {}
            _ => return legal,
        }

        let mut candidates = MoveVec::new();
        movegen::pseudolegal_moves(self, square, GenMode::Full, &mut candidates);

        // Trials run on a scratch copy so that this query never mutates `self`.
        let mut scratch = self.clone();
        for mov in candidates {
            let exposes_king = match scratch.simulate(mov) {
                Some(trial) => trial.leaves_king_in_check(),
                None => true,
            };

            if !exposes_king {
                legal.push(mov);
            }
        }

        legal
    }

    /// Every legal move for the side to move.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        Square::all()
            .flat_map(|square| self.legal_moves(square))
            .collect()
    }

    pub fn has_legal_moves(&self) -> bool {
        Square::all().any(|square| !self.legal_moves(square).is_empty())
    }
}

//
// Move application
//

impl Position {
    /// Applies a move already known to be legal and returns the piece it captured, if any. The
    /// side to move is left alone; see `end_turn`.
    pub(crate) fn apply_move(&mut self, mov: Move) -> Option<Piece> {
        let moving = match self.board.piece_at(mov.source()) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "apply_move from empty square {}", mov.source());
                return None;
            }
        };

        let color = moving.color;
        let mut captured = None;

        // En passant: the captured pawn is behind the destination, not on it.
        if moving.kind == PieceKind::Pawn
            && mov.is_en_passant()
            && Some(mov.destination()) == self.en_passant_square
        {
            captured = mov
                .destination()
                .offset(-color.pawn_direction(), 0)
                .and_then(|sq| self.board.take(sq));
        }

        let displaced = self.board.put(mov.destination(), Some(moving));
        self.board.take(mov.source());
        if displaced.is_some() {
            captured = displaced;
        }

        // Castles are encoded by the king's move; the rook comes along here.
        if let Some(side) = mov.castle_side() {
            let row = mov.destination().row();
            let rook = self.board.take(Square::at(row, side.rook_col()));
            self.board.put(Square::at(row, side.rook_destination_col()), rook);
        }

        match moving.kind {
            PieceKind::King => {
                self.king_squares[color.as_index()] = mov.destination();
                self.castle_status.remove(CastleStatus::color_mask(color));
            }
            PieceKind::Rook => {
                if let Some(side) = home_corner_side(color, mov.source()) {
                    self.castle_status.remove(CastleStatus::side_mask(color, side));
                }
            }
            _ => {}
        }

        // A rook taken on its corner can no longer castle.
        if let Some(victim) = displaced {
            if victim.kind == PieceKind::Rook {
                if let Some(side) = home_corner_side(victim.color, mov.destination()) {
                    self.castle_status
                        .remove(CastleStatus::side_mask(victim.color, side));
                }
            }
        }

        // The en-passant window lasts exactly one ply.
        let source_row = mov.source().row();
        let dest_row = mov.destination().row();
        let double_push =
            moving.kind == PieceKind::Pawn && (source_row as i32 - dest_row as i32).abs() == 2;
        self.en_passant_square = if double_push {
            Some(Square::at((source_row + dest_row) / 2, mov.destination().col()))
        } else {
            None
        };

        captured
    }

    pub(crate) fn replace_piece(&mut self, square: Square, piece: Piece) {
        self.board.put(square, Some(piece));
    }

    /// Hands the move to the other side and recomputes both check flags.
    pub(crate) fn end_turn(&mut self) {
        self.side_to_move = self.side_to_move.toggle();
        self.refresh_check_state();
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", self.side_to_move)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

//
// Helper functions
//

/// Which castling side a rook standing on `square` belongs to, if `square` is one of `color`'s
/// rook corners.
fn home_corner_side(color: Color, square: Square) -> Option<CastleSide> {
    CASTLE_SIDES
        .iter()
        .cloned()
        .find(|side| square == Square::at(color.back_row(), side.rook_col()))
}
