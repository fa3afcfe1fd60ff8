// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::Write;

use crate::moves::Move;
use crate::types::{CastleSide, Piece, PieceKind, Square};

/// One entry of the append-only move log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
    pub promotion: Option<PieceKind>,
    pub notation: String,
}

impl MoveRecord {
    pub(crate) fn new(piece: Piece, mov: Move, captured: Option<Piece>) -> MoveRecord {
        let mut record = MoveRecord {
            piece,
            from: mov.source(),
            to: mov.destination(),
            captured,
            en_passant: mov.is_en_passant(),
            castle: mov.castle_side(),
            promotion: None,
            notation: String::new(),
        };
        record.notation = record.base_notation();
        record
    }

    /// The move as it was chosen, suitable for replaying through `Game::make_move`.
    pub fn as_move(&self) -> Move {
        match self.castle {
            Some(side) => Move::castle(self.from, self.to, side),
            None if self.en_passant => Move::en_passant(self.from, self.to),
            None => Move::new(self.from, self.to),
        }
    }

    pub(crate) fn set_promotion(&mut self, kind: PieceKind) {
        self.promotion = Some(kind);
        self.notation = self.base_notation();
    }

    pub(crate) fn mark_check(&mut self, mate: bool) {
        self.notation.push(if mate { '#' } else { '+' });
    }

    fn base_notation(&self) -> String {
        match self.castle {
            Some(CastleSide::King) => return "O-O".to_owned(),
            Some(CastleSide::Queen) => return "O-O-O".to_owned(),
            None => {}
        }

        let mut buf = String::new();
        match self.piece.kind.notation_letter() {
            Some(letter) => buf.push(letter),
            None if self.captured.is_some() => buf.push(self.from.file_char()),
            None => {}
        }

        if self.captured.is_some() {
            buf.push('x');
        }

        write!(&mut buf, "{}", self.to).unwrap();
        if let Some(kind) = self.promotion.and_then(|k| k.notation_letter()) {
            buf.push('=');
            buf.push(kind);
        }

        buf
    }
}
