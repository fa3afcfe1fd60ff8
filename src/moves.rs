// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use arrayvec::ArrayVec;
use std::fmt;

use crate::types::{CastleSide, Square};

/// Candidate moves for a single origin square. A queen in the middle of an empty board has 27,
/// the most any one piece can produce.
pub type MoveVec = ArrayVec<[Move; 32]>;

/// A candidate move: origin, destination, and the flags the executor needs to apply it. Moves
/// are produced by the generator and consumed by the legality filter and the executor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    source: Square,
    destination: Square,
    en_passant: bool,
    castle: Option<CastleSide>,
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Move {
        Move {
            source,
            destination,
            en_passant: false,
            castle: None,
        }
    }

    pub fn en_passant(source: Square, destination: Square) -> Move {
        Move {
            en_passant: true,
            ..Move::new(source, destination)
        }
    }

    pub fn castle(source: Square, destination: Square, side: CastleSide) -> Move {
        Move {
            castle: Some(side),
            ..Move::new(source, destination)
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn is_en_passant(self) -> bool {
        self.en_passant
    }

    pub fn is_castle(self) -> bool {
        self.castle.is_some()
    }

    pub fn castle_side(self) -> Option<CastleSide> {
        self.castle
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)
    }
}
