// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::game::{Game, MoveOutcome};
use crate::moves::Move;
use crate::types::PROMOTION_KINDS;

/// Counts the leaf nodes of the legal move tree of the given depth. A pawn reaching the last
/// rank counts once per promotion piece.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    game.legal_moves()
        .par_iter()
        .map(|&mov| perft_move(game, mov, depth))
        .sum()
}

fn perft_move(game: &Game, mov: Move, depth: u32) -> u64 {
    let mut next = game.clone();
    match next.make_move(mov.source(), mov.destination()) {
        Ok(MoveOutcome::Completed) => perft(&next, depth - 1),
        Ok(MoveOutcome::PromotionPending(square)) => PROMOTION_KINDS
            .iter()
            .map(|&kind| {
                let mut promoted = next.clone();
                match promoted.promote_pawn(square, kind) {
                    Ok(()) => perft(&promoted, depth - 1),
                    Err(e) => {
                        warn!("perft: promotion to {} on {} failed: {}", kind, square, e);
                        0
                    }
                }
            })
            .sum(),
        Err(e) => {
            warn!("perft: generated move {} was rejected: {}", mov, e);
            0
        }
    }
}
