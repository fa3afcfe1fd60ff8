// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
mod common;

use common::{play, position, sq};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regent::movegen::{pseudolegal_moves, GenMode};
use regent::{
    CastleStatus, Color, Game, MoveOutcome, MoveVec, PieceKind, Position, Square, COLORS,
    PROMOTION_KINDS,
};

fn assert_round_trips(pos: &Position) {
    let mut scratch = pos.clone();
    for square in Square::all() {
        let mut candidates = MoveVec::new();
        if pos.piece_at(square).is_some() {
            pseudolegal_moves(pos, square, GenMode::Full, &mut candidates);
        }

        for mov in candidates {
            {
                let trial = scratch.simulate(mov).unwrap();
                let moved = trial.position().piece_at(mov.destination());
                assert_eq!(pos.piece_at(square), moved);
                assert!(trial.position().piece_at(mov.source()).is_none());
            }

            assert_eq!(pos, &scratch, "simulating {} did not restore", mov);
        }
    }
}

#[test]
fn every_candidate_round_trips() {
    assert_round_trips(&Position::new());
    assert_round_trips(&position(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        Color::White,
        CastleStatus::all(),
    ));
    assert_round_trips(&position(
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
        Color::White,
        CastleStatus::NONE,
    ));
}

#[test]
fn en_passant_trial_round_trips() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    let pos = game.position().clone();
    let ep = pos
        .legal_moves(sq("e5"))
        .iter()
        .find(|m| m.is_en_passant())
        .copied()
        .unwrap();

    let mut scratch = pos.clone();
    {
        let trial = scratch.simulate(ep).unwrap();
        assert!(trial.position().piece_at(sq("d5")).is_none());
    }
    assert_eq!(pos, scratch);
}

#[test]
fn king_trial_restores_the_cache() {
    let pos = Position::new();
    let mut game = Game::new();
    play(&mut game, &["e2e4", "e7e5"]);
    let mut scratch = game.position().clone();
    {
        let trial = scratch.simulate(regent::Move::new(sq("e1"), sq("e2"))).unwrap();
        assert_eq!(sq("e2"), trial.position().king_square(Color::White));
    }
    assert_eq!(sq("e1"), scratch.king_square(Color::White));
    assert_eq!(pos.king_square(Color::Black), scratch.king_square(Color::Black));
}

fn leaves_check(pos: &mut Position, from: Square, to: Square) -> Option<bool> {
    let trial = pos.simulate(regent::Move::new(from, to))?;
    if trial.leaves_king_in_check() {
        return Some(true);
    }

    Some(false)
}

#[test]
fn early_return_still_restores() {
    let original = position("4k3/8/8/8/4r3/8/4B3/4K3", Color::White, CastleStatus::NONE);
    let mut pos = original.clone();
    assert_eq!(Some(true), leaves_check(&mut pos, sq("e2"), sq("d3")));
    assert_eq!(original, pos);
    assert_eq!(None, leaves_check(&mut pos, sq("a1"), sq("a2")));
    assert_eq!(original, pos);
}

fn assert_invariants(game: &Game, two_step: bool) {
    let pos = game.position();
    for &color in COLORS.iter() {
        let kings = pos.board().kings(color);
        assert_eq!(1, kings.len());
        assert_eq!(kings[0], pos.king_square(color));
        assert_eq!(pos.is_check(color), game.is_check(color));
    }

    assert_eq!(two_step, pos.en_passant_square().is_some());
}

#[test]
fn random_playouts_keep_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..12 {
        let mut game = Game::new();
        for _ in 0..120 {
            let moves = game.legal_moves();
            let mov = match moves.choose(&mut rng) {
                Some(&mov) => mov,
                None => {
                    assert!(game.is_game_over());
                    break;
                }
            };

            let mover = game.side_to_move();
            let piece = game.board().piece_at(mov.source()).unwrap();
            let two_step = piece.kind == PieceKind::Pawn
                && (mov.source().row() as i32 - mov.destination().row() as i32).abs() == 2;

            match game.make_move(mov.source(), mov.destination()).unwrap() {
                MoveOutcome::Completed => {}
                MoveOutcome::PromotionPending(square) => {
                    assert_eq!(mover, game.side_to_move());
                    let kind = *PROMOTION_KINDS.choose(&mut rng).unwrap();
                    game.promote_pawn(square, kind).unwrap();
                }
            }

            assert_eq!(mover.toggle(), game.side_to_move());
            assert_invariants(&game, two_step);
        }
    }
}

#[test]
fn undo_matches_the_earlier_position() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = Game::new();
    let mut positions = vec![game.position().clone()];
    for _ in 0..30 {
        let moves = game.legal_moves();
        let mov = match moves.choose(&mut rng) {
            Some(&mov) => mov,
            None => break,
        };

        if let MoveOutcome::PromotionPending(square) =
            game.make_move(mov.source(), mov.destination()).unwrap()
        {
            game.promote_pawn(square, PieceKind::Queen).unwrap();
        }

        positions.push(game.position().clone());
    }

    positions.pop();
    while let Some(expected) = positions.pop() {
        game.undo().unwrap();
        assert_eq!(&expected, game.position());
    }

    assert!(game.history().is_empty());
}
