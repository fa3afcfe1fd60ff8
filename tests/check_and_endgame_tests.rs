// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
mod common;

use common::{game, play, position, sq};
use regent::{CastleStatus, ChessError, Color, Game, GameOverReason, Position};

#[test]
fn smoke_test_starting_position() {
    let game = Game::new();

    // nobody is in check.
    assert!(!game.is_check(Color::White));
    assert!(!game.is_check(Color::Black));
    assert!(!game.is_game_over());
    assert_eq!(None, game.winner());
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    // white is checkmated
    assert!(game.is_check(Color::White));
    assert!(game.is_game_over());
    assert_eq!(Some(GameOverReason::Checkmate), game.game_over_reason());
    assert_eq!(Some(Color::Black), game.winner());
    assert!(game.legal_moves().is_empty());
}

#[test]
fn back_rank_mate() {
    let mut game = game("6k1/5ppp/8/8/8/8/8/R5K1", Color::White, CastleStatus::NONE);
    play(&mut game, &["a1a8"]);
    assert_eq!(Some(GameOverReason::Checkmate), game.game_over_reason());
    assert_eq!("Ra8#", game.last_move().unwrap().notation);
}

#[test]
fn sliding_piece_pin() {
    let game = game("4k3/8/4q3/8/8/8/4P3/4K3", Color::White, CastleStatus::NONE);

    // white is not checked, the white pawn is blocking the queen
    assert!(!game.is_check(Color::White));
}

#[test]
fn check_is_recorded_for_the_side_to_move() {
    let mut game = Game::new();
    play(&mut game, &["e2e4", "f7f6", "d1h5"]);
    assert!(game.is_check(Color::Black));
    assert!(!game.is_check(Color::White));
    assert!(!game.is_game_over());
    assert_eq!("Qh5+", game.last_move().unwrap().notation);

    // the only answer is to block.
    let answers: Vec<_> = game.legal_moves().iter().map(|m| m.to_string()).collect();
    assert_eq!(vec!["g7g6"], answers);
}

#[test]
fn stalemate_smoke() {
    let game = game("7k/5K2/6Q1/8/8/8/8/8", Color::Black, CastleStatus::NONE);

    // black's turn to move. black is not in check but black has no legal moves.
    assert!(game.is_game_over());
    assert!(!game.is_check(Color::Black));
    assert_eq!(Some(GameOverReason::Stalemate), game.game_over_reason());
    assert_eq!(None, game.winner());
}

#[test]
fn stalemate_by_move() {
    let mut game = game("7k/5K2/8/6Q1/8/8/8/8", Color::White, CastleStatus::NONE);
    play(&mut game, &["g5g6"]);
    assert_eq!(Some(GameOverReason::Stalemate), game.game_over_reason());
    assert_eq!("Qg6", game.last_move().unwrap().notation);
}

#[test]
fn game_over_is_terminal() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(Err(ChessError::GameOver), game.make_move(sq("a2"), sq("a3")));
    assert!(game.is_game_over());
    assert_eq!(4, game.history().len());
}

#[test]
fn undo_after_mate_resumes_play() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    game.undo().unwrap();
    assert!(!game.is_game_over());
    assert_eq!(Color::Black, game.side_to_move());
    assert!(!game.is_check(Color::White));
}

#[test]
fn reset_after_mate() {
    let mut game = Game::new();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    game.reset();
    assert!(!game.is_game_over());
    assert_eq!(Position::new(), *game.position());
}

#[test]
fn custom_positions_need_one_king_each() {
    let pos = position("8/8/8/8/8/8/8/4K3", Color::White, CastleStatus::NONE);
    assert_eq!(
        Err(ChessError::KingCount {
            color: Color::Black,
            count: 0
        }),
        Game::from_position(pos).map(|_| ())
    );

    let pos = position("4k3/8/8/8/8/8/8/3KK3", Color::White, CastleStatus::NONE);
    assert_eq!(
        Err(ChessError::KingCount {
            color: Color::White,
            count: 2
        }),
        Game::from_position(pos).map(|_| ())
    );
}

#[test]
fn side_not_to_move_cannot_be_in_check() {
    let pos = position("4k3/8/8/8/8/8/8/4K2R", Color::Black, CastleStatus::NONE);
    assert!(Game::from_position(pos).is_ok());

    let pos = position("4k3/8/8/8/8/8/8/4R2K", Color::White, CastleStatus::NONE);
    assert_eq!(
        Err(ChessError::OpponentInCheck(Color::Black)),
        Game::from_position(pos).map(|_| ())
    );
}
