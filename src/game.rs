// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::error::ChessError;
use crate::history::MoveRecord;
use crate::moves::{Move, MoveVec};
use crate::position::Position;
use crate::types::TableIndex;
use crate::types::{Color, Piece, PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    Checkmate,
    Stalemate,
}

/// What `Game::make_move` did with a legal move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is complete and the other side is to move.
    Completed,
    /// A pawn reached the last rank on the given square. The turn does not pass until
    /// `Game::promote_pawn` is called.
    PromotionPending(Square),
}

impl MoveOutcome {
    pub fn is_promotion(self) -> bool {
        match self {
            MoveOutcome::PromotionPending(_) => true,
            MoveOutcome::Completed => false,
        }
    }
}

/// A game in progress: the current position plus the move log, the captured pieces and the
/// termination state. All mutation goes through `make_move`, `promote_pawn`, `undo` and
/// `reset`; a call that returns an error leaves the game untouched.
#[derive(Clone, Debug)]
pub struct Game {
    initial: Position,
    position: Position,
    history: Vec<MoveRecord>,
    captured: [Vec<Piece>; 2],
    pending_promotion: Option<Square>,
    game_over: Option<GameOverReason>,
}

impl Game {
    /// A new game from the standard starting position.
    pub fn new() -> Game {
        Game::start(Position::new())
    }

    /// A new game from a hand-built position. Fails unless each side has exactly one king and
    /// the side not to move is out of check. The position may already be terminal.
    pub fn from_position(mut position: Position) -> Result<Game, ChessError> {
        position.sync()?;
        Ok(Game::start(position))
    }

    fn start(position: Position) -> Game {
        let mut game = Game {
            initial: position.clone(),
            position,
            history: vec![],
            captured: [vec![], vec![]],
            pending_promotion: None,
            game_over: None,
        };
        game.detect_termination();
        game
    }

    /// Back to the standard starting position, whatever position this game began from.
    pub fn reset(&mut self) {
        info!("resetting game after {} moves", self.history.len());
        *self = Game::new();
    }
}

//
// Observable state
//

impl Game {
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Whether `color`'s king was in check after the last completed move.
    pub fn is_check(&self, color: Color) -> bool {
        self.position.check_state(color)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over
    }

    /// The side that delivered checkmate, if the game ended that way.
    pub fn winner(&self) -> Option<Color> {
        match self.game_over {
            Some(GameOverReason::Checkmate) => Some(self.side_to_move().toggle()),
            _ => None,
        }
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Pieces captured by `color`, in the order they were taken.
    pub fn captured_by(&self, color: Color) -> &[Piece] {
        &self.captured[color.as_index()]
    }

    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// The legal moves of the piece on `square`. Empty for empty squares, for pieces of the side
    /// not to move, and while a promotion is pending.
    pub fn valid_moves(&self, square: Square) -> MoveVec {
        if self.pending_promotion.is_some() {
            return MoveVec::new();
        }

        self.position.legal_moves(square)
    }

    /// Every legal move of the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.pending_promotion.is_some() {
            return vec![];
        }

        self.position.all_legal_moves()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: *self.board().rows(),
            side_to_move: self.side_to_move(),
            check: ByColor {
                white: self.is_check(Color::White),
                black: self.is_check(Color::Black),
            },
            game_over: self.is_game_over(),
            game_over_reason: self.game_over,
            winner: self.winner(),
            pending_promotion: self.pending_promotion,
            en_passant_square: self.position.en_passant_square(),
            history: self.history.clone(),
            captured: ByColor {
                white: self.captured_by(Color::White).to_vec(),
                black: self.captured_by(Color::Black).to_vec(),
            },
        }
    }
}

//
// Move execution
//

impl Game {
    /// Plays the piece on `from` to `to`. The destination must be one of `valid_moves(from)`.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, ChessError> {
        if self.is_game_over() {
            debug!("rejecting {}{}: game is over", from, to);
            return Err(ChessError::GameOver);
        }

        if let Some(square) = self.pending_promotion {
            debug!("rejecting {}{}: promotion pending on {}", from, to, square);
            return Err(ChessError::PromotionPending(square));
        }

        let illegal = ChessError::IllegalMove { from, to };
        let piece = self.position.piece_at(from).ok_or_else(|| illegal.clone())?;
        let mov = self
            .position
            .legal_moves(from)
            .into_iter()
            .find(|m| m.destination() == to)
            .ok_or_else(|| {
                debug!("rejecting {}{}: not a legal move", from, to);
                illegal
            })?;

        let captured = self.position.apply_move(mov);
        if let Some(taken) = captured {
            self.captured[piece.color.as_index()].push(taken);
        }

        let record = MoveRecord::new(piece, mov, captured);
        debug!("{} plays {} ({})", piece.color, record.notation, mov);
        self.history.push(record);

        if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
            debug!("promotion pending on {}", to);
            self.pending_promotion = Some(to);
            return Ok(MoveOutcome::PromotionPending(to));
        }

        self.complete_turn();
        Ok(MoveOutcome::Completed)
    }

    /// Resolves a pending promotion by replacing the pawn on `square` with a piece of `kind`
    /// (queen, rook, bishop or knight), then passes the turn.
    pub fn promote_pawn(&mut self, square: Square, kind: PieceKind) -> Result<(), ChessError> {
        if self.is_game_over() {
            return Err(ChessError::GameOver);
        }

        match self.pending_promotion {
            None => return Err(ChessError::NoPromotionPending),
            Some(pending) if pending != square => {
                return Err(ChessError::PromotionSquareMismatch(square))
            }
            Some(_) => {}
        }

        if !kind.is_promotion_target() {
            return Err(ChessError::InvalidPromotion(kind));
        }

        // The turn has not passed yet, so the pawn belongs to the side to move.
        let color = self.side_to_move();
        self.position.replace_piece(square, Piece::new(kind, color));
        if let Some(record) = self.history.last_mut() {
            record.set_promotion(kind);
        }

        debug!("{} promotes on {} to {}", color, square, kind);
        self.pending_promotion = None;
        self.complete_turn();
        Ok(())
    }

    /// Takes back the last move (or the pending half of a promotion) by replaying the rest of
    /// the history from the position this game started from.
    pub fn undo(&mut self) -> Result<(), ChessError> {
        let (_, kept) = self
            .history
            .split_last()
            .ok_or(ChessError::NothingToUndo)?;

        let mut replay = Game::start(self.initial.clone());
        for record in kept {
            let mov = record.as_move();
            replay.make_move(mov.source(), mov.destination())?;
            if let Some(kind) = record.promotion {
                replay.promote_pawn(record.to, kind)?;
            }
        }

        debug!("undo: replayed {} moves", kept.len());
        *self = replay;
        Ok(())
    }

    fn complete_turn(&mut self) {
        self.position.end_turn();
        self.detect_termination();

        let side = self.side_to_move();
        if self.position.check_state(side) {
            let mate = self.game_over == Some(GameOverReason::Checkmate);
            if let Some(record) = self.history.last_mut() {
                record.mark_check(mate);
            }
        }
    }

    /// Ends the game if the side to move has no legal move: checkmate if its king is in
    /// check, stalemate otherwise. Once set, the result stays until `reset` or `undo`.
    fn detect_termination(&mut self) {
        if self.game_over.is_some() || self.position.has_legal_moves() {
            return;
        }

        let side = self.side_to_move();
        let reason = if self.position.check_state(side) {
            GameOverReason::Checkmate
        } else {
            GameOverReason::Stalemate
        };

        info!("game over: {:?}, {} to move", reason, side);
        self.game_over = Some(reason);
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

/// A value for each color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ByColor<T> {
    pub white: T,
    pub black: T,
}

/// Everything a renderer needs, in a serializable form.
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    /// Row 0 (rank 8) first; `None` for empty squares.
    pub board: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub check: ByColor<bool>,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    pub winner: Option<Color>,
    pub pending_promotion: Option<Square>,
    pub en_passant_square: Option<Square>,
    pub history: Vec<MoveRecord>,
    pub captured: ByColor<Vec<Piece>>,
}
