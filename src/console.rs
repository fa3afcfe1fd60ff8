// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::io::{self, BufRead, Write};

use crate::error::ChessError;
use crate::game::{Game, GameOverReason, MoveOutcome};
use crate::types::{PieceKind, Square};

/// A line-oriented front end over a `Game`. Moves are entered in coordinate form (`e2e4`,
/// `e7e8q`); a promotion without a piece letter is resolved by the next line.
pub struct Console {
    game: Game,
    json: bool,
}

impl Console {
    pub fn new() -> Console {
        Console {
            game: Game::new(),
            json: false,
        }
    }

    /// Print the JSON snapshot after every command that changes the game.
    pub fn json(mut self, enabled: bool) -> Console {
        self.json = enabled;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn run<R, W>(&mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(&mut writer, "{}", self.game.position())?;
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            let changed = match components.split_first().unwrap_or((&"", &[])) {
                (&"", []) => false,
                (&"quit", []) => break,
                (&"board", []) => {
                    writeln!(&mut writer, "{}", self.game.position())?;
                    false
                }
                (&"json", []) => {
                    self.write_snapshot(&mut writer)?;
                    false
                }
                (&"moves", [square]) => {
                    self.handle_moves(&mut writer, square)?;
                    false
                }
                (&"undo", []) => self.handle_undo(&mut writer)?,
                (&"reset", []) => {
                    self.game.reset();
                    writeln!(&mut writer, "{}", self.game.position())?;
                    true
                }
                (&piece, []) if piece.len() == 1 && self.game.pending_promotion().is_some() => {
                    self.handle_promotion(&mut writer, piece)?
                }
                (&mov, []) if mov.len() == 4 || mov.len() == 5 => {
                    self.handle_move(&mut writer, mov)?
                }
                _ => {
                    writeln!(&mut writer, "unrecognized command")?;
                    false
                }
            };

            if changed && self.json {
                self.write_snapshot(&mut writer)?;
            }
        }

        Ok(())
    }

    fn handle_moves<W: Write>(&self, w: &mut W, name: &str) -> io::Result<()> {
        let square = match name.parse::<Square>() {
            Ok(square) => square,
            Err(e) => return writeln!(w, "error: {}", e),
        };

        let destinations: Vec<_> = self
            .game
            .valid_moves(square)
            .iter()
            .map(|m| m.destination().to_string())
            .collect();
        writeln!(w, "{}", destinations.join(" "))
    }

    fn handle_undo<W: Write>(&mut self, w: &mut W) -> io::Result<bool> {
        match self.game.undo() {
            Ok(()) => {
                writeln!(w, "{}", self.game.position())?;
                Ok(true)
            }
            Err(e) => {
                writeln!(w, "error: {}", e)?;
                Ok(false)
            }
        }
    }

    fn handle_move<W: Write>(&mut self, w: &mut W, text: &str) -> io::Result<bool> {
        let parsed = parse_move(text);
        let (from, to, promotion) = match parsed {
            Ok(parts) => parts,
            Err(e) => {
                writeln!(w, "error: {}", e)?;
                return Ok(false);
            }
        };

        match self.game.make_move(from, to) {
            Ok(MoveOutcome::Completed) => {
                self.write_status(w)?;
                Ok(true)
            }
            Ok(MoveOutcome::PromotionPending(square)) => match promotion {
                Some(kind) => self.promote(w, square, kind),
                None => {
                    writeln!(w, "promote to (q, r, b, n)?")?;
                    Ok(true)
                }
            },
            Err(e) => {
                writeln!(w, "error: {}", e)?;
                Ok(false)
            }
        }
    }

    fn handle_promotion<W: Write>(&mut self, w: &mut W, letter: &str) -> io::Result<bool> {
        let kind = letter.chars().next().map(PieceKind::try_from);
        match (self.game.pending_promotion(), kind) {
            (Some(square), Some(Ok(kind))) => self.promote(w, square, kind),
            _ => {
                writeln!(w, "promote to (q, r, b, n)?")?;
                Ok(false)
            }
        }
    }

    fn promote<W: Write>(
        &mut self,
        w: &mut W,
        square: Square,
        kind: PieceKind,
    ) -> io::Result<bool> {
        match self.game.promote_pawn(square, kind) {
            Ok(()) => {
                self.write_status(w)?;
                Ok(true)
            }
            Err(e) => {
                writeln!(w, "error: {}", e)?;
                writeln!(w, "promote to (q, r, b, n)?")?;
                Ok(false)
            }
        }
    }

    fn write_status<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if let Some(record) = self.game.last_move() {
            writeln!(w, "{}", record.notation)?;
        }

        match (self.game.game_over_reason(), self.game.winner()) {
            (Some(GameOverReason::Checkmate), Some(winner)) => {
                writeln!(w, "checkmate, {} wins", winner)
            }
            (Some(_), _) => writeln!(w, "stalemate"),
            (None, _) => {
                let side = self.game.side_to_move();
                if self.game.is_check(side) {
                    writeln!(w, "{} to move, in check", side)
                } else {
                    writeln!(w, "{} to move", side)
                }
            }
        }
    }

    fn write_snapshot<W: Write>(&self, w: &mut W) -> io::Result<()> {
        serde_json::to_writer(&mut *w, &self.game.snapshot())?;
        writeln!(w)
    }
}

impl Default for Console {
    fn default() -> Self {
        Console::new()
    }
}

/// Splits `e2e4` or `e7e8q` into its squares and optional promotion piece.
fn parse_move(text: &str) -> Result<(Square, Square, Option<PieceKind>), ChessError> {
    let bad_name = || ChessError::InvalidSquareName(text.to_owned());
    let from = text.get(0..2).ok_or_else(bad_name)?.parse()?;
    let to = text.get(2..4).ok_or_else(bad_name)?.parse()?;
    let promotion = match text.get(4..).and_then(|rest| rest.chars().next()) {
        Some(c) => Some(PieceKind::try_from(c).map_err(|_| bad_name())?),
        None => None,
    };

    Ok((from, to, promotion))
}
