// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use anyhow::Result;
use thiserror::Error;
use tracing::debug;

use super::attacks::Attacks;
use super::moves::{Move, MoveList, PseudoMoves};
use super::position::Position;
use super::square::Square;
use super::Turn;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("No piece on {0}")]
    NoPiece(Square),
    #[error("The piece on {0} does not belong to the side to move")]
    NotYourTurn(Square),
    #[error("Not a legal move: {from} to {to}")]
    IllegalMove { from: Square, to: Square },
    #[error("The game is over")]
    GameOver,
}
use MoveError::*;

pub trait LegalMoves: PseudoMoves {
    /// Pseudo-legal moves from `from` that do not leave the mover's own
    /// king attacked. Each candidate is played on a scratch copy with the
    /// raw apply step, then the king of the side that moved is checked.
    fn legal_moves(&self, from: Square) -> MoveList {
        let pos: &Position = self.as_ref();
        let mut moves = self.pseudo_moves(from);
        moves.retain(|mv| leaves_king_safe(pos, mv));
        moves
    }

    /// Every legal move for the side to move, scanning squares a1 to h8.
    fn all_legal_moves(&self) -> Vec<Move> {
        let pos: &Position = self.as_ref();
        pos.pieces(pos.turn())
            .flat_map(|(square, _)| self.legal_moves(square))
            .collect()
    }

    /// Stops at the first legal move found.
    fn has_legal_moves(&self) -> bool {
        let pos: &Position = self.as_ref();
        pos.pieces(pos.turn()).any(|(square, _)| {
            self.pseudo_moves(square)
                .iter()
                .any(|mv| leaves_king_safe(pos, mv))
        })
    }

    /// Looks up the legal move from `from` to `to`, explaining why there
    /// isn't one.
    fn validate_move(&self, from: Square, to: Square) -> Result<Move> {
        let pos: &Position = self.as_ref();
        if pos.is_terminal() {
            debug!(%from, %to, "rejected move after game end");
            return Err(GameOver.into());
        }
        let Some(piece) = pos[from] else {
            debug!(%from, "rejected move from empty square");
            return Err(NoPiece(from).into());
        };
        if piece.color() != pos.turn() {
            debug!(%from, color = %piece.color(), "rejected move out of turn");
            return Err(NotYourTurn(from).into());
        }
        match self.legal_moves(from).get(to) {
            Some(mv) => Ok(*mv),
            None => {
                debug!(%from, %to, "rejected illegal move");
                Err(IllegalMove { from, to }.into())
            }
        }
    }

    /// `validate_move` followed by `apply_move`.
    fn try_apply_move(&self, from: Square, to: Square) -> Result<(Move, Position)> {
        let mv = self.validate_move(from, to)?;
        let pos: &Position = self.as_ref();
        Ok((mv, pos.apply_move(&mv)))
    }
}

impl LegalMoves for Position {}

fn leaves_king_safe(pos: &Position, mv: &Move) -> bool {
    let mover = mv.piece.color();
    let mut scratch = pos.clone();
    scratch.apply_raw(mv);
    !scratch.is_in_check(mover)
}

/// Counts the leaf nodes of the legal move tree `depth` plies deep.
pub fn perft(pos: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.all_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|mv| perft(&pos.advance(mv), depth - 1))
        .sum()
}
