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
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

use super::attacks::Attacks;
use super::castling::{CastleSide, CastlingRights};
use super::material::{Color, Piece, PieceKind};
use super::position::Position;
use super::square::{Offset, Rank, Square};
use super::Turn;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SetupError {
    #[error("{0} has no king")]
    MissingKing(Color),
    #[error("{0} has more than one king")]
    TooManyKings(Color),
    #[error("Pawn on the back rank at {0}")]
    PawnOnBackRank(Square),
    #[error("{0} is not a valid en passant target")]
    InvalidEnPassant(Square),
    #[error("The side not to move is in check")]
    OpponentInCheck,
}
use SetupError::*;

/// Builds positions other than the starting one, e.g. puzzles or saved
/// games. Pieces are placed as given; `build` checks the result can arise
/// in a game and computes its status.
#[derive(Debug, Clone)]
pub struct Setup {
    position: Position,
}

impl Setup {
    /// No pieces, White to move, no castling rights.
    pub fn empty() -> Self {
        Self {
            position: Position::empty(),
        }
    }

    pub fn piece(mut self, square: Square, piece: Piece) -> Self {
        self.position.place(square, piece);
        self
    }

    pub fn clear(mut self, square: Square) -> Self {
        self.position.remove(square);
        self
    }

    pub fn side_to_move(mut self, color: Color) -> Self {
        self.position.set_turn(color);
        self
    }

    pub fn castling(mut self, color: Color, kingside: bool, queenside: bool) -> Self {
        self.position
            .set_castling(color, CastlingRights::new(kingside, queenside));
        self
    }

    pub fn en_passant(mut self, target: Option<Square>) -> Self {
        self.position.set_en_passant(target);
        self
    }

    pub fn counters(mut self, half_move_clock: u16, full_move_number: u16) -> Self {
        self.position.set_counters(half_move_clock, full_move_number);
        self
    }

    pub fn build(self) -> Result<Position> {
        let mut pos = self.position;

        for color in Color::iter() {
            let kings = pos
                .pieces(color)
                .filter(|(_, piece)| piece.kind().is_king())
                .count();
            match kings {
                0 => return Err(reject(MissingKing(color))),
                1 => {}
                _ => return Err(reject(TooManyKings(color))),
            }
        }

        let stray_pawn = Square::iter().find(|square| {
            let back_rank = Color::iter().any(|color| square.rank().is_back_rank(color));
            back_rank && pos[*square].is_some_and(|piece| piece.kind().is_pawn())
        });
        if let Some(square) = stray_pawn {
            return Err(reject(PawnOnBackRank(square)));
        }

        if let Some(target) = pos.en_passant_target() {
            if !valid_en_passant(&pos, target) {
                return Err(reject(InvalidEnPassant(target)));
            }
        }

        if pos.is_in_check(!pos.turn()) {
            return Err(reject(OpponentInCheck));
        }

        for color in Color::iter() {
            let mut rights = pos.castling_rights(color);
            let king_home = pos[CastleSide::king_src(color)]
                .is_some_and(|piece| piece.is(color, PieceKind::King));
            if !king_home {
                rights.clear();
            }
            for side in CastleSide::iter() {
                let rook_home = pos[side.rook_src(color)]
                    .is_some_and(|piece| piece.is(color, PieceKind::Rook));
                if !rook_home {
                    rights.clear_side(side);
                }
            }
            pos.set_castling(color, rights);
        }

        pos.refresh_status();
        Ok(pos)
    }
}

impl From<&Position> for Setup {
    fn from(position: &Position) -> Self {
        Self {
            position: position.clone(),
        }
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::from(&Position::initial())
    }
}

fn reject(err: SetupError) -> anyhow::Error {
    debug!(%err, "rejected setup");
    err.into()
}

/// The target must sit directly behind an enemy pawn that could just have
/// made a double advance, on an empty square.
fn valid_en_passant(pos: &Position, target: Square) -> bool {
    let pusher = !pos.turn();
    if Some(target.rank()) != Rank::pawn_rank(pusher) + pusher.forward() {
        return false;
    }
    if !pos.is_vacant(target) {
        return false;
    }
    match target + Offset::new(0, pusher.forward()) {
        Some(square) => pos[square].is_some_and(|piece| piece.is(pusher, PieceKind::Pawn)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameStatus;
    use Color::*;
    use Square::*;

    fn error_of(setup: Setup) -> SetupError {
        *setup
            .build()
            .unwrap_err()
            .downcast_ref::<SetupError>()
            .unwrap()
    }

    fn kings() -> Setup {
        Setup::empty().piece(E1, Piece::WK).piece(E8, Piece::BK)
    }

    #[test]
    fn test_default_matches_initial() {
        let pos = Setup::default().build().unwrap();
        assert_eq!(pos, Position::initial());
    }
    #[test]
    fn test_missing_king() {
        let setup = Setup::empty().piece(E1, Piece::WK);
        assert_eq!(error_of(setup), MissingKing(Black));
    }
    #[test]
    fn test_too_many_kings() {
        let setup = kings().piece(A1, Piece::WK);
        assert_eq!(error_of(setup), TooManyKings(White));
    }
    #[test]
    fn test_pawn_on_back_rank() {
        let setup = kings().piece(C8, Piece::WP);
        assert_eq!(error_of(setup), PawnOnBackRank(C8));
        let setup = kings().piece(H1, Piece::BP);
        assert_eq!(error_of(setup), PawnOnBackRank(H1));
    }
    #[test]
    fn test_en_passant_checks() {
        let setup = kings().piece(D5, Piece::BP).en_passant(Some(D6));
        assert!(setup.build().is_ok());
        let setup = kings().piece(D5, Piece::BP).en_passant(Some(D3));
        assert_eq!(error_of(setup), InvalidEnPassant(D3));
        let setup = kings().en_passant(Some(D6));
        assert_eq!(error_of(setup), InvalidEnPassant(D6));
        let setup = kings()
            .piece(D4, Piece::WP)
            .side_to_move(Black)
            .en_passant(Some(D3));
        assert!(setup.build().is_ok());
    }
    #[test]
    fn test_opponent_in_check() {
        let setup = kings().piece(E4, Piece::WR);
        assert_eq!(error_of(setup), OpponentInCheck);
        let pos = kings()
            .piece(E4, Piece::WR)
            .side_to_move(Black)
            .build()
            .unwrap();
        assert!(pos.is_check());
        assert_eq!(pos.status(), GameStatus::Check);
    }
    #[test]
    fn test_castling_rights_need_pieces_home() {
        let pos = kings()
            .piece(H1, Piece::WR)
            .piece(A2, Piece::WR)
            .castling(White, true, true)
            .castling(Black, true, true)
            .build()
            .unwrap();
        assert_eq!(pos.castling_rights(White), CastlingRights::new(true, false));
        assert_eq!(pos.castling_rights(Black), CastlingRights::none());

        let pos = Setup::default().clear(A1).clear(H8).build().unwrap();
        assert!(pos[A1].is_none());
        assert_eq!(pos.castling_rights(White), CastlingRights::new(true, false));
        assert_eq!(pos.castling_rights(Black), CastlingRights::new(false, true));
    }
    #[test]
    fn test_status_computed() {
        // black king boxed in the corner with no moves
        let pos = Setup::empty()
            .piece(A8, Piece::BK)
            .piece(B6, Piece::WQ)
            .piece(C1, Piece::WK)
            .side_to_move(Black)
            .build()
            .unwrap();
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
        assert_eq!(pos.status(), GameStatus::Stalemate);
    }
}
