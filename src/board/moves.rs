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

use once_cell::sync::Lazy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::Index;
use strum::IntoEnumIterator;

use super::attacks::Attacks;
use super::castling::CastleSide;
use super::material::{Color, Piece, PieceKind};
use super::position::Position;
use super::square::{ray, Direction, Mask, Offset, Rank, Square};
use super::Turn;

use Color::*;
use PieceKind::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MoveKind {
    Normal,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion,
}

impl MoveKind {
    #[inline]
    pub fn castle_side(&self) -> Option<CastleSide> {
        match self {
            MoveKind::CastleKingside => Some(CastleSide::Kingside),
            MoveKind::CastleQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }
    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castle_side().is_some()
    }
}

impl From<CastleSide> for MoveKind {
    fn from(value: CastleSide) -> Self {
        match value {
            CastleSide::Kingside => MoveKind::CastleKingside,
            CastleSide::Queenside => MoveKind::CastleQueenside,
        }
    }
}

/// A transition proposed by the move generator. `piece` is the piece as
/// it stood before moving; `captured` is only set for ordinary and
/// en passant captures (never for the rook that takes part in a castle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            kind,
        }
    }
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
    /// True for a pawn's two-square advance from its starting rank.
    #[inline]
    pub fn is_double_advance(&self) -> bool {
        self.piece.kind().is_pawn() && (self.to.rank() - self.from.rank()).abs() == 2
    }
    /// The square whose piece is removed by this move, if any. Differs from
    /// `to` only for en passant.
    pub fn capture_square(&self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant => Some(Square::new(self.to.file(), self.from.rank())),
            _ if self.captured.is_some() => Some(self.to),
            _ => None,
        }
    }
}

/// The moves available to a single piece, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }
    pub fn len(&self) -> usize {
        self.moves.len()
    }
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
    /// Every destination square, for move hints.
    pub fn destinations(&self) -> Mask {
        Mask::from_squares(self.moves.iter().map(|mv| mv.to))
    }
    pub fn get(&self, dest: Square) -> Option<&Move> {
        self.moves.iter().find(|mv| mv.to == dest)
    }
    pub fn contains(&self, dest: Square) -> bool {
        self.get(dest).is_some()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
    pub fn retain<F: FnMut(&Move) -> bool>(&mut self, f: F) {
        self.moves.retain(f);
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for MoveList {
    type Output = Move;
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

/// Moves that obey piece geometry and occupancy but may leave the
/// mover's own king in check.
pub trait PseudoMoves: AsRef<Position> + Attacks {
    /// Empty unless `from` holds a piece of the side to move.
    fn pseudo_moves(&self, from: Square) -> MoveList {
        let pos: &Position = self.as_ref();
        match pos[from] {
            Some(piece) if piece.color() == pos.turn() => match piece.kind() {
                King => self.king_moves(from, piece),
                Queen => self.line_moves(from, piece, Direction::iter()),
                Rook => self.line_moves(from, piece, Direction::horizontals()),
                Bishop => self.line_moves(from, piece, Direction::diagonals()),
                Knight => self.knight_moves(from, piece),
                Pawn => self.pawn_moves(from, piece),
            },
            _ => MoveList::new(),
        }
    }

    fn king_moves(&self, from: Square, piece: Piece) -> MoveList {
        let mut result = self.step_moves(from, piece, KING_MOVES[from]);
        for side in CastleSide::iter() {
            if let Some(mv) = self.castle_move(from, piece, side) {
                result.push(mv);
            }
        }
        result
    }

    /// The king may not castle out of check, across an occupied square or
    /// through an attacked square. The destination square is left to the
    /// legal move filter.
    fn castle_move(&self, from: Square, piece: Piece, side: CastleSide) -> Option<Move> {
        let pos: &Position = self.as_ref();
        let color = piece.color();
        if !pos.castling_rights(color).allows(side) || from != CastleSide::king_src(color) {
            return None;
        }
        let rook_home = pos[side.rook_src(color)];
        if !rook_home.is_some_and(|rook| rook.is(color, Rook)) {
            return None;
        }
        if !(side.lane(color) & pos.occupied()).is_empty() {
            return None;
        }
        if self.is_in_check(color) || self.is_attacked(side.transit(color), color) {
            return None;
        }
        Some(Move::new(from, side.king_dest(color), piece, None, side.into()))
    }

    fn line_moves<I>(&self, from: Square, piece: Piece, directions: I) -> MoveList
    where
        I: Iterator<Item = Direction>,
    {
        let pos: &Position = self.as_ref();
        let mut result = MoveList::new();
        for dir in directions {
            for dest in ray(from, dir) {
                match pos[dest] {
                    None => result.push(Move::new(from, dest, piece, None, MoveKind::Normal)),
                    Some(target) => {
                        if target.color() != piece.color() {
                            result.push(Move::new(from, dest, piece, Some(target), MoveKind::Normal));
                        }
                        break;
                    }
                }
            }
        }
        result
    }

    fn knight_moves(&self, from: Square, piece: Piece) -> MoveList {
        self.step_moves(from, piece, KNIGHT_MOVES[from])
    }

    /// Single-step moves onto each square in `destinations` that is empty
    /// or holds an enemy piece.
    fn step_moves(&self, from: Square, piece: Piece, destinations: Mask) -> MoveList {
        let pos: &Position = self.as_ref();
        destinations
            .iter()
            .filter_map(|dest| match pos[dest] {
                None => Some(Move::new(from, dest, piece, None, MoveKind::Normal)),
                Some(target) if target.color() != piece.color() => {
                    Some(Move::new(from, dest, piece, Some(target), MoveKind::Normal))
                }
                Some(_) => None,
            })
            .collect()
    }

    fn pawn_moves(&self, from: Square, piece: Piece) -> MoveList {
        let pos: &Position = self.as_ref();
        let color = piece.color();
        let promotes = |dest: Square| {
            if dest.rank() == Rank::promotion_rank(color) {
                MoveKind::Promotion
            } else {
                MoveKind::Normal
            }
        };
        let mut result = MoveList::new();

        let forward = Offset::new(0, color.forward());
        if let Some(one) = from + forward {
            if pos.is_vacant(one) {
                result.push(Move::new(from, one, piece, None, promotes(one)));
                if from.rank() == Rank::pawn_rank(color) {
                    if let Some(two) = one + forward {
                        if pos.is_vacant(two) {
                            result.push(Move::new(from, two, piece, None, MoveKind::Normal));
                        }
                    }
                }
            }
        }

        for dest in pawn_attacks(color)[from].iter() {
            match pos[dest] {
                Some(target) if target.color() != color => {
                    result.push(Move::new(from, dest, piece, Some(target), promotes(dest)));
                }
                Some(_) => {}
                None if pos.en_passant_target() == Some(dest) => {
                    // the pawn being taken sits beside us, behind the target
                    let victim = pos[Square::new(dest.file(), from.rank())];
                    result.push(Move::new(from, dest, piece, victim, MoveKind::EnPassant));
                }
                None => {}
            }
        }
        result
    }
}

impl PseudoMoves for Position {}

#[inline]
pub(super) fn pawn_attacks(color: Color) -> &'static [Mask; 64] {
    match color {
        White => &*WHITE_PAWN_ATTACKS,
        Black => &*BLACK_PAWN_ATTACKS,
    }
}

pub(super) static KING_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] = Mask::from_squares(Direction::iter().filter_map(|dir| square + dir));
    }
    array
});

pub(super) static KNIGHT_MOVES: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

// Squares a pawn standing on each square attacks. Every rank is filled in
// so the attack detector can look backwards from any target square.
static WHITE_PAWN_ATTACKS: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 2] = [Offset::new(-1, 1), Offset::new(1, 1)];
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

static BLACK_PAWN_ATTACKS: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 2] = [Offset::new(-1, -1), Offset::new(1, -1)];
    let mut array = [Mask::default(); 64];
    for square in Square::iter() {
        array[square] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});

#[cfg(test)]
mod tests {
    use crate::*;
    use Square::*;

    fn kind_to(moves: &MoveList, dest: Square) -> Option<MoveKind> {
        moves.get(dest).map(|mv| mv.kind)
    }

    #[test]
    fn test_white_can_move_first() {
        let pos = Position::initial();
        assert_eq!(pos.pseudo_moves(E2).len(), 2);
    }
    #[test]
    fn test_black_cannot_move_first() {
        let pos = Position::initial();
        assert!(pos.pseudo_moves(E7).is_empty());
    }
    #[test]
    fn test_empty_square_has_no_moves() {
        let pos = Position::initial();
        assert!(pos.pseudo_moves(E4).is_empty());
    }
    #[test]
    fn test_knight_destinations() {
        let pos = Position::initial();
        let destinations = pos.pseudo_moves(G1).destinations();
        assert_eq!(destinations.len(), 2);
        assert!(destinations.contains(F3));
        assert!(destinations.contains(H3));
    }
    #[test]
    fn test_sliders_blocked_at_start() {
        let pos = Position::initial();
        for square in [A1, C1, D1, F1, H1] {
            assert!(pos.pseudo_moves(square).is_empty(), "{square}");
        }
    }
    #[test]
    fn test_pawn_double_advance_blocked() {
        let pos = Setup::from(&Position::initial())
            .piece(E4, Piece::BB)
            .build()
            .unwrap();
        let destinations = pos.pseudo_moves(E2).destinations();
        assert!(destinations.contains(E3));
        assert!(!destinations.contains(E4));
    }
    #[test]
    fn test_pawn_single_advance_blocked() {
        let pos = Setup::from(&Position::initial())
            .piece(E3, Piece::BN)
            .build()
            .unwrap();
        let destinations = pos.pseudo_moves(E2).destinations();
        assert!(!destinations.contains(E3));
        assert!(!destinations.contains(E4));
    }
    #[test]
    fn test_pawn_capture_records_victim() {
        let pos = Setup::from(&Position::initial())
            .piece(D3, Piece::BB)
            .piece(F3, Piece::WN)
            .build()
            .unwrap();
        let moves = pos.pseudo_moves(E2);
        let capture = moves.get(D3).unwrap();
        assert_eq!(capture.captured, Some(Piece::BB));
        assert_eq!(capture.kind, MoveKind::Normal);
        assert!(!moves.contains(F3));
    }
    #[test]
    fn test_pawn_promotions_flagged() {
        let pos = Setup::empty()
            .piece(E1, Piece::WK)
            .piece(H8, Piece::BK)
            .piece(B7, Piece::WP)
            .piece(A8, Piece::BR)
            .build()
            .unwrap();
        let moves = pos.pseudo_moves(B7);
        assert_eq!(moves.len(), 2);
        assert_eq!(kind_to(&moves, B8), Some(MoveKind::Promotion));
        assert_eq!(kind_to(&moves, A8), Some(MoveKind::Promotion));
        assert_eq!(moves.get(A8).unwrap().captured, Some(Piece::BR));
    }
    #[test]
    fn test_black_pawn_moves_down() {
        let pos = Setup::from(&Position::initial())
            .side_to_move(Color::Black)
            .build()
            .unwrap();
        let destinations = pos.pseudo_moves(D7).destinations();
        assert_eq!(destinations.len(), 2);
        assert!(destinations.contains(D6));
        assert!(destinations.contains(D5));
    }
    #[test]
    fn test_en_passant_offered_on_target() {
        let pos = Setup::empty()
            .piece(E1, Piece::WK)
            .piece(E8, Piece::BK)
            .piece(E5, Piece::WP.moved())
            .piece(D5, Piece::BP.moved())
            .en_passant(Some(D6))
            .build()
            .unwrap();
        let moves = pos.pseudo_moves(E5);
        let mv = moves.get(D6).unwrap();
        assert_eq!(mv.kind, MoveKind::EnPassant);
        assert_eq!(mv.captured.map(|p| p.kind()), Some(PieceKind::Pawn));
        assert_eq!(mv.capture_square(), Some(D5));
    }
    #[test]
    fn test_queen_rays_stop_at_blockers() {
        let pos = Setup::empty()
            .piece(A1, Piece::WK)
            .piece(H6, Piece::BK)
            .piece(D4, Piece::WQ)
            .piece(D6, Piece::BP)
            .piece(F4, Piece::WP)
            .build()
            .unwrap();
        let destinations = pos.pseudo_moves(D4).destinations();
        assert!(destinations.contains(D5));
        assert!(destinations.contains(D6));
        assert!(!destinations.contains(D7));
        assert!(destinations.contains(E4));
        assert!(!destinations.contains(F4));
        assert!(destinations.contains(H8));
        assert!(!destinations.contains(A1));
        assert_eq!(destinations.len(), 21);
    }
    #[test]
    fn test_castling_offered_when_lane_clear() {
        let pos = Setup::empty()
            .piece(E1, Piece::WK)
            .piece(H1, Piece::WR)
            .piece(A1, Piece::WR)
            .piece(E8, Piece::BK)
            .castling(Color::White, true, true)
            .build()
            .unwrap();
        let moves = pos.pseudo_moves(E1);
        assert_eq!(kind_to(&moves, G1), Some(MoveKind::CastleKingside));
        assert_eq!(kind_to(&moves, C1), Some(MoveKind::CastleQueenside));
    }
    #[test]
    fn test_castling_through_attacked_square() {
        let pos = Setup::empty()
            .piece(E1, Piece::WK)
            .piece(H1, Piece::WR)
            .piece(A1, Piece::WR)
            .piece(E8, Piece::BK)
            .piece(F8, Piece::BR)
            .castling(Color::White, true, true)
            .build()
            .unwrap();
        let moves = pos.pseudo_moves(E1);
        assert!(!moves.contains(G1));
        assert_eq!(kind_to(&moves, C1), Some(MoveKind::CastleQueenside));
    }
    #[test]
    fn test_no_castling_out_of_check() {
        let pos = Setup::empty()
            .piece(E1, Piece::WK)
            .piece(H1, Piece::WR)
            .piece(A1, Piece::WR)
            .piece(E8, Piece::BK)
            .piece(E5, Piece::BR)
            .castling(Color::White, true, true)
            .build()
            .unwrap();
        let moves = pos.pseudo_moves(E1);
        assert!(!moves.iter().any(|mv| mv.kind.is_castle()));
    }
    #[test]
    fn test_queenside_lane_includes_b_file() {
        let pos = Setup::empty()
            .piece(E1, Piece::WK)
            .piece(A1, Piece::WR)
            .piece(B1, Piece::WN)
            .piece(E8, Piece::BK)
            .castling(Color::White, false, true)
            .build()
            .unwrap();
        let moves = pos.pseudo_moves(E1);
        assert!(!moves.contains(C1));
    }
}
