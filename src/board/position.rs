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

#[cfg(feature = "serde")]
use serde::ser::SerializeTuple;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use super::attacks::Attacks;
use super::castling::CastlingRights;
use super::legal::LegalMoves;
use super::material::{Color, Pair, Piece, PieceKind};
use super::moves::{Move, MoveKind};
use super::square::{File, Mask, Offset, Rank, Square};
use super::Turn;
use crate::game::{DrawReason, GameResult, GameStatus, WinReason};

use Color::*;
use PieceKind::*;

/// The contents of all 64 squares, indexed by `Square::to_index()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Squares([Option<Piece>; 64]);

impl Squares {
    fn empty() -> Self {
        Self([None; 64])
    }
}

impl Index<Square> for Squares {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.0[index.to_index()]
    }
}

impl IndexMut<Square> for Squares {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.0[index.to_index()]
    }
}

// serde's derives stop at 32-element arrays, so the board goes out as a
// 64-element tuple.
#[cfg(feature = "serde")]
impl Serialize for Squares {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut tuple = serializer.serialize_tuple(64)?;
        for square in self.0.iter() {
            tuple.serialize_element(square)?;
        }
        tuple.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Squares {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquaresVisitor;
        impl<'de> serde::de::Visitor<'de> for SquaresVisitor {
            type Value = Squares;
            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a board of 64 optional pieces")
            }
            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::SeqAccess<'de>,
            {
                let mut squares = Squares::empty();
                for (i, square) in squares.0.iter_mut().enumerate() {
                    *square = seq
                        .next_element()?
                        .ok_or_else(|| serde::de::Error::invalid_length(i, &self))?;
                }
                Ok(squares)
            }
        }
        deserializer.deserialize_tuple(64, SquaresVisitor)
    }
}

/// An immutable snapshot of a game. New positions are only ever produced
/// by `apply_move` (or by `Setup` for arbitrary layouts); nothing mutates
/// a position once it has been handed out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    squares: Squares,
    turn: Color,
    castling: Pair<CastlingRights>,
    en_passant: Option<Square>,
    half_move_clock: u16,
    full_move_number: u16,
    last_move: Option<Move>,
    captured: Vec<Piece>,
    check: bool,
    checkmate: bool,
    stalemate: bool,
    draw: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl Position {
    /// The standard starting position with White to move.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut pos = Self::empty();
        for color in Color::iter() {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                pos.place(Square::new(file, Rank::back_rank(color)), Piece::new(color, kind));
                pos.place(Square::new(file, Rank::pawn_rank(color)), Piece::new(color, Pawn));
            }
        }
        pos.castling = Pair::default();
        pos
    }

    /// A bare board: no pieces, White to move, no castling rights.
    pub(super) fn empty() -> Self {
        Self {
            squares: Squares::empty(),
            turn: White,
            castling: Pair::new(CastlingRights::none(), CastlingRights::none()),
            en_passant: None,
            half_move_clock: 0,
            full_move_number: 1,
            last_move: None,
            captured: Vec::new(),
            check: false,
            checkmate: false,
            stalemate: false,
            draw: false,
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square]
    }
    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.squares[square].is_none()
    }
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.turn
    }
    #[inline]
    pub fn castling_rights(&self, color: Color) -> CastlingRights {
        self.castling[color]
    }
    /// The square a pawn skipped over on the previous move, if that move
    /// was a double advance.
    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }
    #[inline]
    pub fn half_move_clock(&self) -> u16 {
        self.half_move_clock
    }
    #[inline]
    pub fn full_move_number(&self) -> u16 {
        self.full_move_number
    }
    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }
    /// Every piece captured so far, in capture order.
    #[inline]
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }
    #[inline]
    pub fn is_check(&self) -> bool {
        self.check
    }
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }
    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }
    /// Repetition, the fifty-move rule and insufficient material are not
    /// tracked, so this never becomes true.
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.draw
    }

    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate
        } else if self.stalemate {
            GameStatus::Stalemate
        } else if self.check {
            GameStatus::Check
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        if self.checkmate {
            Some(GameResult::Win(!self.turn, WinReason::Checkmate))
        } else if self.stalemate {
            Some(GameResult::Draw(DrawReason::Stalemate))
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.checkmate || self.stalemate
    }

    /// Squares holding `color`'s pieces, scanned from a1 to h8.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| match self.squares[square] {
            Some(piece) if piece.color() == color => Some((square, piece)),
            _ => None,
        })
    }

    pub fn occupied(&self) -> Mask {
        Mask::from_squares(Square::iter().filter(|square| self.squares[*square].is_some()))
    }

    pub fn piece_count(&self) -> usize {
        self.squares.0.iter().flatten().count()
    }

    #[inline]
    pub(super) fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square] = Some(piece);
    }

    #[inline]
    pub(super) fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square].take()
    }

    pub(super) fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    pub(super) fn set_castling(&mut self, color: Color, rights: CastlingRights) {
        self.castling[color] = rights;
    }

    pub(super) fn set_en_passant(&mut self, en_passant: Option<Square>) {
        self.en_passant = en_passant;
    }

    pub(super) fn set_counters(&mut self, half_move_clock: u16, full_move_number: u16) {
        self.half_move_clock = half_move_clock;
        self.full_move_number = full_move_number;
    }

    /// Moves pieces on the board and hands the turn over. Castling rights,
    /// the en passant target, counters and status flags are left alone;
    /// the legal move filter relies on that to avoid recursing into status
    /// detection. Returns the captured piece, if any.
    pub(super) fn apply_raw(&mut self, mv: &Move) -> Option<Piece> {
        let Some(piece) = self.remove(mv.from) else {
            return None;
        };
        let color = piece.color();

        if let Some(side) = mv.kind.castle_side() {
            if let Some(rook) = self.remove(side.rook_src(color)) {
                self.place(side.rook_dest(color), rook.moved());
            }
        }

        let captured = match mv.kind {
            MoveKind::EnPassant => {
                let victim = Square::new(mv.to.file(), mv.from.rank());
                self.remove(victim)
            }
            _ => self.remove(mv.to),
        };

        let arriving = match mv.kind {
            MoveKind::Promotion => piece.promoted(Queen),
            _ => piece,
        };
        self.place(mv.to, arriving.moved());
        self.turn = !self.turn;
        captured
    }

    /// Commits `mv` and returns the resulting position. `mv` is trusted to
    /// come from `legal_moves`; a move from an empty square yields an
    /// unchanged copy.
    pub fn apply_move(&self, mv: &Move) -> Position {
        if self.squares[mv.from].is_none() {
            return self.clone();
        }
        let mut next = self.advance(mv);
        trace!(from = %mv.from, to = %mv.to, kind = ?mv.kind, "applied move");
        next.refresh_status();
        next
    }

    /// Everything `apply_move` does except recomputing the status flags.
    pub(super) fn advance(&self, mv: &Move) -> Position {
        let mut next = self.clone();
        let Some(piece) = self.squares[mv.from] else {
            return next;
        };
        let color = piece.color();

        let captured = next.apply_raw(mv);
        if let Some(victim) = captured {
            next.captured.push(victim);
        }

        if piece.kind().is_king() {
            next.castling[color].clear();
        }
        next.castling[color].update(mv.from, color);
        next.castling[!color].update(mv.to, !color);

        next.en_passant = if mv.is_double_advance() {
            mv.from + Offset::new(0, color.forward())
        } else {
            None
        };

        if piece.kind().is_pawn() || captured.is_some() {
            next.half_move_clock = 0;
        } else {
            next.half_move_clock = next.half_move_clock.saturating_add(1);
        }
        if color == Black {
            next.full_move_number = next.full_move_number.saturating_add(1);
        }
        next.last_move = Some(*mv);
        next
    }

    /// Recomputes check, checkmate and stalemate for the side to move.
    pub(super) fn refresh_status(&mut self) {
        let turn = self.turn;
        self.check = self.is_in_check(turn);
        let stuck = !self.has_legal_moves();
        self.checkmate = self.check && stuck;
        self.stalemate = !self.check && stuck;
        if self.checkmate {
            let winner = !turn;
            debug!(%winner, "checkmate");
        } else if self.stalemate {
            debug!(side = %turn, "stalemate");
        } else if self.check {
            debug!(side = %turn, "check");
        }
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Rank 8 at the top, `.` for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.squares[Square::new(file, rank)] {
                    Some(piece) => write!(f, "{piece}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
