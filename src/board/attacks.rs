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

use strum::IntoEnumIterator;

use super::material::{Color, PieceKind};
use super::moves::{pawn_attacks, KING_MOVES, KNIGHT_MOVES};
use super::position::Position;
use super::square::{ray, Direction, Square};

use PieceKind::*;

/// Attack detection works backwards from the target square: a square is
/// attacked by a piece of kind `K` if a `K` standing on that square could
/// reach an enemy `K`. Castling and en passant never attack anything.
pub trait Attacks: AsRef<Position> {
    /// True if any piece of the side opposing `defender` attacks `target`.
    fn is_attacked(&self, target: Square, defender: Color) -> bool {
        let pos: &Position = self.as_ref();
        let attacker = !defender;
        let holds = |square: Square, kinds: &[PieceKind]| {
            pos[square].is_some_and(|p| p.color() == attacker && kinds.contains(&p.kind()))
        };

        // a white pawn attacking `target` stands where a black pawn on
        // `target` would attack, and vice versa
        if pawn_attacks(defender)[target]
            .iter()
            .any(|square| holds(square, &[Pawn]))
        {
            return true;
        }
        if KNIGHT_MOVES[target].iter().any(|square| holds(square, &[Knight])) {
            return true;
        }
        if KING_MOVES[target].iter().any(|square| holds(square, &[King])) {
            return true;
        }

        Direction::iter().any(|dir| {
            let sliders: &[PieceKind] = if dir.is_diagonal() {
                &[Bishop, Queen]
            } else {
                &[Rook, Queen]
            };
            ray(target, dir)
                .find(|square| pos[*square].is_some())
                .is_some_and(|square| holds(square, sliders))
        })
    }

    /// The square of `color`'s king. `None` only for hand-built positions
    /// without one.
    fn king_square(&self, color: Color) -> Option<Square> {
        let pos: &Position = self.as_ref();
        Square::iter().find(|square| pos[*square].is_some_and(|p| p.is(color, King)))
    }

    /// False when `color` has no king on the board.
    fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(square) => self.is_attacked(square, color),
            None => false,
        }
    }
}

impl Attacks for Position {}
