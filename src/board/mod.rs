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

//! Chess board rules for two human players
//!
//! A _board_ holds the state of a game of chess and knows which moves
//! the rules allow. The following features are supported:
//!
//! [x] Standard chess rules, including castling and en passant
//! [x] Automatic promotion to a queen
//! [x] Check, checkmate and stalemate detection
//! [x] Review prior positions
//! [x] Take backs
//! [ ] Under-promotion
//! [ ] Three-fold repetition, fifty-move rule, insufficient material
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square
//!   on an 8-by-8 board. The 8 rows and 8 columns on a board
//!   are represented by `Rank` (`Rank1` .. `Rank8`) and `File`
//!   (`FileA` .. `FileH`) respectively. Squares are named using the
//!   letter of the file followed by the number of the rank (`A1` ..
//!   `H8`) and can only be built from in-bounds coordinates.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Masks are handy for move hints: the
//!   destinations of every legal move of a piece fit in one mask.
//!
//! * A `Piece` has a `PieceKind` (`King`, `Queen`, `Rook`, `Bishop`,
//!   `Knight` or `Pawn`), a `Color` and a flag recording whether it has
//!   ever moved.
//!
//! * A `Position` holds the state of the board: the contents of each
//!   square, whose turn it is, castling rights, the en passant target,
//!   move counters and the check/checkmate/stalemate flags. Positions
//!   are values. `apply_move` never modifies the position it is called
//!   on; it returns the next one with all of its bookkeeping and status
//!   recomputed.
//!
//! * Moves are produced in two stages. `PseudoMoves` follows piece
//!   geometry, occupancy and the castling preconditions. `LegalMoves`
//!   then drops any move that would leave the mover's own king
//!   attacked, which `Attacks` determines by looking outwards from the
//!   king's square.
//!
//! * `Setup` builds positions other than the starting one and rejects
//!   layouts that cannot occur in a game.
//!
//! * `History` keeps every position of a game so that earlier positions
//!   can be reviewed through the `Review` and `ReviewMut` traits, and
//!   so moves can be taken back.
//!

mod attacks;
mod castling;
mod legal;
mod material;
mod moves;
mod position;
mod review;
mod setup;
mod square;

pub use attacks::*;
pub use castling::*;
pub use legal::*;
pub use material::*;
pub use moves::{Move, MoveKind, MoveList, PseudoMoves};
pub use position::*;
pub use review::*;
pub use setup::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Color;
}
