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

//! Rules of chess as a pure state machine: legal move generation, move
//! application and detection of check, checkmate and stalemate.
//!
//! ```
//! use board_rules::*;
//!
//! let mut game = Game::new();
//! game.submit_move(Square::F2, Square::F3).unwrap();
//! game.submit_move(Square::E7, Square::E5).unwrap();
//! game.submit_move(Square::G2, Square::G4).unwrap();
//! let status = game.submit_move(Square::D8, Square::H4).unwrap();
//! assert_eq!(status, GameStatus::Checkmate);
//! ```

mod board;
mod game;

pub use board::*;
pub use game::*;
