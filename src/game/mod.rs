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
use strum_macros::Display;
use tracing::{debug, info};

use crate::board::{
    Color, History, LegalMoves, Move, MoveError, MoveList, Position, Review, ReviewMut, Square,
    Turn,
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

impl GameResult {
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameResult::Win(color, _) => Some(*color),
            GameResult::Draw(_) => None,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WinReason {
    Checkmate,
    // reported by the clock, which lives outside this crate
    TimeExpired,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    Stalemate,
}

/// A two player game played from one position onwards. Moves are checked
/// against the legal move list before they are committed, and every
/// position reached is kept for review and take-backs.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "GameData", into = "GameData")
)]
pub struct Game {
    history: History,
    result: Option<GameResult>,
}

// Stored form of a `Game`. Only a lost clock is kept; every other result
// follows from the latest position.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GameData {
    history: History,
    time_expired: Option<Color>,
}

#[cfg(feature = "serde")]
impl From<Game> for GameData {
    fn from(game: Game) -> Self {
        let time_expired = match game.result {
            Some(GameResult::Win(winner, WinReason::TimeExpired)) => Some(!winner),
            _ => None,
        };
        Self {
            history: game.history,
            time_expired,
        }
    }
}

#[cfg(feature = "serde")]
impl From<GameData> for Game {
    fn from(data: GameData) -> Self {
        let mut game = Self {
            result: data.history.last().result(),
            history: data.history,
        };
        if let Some(color) = data.time_expired {
            game.time_expired(color);
        }
        game
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::initial())
    }

    /// Starts from an arbitrary position, typically one built by `Setup`.
    pub fn from_position(position: Position) -> Self {
        let result = position.result();
        Self {
            history: History::new(position),
            result,
        }
    }

    /// The latest position, regardless of which one is under review.
    #[inline]
    pub fn position(&self) -> &Position {
        self.history.last()
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.position().status()
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Legal moves for the piece on `from` in the latest position. Empty
    /// once the game has a result.
    pub fn legal_moves(&self, from: Square) -> MoveList {
        match self.result {
            Some(_) => MoveList::new(),
            None => self.position().legal_moves(from),
        }
    }

    /// Plays the legal move from `from` to `to` for the side to move.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<GameStatus> {
        if self.result.is_some() {
            debug!(%from, %to, "rejected move after game end");
            return Err(MoveError::GameOver.into());
        }
        let (mv, next) = self.position().try_apply_move(from, to)?;
        let status = next.status();
        if let Some(result) = next.result() {
            info!(?result, "game over");
            self.result = Some(result);
        }
        self.history.push(mv, next);
        Ok(status)
    }

    /// Takes back the latest move. Any result is recomputed from the
    /// position that becomes latest.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.history.undo()?;
        self.result = self.position().result();
        Some(mv)
    }

    /// Takes back every move after the position under review.
    pub fn take_back(&mut self) {
        self.history.truncate();
        self.result = self.position().result();
    }

    /// Records that `color` ran out of time. Ignored once the game already
    /// has a result.
    pub fn time_expired(&mut self, color: Color) {
        if self.result.is_none() {
            let result = GameResult::Win(!color, WinReason::TimeExpired);
            info!(?result, "game over");
            self.result = Some(result);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Color {
        self.position().turn()
    }
}

impl AsRef<Position> for Game {
    fn as_ref(&self) -> &Position {
        self.position()
    }
}

impl Review for Game {
    fn positions(&self) -> &[Position] {
        self.history.positions()
    }
    fn offset(&self) -> usize {
        self.history.offset()
    }
}

impl ReviewMut for Game {
    fn set_offset(&mut self, offset: usize) {
        self.history.set_offset(offset)
    }
}
