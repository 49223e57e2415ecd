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
use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

use super::material::{Color, Piece};
use super::moves::Move;
use super::position::Position;
use super::square::Square;
use super::Turn;

/// Read access to a sequence of positions with a cursor. Offset 0 is the
/// starting position; offset `n` is the position after the `n`th move.
/// Implementors always hold at least one position.
#[allow(clippy::len_without_is_empty)]
pub trait Review {
    fn positions(&self) -> &[Position];
    fn offset(&self) -> usize;

    #[inline]
    fn len(&self) -> usize {
        self.positions().len()
    }
    #[inline]
    fn get(&self, offset: usize) -> Option<&Position> {
        self.positions().get(offset)
    }
    #[inline]
    fn at_start(&self) -> bool {
        self.offset() == 0
    }
    #[inline]
    fn at_end(&self) -> bool {
        self.offset() + 1 == self.len()
    }
    #[inline]
    fn first(&self) -> &Position {
        &self.positions()[0]
    }
    #[inline]
    fn last(&self) -> &Position {
        &self.positions()[self.len() - 1]
    }
    #[inline]
    fn current(&self) -> &Position {
        &self.positions()[self.offset()]
    }
}

pub trait ReviewMut: Review {
    fn set_offset(&mut self, offset: usize);

    #[inline]
    fn forward(&mut self) {
        if !self.at_end() {
            self.set_offset(self.offset() + 1);
        }
    }
    #[inline]
    fn back(&mut self) {
        if !self.at_start() {
            self.set_offset(self.offset() - 1);
        }
    }
    #[inline]
    fn skip_to_start(&mut self) {
        self.set_offset(0);
    }
    #[inline]
    fn skip_to_end(&mut self) {
        self.set_offset(self.len() - 1);
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History holds no positions")]
    Empty,
    #[error("{moves} moves cannot connect {positions} positions")]
    MoveCount { moves: usize, positions: usize },
    #[error("Offset {offset} is past the last of {positions} positions")]
    OffsetOutOfRange { offset: usize, positions: usize },
}

/// Every position of a game together with the moves between them.
/// `moves[i]` leads from `positions[i]` to `positions[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "HistoryData")
)]
pub struct History {
    offset: usize,
    positions: Vec<Position>,
    moves: Vec<Move>,
}

// Unchecked form of `History` as it arrives from a serializer.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct HistoryData {
    offset: usize,
    positions: Vec<Position>,
    moves: Vec<Move>,
}

#[cfg(feature = "serde")]
impl TryFrom<HistoryData> for History {
    type Error = HistoryError;

    fn try_from(data: HistoryData) -> Result<Self, Self::Error> {
        let HistoryData {
            offset,
            positions,
            moves,
        } = data;
        if positions.is_empty() {
            return Err(HistoryError::Empty);
        }
        if moves.len() + 1 != positions.len() {
            return Err(HistoryError::MoveCount {
                moves: moves.len(),
                positions: positions.len(),
            });
        }
        if offset >= positions.len() {
            return Err(HistoryError::OffsetOutOfRange {
                offset,
                positions: positions.len(),
            });
        }
        Ok(Self {
            offset,
            positions,
            moves,
        })
    }
}

impl History {
    pub fn new(start: Position) -> Self {
        Self {
            offset: 0,
            positions: vec![start],
            moves: Vec::new(),
        }
    }

    /// Appends a committed move. A cursor sitting on the latest position
    /// follows it; one reviewing an earlier position stays put.
    pub fn push(&mut self, mv: Move, position: Position) {
        if self.at_end() {
            self.offset += 1;
        }
        self.moves.push(mv);
        self.positions.push(position);
    }

    /// Drops the latest move and its position.
    pub fn undo(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        self.positions.pop();
        self.offset = self.offset.min(self.positions.len() - 1);
        Some(mv)
    }

    /// Discards everything after the position under review.
    pub fn truncate(&mut self) {
        self.positions.truncate(self.offset + 1);
        self.moves.truncate(self.offset);
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Position::initial())
    }
}

impl Turn for History {
    fn turn(&self) -> Color {
        self.current().turn()
    }
}

impl Review for History {
    #[inline]
    fn positions(&self) -> &[Position] {
        &self.positions
    }
    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }
}

impl ReviewMut for History {
    #[inline]
    fn set_offset(&mut self, offset: usize) {
        debug_assert!(offset < self.positions.len());
        self.offset = offset.min(self.positions.len() - 1);
    }
}

impl Index<usize> for History {
    type Output = Position;
    fn index(&self, index: usize) -> &Self::Output {
        self.positions.index(index)
    }
}

impl Index<Square> for History {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        self.current().index(index)
    }
}

impl AsRef<Position> for History {
    fn as_ref(&self) -> &Position {
        self.current()
    }
}
