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
use strum_macros::EnumIter;

use super::material::Color;
use super::square::{File, Mask, Rank, Square};

use File::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    Kingside,
    Queenside,
}

use CastleSide::*;

impl CastleSide {
    #[inline]
    fn rook_file(&self) -> File {
        match self {
            Kingside => FileH,
            Queenside => FileA,
        }
    }
    #[inline]
    fn king_dest_file(&self) -> File {
        match self {
            Kingside => FileG,
            Queenside => FileC,
        }
    }
    #[inline]
    fn rook_dest_file(&self) -> File {
        match self {
            Kingside => FileF,
            Queenside => FileD,
        }
    }

    #[inline]
    pub fn king_src(color: Color) -> Square {
        Square::new(FileE, Rank::back_rank(color))
    }
    #[inline]
    pub fn rook_src(&self, color: Color) -> Square {
        Square::new(self.rook_file(), Rank::back_rank(color))
    }
    #[inline]
    pub fn king_dest(&self, color: Color) -> Square {
        Square::new(self.king_dest_file(), Rank::back_rank(color))
    }
    #[inline]
    pub fn rook_dest(&self, color: Color) -> Square {
        Square::new(self.rook_dest_file(), Rank::back_rank(color))
    }
    /// The square the king crosses on its way to `king_dest`.
    #[inline]
    pub fn transit(&self, color: Color) -> Square {
        self.rook_dest(color)
    }
    /// Squares strictly between the king and the rook.
    pub fn lane(&self, color: Color) -> Mask {
        let rank = Rank::back_rank(color);
        let files: &[File] = match self {
            Kingside => &[FileF, FileG],
            Queenside => &[FileB, FileC, FileD],
        };
        Mask::from_squares(files.iter().map(|file| Square::new(*file, rank)))
    }

    /// The castle a rook standing on `square` belongs to, if `square` is
    /// one of `color`'s rook home squares.
    pub fn from_rook_src(square: Square, color: Color) -> Option<Self> {
        [Kingside, Queenside]
            .into_iter()
            .find(|side| side.rook_src(color) == square)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights {
    kingside: bool,
    queenside: bool,
}

impl CastlingRights {
    pub const fn new(kingside: bool, queenside: bool) -> Self {
        Self {
            kingside,
            queenside,
        }
    }
    pub const fn none() -> Self {
        Self::new(false, false)
    }
    #[inline]
    pub fn kingside(&self) -> bool {
        self.kingside
    }
    #[inline]
    pub fn queenside(&self) -> bool {
        self.queenside
    }
    #[inline]
    pub fn allows(&self, side: CastleSide) -> bool {
        match side {
            Kingside => self.kingside,
            Queenside => self.queenside,
        }
    }
    #[inline]
    pub fn any(&self) -> bool {
        self.kingside || self.queenside
    }
    pub fn clear(&mut self) {
        self.kingside = false;
        self.queenside = false;
    }
    pub fn clear_side(&mut self, side: CastleSide) {
        match side {
            Kingside => self.kingside = false,
            Queenside => self.queenside = false,
        }
    }

    /// Drops whatever rights a piece leaving or arriving on `square` ends.
    /// Rights only ever go from `true` to `false`.
    pub fn update(&mut self, square: Square, color: Color) {
        if square == CastleSide::king_src(color) {
            self.clear();
        } else if let Some(side) = CastleSide::from_rook_src(square, color) {
            self.clear_side(side);
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new(true, true)
    }
}
