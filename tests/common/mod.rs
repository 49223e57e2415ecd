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

#![allow(dead_code)]

use board_rules::*;

/// Places pieces from an 8 row diagram, rank 8 first. Upper case letters
/// are white, lower case black, anything else an empty square.
pub fn diagram(rows: [&str; 8]) -> Setup {
    let mut setup = Setup::empty();
    for (row, line) in rows.iter().enumerate() {
        let rank = 7 - row as isize;
        for (file, c) in line.chars().enumerate() {
            if let Some(piece) = piece_from_char(c) {
                let square = Square::try_from_coords(file as isize, rank).unwrap();
                setup = setup.piece(square, piece);
            }
        }
    }
    setup
}

fn piece_from_char(c: char) -> Option<Piece> {
    let kind = match c.to_ascii_lowercase() {
        'k' => PieceKind::King,
        'q' => PieceKind::Queen,
        'r' => PieceKind::Rook,
        'b' => PieceKind::Bishop,
        'n' => PieceKind::Knight,
        'p' => PieceKind::Pawn,
        _ => return None,
    };
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some(Piece::new(color, kind))
}

/// Plays the legal move from `from` to `to`, panicking if there isn't one.
pub fn play(pos: &Position, from: Square, to: Square) -> Position {
    let (_, next) = pos
        .try_apply_move(from, to)
        .unwrap_or_else(|err| panic!("{from}-{to} rejected: {err}\n{pos}"));
    next
}

pub fn play_all(pos: &Position, moves: &[(Square, Square)]) -> Position {
    moves
        .iter()
        .fold(pos.clone(), |pos, (from, to)| play(&pos, *from, *to))
}

pub fn kiwipete() -> Position {
    diagram([
        "r...k..r",
        "p.ppqpb.",
        "bn..pnp.",
        "...PN...",
        ".p..P...",
        "..N..Q.p",
        "PPPBBPPP",
        "R...K..R",
    ])
    .castling(Color::White, true, true)
    .castling(Color::Black, true, true)
    .build()
    .unwrap()
}

pub fn rook_endgame() -> Position {
    diagram([
        "........",
        "..p.....",
        "...p....",
        "KP.....r",
        ".R...p.k",
        "........",
        "....P.P.",
        "........",
    ])
    .build()
    .unwrap()
}
