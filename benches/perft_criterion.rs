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

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use board_rules::{perft, Color, Piece, PieceKind, Position, Setup, Square};

struct BenchCase {
    name: &'static str,
    position: fn() -> Position,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "initial",
        position: Position::initial,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "kiwipete",
        position: kiwipete,
        expected_nodes: &[48, 2039],
    },
];

fn kiwipete() -> Position {
    const ROWS: [&str; 8] = [
        "r...k..r",
        "p.ppqpb.",
        "bn..pnp.",
        "...PN...",
        ".p..P...",
        "..N..Q.p",
        "PPPBBPPP",
        "R...K..R",
    ];
    let mut setup = Setup::empty()
        .castling(Color::White, true, true)
        .castling(Color::Black, true, true);
    for (row, line) in ROWS.iter().enumerate() {
        for (file, c) in line.chars().enumerate() {
            let kind = match c.to_ascii_lowercase() {
                'k' => PieceKind::King,
                'q' => PieceKind::Queen,
                'r' => PieceKind::Rook,
                'b' => PieceKind::Bishop,
                'n' => PieceKind::Knight,
                'p' => PieceKind::Pawn,
                _ => continue,
            };
            let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
            let square = Square::try_from_coords(file as isize, 7 - row as isize)
                .expect("diagram square should be on the board");
            setup = setup.piece(square, Piece::new(color, kind));
        }
    }
    setup.build().expect("kiwipete should be a valid position")
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let pos = (case.position)();
        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = depth_idx + 1;
            assert_eq!(
                perft(&pos, depth),
                *expected_nodes,
                "node mismatch for {} depth {}",
                case.name,
                depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let nodes = perft(black_box(&pos), black_box(depth));
                        assert_eq!(nodes, *expected);
                        black_box(nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
