use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plainchess::{attack, movegen, Color, Coord, Game};

const POSITIONS: [(&str, &str); 8] = [
    ("initial", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w",
    ),
    ("open_position", "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w"),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w"),
    ("pawn_move", "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3 w"),
    ("pawn_promote", "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8 w"),
    (
        "cydonia",
        "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2 w",
    ),
];

fn games() -> impl Iterator<Item = (&'static str, Game)> {
    POSITIONS
        .iter()
        .map(|&(name, pos)| (name, Game::from_position(pos).unwrap()))
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for (name, game) in games() {
        group.bench_function(name, |b| b.iter(|| black_box(game.legal_moves().len())));
    }
}

fn bench_make_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_undo");
    for (name, start) in games() {
        let moves = start.legal_moves();
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut game = start.clone();
                for mv in &moves {
                    black_box(game.make_move(mv.src(), mv.dst()));
                    // Finished games cannot be undone
                    if !black_box(game.undo_move()) {
                        game = start.clone();
                    }
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, game) in games() {
        let board = *game.board();
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(attack::is_square_attacked(&board, color, coord));
                    }
                }
            })
        });
    }
}

fn bench_has_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_legal_moves");
    for (name, game) in games() {
        let board = *game.board();
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::has_legal_moves(&board, Color::White)))
        });
    }
}

criterion_group!(
    chess,
    bench_legal_moves,
    bench_make_undo,
    bench_is_attacked,
    bench_has_legal_moves,
);

criterion_main!(chess);
