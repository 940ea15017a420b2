//! Propagation benchmarks: fixpoint cost on boards with different amounts
//! of deducible structure.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vf_common::{AnalysisRequest, Mode, Position};
use vf_core::board::{propagate, Board};

fn propagate_request(request: &AnalysisRequest) {
    let mut board = Board::build(request);
    let _ = propagate(&mut board);
}

fn bench_propagation(c: &mut Criterion) {
    let forced = AnalysisRequest::from_clues(Mode::Level, [(5, 0); 5], [(5, 0); 5]);
    c.bench_function("propagate_fully_forced", |b| {
        b.iter(|| propagate_request(black_box(&forced)))
    });

    let medium = AnalysisRequest::from_clues(
        Mode::Level,
        [(6, 1), (7, 0), (5, 2), (8, 0), (4, 2)],
        [(6, 1), (5, 1), (7, 1), (6, 1), (6, 1)],
    );
    c.bench_function("propagate_medium_board", |b| {
        b.iter(|| propagate_request(black_box(&medium)))
    });

    let revealed = medium
        .clone()
        .with_reveal(Position(1, 1), 2)
        .with_reveal(Position(3, 2), 3)
        .with_reveal(Position(4, 0), 1);
    c.bench_function("propagate_with_reveals", |b| {
        b.iter(|| propagate_request(black_box(&revealed)))
    });
}

criterion_group!(benches, bench_propagation);
criterion_main!(benches);
