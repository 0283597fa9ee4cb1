//! Benchmarks for the strategy loop.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sudotrace_core::Grid;
use sudotrace_solver::Solver;

const SINGLES_GRID: &str =
    ".7..6..45.96..........4.1...13..97.46..7.......43...5.5.....82184................";
const POINTING_GRID: &str =
    "........2..6....39..9.7..463....672..5..........4.1.....235....9.1.8...5.3...9...";

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    group.bench_function("ssts_singles_grid", |b| {
        let solver = Solver::from_strategy("ssts").unwrap();
        b.iter(|| {
            let mut grid = Grid::parse(SINGLES_GRID).unwrap();
            black_box(solver.solve(&mut grid).solved)
        });
    });

    group.bench_function("ssts_pointing_grid", |b| {
        let solver = Solver::from_strategy("ssts").unwrap();
        b.iter(|| {
            let mut grid = Grid::parse(POINTING_GRID).unwrap();
            black_box(solver.solve(&mut grid).solved)
        });
    });

    group.bench_function("singles_only", |b| {
        let solver = Solver::from_strategy("n1,h1").unwrap();
        b.iter(|| {
            let mut grid = Grid::parse(SINGLES_GRID).unwrap();
            black_box(solver.solve(&mut grid).solved)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
