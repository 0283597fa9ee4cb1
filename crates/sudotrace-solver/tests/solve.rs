//! End-to-end solving scenarios.

use sudotrace_core::{Cell, Digit, DigitSet, Grid};
use sudotrace_solver::Solver;

const SINGLES_GRID: &str =
    ".7..6..45.96..........4.1...13..97.46..7.......43...5.5.....82184................";
const POINTING_GRID: &str =
    "........2..6....39..9.7..463....672..5..........4.1.....235....9.1.8...5.3...9...";

fn assert_valid_solution(grid: &Grid) {
    assert!(grid.solved());
    grid.check_consistency().unwrap();
    for unit in sudotrace_core::Unit::ALL {
        let digits: DigitSet = unit
            .cells()
            .iter()
            .filter_map(|&c| grid.value(c))
            .collect();
        assert_eq!(digits, DigitSet::FULL, "incomplete unit {unit}");
    }
}

const SINGLES_SOLUTION: &str =
    "178263945496571238325948167213659784659784312784312659537496821842137596961825473";
const POINTING_SOLUTION: &str =
    "143965872786142539529873146318596724654728913297431658862357491971284365435619287";

#[test]
fn test_singles_grid_solves_under_ssts() {
    let mut grid = Grid::parse(SINGLES_GRID).unwrap();
    let run = Solver::from_strategy("ssts").unwrap().solve(&mut grid);
    assert!(run.solved);
    assert_valid_solution(&grid);
    assert_eq!(grid.encode_s81(), SINGLES_SOLUTION);
    assert!(grid.matches(SINGLES_SOLUTION));
}

#[test]
fn test_pointing_grid_solves_under_ssts_but_not_singles() {
    let mut grid = Grid::parse(POINTING_GRID).unwrap();
    let run = Solver::from_strategy("n1,h1").unwrap().solve(&mut grid);
    assert!(!run.solved);
    assert!(!grid.solved());

    let mut grid = Grid::parse(POINTING_GRID).unwrap();
    let run = Solver::from_strategy("ssts").unwrap().solve(&mut grid);
    assert!(run.solved);
    assert_valid_solution(&grid);
    assert_eq!(grid.encode_s81(), POINTING_SOLUTION);
}

#[test]
fn test_xy_wing_eliminates_at_common_peer() {
    let mut grid = Grid::new();
    grid.set_candidates(Cell::at(0, 0), DigitSet::from_iter([Digit::D1, Digit::D2]));
    grid.set_candidates(Cell::at(0, 8), DigitSet::from_iter([Digit::D1, Digit::D3]));
    grid.set_candidates(Cell::at(8, 0), DigitSet::from_iter([Digit::D2, Digit::D3]));

    let solver = Solver::from_strategy("xy").unwrap();
    let mut stats = solver.new_stats();
    let report = solver.step(&mut grid, &mut stats).unwrap();
    assert_eq!(report.technique.code(), "xy");
    assert!(!grid.candidates(Cell::at(8, 8)).contains(Digit::D3));
}

#[test]
fn test_undo_returns_to_loaded_state() {
    let mut grid = Grid::parse(SINGLES_GRID).unwrap();
    assert_eq!(grid.history().len(), 0);

    let run = Solver::from_strategy("ssts").unwrap().solve(&mut grid);
    assert!(run.solved);
    let applied = grid.history().len();
    assert!(applied > 0);

    for _ in 0..applied {
        assert!(grid.undo());
    }
    assert!(!grid.undo());
    assert_eq!(grid.encode_s81(), SINGLES_GRID);
}

#[test]
fn test_redo_replays_to_solved_state() {
    let mut grid = Grid::parse(SINGLES_GRID).unwrap();
    let run = Solver::from_strategy("ssts").unwrap().solve(&mut grid);
    assert!(run.solved);
    let solved_gvc = grid.encode(sudotrace_core::Format::Gvc);

    let applied = grid.history().len();
    for _ in 0..applied {
        assert!(grid.undo());
    }
    for _ in 0..applied {
        assert!(grid.redo());
    }
    assert_eq!(grid.encode(sudotrace_core::Format::Gvc), solved_gvc);
}

#[test]
fn test_strategy_difference_disables_xy_wing() {
    let build = || {
        let mut grid = Grid::new();
        grid.set_candidates(Cell::at(0, 0), DigitSet::from_iter([Digit::D1, Digit::D2]));
        grid.set_candidates(Cell::at(0, 8), DigitSet::from_iter([Digit::D1, Digit::D3]));
        grid.set_candidates(Cell::at(8, 0), DigitSet::from_iter([Digit::D2, Digit::D3]));
        grid
    };

    let mut with_xy = build();
    let _ = Solver::from_strategy("ssts").unwrap().solve(&mut with_xy);
    assert!(
        with_xy
            .history()
            .iter()
            .any(|e| e.technique() == "XY-wing")
    );
    assert!(!with_xy.candidates(Cell::at(8, 8)).contains(Digit::D3));

    let mut without_xy = build();
    let _ = Solver::from_strategy("ssts-xy").unwrap().solve(&mut without_xy);
    assert!(
        without_xy
            .history()
            .iter()
            .all(|e| e.technique() != "XY-wing")
    );
}

#[test]
fn test_elapsed_is_reported() {
    let mut grid = Grid::parse(SINGLES_GRID).unwrap();
    let run = Solver::from_strategy("ssts").unwrap().solve(&mut grid);
    // the exit contract is (success, elapsed); elapsed is wall-clock
    assert!(run.elapsed.as_nanos() > 0);
}

#[test]
fn test_consistency_holds_after_every_step() {
    let solver = Solver::from_strategy("ssts").unwrap();
    let mut grid = Grid::parse(POINTING_GRID).unwrap();
    let mut stats = solver.new_stats();
    while !grid.solved() {
        if solver.step(&mut grid, &mut stats).is_none() {
            break;
        }
        grid.check_consistency().unwrap();
    }
}
