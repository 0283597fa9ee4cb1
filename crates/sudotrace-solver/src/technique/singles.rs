//! Singles: full house, naked single, hidden single.

use sudotrace_core::{Cell, CellSet, Decor, Digit, DigitSet, Grid, Tint, Unit};

use super::{Deduction, Technique, TechniqueId};

/// Places the missing digit of a unit with exactly one empty cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullHouse;

impl FullHouse {
    /// Creates a new `FullHouse` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for FullHouse {
    fn id(&self) -> TechniqueId {
        TechniqueId::FullHouse
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for unit in Unit::ALL {
            let empty = unit.set() & grid.unsolved_cells();
            let Some(cell) = empty.as_single() else {
                continue;
            };
            let mut missing = DigitSet::FULL;
            for c in unit.cells() {
                if let Some(value) = grid.value(c) {
                    missing.remove(value);
                }
            }
            let Some(digit) = missing.as_single() else {
                // a duplicate value in the unit; leave it to no-progress
                continue;
            };
            if !grid.candidates(cell).contains(digit) {
                continue;
            }
            return Some(
                Deduction::place(cell, digit, format!("{cell}={digit} in {unit}")).with_tints(
                    vec![Tint::new(
                        CellSet::from_elem(cell),
                        DigitSet::from_elem(digit),
                        Decor::Defining,
                    )],
                ),
            );
        }
        None
    }
}

/// Places the lone candidate of a cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedSingle;

impl NakedSingle {
    /// Creates a new `NakedSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for NakedSingle {
    fn id(&self) -> TechniqueId {
        TechniqueId::NakedSingle
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for cell in grid.unsolved_cells() {
            if let Some(digit) = grid.candidates(cell).as_single() {
                return Some(
                    Deduction::place(cell, digit, format!("{cell}={digit}")).with_tints(vec![
                        Tint::new(
                            CellSet::from_elem(cell),
                            DigitSet::from_elem(digit),
                            Decor::Defining,
                        ),
                    ]),
                );
            }
        }
        None
    }
}

/// Places a digit that fits only one cell of a unit.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle;

impl HiddenSingle {
    /// Creates a new `HiddenSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for HiddenSingle {
    fn id(&self) -> TechniqueId {
        TechniqueId::HiddenSingle
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for cell in grid.unsolved_cells() {
            for digit in grid.candidates(cell) {
                for unit in Unit::of(cell) {
                    if grid.cells_with(digit, unit).as_single() == Some(cell) {
                        return Some(
                            Deduction::place(cell, digit, format!("{cell}={digit} in {unit}"))
                                .with_tints(vec![Tint::new(
                                    CellSet::from_elem(cell),
                                    DigitSet::from_elem(digit),
                                    Decor::Defining,
                                )]),
                        );
                    }
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_full_house_in_row() {
        TechniqueTester::from_s81(
            "12345678.........................................................................",
        )
        .apply_once(&FullHouse::new())
        .assert_placed(Cell::at(0, 8), Digit::D9);
    }

    #[test]
    fn test_full_house_in_box() {
        // top-left box filled except r3c3
        let s81 = format!("123......456......78.......{}", ".".repeat(54));
        TechniqueTester::from_s81(&s81)
            .apply_once(&FullHouse::new())
            .assert_placed(Cell::at(2, 2), Digit::D9);
    }

    #[test]
    fn test_full_house_finds_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new()).assert_stuck(&FullHouse::new());
    }

    #[test]
    fn test_naked_single() {
        TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(4, 4), [Digit::D7])
            .apply_once(&NakedSingle::new())
            .assert_placed(Cell::at(4, 4), Digit::D7);
    }

    #[test]
    fn test_naked_single_prefers_lowest_cell() {
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(8, 8), [Digit::D2])
            .sculpt(Cell::at(0, 1), [Digit::D5])
            .apply_once(&NakedSingle::new());
        let tester = tester.assert_placed(Cell::at(0, 1), Digit::D5);
        assert_eq!(tester.grid().value(Cell::at(8, 8)), None);
    }

    #[test]
    fn test_hidden_single_in_row() {
        let mut grid = Grid::new();
        for col in 0..9 {
            if col != 4 {
                grid.remove_candidate(Cell::at(0, col), Digit::D6);
            }
        }
        TechniqueTester::new(grid)
            .apply_once(&HiddenSingle::new())
            .assert_placed(Cell::at(0, 4), Digit::D6);
    }

    #[test]
    fn test_hidden_single_in_col() {
        let mut grid = Grid::new();
        for row in 0..9 {
            if row != 6 {
                grid.remove_candidate(Cell::at(row, 2), Digit::D3);
            }
        }
        TechniqueTester::new(grid)
            .apply_once(&HiddenSingle::new())
            .assert_placed(Cell::at(6, 2), Digit::D3);
    }

    #[test]
    fn test_singles_find_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&NakedSingle::new())
            .assert_stuck(&HiddenSingle::new());
    }
}
