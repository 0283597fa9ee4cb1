//! Bivalue universal grave +1.

use sudotrace_core::{Cell, CellSet, Decor, DigitSet, Grid, Tint, Unit};

use super::{Deduction, Technique, TechniqueId};

/// When every unsolved cell is bivalue except one cell with three
/// candidates, reducing that cell to two would leave a grid where every
/// candidate appears exactly twice per unit — a pattern with two solutions.
/// The candidate that perturbs the pattern must therefore be placed.
#[derive(Debug, Default, Clone, Copy)]
pub struct BugPlusOne;

impl BugPlusOne {
    /// Creates a new `BugPlusOne` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for BugPlusOne {
    fn id(&self) -> TechniqueId {
        TechniqueId::BugPlus1
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        let mut tri_cell: Option<Cell> = None;
        for cell in grid.unsolved_cells() {
            match grid.candidates(cell).len() {
                2 => {}
                3 if tri_cell.is_none() => tri_cell = Some(cell),
                _ => return None,
            }
        }
        let cell = tri_cell?;

        // the extra candidate appears three times in the cell's row, the
        // pattern candidates twice
        let row = Unit::Row(cell.row());
        let mut extras = DigitSet::EMPTY;
        for digit in grid.candidates(cell) {
            match grid.cells_with(digit, row).len() {
                3 => extras.insert(digit),
                2 => {}
                _ => return None,
            }
        }
        let digit = extras.as_single()?;
        Some(
            Deduction::place(cell, digit, format!("{cell}={digit}")).with_tints(vec![Tint::new(
                CellSet::from_elem(cell),
                DigitSet::from_elem(digit),
                Decor::Defining,
            )]),
        )
    }
}

#[cfg(test)]
mod tests {
    use sudotrace_core::Digit;

    use super::*;
    use crate::testing::TechniqueTester;

    /// A solved grid with three cells reopened so that one carries three
    /// candidates and the other two are bivalue.
    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn bug_grid() -> Grid {
        let mut grid = Grid::parse(SOLVED).unwrap();
        let mut grid2 = Grid::new();
        // rebuild without journal: copy values except three cells of row 1
        for cell in Cell::ALL {
            if cell == Cell::at(0, 0) || cell == Cell::at(0, 1) || cell == Cell::at(0, 4) {
                continue;
            }
            grid2.place_value(cell, grid.value(cell).unwrap());
        }
        grid = grid2;
        // r1c1 {3,5}, r1c2 {3,7}, r1c5 {3,5,7}: D3 appears three times in
        // row 1, D5 and D7 twice
        grid.set_candidates(Cell::at(0, 0), DigitSet::from_iter([Digit::D3, Digit::D5]));
        grid.set_candidates(Cell::at(0, 1), DigitSet::from_iter([Digit::D3, Digit::D7]));
        grid.set_candidates(
            Cell::at(0, 4),
            DigitSet::from_iter([Digit::D3, Digit::D5, Digit::D7]),
        );
        grid
    }

    #[test]
    fn test_bug_plus_one_places_extra_candidate() {
        TechniqueTester::new(bug_grid())
            .apply_once(&BugPlusOne::new())
            .assert_placed(Cell::at(0, 4), Digit::D3);
    }

    #[test]
    fn test_bug_requires_single_tri_cell() {
        let mut grid = bug_grid();
        grid.set_candidates(
            Cell::at(0, 0),
            DigitSet::from_iter([Digit::D3, Digit::D5, Digit::D9]),
        );
        let _ = TechniqueTester::new(grid).assert_stuck(&BugPlusOne::new());
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new()).assert_stuck(&BugPlusOne::new());
    }
}
