//! X-chains: alternating strong/weak links on a single digit.

use sudotrace_core::{Cell, CellSet, Decor, Digit, DigitSet, Grid, PEERS, Tint};

use super::{Deduction, Technique, TechniqueId};

/// Search bound on chain cells.
const MAX_CELLS: usize = 16;

/// A chain of alternating strong and weak links for one digit, starting and
/// ending on strong links: one of the two ends is true, so the digit leaves
/// every cell seeing both.
#[derive(Debug, Default, Clone, Copy)]
pub struct XChain;

impl XChain {
    /// Creates a new `XChain` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for XChain {
    fn id(&self) -> TechniqueId {
        TechniqueId::XChain
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            for start in grid.digit_cells(digit) {
                let mut path = vec![start];
                let mut in_path = CellSet::from_elem(start);
                if let Some(deduction) = extend(grid, digit, &mut path, &mut in_path, true) {
                    return Some(deduction);
                }
            }
        }
        None
    }
}

/// Depth-first extension. `strong_next` tells which link kind the chain
/// needs; after every strong link the chain is a candidate pattern and is
/// tested for eliminations before growing further.
fn extend(
    grid: &Grid,
    digit: Digit,
    path: &mut Vec<Cell>,
    in_path: &mut CellSet,
    strong_next: bool,
) -> Option<Deduction> {
    if path.len() >= MAX_CELLS {
        return None;
    }
    let last = *path.last()?;
    let next_cells = if strong_next {
        grid.conjugate_partners(last, digit) - *in_path
    } else {
        (PEERS[last.index()] & grid.digit_cells(digit)) - *in_path
    };
    for next in next_cells {
        path.push(next);
        in_path.insert(next);

        if strong_next && path.len() >= 4 {
            if let Some(deduction) = eliminations(grid, digit, path, *in_path) {
                path.pop();
                in_path.remove(next);
                return Some(deduction);
            }
        }
        if let Some(deduction) = extend(grid, digit, path, in_path, !strong_next) {
            path.pop();
            in_path.remove(next);
            return Some(deduction);
        }

        path.pop();
        in_path.remove(next);
    }
    None
}

fn eliminations(grid: &Grid, digit: Digit, path: &[Cell], in_path: CellSet) -> Option<Deduction> {
    let first = *path.first()?;
    let last = *path.last()?;
    let victims = (PEERS[first.index()] & PEERS[last.index()] & grid.digit_cells(digit)) - in_path;
    if victims.is_empty() {
        return None;
    }
    let subject = {
        let cells: Vec<String> = path.iter().map(ToString::to_string).collect();
        format!("{digit} {}", cells.join(" "))
    };
    Some(Deduction::discard(digit, victims, subject).with_tints(vec![
        Tint::new(in_path, DigitSet::from_elem(digit), Decor::Defining),
        Tint::new(victims, DigitSet::from_elem(digit), Decor::Removed),
    ]))
}

#[cfg(test)]
mod tests {
    use sudotrace_core::Unit;

    use super::*;
    use crate::testing::TechniqueTester;

    fn strong_link(grid: &mut Grid, digit: Digit, unit: Unit, a: Cell, b: Cell) {
        for cell in unit.cells() {
            if cell != a && cell != b {
                grid.remove_candidate(cell, digit);
            }
        }
    }

    #[test]
    fn test_four_cell_x_chain() {
        let mut grid = Grid::new();
        // skyscraper shape: strong links in columns 3 and 8, bases on row 6
        strong_link(&mut grid, Digit::D1, Unit::Col(2), Cell::at(0, 2), Cell::at(5, 2));
        strong_link(&mut grid, Digit::D1, Unit::Col(7), Cell::at(1, 7), Cell::at(5, 7));
        TechniqueTester::new(grid)
            .apply_once(&XChain::new())
            .assert_removed_exact(Cell::at(0, 6), [Digit::D1])
            .assert_removed_exact(Cell::at(1, 0), [Digit::D1])
            .assert_no_change(Cell::at(0, 2))
            .assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_six_cell_x_chain() {
        let mut grid = Grid::new();
        // chain r1c2 =c2= r5c2 -r5- r5c5 =c5= r8c5 -r8- r8c8 =c8= r3c8;
        // the ends r1c2 and r3c8 see each other's boxes through rows 1-3
        strong_link(&mut grid, Digit::D2, Unit::Col(1), Cell::at(0, 1), Cell::at(4, 1));
        strong_link(&mut grid, Digit::D2, Unit::Col(4), Cell::at(4, 4), Cell::at(7, 4));
        strong_link(&mut grid, Digit::D2, Unit::Col(7), Cell::at(7, 7), Cell::at(2, 7));
        TechniqueTester::new(grid)
            .apply_once(&XChain::new())
            .assert_removed_exact(Cell::at(0, 6), [Digit::D2])
            .assert_removed_exact(Cell::at(0, 8), [Digit::D2])
            .assert_removed_exact(Cell::at(2, 0), [Digit::D2])
            .assert_removed_exact(Cell::at(2, 2), [Digit::D2])
            .assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new()).assert_stuck(&XChain::new());
    }
}
