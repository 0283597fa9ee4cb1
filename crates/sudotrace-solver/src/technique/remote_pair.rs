//! Remote pairs.

use sudotrace_core::{Cell, CellSet, Decor, Grid, PEERS, Tint};
use sudotrace_core::fmt::packed_coordinates;

use super::{Deduction, Technique, TechniqueId};

/// Search bound on chain cells.
const MAX_CELLS: usize = 12;

/// A chain of bivalue cells with the same pair `{a,b}`, each seeing the
/// next. Cells an odd distance apart hold opposite assignments, so a cell
/// seeing both ends of an even-length chain loses both candidates.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemotePair;

impl RemotePair {
    /// Creates a new `RemotePair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for RemotePair {
    fn id(&self) -> TechniqueId {
        TechniqueId::RemotePair
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for start in Cell::ALL {
            if !grid.is_bivalue(start) {
                continue;
            }
            let digits = grid.candidates(start);
            let family: CellSet = Cell::ALL
                .into_iter()
                .filter(|&c| grid.candidates(c) == digits)
                .collect();
            if family.len() < 4 {
                continue;
            }
            let mut path = vec![start];
            let mut in_path = CellSet::from_elem(start);
            if let Some(deduction) = extend(grid, family, &mut path, &mut in_path) {
                return Some(deduction);
            }
        }
        None
    }
}

fn extend(
    grid: &Grid,
    family: CellSet,
    path: &mut Vec<Cell>,
    in_path: &mut CellSet,
) -> Option<Deduction> {
    if path.len() >= MAX_CELLS {
        return None;
    }
    let last = *path.last()?;
    for next in (PEERS[last.index()] & family) - *in_path {
        path.push(next);
        in_path.insert(next);

        if path.len() >= 4 && path.len() % 2 == 0 {
            if let Some(deduction) = eliminations(grid, path, *in_path) {
                path.pop();
                in_path.remove(next);
                return Some(deduction);
            }
        }
        if let Some(deduction) = extend(grid, family, path, in_path) {
            path.pop();
            in_path.remove(next);
            return Some(deduction);
        }

        path.pop();
        in_path.remove(next);
    }
    None
}

fn eliminations(grid: &Grid, path: &[Cell], in_path: CellSet) -> Option<Deduction> {
    let first = *path.first()?;
    let last = *path.last()?;
    let digits = grid.candidates(first);
    let common = (PEERS[first.index()] & PEERS[last.index()]) - in_path;
    let targets: Vec<_> = digits
        .into_iter()
        .map(|d| (d, common))
        .filter(|&(d, cells)| grid.would_eliminate(d, cells))
        .collect();
    if targets.is_empty() {
        return None;
    }
    let removed = targets
        .iter()
        .fold(CellSet::EMPTY, |acc, &(d, cells)| acc | grid.candidates_in(cells, d));
    let (a, b) = digits.as_pair()?;
    Some(
        Deduction::eliminate(
            targets,
            format!("{a}/{b} in {}", packed_coordinates(in_path)),
        )
        .with_tints(vec![
            Tint::new(in_path, digits, Decor::Defining),
            Tint::new(removed, digits, Decor::Removed),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use sudotrace_core::Digit;

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_remote_pair_of_four_cells() {
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(0, 0), [Digit::D3, Digit::D7])
            .sculpt(Cell::at(0, 4), [Digit::D3, Digit::D7])
            .sculpt(Cell::at(4, 4), [Digit::D3, Digit::D7])
            .sculpt(Cell::at(4, 8), [Digit::D3, Digit::D7])
            .apply_once(&RemotePair::new());
        tester
            // r1c9 sees r1c1 and r5c9
            .assert_removed_exact(Cell::at(0, 8), [Digit::D3, Digit::D7])
            // r5c1 sees r1c1 and r5c9
            .assert_removed_exact(Cell::at(4, 0), [Digit::D3, Digit::D7])
            .assert_no_change(Cell::at(8, 8))
            .assert_no_change(Cell::at(0, 4));
    }

    #[test]
    fn test_no_eliminations_for_three_cell_chain() {
        let _ = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(0, 0), [Digit::D3, Digit::D7])
            .sculpt(Cell::at(0, 4), [Digit::D3, Digit::D7])
            .sculpt(Cell::at(4, 4), [Digit::D3, Digit::D7])
            .assert_stuck(&RemotePair::new());
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new()).assert_stuck(&RemotePair::new());
    }
}
