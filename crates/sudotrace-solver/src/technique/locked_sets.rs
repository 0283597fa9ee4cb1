//! Locked pairs and triples on box-row/col intersections.

use sudotrace_core::{BOX_COLS, BOX_ROWS, Band, CellSet, Decor, DigitSet, Grid, Tint};
use sudotrace_core::fmt::{packed_candidates, packed_coordinates};

use super::{Deduction, Technique, TechniqueId};

fn discard_targets(grid: &Grid, digits: DigitSet, cells: CellSet) -> Vec<(sudotrace_core::Digit, CellSet)> {
    digits
        .into_iter()
        .map(|d| (d, cells))
        .filter(|&(d, cells)| grid.would_eliminate(d, cells))
        .collect()
}

fn locked_set_deduction(
    grid: &Grid,
    digits: DigitSet,
    defining: CellSet,
    victims: CellSet,
) -> Option<Deduction> {
    let targets = discard_targets(grid, digits, victims);
    if targets.is_empty() {
        return None;
    }
    let removed: CellSet = targets
        .iter()
        .fold(CellSet::EMPTY, |acc, &(d, cells)| acc | grid.candidates_in(cells, d));
    Some(
        Deduction::eliminate(
            targets,
            format!("{} in {}", packed_candidates(digits), packed_coordinates(defining)),
        )
        .with_tints(vec![
            Tint::new(defining, digits, Decor::Defining),
            Tint::new(removed, digits, Decor::Removed),
        ]),
    )
}

/// Two cells of a box-row/col with the same two candidates lock those
/// candidates into the intersection: they leave the rest of both the line
/// and the box.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedPair;

impl LockedPair {
    /// Creates a new `LockedPair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for LockedPair {
    fn id(&self) -> TechniqueId {
        TechniqueId::LockedPair
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for band in BOX_ROWS.iter().chain(BOX_COLS.iter()) {
            if let Some(deduction) = find_in_band(grid, band) {
                return Some(deduction);
            }
        }
        None
    }
}

fn find_in_band(grid: &Grid, band: &Band) -> Option<Deduction> {
    let cells = band.cells;
    for (i, &a) in cells.iter().enumerate() {
        for &b in &cells[i + 1..] {
            let candidates = grid.candidates(a);
            if candidates.len() != 2 || candidates != grid.candidates(b) {
                continue;
            }
            let pair = CellSet::from_iter([a, b]);
            let victims = (band.set - pair) | band.line_rest | band.box_rest;
            if let Some(deduction) = locked_set_deduction(grid, candidates, pair, victims) {
                return Some(deduction);
            }
        }
    }
    None
}

/// Three unsolved cells of a box-row/col whose candidates collectively fit
/// in three digits lock those digits into the intersection.
#[derive(Debug, Default, Clone, Copy)]
pub struct LockedTriple;

impl LockedTriple {
    /// Creates a new `LockedTriple` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for LockedTriple {
    fn id(&self) -> TechniqueId {
        TechniqueId::LockedTriple
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for band in BOX_ROWS.iter().chain(BOX_COLS.iter()) {
            if band.cells.iter().any(|&c| grid.value(c).is_some()) {
                continue;
            }
            let candidates = band
                .cells
                .iter()
                .fold(DigitSet::EMPTY, |acc, &c| acc | grid.candidates(c));
            if candidates.len() != 3 {
                continue;
            }
            let victims = band.line_rest | band.box_rest;
            if let Some(deduction) = locked_set_deduction(grid, candidates, band.set, victims) {
                return Some(deduction);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use sudotrace_core::{Cell, Digit};

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_locked_pair_clears_line_and_box() {
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(0, 0), [Digit::D4, Digit::D7])
            .sculpt(Cell::at(0, 1), [Digit::D4, Digit::D7])
            .apply_once(&LockedPair::new());
        tester
            // third cell of the triplet
            .assert_removed_includes(Cell::at(0, 2), [Digit::D4, Digit::D7])
            // rest of the row
            .assert_removed_includes(Cell::at(0, 8), [Digit::D4, Digit::D7])
            // rest of the box
            .assert_removed_includes(Cell::at(2, 2), [Digit::D4, Digit::D7])
            // unrelated cell
            .assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_locked_triple_clears_line_and_box() {
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(3, 3), [Digit::D1, Digit::D2])
            .sculpt(Cell::at(3, 4), [Digit::D2, Digit::D3])
            .sculpt(Cell::at(3, 5), [Digit::D1, Digit::D3])
            .apply_once(&LockedTriple::new());
        tester
            .assert_removed_includes(Cell::at(3, 0), [Digit::D1, Digit::D2, Digit::D3])
            .assert_removed_includes(Cell::at(5, 5), [Digit::D1, Digit::D2, Digit::D3])
            .assert_no_change(Cell::at(0, 0));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&LockedPair::new())
            .assert_stuck(&LockedTriple::new());
    }
}
