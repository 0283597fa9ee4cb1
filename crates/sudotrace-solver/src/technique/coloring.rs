//! Simple colouring: colour trap and colour wrap.
//!
//! Both techniques two-colour a cluster (a connected component of the
//! conjugate-pair graph for one digit) and reason about which colour can be
//! true.

use sudotrace_core::{CellSet, Decor, Digit, DigitSet, Grid, PEERS, Tint};
use sudotrace_core::fmt::packed_coordinates;

use super::{Deduction, Technique, TechniqueId};

/// A two-coloured conjugate cluster for one digit.
#[derive(Debug, Clone, Copy)]
pub(super) struct Cluster {
    pub blue: CellSet,
    pub green: CellSet,
}

impl Cluster {
    pub(super) fn cells(&self) -> CellSet {
        self.blue | self.green
    }
}

/// Builds every cluster of two or more cells for `digit`, colouring each
/// from its lowest cell (which is what makes colour assignment, and with it
/// the wrap tie-break, reproducible).
pub(super) fn clusters(grid: &Grid, digit: Digit) -> Vec<Cluster> {
    let mut seen = CellSet::EMPTY;
    let mut out = Vec::new();
    for seed in grid.digit_cells(digit) {
        if seen.contains(seed) {
            continue;
        }
        let mut blue = CellSet::EMPTY;
        let mut green = CellSet::EMPTY;
        let mut stack = vec![(seed, true)];
        while let Some((cell, is_blue)) = stack.pop() {
            if blue.contains(cell) || green.contains(cell) {
                continue;
            }
            if is_blue {
                blue.insert(cell);
            } else {
                green.insert(cell);
            }
            for conj in grid.conjugate_partners(cell, digit) {
                stack.push((conj, !is_blue));
            }
        }
        seen |= blue | green;
        if (blue | green).len() >= 2 {
            out.push(Cluster { blue, green });
        }
    }
    out
}

/// The cells that carry `digit` and see at least one cell of `cluster`.
pub(super) fn digit_peers(grid: &Grid, digit: Digit, cluster: CellSet) -> CellSet {
    let mut peers = CellSet::EMPTY;
    for cell in cluster {
        peers |= PEERS[cell.index()];
    }
    peers & grid.digit_cells(digit)
}

/// `true` when two cells of the set share a row, column, or box.
fn shares_a_unit(cells: CellSet) -> bool {
    let mut rows = [0u8; 9];
    let mut cols = [0u8; 9];
    let mut boxes = [0u8; 9];
    for cell in cells {
        rows[cell.row() as usize] += 1;
        cols[cell.col() as usize] += 1;
        boxes[cell.box_index() as usize] += 1;
    }
    rows.iter()
        .chain(cols.iter())
        .chain(boxes.iter())
        .any(|&n| n > 1)
}

fn coloring_subject(digit: Digit, cluster: &Cluster) -> String {
    format!(
        "{digit} ({}) / ({})",
        packed_coordinates(cluster.green),
        packed_coordinates(cluster.blue)
    )
}

/// A candidate outside the cluster that sees both colours can never be
/// true: whichever colour holds the digit kills it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorTrap;

impl ColorTrap {
    /// Creates a new `ColorTrap` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for ColorTrap {
    fn id(&self) -> TechniqueId {
        TechniqueId::ColorTrap
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            for cluster in clusters(grid, digit) {
                let sees_blue = digit_peers(grid, digit, cluster.blue) - cluster.blue;
                let sees_green = digit_peers(grid, digit, cluster.green) - cluster.green;
                let trapped = (sees_blue & sees_green) - cluster.cells();
                if trapped.is_empty() {
                    continue;
                }
                return Some(
                    Deduction::discard(digit, trapped, coloring_subject(digit, &cluster))
                        .with_tints(vec![
                            Tint::new(cluster.green, DigitSet::from_elem(digit), Decor::Defining),
                            Tint::new(cluster.blue, DigitSet::from_elem(digit), Decor::Color1),
                            Tint::new(trapped, DigitSet::from_elem(digit), Decor::Removed),
                        ]),
                );
            }
        }
        None
    }
}

/// Two same-coloured cells in one unit disprove that colour: the digit
/// leaves every cell of it. Blue is checked first.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorWrap;

impl ColorWrap {
    /// Creates a new `ColorWrap` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for ColorWrap {
    fn id(&self) -> TechniqueId {
        TechniqueId::ColorWrap
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            for cluster in clusters(grid, digit) {
                let wrapped = if shares_a_unit(cluster.blue) {
                    cluster.blue
                } else if shares_a_unit(cluster.green) {
                    cluster.green
                } else {
                    continue;
                };
                return Some(
                    Deduction::discard(digit, wrapped, coloring_subject(digit, &cluster))
                        .with_tints(vec![
                            Tint::new(
                                cluster.cells() - wrapped,
                                DigitSet::from_elem(digit),
                                Decor::Defining,
                            ),
                            Tint::new(wrapped, DigitSet::from_elem(digit), Decor::Removed),
                        ]),
                );
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use sudotrace_core::{Cell, Unit};

    use super::*;
    use crate::testing::TechniqueTester;

    /// Leaves `digit` in the unit only at the two given cells, making them a
    /// conjugate pair.
    fn strong_link(grid: &mut Grid, digit: Digit, unit: Unit, a: Cell, b: Cell) {
        for cell in unit.cells() {
            if cell != a && cell != b {
                grid.remove_candidate(cell, digit);
            }
        }
    }

    #[test]
    fn test_cluster_coloring_alternates() {
        let mut grid = Grid::new();
        // chain r1c1 -row- r1c9 -col- r9c9
        strong_link(&mut grid, Digit::D5, Unit::Row(0), Cell::at(0, 0), Cell::at(0, 8));
        strong_link(&mut grid, Digit::D5, Unit::Col(8), Cell::at(0, 8), Cell::at(8, 8));
        let found = clusters(&grid, Digit::D5)
            .into_iter()
            .find(|c| c.cells().contains(Cell::at(0, 0)))
            .unwrap();
        assert!(found.blue.contains(Cell::at(0, 0)));
        assert!(found.green.contains(Cell::at(0, 8)));
        assert!(found.blue.contains(Cell::at(8, 8)));
    }

    #[test]
    fn test_color_trap() {
        let mut grid = Grid::new();
        // chain r1c1 -r1- r1c9 -c9- r9c9 -r9- r9c1 colours
        // blue/green/blue/green; every col-1 cell between the ends sees
        // blue r1c1 and green r9c1
        strong_link(&mut grid, Digit::D5, Unit::Row(0), Cell::at(0, 0), Cell::at(0, 8));
        strong_link(&mut grid, Digit::D5, Unit::Col(8), Cell::at(0, 8), Cell::at(8, 8));
        strong_link(&mut grid, Digit::D5, Unit::Row(8), Cell::at(8, 8), Cell::at(8, 0));
        TechniqueTester::new(grid)
            .apply_once(&ColorTrap::new())
            .assert_removed_exact(Cell::at(4, 0), [Digit::D5])
            .assert_removed_exact(Cell::at(1, 0), [Digit::D5])
            .assert_no_change(Cell::at(4, 4))
            .assert_no_change(Cell::at(0, 0));
    }

    #[test]
    fn test_color_wrap_disproves_blue() {
        let mut grid = Grid::new();
        // odd cycle of strong links:
        // r1c1 -b1- r2c3 -r2- r2c9 -c9- r9c9 -r9- r9c1 -c1- r1c1
        strong_link(&mut grid, Digit::D7, Unit::Box(0), Cell::at(0, 0), Cell::at(1, 2));
        strong_link(&mut grid, Digit::D7, Unit::Row(1), Cell::at(1, 2), Cell::at(1, 8));
        strong_link(&mut grid, Digit::D7, Unit::Col(8), Cell::at(1, 8), Cell::at(8, 8));
        strong_link(&mut grid, Digit::D7, Unit::Row(8), Cell::at(8, 8), Cell::at(8, 0));
        strong_link(&mut grid, Digit::D7, Unit::Col(0), Cell::at(8, 0), Cell::at(0, 0));
        // the odd cycle cannot be two-coloured; r1c1 and r2c3 land on the
        // same colour while sharing box 1, so that colour is disproved
        let tester = TechniqueTester::new(grid).apply_once(&ColorWrap::new());
        let cleared: Vec<Cell> = [
            Cell::at(0, 0),
            Cell::at(1, 2),
            Cell::at(1, 8),
            Cell::at(8, 0),
            Cell::at(8, 8),
        ]
        .into_iter()
        .filter(|&c| !tester.grid().candidates(c).contains(Digit::D7))
        .collect();
        // one colour class of the five-cell cycle lost the digit
        assert!(
            cleared.len() == 2 || cleared.len() == 3,
            "expected one colour class cleared, got {cleared:?}"
        );
        let _ = tester.assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&ColorTrap::new())
            .assert_stuck(&ColorWrap::new());
    }
}
