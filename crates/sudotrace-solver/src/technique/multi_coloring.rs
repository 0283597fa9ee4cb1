//! Multi-colouring over pairs of conjugate clusters.

use sudotrace_core::{CellSet, Decor, Digit, DigitSet, Grid, Tint};
use sudotrace_core::fmt::packed_coordinates;

use super::coloring::{Cluster, clusters, digit_peers};
use super::{Deduction, Technique, TechniqueId};

fn multi_subject(digit: Digit, first: &Cluster, second: &Cluster) -> String {
    format!(
        "{digit} ({}) / ({}), ({}) / ({})",
        packed_coordinates(first.green),
        packed_coordinates(first.blue),
        packed_coordinates(second.green),
        packed_coordinates(second.blue)
    )
}

fn multi_tints(digit: Digit, first: &Cluster, second: &Cluster, removed: CellSet) -> Vec<Tint> {
    let digit = DigitSet::from_elem(digit);
    vec![
        Tint::new(first.blue, digit, Decor::Defining),
        Tint::new(first.green, digit, Decor::Color2),
        Tint::new(second.blue, digit, Decor::Color1),
        Tint::new(second.green, digit, Decor::Color3),
        Tint::new(removed, digit, Decor::Removed),
    ]
}

/// A colour of each cluster shares a unit: those two colours cannot both be
/// true, so the two complementary colours cover every case, and any
/// candidate seeing both complementary colours dies.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultiColorType1;

impl MultiColorType1 {
    /// Creates a new `MultiColorType1` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for MultiColorType1 {
    fn id(&self) -> TechniqueId {
        TechniqueId::MultiColor1
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            let clusters = clusters(grid, digit);
            for (i, first) in clusters.iter().enumerate() {
                for second in &clusters[i + 1..] {
                    let sees_blue2 = digit_peers(grid, digit, second.blue);
                    let sees_green2 = digit_peers(grid, digit, second.green);
                    let sees_blue1 = digit_peers(grid, digit, first.blue);
                    let sees_green1 = digit_peers(grid, digit, first.green);

                    // when two colours exclude each other, candidates seeing
                    // both complementary colours are removed
                    let branches = [
                        (first.blue, sees_blue2, sees_green1 & sees_green2),
                        (first.blue, sees_green2, sees_green1 & sees_blue2),
                        (first.green, sees_blue2, sees_blue1 & sees_green2),
                        (first.green, sees_green2, sees_blue1 & sees_blue2),
                    ];
                    for (colour, seen_by, victims) in branches {
                        if (colour & seen_by).is_empty() {
                            continue;
                        }
                        let removals = victims - first.cells() - second.cells();
                        if removals.is_empty() {
                            continue;
                        }
                        return Some(
                            Deduction::discard(digit, removals, multi_subject(digit, first, second))
                                .with_tints(multi_tints(digit, first, second, removals)),
                        );
                    }
                }
            }
        }
        None
    }
}

/// A colour of one cluster sees both colours of another: one of those two
/// colours is true, so the seeing colour is false everywhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultiColorType2;

impl MultiColorType2 {
    /// Creates a new `MultiColorType2` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for MultiColorType2 {
    fn id(&self) -> TechniqueId {
        TechniqueId::MultiColor2
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            let clusters = clusters(grid, digit);
            for (i, first) in clusters.iter().enumerate() {
                for second in &clusters[i + 1..] {
                    let sees_blue1 = digit_peers(grid, digit, first.blue);
                    let sees_green1 = digit_peers(grid, digit, first.green);
                    let sees_blue2 = digit_peers(grid, digit, second.blue);
                    let sees_green2 = digit_peers(grid, digit, second.green);

                    let branches = [
                        (first.blue, sees_blue2, sees_green2),
                        (first.green, sees_blue2, sees_green2),
                        (second.blue, sees_blue1, sees_green1),
                        (second.green, sees_blue1, sees_green1),
                    ];
                    for (colour, seen_by_blue, seen_by_green) in branches {
                        if (colour & seen_by_blue).is_empty() || (colour & seen_by_green).is_empty()
                        {
                            continue;
                        }
                        return Some(
                            Deduction::discard(digit, colour, multi_subject(digit, first, second))
                                .with_tints(multi_tints(digit, first, second, colour)),
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
    use sudotrace_core::{Cell, Unit};

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
    fn test_multi_color_type_1() {
        let mut grid = Grid::new();
        // cluster 1: row 2 pair r2c1/r2c5; cluster 2: row 8 pair r8c3/r8c5.
        // the two greens (r2c5, r8c5) share column 5, so cells seeing both
        // blues (r2c1, r8c3) lose the digit.
        strong_link(&mut grid, Digit::D5, Unit::Row(1), Cell::at(1, 0), Cell::at(1, 4));
        strong_link(&mut grid, Digit::D5, Unit::Row(7), Cell::at(7, 2), Cell::at(7, 4));
        TechniqueTester::new(grid)
            .apply_once(&MultiColorType1::new())
            // box 0 ∩ col 3 sees r2c1 (box) and r8c3 (col)
            .assert_removed_exact(Cell::at(0, 2), [Digit::D5])
            .assert_removed_exact(Cell::at(2, 2), [Digit::D5])
            // box 7 ∩ col 1 sees r8c3 (box) and r2c1 (col)
            .assert_removed_exact(Cell::at(6, 0), [Digit::D5])
            .assert_removed_exact(Cell::at(8, 0), [Digit::D5])
            .assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_multi_color_type_2() {
        let mut grid = Grid::new();
        // cluster 1: col 2 pair r1c2/r8c2; cluster 2: row 3 pair r3c1/r3c3,
        // both inside box 1. r1c2 sees both cluster-2 cells through the box,
        // so its whole colour is disproved.
        strong_link(&mut grid, Digit::D5, Unit::Col(1), Cell::at(0, 1), Cell::at(7, 1));
        strong_link(&mut grid, Digit::D5, Unit::Row(2), Cell::at(2, 0), Cell::at(2, 2));
        TechniqueTester::new(grid)
            .apply_once(&MultiColorType2::new())
            .assert_removed_exact(Cell::at(0, 1), [Digit::D5])
            .assert_no_change(Cell::at(7, 1))
            .assert_no_change(Cell::at(2, 0))
            .assert_no_change(Cell::at(2, 2));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&MultiColorType1::new())
            .assert_stuck(&MultiColorType2::new());
    }
}
