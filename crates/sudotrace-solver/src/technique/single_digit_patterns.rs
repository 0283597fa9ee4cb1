//! Short single-digit chains: skyscraper, 2-string kite, turbot fish.
//!
//! All three are length-4 X-chains (two strong links joined by one weak
//! link), distinguished by the shape of the strong links. A candidate that
//! sees both free ends can never be true.

use sudotrace_core::{Cell, CellSet, Decor, Digit, DigitSet, Grid, PEERS, Tint, Unit};
use sudotrace_core::fmt::packed_coordinates;

use super::{Deduction, Technique, TechniqueId};

/// A conjugate pair: the unit and its two carrier cells in ascending order.
#[derive(Debug, Clone, Copy)]
pub(super) struct StrongLink {
    pub unit: Unit,
    pub a: Cell,
    pub b: Cell,
}

/// Every strong link for `digit`, in unit order (rows, columns, boxes).
pub(super) fn strong_links(grid: &Grid, digit: Digit) -> Vec<StrongLink> {
    let mut links = Vec::new();
    for unit in Unit::ALL {
        if let Some((a, b)) = grid.cells_with(digit, unit).as_pair() {
            links.push(StrongLink { unit, a, b });
        }
    }
    links
}

/// Candidates of `digit` seeing both free ends, excluding the pattern cells.
fn end_victims(grid: &Grid, digit: Digit, ends: (Cell, Cell), used: CellSet) -> CellSet {
    (PEERS[ends.0.index()] & PEERS[ends.1.index()] & grid.digit_cells(digit)) - used
}

/// The four ways two links can touch: each combination names the connected
/// ends and the free ends.
fn combos(l1: &StrongLink, l2: &StrongLink) -> [((Cell, Cell), (Cell, Cell)); 4] {
    [
        ((l1.a, l2.a), (l1.b, l2.b)),
        ((l1.a, l2.b), (l1.b, l2.a)),
        ((l1.b, l2.a), (l1.a, l2.b)),
        ((l1.b, l2.b), (l1.a, l2.a)),
    ]
}

fn distinct(l1: &StrongLink, l2: &StrongLink) -> bool {
    l1.a != l2.a && l1.a != l2.b && l1.b != l2.a && l1.b != l2.b
}

fn pattern_deduction(
    grid: &Grid,
    digit: Digit,
    l1: &StrongLink,
    l2: &StrongLink,
    ends: (Cell, Cell),
) -> Option<Deduction> {
    let used = CellSet::from_iter([l1.a, l1.b, l2.a, l2.b]);
    let victims = end_victims(grid, digit, ends, used);
    if victims.is_empty() {
        return None;
    }
    Some(
        Deduction::discard(
            digit,
            victims,
            format!("{digit} in {}", packed_coordinates(used)),
        )
        .with_tints(vec![
            Tint::new(used, DigitSet::from_elem(digit), Decor::Defining),
            Tint::new(victims, DigitSet::from_elem(digit), Decor::Removed),
        ]),
    )
}

/// Two strong links in parallel lines whose bases align across the third
/// line; the two tops cannot both be false.
#[derive(Debug, Default, Clone, Copy)]
pub struct Skyscraper;

impl Skyscraper {
    /// Creates a new `Skyscraper` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for Skyscraper {
    fn id(&self) -> TechniqueId {
        TechniqueId::Skyscraper
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            let links = strong_links(grid, digit);
            for (i, l1) in links.iter().enumerate() {
                for l2 in &links[i + 1..] {
                    let aligned: fn(Cell, Cell) -> bool = match (l1.unit, l2.unit) {
                        (Unit::Row(_), Unit::Row(_)) => |a, b| a.col() == b.col(),
                        (Unit::Col(_), Unit::Col(_)) => |a, b| a.row() == b.row(),
                        _ => continue,
                    };
                    if !distinct(l1, l2) {
                        continue;
                    }
                    for (base, ends) in combos(l1, l2) {
                        if !aligned(base.0, base.1) {
                            continue;
                        }
                        if let Some(deduction) = pattern_deduction(grid, digit, l1, l2, ends) {
                            return Some(deduction);
                        }
                    }
                }
            }
        }
        None
    }
}

/// A row strong link and a column strong link meeting in one box; the two
/// outer ends cannot both be false.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwoStringKite;

impl TwoStringKite {
    /// Creates a new `TwoStringKite` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for TwoStringKite {
    fn id(&self) -> TechniqueId {
        TechniqueId::TwoStringKite
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            let links = strong_links(grid, digit);
            for (i, l1) in links.iter().enumerate() {
                for l2 in &links[i + 1..] {
                    let row_and_col = matches!(
                        (l1.unit, l2.unit),
                        (Unit::Row(_), Unit::Col(_)) | (Unit::Col(_), Unit::Row(_))
                    );
                    if !row_and_col || !distinct(l1, l2) {
                        continue;
                    }
                    for (base, ends) in combos(l1, l2) {
                        if base.0.box_index() != base.1.box_index() {
                            continue;
                        }
                        if let Some(deduction) = pattern_deduction(grid, digit, l1, l2, ends) {
                            return Some(deduction);
                        }
                    }
                }
            }
        }
        None
    }
}

/// A box strong link and a line strong link joined by a weak link; the two
/// free ends cannot both be false.
#[derive(Debug, Default, Clone, Copy)]
pub struct TurbotFish;

impl TurbotFish {
    /// Creates a new `TurbotFish` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for TurbotFish {
    fn id(&self) -> TechniqueId {
        TechniqueId::TurbotFish
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            let links = strong_links(grid, digit);
            for (i, l1) in links.iter().enumerate() {
                for l2 in &links[i + 1..] {
                    let box_and_line = matches!(
                        (l1.unit, l2.unit),
                        (Unit::Box(_), Unit::Row(_) | Unit::Col(_))
                            | (Unit::Row(_) | Unit::Col(_), Unit::Box(_))
                    );
                    if !box_and_line || !distinct(l1, l2) {
                        continue;
                    }
                    for (base, ends) in combos(l1, l2) {
                        if !base.0.sees(base.1) {
                            continue;
                        }
                        if let Some(deduction) = pattern_deduction(grid, digit, l1, l2, ends) {
                            return Some(deduction);
                        }
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

    fn strong_link_fixture(grid: &mut Grid, digit: Digit, unit: Unit, a: Cell, b: Cell) {
        for cell in unit.cells() {
            if cell != a && cell != b {
                grid.remove_candidate(cell, digit);
            }
        }
    }

    #[test]
    fn test_skyscraper_in_columns() {
        let mut grid = Grid::new();
        // bases r6c3/r6c8 aligned in row 6; tops r1c3 and r2c8
        strong_link_fixture(&mut grid, Digit::D1, Unit::Col(2), Cell::at(0, 2), Cell::at(5, 2));
        strong_link_fixture(&mut grid, Digit::D1, Unit::Col(7), Cell::at(1, 7), Cell::at(5, 7));
        TechniqueTester::new(grid)
            .apply_once(&Skyscraper::new())
            // row 1 ∩ box 3 of the other top, and vice versa
            .assert_removed_exact(Cell::at(0, 6), [Digit::D1])
            .assert_removed_exact(Cell::at(0, 8), [Digit::D1])
            .assert_removed_exact(Cell::at(1, 0), [Digit::D1])
            .assert_removed_exact(Cell::at(1, 1), [Digit::D1])
            .assert_no_change(Cell::at(0, 2))
            .assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_two_string_kite() {
        let mut grid = Grid::new();
        // row link r1c1/r1c6 and column link r2c5/r8c5 touch in box 2
        strong_link_fixture(&mut grid, Digit::D3, Unit::Row(0), Cell::at(0, 0), Cell::at(0, 5));
        strong_link_fixture(&mut grid, Digit::D3, Unit::Col(4), Cell::at(1, 4), Cell::at(7, 4));
        TechniqueTester::new(grid)
            .apply_once(&TwoStringKite::new())
            .assert_removed_exact(Cell::at(7, 0), [Digit::D3])
            .assert_no_change(Cell::at(0, 0))
            .assert_no_change(Cell::at(7, 4));
    }

    #[test]
    fn test_turbot_fish() {
        let mut grid = Grid::new();
        // box link r1c1/r2c2 and row link r6c1/r6c8, weakly joined in col 1
        strong_link_fixture(&mut grid, Digit::D8, Unit::Box(0), Cell::at(0, 0), Cell::at(1, 1));
        strong_link_fixture(&mut grid, Digit::D8, Unit::Row(5), Cell::at(5, 0), Cell::at(5, 7));
        TechniqueTester::new(grid)
            .apply_once(&TurbotFish::new())
            .assert_removed_exact(Cell::at(1, 7), [Digit::D8])
            .assert_no_change(Cell::at(1, 1))
            .assert_no_change(Cell::at(5, 7));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&Skyscraper::new())
            .assert_stuck(&TwoStringKite::new())
            .assert_stuck(&TurbotFish::new());
    }
}
