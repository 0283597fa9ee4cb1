//! Avoidable rectangles.
//!
//! A rectangle whose solved corners are all non-given could have been the
//! deadly pattern: the puzzle's unique solution must avoid completing it,
//! which eliminates the completing candidates.

use sudotrace_core::{Cell, CellSet, Decor, DigitSet, Grid, PEERS, Tint};
use sudotrace_core::fmt::packed_coordinates;

use super::uniqueness::{Rectangle, rectangles};
use super::{Deduction, Technique, TechniqueId};

/// Avoidable rectangle tests 1 and 2.
#[derive(Debug, Clone, Copy)]
pub struct AvoidableRectangle {
    variant: u8,
    id: TechniqueId,
}

impl AvoidableRectangle {
    /// Creates avoidable rectangle test 1: three solved corners, one open.
    #[must_use]
    pub const fn type1() -> Self {
        Self {
            variant: 1,
            id: TechniqueId::Avoidable1,
        }
    }

    /// Creates avoidable rectangle test 2: two solved corners and a shared
    /// roof extra.
    #[must_use]
    pub const fn type2() -> Self {
        Self {
            variant: 2,
            id: TechniqueId::Avoidable2,
        }
    }
}

impl Technique for AvoidableRectangle {
    fn id(&self) -> TechniqueId {
        self.id
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for rect in rectangles() {
            // given values can never form an avoidable pattern
            if rect.corners().iter().any(|&c| grid.is_given(c)) {
                continue;
            }
            let deduction = if self.variant == 1 {
                type1(grid, rect)
            } else {
                type2(grid, rect)
            };
            if deduction.is_some() {
                return deduction;
            }
        }
        None
    }
}

fn type1(grid: &Grid, rect: Rectangle) -> Option<Deduction> {
    // every corner as the open one, with the three others solved
    let corner_sets = [
        (rect.br, rect.tl, rect.tr, rect.bl),
        (rect.bl, rect.tr, rect.tl, rect.br),
        (rect.tr, rect.bl, rect.br, rect.tl),
        (rect.tl, rect.br, rect.bl, rect.tr),
    ];
    for (open, diagonal, row_mate, col_mate) in corner_sets {
        if grid.value(open).is_some() {
            continue;
        }
        let (Some(x), Some(y), Some(z)) = (
            grid.value(diagonal),
            grid.value(row_mate),
            grid.value(col_mate),
        ) else {
            continue;
        };
        // the deadly completion x,y / y,x needs equal off-diagonal values
        if y != z || x == y || !grid.candidates(open).contains(x) {
            continue;
        }
        return Some(
            Deduction::discard(
                x,
                CellSet::from_elem(open),
                format!("{x}/{y} in {}", packed_coordinates(rect.set())),
            )
            .with_tints(vec![
                Tint::new(rect.set(), DigitSet::FULL, Decor::Defining),
                Tint::new(CellSet::from_elem(open), DigitSet::from_elem(x), Decor::Removed),
            ]),
        );
    }
    None
}

fn type2(grid: &Grid, rect: Rectangle) -> Option<Deduction> {
    // the solved pair sits on one line, the open roof on the parallel line
    let sides = [
        ((rect.tl, rect.tr), (rect.bl, rect.br)),
        ((rect.bl, rect.br), (rect.tl, rect.tr)),
        ((rect.tl, rect.bl), (rect.tr, rect.br)),
        ((rect.tr, rect.br), (rect.tl, rect.bl)),
    ];
    for ((s1, s2), (r1, r2)) in sides {
        let (Some(x), Some(y)) = (grid.value(s1), grid.value(s2)) else {
            continue;
        };
        if x == y || grid.value(r1).is_some() || grid.value(r2).is_some() {
            continue;
        }
        // the roof cells must allow the swapped completion plus one shared
        // extra candidate
        if !grid.candidates(r1).contains(y) || !grid.candidates(r2).contains(x) {
            continue;
        }
        let extra1 = grid.candidates(r1) - DigitSet::from_elem(y);
        let extra2 = grid.candidates(r2) - DigitSet::from_elem(x);
        let (Some(c1), Some(c2)) = (extra1.as_single(), extra2.as_single()) else {
            continue;
        };
        if c1 != c2 {
            continue;
        }
        let roof = CellSet::from_iter([r1, r2]);
        let victims = (PEERS[r1.index()] & PEERS[r2.index()] & grid.digit_cells(c1)) - roof;
        if victims.is_empty() {
            continue;
        }
        return Some(
            Deduction::discard(
                c1,
                victims,
                format!("{x}/{y}+{c1} in {}", packed_coordinates(rect.set())),
            )
            .with_tints(vec![
                Tint::new(rect.set(), DigitSet::FULL, Decor::Defining),
                Tint::new(victims, DigitSet::from_elem(c1), Decor::Removed),
            ]),
        );
    }
    None
}

#[cfg(test)]
mod tests {
    use sudotrace_core::Digit;

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_avoidable_1() {
        let mut grid = Grid::new();
        // solved, non-given corners: r1c1=2, r1c4=7, r2c1=7
        grid.place_value(Cell::at(0, 0), Digit::D2);
        grid.place_value(Cell::at(0, 3), Digit::D7);
        grid.place_value(Cell::at(1, 0), Digit::D7);
        TechniqueTester::new(grid)
            .apply_once(&AvoidableRectangle::type1())
            .assert_removed_exact(Cell::at(1, 3), [Digit::D2])
            .assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_avoidable_1_ignores_givens() {
        let mut grid = Grid::new();
        grid.place_given(Cell::at(0, 0), Digit::D2);
        grid.place_value(Cell::at(0, 3), Digit::D7);
        grid.place_value(Cell::at(1, 0), Digit::D7);
        let _ = TechniqueTester::new(grid).assert_stuck(&AvoidableRectangle::type1());
    }

    #[test]
    fn test_avoidable_2() {
        let mut grid = Grid::new();
        // solved pair r1c1=2, r1c4=7; open roof with one shared extra
        grid.place_value(Cell::at(0, 0), Digit::D2);
        grid.place_value(Cell::at(0, 3), Digit::D7);
        TechniqueTester::new(grid)
            .sculpt(Cell::at(1, 0), [Digit::D7, Digit::D5])
            .sculpt(Cell::at(1, 3), [Digit::D2, Digit::D5])
            .apply_once(&AvoidableRectangle::type2())
            .assert_removed_exact(Cell::at(1, 1), [Digit::D5])
            .assert_removed_exact(Cell::at(1, 8), [Digit::D5])
            .assert_no_change(Cell::at(1, 0));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&AvoidableRectangle::type1())
            .assert_stuck(&AvoidableRectangle::type2());
    }
}
