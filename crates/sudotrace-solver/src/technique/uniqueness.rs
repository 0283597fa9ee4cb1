//! Uniqueness tests on rectangles.
//!
//! A rectangle of four cells in two rows, two columns, and two boxes whose
//! corners all allow the pair `{a,b}` would admit two solutions if all four
//! could be reduced to that pair (the deadly pattern). Each test eliminates
//! whatever would complete the pattern.

use sudotrace_core::{Cell, CellSet, Decor, Digit, DigitSet, Grid, PEERS, Tint, Unit};
use sudotrace_core::fmt::{packed_candidates, packed_coordinates};

use super::{Deduction, Technique, TechniqueId, support::k_subsets};

/// One rectangle: rows `r1 < r2`, columns `c1 < c2`, spanning two boxes.
#[derive(Debug, Clone, Copy)]
pub(super) struct Rectangle {
    pub tl: Cell,
    pub tr: Cell,
    pub bl: Cell,
    pub br: Cell,
}

impl Rectangle {
    pub(super) fn corners(self) -> [Cell; 4] {
        [self.tl, self.tr, self.bl, self.br]
    }

    pub(super) fn set(self) -> CellSet {
        CellSet::from_iter(self.corners())
    }
}

/// All rectangles spanning exactly two boxes, rows before columns, ascending.
pub(super) fn rectangles() -> Vec<Rectangle> {
    let mut out = Vec::new();
    for r1 in 0..9u8 {
        for r2 in (r1 + 1)..9 {
            for c1 in 0..9u8 {
                for c2 in (c1 + 1)..9 {
                    let rect = Rectangle {
                        tl: Cell::at(r1, c1),
                        tr: Cell::at(r1, c2),
                        bl: Cell::at(r2, c1),
                        br: Cell::at(r2, c2),
                    };
                    let boxes: std::collections::BTreeSet<u8> =
                        rect.corners().iter().map(|c| c.box_index()).collect();
                    if boxes.len() == 2 {
                        out.push(rect);
                    }
                }
            }
        }
    }
    out
}

fn rect_subject(digits: DigitSet, rect: Rectangle) -> String {
    format!(
        "{} in {}",
        packed_candidates(digits),
        packed_coordinates(rect.set())
    )
}

fn rect_tints(rect: Rectangle, digits: DigitSet, removed: CellSet, removed_digits: DigitSet) -> Vec<Tint> {
    vec![
        Tint::new(rect.set(), digits, Decor::Defining),
        Tint::new(removed, removed_digits, Decor::Removed),
    ]
}

/// The uniqueness tests 1-6, selected by construction.
#[derive(Debug, Clone, Copy)]
pub struct UniqueRectangle {
    variant: u8,
    id: TechniqueId,
}

impl UniqueRectangle {
    /// Creates uniqueness test 1: three bare corners, eliminations at the
    /// fourth.
    #[must_use]
    pub const fn test1() -> Self {
        Self { variant: 1, id: TechniqueId::Unique1 }
    }

    /// Creates uniqueness test 2: one shared extra candidate on the roof.
    #[must_use]
    pub const fn test2() -> Self {
        Self { variant: 2, id: TechniqueId::Unique2 }
    }

    /// Creates uniqueness test 3: roof extras completed by a naked subset.
    #[must_use]
    pub const fn test3() -> Self {
        Self { variant: 3, id: TechniqueId::Unique3 }
    }

    /// Creates uniqueness test 4: a strong pair digit on the roof kills the
    /// other.
    #[must_use]
    pub const fn test4() -> Self {
        Self { variant: 4, id: TechniqueId::Unique4 }
    }

    /// Creates uniqueness test 5: diagonal floor, one shared extra.
    #[must_use]
    pub const fn test5() -> Self {
        Self { variant: 5, id: TechniqueId::Unique5 }
    }

    /// Creates uniqueness test 6: an X-wing on one pair digit clears it
    /// from the roof.
    #[must_use]
    pub const fn test6() -> Self {
        Self { variant: 6, id: TechniqueId::Unique6 }
    }
}

impl Technique for UniqueRectangle {
    fn id(&self) -> TechniqueId {
        self.id
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for rect in rectangles() {
            if rect.corners().iter().any(|&c| grid.value(c).is_some()) {
                continue;
            }
            // candidate pairs come from the bivalue corners
            let mut pairs: Vec<DigitSet> = Vec::new();
            for &corner in &rect.corners() {
                let cands = grid.candidates(corner);
                if cands.len() == 2 && !pairs.contains(&cands) {
                    pairs.push(cands);
                }
            }
            for digits in pairs {
                if rect
                    .corners()
                    .iter()
                    .any(|&c| !grid.candidates(c).is_superset(digits))
                {
                    continue;
                }
                let floor: Vec<Cell> = rect
                    .corners()
                    .into_iter()
                    .filter(|&c| grid.candidates(c) == digits)
                    .collect();
                let roof: Vec<Cell> = rect
                    .corners()
                    .into_iter()
                    .filter(|&c| grid.candidates(c) != digits)
                    .collect();
                let deduction = match self.variant {
                    1 => test1(grid, rect, digits, &floor, &roof),
                    2 => test2(grid, rect, digits, &floor, &roof),
                    3 => test3(grid, rect, digits, &floor, &roof),
                    4 => test4(grid, rect, digits, &floor, &roof),
                    5 => test5(grid, rect, digits, &floor, &roof),
                    _ => test6(grid, rect, digits, &floor, &roof),
                };
                if deduction.is_some() {
                    return deduction;
                }
            }
        }
        None
    }
}

fn test1(
    grid: &Grid,
    rect: Rectangle,
    digits: DigitSet,
    floor: &[Cell],
    roof: &[Cell],
) -> Option<Deduction> {
    if floor.len() != 3 || roof.len() != 1 {
        return None;
    }
    let target = roof[0];
    let targets: Vec<_> = digits
        .into_iter()
        .map(|d| (d, CellSet::from_elem(target)))
        .filter(|&(d, cells)| grid.would_eliminate(d, cells))
        .collect();
    if targets.is_empty() {
        return None;
    }
    Some(
        Deduction::eliminate(targets, rect_subject(digits, rect)).with_tints(rect_tints(
            rect,
            digits,
            CellSet::from_elem(target),
            digits,
        )),
    )
}

fn test2(
    grid: &Grid,
    rect: Rectangle,
    digits: DigitSet,
    floor: &[Cell],
    roof: &[Cell],
) -> Option<Deduction> {
    if floor.len() != 2 || roof.len() != 2 || !floor[0].sees(floor[1]) {
        return None;
    }
    let extra1 = grid.candidates(roof[0]) - digits;
    let extra2 = grid.candidates(roof[1]) - digits;
    let (Some(c1), Some(c2)) = (extra1.as_single(), extra2.as_single()) else {
        return None;
    };
    if c1 != c2 {
        return None;
    }
    let victims = (PEERS[roof[0].index()] & PEERS[roof[1].index()] & grid.digit_cells(c1))
        - rect.set();
    if victims.is_empty() {
        return None;
    }
    Some(
        Deduction::discard(c1, victims, rect_subject(digits, rect)).with_tints(rect_tints(
            rect,
            digits,
            victims,
            DigitSet::from_elem(c1),
        )),
    )
}

fn test3(
    grid: &Grid,
    rect: Rectangle,
    digits: DigitSet,
    floor: &[Cell],
    roof: &[Cell],
) -> Option<Deduction> {
    if floor.len() != 2 || roof.len() != 2 || !floor[0].sees(floor[1]) {
        return None;
    }
    let extras = (grid.candidates(roof[0]) | grid.candidates(roof[1])) - digits;
    if extras.len() < 2 {
        return None;
    }
    let roof_set = CellSet::from_iter(roof.iter().copied());
    for unit in shared_units(roof[0], roof[1]) {
        // the roof pair acts as one virtual cell carrying the extras
        let pool: Vec<Cell> = unit
            .cells()
            .into_iter()
            .filter(|&c| !roof_set.contains(c) && grid.value(c).is_none())
            .collect();
        for size in 1..=3u8 {
            if usize::from(size) + 1 > pool.len() {
                break;
            }
            for subset in k_subsets(u8::try_from(pool.len()).unwrap_or(0), size) {
                let cells: CellSet = subset.iter().map(|&i| pool[i as usize]).collect();
                let union = cells
                    .into_iter()
                    .fold(extras, |acc, c| acc | grid.candidates(c));
                if union.len() != usize::from(size) + 1 {
                    continue;
                }
                let victims: CellSet = pool
                    .iter()
                    .copied()
                    .filter(|&c| !cells.contains(c))
                    .collect();
                let targets: Vec<_> = union
                    .into_iter()
                    .map(|d| (d, victims))
                    .filter(|&(d, v)| grid.would_eliminate(d, v))
                    .collect();
                if targets.is_empty() {
                    continue;
                }
                let removed = targets
                    .iter()
                    .fold(CellSet::EMPTY, |acc, &(d, v)| acc | grid.candidates_in(v, d));
                return Some(
                    Deduction::eliminate(targets, rect_subject(digits, rect)).with_tints(vec![
                        Tint::new(rect.set(), digits, Decor::Defining),
                        Tint::new(cells | roof_set, union, Decor::Color1),
                        Tint::new(removed, union, Decor::Removed),
                    ]),
                );
            }
        }
    }
    None
}

fn test4(
    grid: &Grid,
    rect: Rectangle,
    digits: DigitSet,
    floor: &[Cell],
    roof: &[Cell],
) -> Option<Deduction> {
    if floor.len() != 2 || roof.len() != 2 || !floor[0].sees(floor[1]) {
        return None;
    }
    let roof_set = CellSet::from_iter(roof.iter().copied());
    let (a, b) = digits.as_pair()?;
    for unit in shared_units(roof[0], roof[1]) {
        for (strong, removable) in [(a, b), (b, a)] {
            if grid.cells_with(strong, unit) != roof_set {
                continue;
            }
            if !grid.would_eliminate(removable, roof_set) {
                continue;
            }
            return Some(
                Deduction::discard(removable, roof_set, rect_subject(digits, rect)).with_tints(
                    rect_tints(rect, digits, roof_set, DigitSet::from_elem(removable)),
                ),
            );
        }
    }
    None
}

fn test5(
    grid: &Grid,
    rect: Rectangle,
    digits: DigitSet,
    floor: &[Cell],
    roof: &[Cell],
) -> Option<Deduction> {
    if floor.len() != 2 || roof.len() != 2 || floor[0].sees(floor[1]) {
        return None;
    }
    let extra1 = grid.candidates(roof[0]) - digits;
    let extra2 = grid.candidates(roof[1]) - digits;
    let (Some(c1), Some(c2)) = (extra1.as_single(), extra2.as_single()) else {
        return None;
    };
    if c1 != c2 {
        return None;
    }
    let victims = (PEERS[roof[0].index()] & PEERS[roof[1].index()] & grid.digit_cells(c1))
        - rect.set();
    if victims.is_empty() {
        return None;
    }
    Some(
        Deduction::discard(c1, victims, rect_subject(digits, rect)).with_tints(rect_tints(
            rect,
            digits,
            victims,
            DigitSet::from_elem(c1),
        )),
    )
}

fn test6(
    grid: &Grid,
    rect: Rectangle,
    digits: DigitSet,
    floor: &[Cell],
    roof: &[Cell],
) -> Option<Deduction> {
    if floor.len() != 2 || roof.len() != 2 || floor[0].sees(floor[1]) {
        return None;
    }
    let corners = rect.set();
    let (a, b) = digits.as_pair()?;
    for (locked, _) in [(a, b), (b, a)] {
        let confined = [
            Unit::Row(rect.tl.row()),
            Unit::Row(rect.br.row()),
            Unit::Col(rect.tl.col()),
            Unit::Col(rect.br.col()),
        ]
        .iter()
        .all(|&unit| corners.is_superset(grid.cells_with(locked, unit)));
        if !confined {
            continue;
        }
        let roof_set = CellSet::from_iter(roof.iter().copied());
        if !grid.would_eliminate(locked, roof_set) {
            continue;
        }
        return Some(
            Deduction::discard(locked, roof_set, rect_subject(digits, rect)).with_tints(
                rect_tints(rect, digits, roof_set, DigitSet::from_elem(locked)),
            ),
        );
    }
    None
}

fn shared_units(a: Cell, b: Cell) -> Vec<Unit> {
    let mut units = Vec::new();
    if a.row() == b.row() {
        units.push(Unit::Row(a.row()));
    }
    if a.col() == b.col() {
        units.push(Unit::Col(a.col()));
    }
    if a.box_index() == b.box_index() {
        units.push(Unit::Box(a.box_index()));
    }
    units
}

/// The hidden rectangle: a bivalue corner plus strong links on one pair
/// digit along both lines through the opposite corner.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenRectangle;

impl HiddenRectangle {
    /// Creates a new `HiddenRectangle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for HiddenRectangle {
    fn id(&self) -> TechniqueId {
        TechniqueId::HiddenRectangle
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for rect in rectangles() {
            if rect.corners().iter().any(|&c| grid.value(c).is_some()) {
                continue;
            }
            let diagonals = [(rect.tl, rect.br), (rect.tr, rect.bl), (rect.bl, rect.tr), (rect.br, rect.tl)];
            for (corner, opposite) in diagonals {
                let digits = grid.candidates(corner);
                if digits.len() != 2 {
                    continue;
                }
                if rect
                    .corners()
                    .iter()
                    .any(|&c| !grid.candidates(c).is_superset(digits))
                {
                    continue;
                }
                let (a, b) = digits.as_pair()?;
                for (kept, removable) in [(a, b), (b, a)] {
                    let row_cells = grid.cells_with(kept, Unit::Row(opposite.row()));
                    let col_cells = grid.cells_with(kept, Unit::Col(opposite.col()));
                    if !rect.set().is_superset(row_cells) || !rect.set().is_superset(col_cells) {
                        continue;
                    }
                    let target = CellSet::from_elem(opposite);
                    if !grid.would_eliminate(removable, target) {
                        continue;
                    }
                    return Some(
                        Deduction::discard(removable, target, rect_subject(digits, rect))
                            .with_tints(rect_tints(
                                rect,
                                digits,
                                target,
                                DigitSet::from_elem(removable),
                            )),
                    );
                }
            }
        }
        None
    }
}
