//! Wings: XY-wing, XYZ-wing, W-wing.

use sudotrace_core::{Cell, CellSet, Decor, Digit, DigitSet, Grid, PEERS, Tint};
use sudotrace_core::fmt::packed_coordinates;

use super::single_digit_patterns::strong_links;
use super::{Deduction, Technique, TechniqueId};

/// Cells with exactly two candidates, in ascending order.
fn bivalue_cells(grid: &Grid) -> Vec<Cell> {
    Cell::ALL
        .into_iter()
        .filter(|&c| grid.is_bivalue(c))
        .collect()
}

/// A bivalue hinge `{a,b}` with bivalue wings `{a,c}` and `{b,c}` that do
/// not see each other: `c` leaves every cell seeing both wings.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyWing;

impl XyWing {
    /// Creates a new `XyWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for XyWing {
    fn id(&self) -> TechniqueId {
        TechniqueId::XyWing
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for hinge in bivalue_cells(grid) {
            let hinge_digits = grid.candidates(hinge);
            let wings: Vec<Cell> = (PEERS[hinge.index()])
                .into_iter()
                .filter(|&c| grid.is_bivalue(c))
                .collect();
            for (i, &wing1) in wings.iter().enumerate() {
                for &wing2 in &wings[i + 1..] {
                    if wing1.sees(wing2) {
                        continue;
                    }
                    let w1 = grid.candidates(wing1);
                    let w2 = grid.candidates(wing2);
                    let Some(shared) = (w1 & w2).as_single() else {
                        continue;
                    };
                    if hinge_digits.contains(shared) {
                        continue;
                    }
                    if (w1 | w2) - DigitSet::from_elem(shared) != hinge_digits {
                        continue;
                    }
                    let victims =
                        PEERS[wing1.index()] & PEERS[wing2.index()] & grid.digit_cells(shared);
                    if victims.is_empty() {
                        continue;
                    }
                    let cells = CellSet::from_iter([hinge, wing1, wing2]);
                    let (a, b) = hinge_digits.as_pair().unwrap_or((shared, shared));
                    return Some(
                        Deduction::discard(
                            shared,
                            victims,
                            format!("{a}/{b}/{shared} in {}", packed_coordinates(cells)),
                        )
                        .with_tints(vec![
                            Tint::new(cells, DigitSet::FULL, Decor::Defining),
                            Tint::new(victims, DigitSet::from_elem(shared), Decor::Removed),
                        ]),
                    );
                }
            }
        }
        None
    }
}

/// As XY-wing, but the hinge carries all three digits: `c` leaves every
/// cell seeing the hinge and both wings.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyzWing;

impl XyzWing {
    /// Creates a new `XyzWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for XyzWing {
    fn id(&self) -> TechniqueId {
        TechniqueId::XyzWing
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for hinge in Cell::ALL {
            let hinge_digits = grid.candidates(hinge);
            if hinge_digits.len() != 3 {
                continue;
            }
            let wings: Vec<Cell> = (PEERS[hinge.index()])
                .into_iter()
                .filter(|&c| grid.is_bivalue(c) && hinge_digits.is_superset(grid.candidates(c)))
                .collect();
            for (i, &wing1) in wings.iter().enumerate() {
                for &wing2 in &wings[i + 1..] {
                    let w1 = grid.candidates(wing1);
                    let w2 = grid.candidates(wing2);
                    if w1 | w2 != hinge_digits {
                        continue;
                    }
                    let Some(shared) = (w1 & w2).as_single() else {
                        continue;
                    };
                    let victims = PEERS[hinge.index()]
                        & PEERS[wing1.index()]
                        & PEERS[wing2.index()]
                        & grid.digit_cells(shared);
                    if victims.is_empty() {
                        continue;
                    }
                    let cells = CellSet::from_iter([hinge, wing1, wing2]);
                    return Some(
                        Deduction::discard(
                            shared,
                            victims,
                            format!(
                                "{} in {}",
                                sudotrace_core::fmt::packed_candidates(hinge_digits),
                                packed_coordinates(cells)
                            ),
                        )
                        .with_tints(vec![
                            Tint::new(cells, DigitSet::FULL, Decor::Defining),
                            Tint::new(victims, DigitSet::from_elem(shared), Decor::Removed),
                        ]),
                    );
                }
            }
        }
        None
    }
}

/// Two bivalue cells with the same pair, not sharing a unit, whose `b`
/// halves are tied together by a conjugate pair on `b`: `a` leaves every
/// cell seeing both.
#[derive(Debug, Default, Clone, Copy)]
pub struct WWing;

impl WWing {
    /// Creates a new `WWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for WWing {
    fn id(&self) -> TechniqueId {
        TechniqueId::WWing
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        let pairs = bivalue_cells(grid);
        for (i, &x) in pairs.iter().enumerate() {
            let digits = grid.candidates(x);
            for &y in &pairs[i + 1..] {
                if grid.candidates(y) != digits || x.sees(y) {
                    continue;
                }
                let Some((a, b)) = digits.as_pair() else {
                    continue;
                };
                for (link_digit, other) in [(a, b), (b, a)] {
                    for link in strong_links(grid, link_digit) {
                        if link.a == x || link.a == y || link.b == x || link.b == y {
                            continue;
                        }
                        let connected = (link.a.sees(x) && link.b.sees(y))
                            || (link.b.sees(x) && link.a.sees(y));
                        if !connected {
                            continue;
                        }
                        let used = CellSet::from_iter([x, y, link.a, link.b]);
                        let victims =
                            (PEERS[x.index()] & PEERS[y.index()] & grid.digit_cells(other)) - used;
                        if victims.is_empty() {
                            continue;
                        }
                        let ends = CellSet::from_iter([x, y]);
                        return Some(
                            Deduction::discard(
                                other,
                                victims,
                                format!(
                                    "{a}/{b} in {} via {link_digit} at {}",
                                    packed_coordinates(ends),
                                    packed_coordinates(CellSet::from_iter([link.a, link.b]))
                                ),
                            )
                            .with_tints(vec![
                                Tint::new(ends, digits, Decor::Defining),
                                Tint::new(
                                    CellSet::from_iter([link.a, link.b]),
                                    DigitSet::from_elem(link_digit),
                                    Decor::Color1,
                                ),
                                Tint::new(victims, DigitSet::from_elem(other), Decor::Removed),
                            ]),
                        );
                    }
                }
            }
        }
        None
    }
}
