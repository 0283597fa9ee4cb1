//! Locked candidates: pointing and claiming.

use sudotrace_core::{BOX_COLS, BOX_ROWS, Decor, Digit, DigitSet, Grid, Tint};

use super::{Deduction, Technique, TechniqueId};

/// A digit confined to one box-row/col inside its box points along the line:
/// the digit leaves the rest of the row/col.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pointing;

impl Pointing {
    /// Creates a new `Pointing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for Pointing {
    fn id(&self) -> TechniqueId {
        TechniqueId::Pointing
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            for band in BOX_ROWS.iter().chain(BOX_COLS.iter()) {
                if grid.candidates_in(band.set, digit).is_empty()
                    || !grid.candidates_in(band.box_rest, digit).is_empty()
                {
                    continue;
                }
                let removals = grid.candidates_in(band.line_rest, digit);
                if removals.is_empty() {
                    continue;
                }
                return Some(
                    Deduction::discard(digit, band.line_rest, format!("{digit} in {}", band.bx))
                        .with_tints(vec![
                            Tint::new(band.set, DigitSet::from_elem(digit), Decor::Defining),
                            Tint::new(removals, DigitSet::from_elem(digit), Decor::Removed),
                        ]),
                );
            }
        }
        None
    }
}

/// A digit confined to one box-row/col inside its line claims the box: the
/// digit leaves the rest of the box.
#[derive(Debug, Default, Clone, Copy)]
pub struct Claiming;

impl Claiming {
    /// Creates a new `Claiming` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for Claiming {
    fn id(&self) -> TechniqueId {
        TechniqueId::Claiming
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            for band in BOX_ROWS.iter().chain(BOX_COLS.iter()) {
                if grid.candidates_in(band.set, digit).is_empty()
                    || !grid.candidates_in(band.line_rest, digit).is_empty()
                {
                    continue;
                }
                let removals = grid.candidates_in(band.box_rest, digit);
                if removals.is_empty() {
                    continue;
                }
                return Some(
                    Deduction::discard(digit, band.box_rest, format!("{digit} in {}", band.line))
                        .with_tints(vec![
                            Tint::new(band.set, DigitSet::from_elem(digit), Decor::Defining),
                            Tint::new(removals, DigitSet::from_elem(digit), Decor::Removed),
                        ]),
                );
            }
        }
        None
    }
}
