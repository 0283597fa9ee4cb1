//! Empty rectangle.

use sudotrace_core::{Cell, CellSet, Decor, Digit, DigitSet, Grid, Tint, Unit};
use sudotrace_core::unit::{BOX_SETS, COL_SETS, ROW_SETS};

use super::{Deduction, Technique, TechniqueId};

/// A digit confined within a box to one row and one column, paired with a
/// strong link crossing one of the two arms: the far end of the link kills
/// the candidate at its intersection with the other arm.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyRectangle;

impl EmptyRectangle {
    /// Creates a new `EmptyRectangle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for EmptyRectangle {
    fn id(&self) -> TechniqueId {
        TechniqueId::EmptyRectangle
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            for bx in 0..9u8 {
                let in_box = grid.candidates_in(BOX_SETS[bx as usize], digit);
                if in_box.len() < 2 {
                    continue;
                }
                let box_rows = [(bx / 3) * 3, (bx / 3) * 3 + 1, (bx / 3) * 3 + 2];
                let box_cols = [(bx % 3) * 3, (bx % 3) * 3 + 1, (bx % 3) * 3 + 2];
                for er_row in box_rows {
                    for er_col in box_cols {
                        let cross = ROW_SETS[er_row as usize] | COL_SETS[er_col as usize];
                        if !cross.is_superset(in_box)
                            || (in_box - ROW_SETS[er_row as usize]).is_empty()
                            || (in_box - COL_SETS[er_col as usize]).is_empty()
                        {
                            continue;
                        }
                        if let Some(deduction) = cross_link(
                            grid, digit, in_box, er_row, er_col, box_rows, box_cols,
                        ) {
                            return Some(deduction);
                        }
                    }
                }
            }
        }
        None
    }
}

#[expect(clippy::too_many_arguments, reason = "plain coordinates of one pattern")]
fn cross_link(
    grid: &Grid,
    digit: Digit,
    in_box: CellSet,
    er_row: u8,
    er_col: u8,
    box_rows: [u8; 3],
    box_cols: [u8; 3],
) -> Option<Deduction> {
    // a column strong link with one end on the ER row
    for x in 0..9u8 {
        if box_cols.contains(&x) {
            continue;
        }
        let Some((a, b)) = grid.cells_with(digit, Unit::Col(x)).as_pair() else {
            continue;
        };
        for (near, far) in [(a, b), (b, a)] {
            if near.row() == er_row && !box_rows.contains(&far.row()) {
                let victim = Cell::at(far.row(), er_col);
                if grid.candidates(victim).contains(digit) {
                    return Some(deduction(digit, in_box, (near, far), victim));
                }
            }
        }
    }
    // a row strong link with one end on the ER column
    for y in 0..9u8 {
        if box_rows.contains(&y) {
            continue;
        }
        let Some((a, b)) = grid.cells_with(digit, Unit::Row(y)).as_pair() else {
            continue;
        };
        for (near, far) in [(a, b), (b, a)] {
            if near.col() == er_col && !box_cols.contains(&far.col()) {
                let victim = Cell::at(er_row, far.col());
                if grid.candidates(victim).contains(digit) {
                    return Some(deduction(digit, in_box, (near, far), victim));
                }
            }
        }
    }
    None
}

fn deduction(digit: Digit, in_box: CellSet, link: (Cell, Cell), victim: Cell) -> Deduction {
    let digits = DigitSet::from_elem(digit);
    Deduction::discard(
        digit,
        CellSet::from_elem(victim),
        format!(
            "{digit} in {} with link {}/{}",
            sudotrace_core::fmt::packed_coordinates(in_box),
            link.0,
            link.1
        ),
    )
    .with_tints(vec![
        Tint::new(in_box, digits, Decor::Defining),
        Tint::new(CellSet::from_iter([link.0, link.1]), digits, Decor::Color1),
        Tint::new(CellSet::from_elem(victim), digits, Decor::Removed),
    ])
}
