//! Compact formatting helpers for explanations.

use std::fmt::Write as _;

use crate::{CellSet, DigitSet, history::RemovedMap};

/// Formats a set of cells in packed coordinate notation, e.g.
/// `r4c89,r5c89`.
///
/// The cells are indexed by row and by column; whichever axis yields fewer
/// groups wins (ties go to rows). Within a group the other coordinates are
/// concatenated in ascending order; groups are sorted and comma-joined.
///
/// # Examples
///
/// ```
/// use sudotrace_core::{Cell, CellSet, fmt::packed_coordinates};
///
/// let cells = CellSet::from_iter([Cell::at(3, 7), Cell::at(3, 8), Cell::at(4, 7), Cell::at(4, 8)]);
/// assert_eq!(packed_coordinates(cells), "r4c89,r5c89");
/// ```
#[must_use]
pub fn packed_coordinates(cells: CellSet) -> String {
    let mut row_cols: [Vec<u8>; 9] = Default::default();
    let mut col_rows: [Vec<u8>; 9] = Default::default();
    for cell in cells {
        row_cols[cell.row() as usize].push(cell.col() + 1);
        col_rows[cell.col() as usize].push(cell.row() + 1);
    }

    let row_groups = row_cols.iter().filter(|v| !v.is_empty()).count();
    let col_groups = col_rows.iter().filter(|v| !v.is_empty()).count();

    let mut groups = Vec::new();
    if row_groups <= col_groups {
        for (row, cols) in (1..).zip(&row_cols) {
            if !cols.is_empty() {
                let packed: String = cols.iter().map(|c| c.to_string()).collect();
                groups.push(format!("r{row}c{packed}"));
            }
        }
    } else {
        for (col, rows) in (1..).zip(&col_rows) {
            if !rows.is_empty() {
                let packed: String = rows.iter().map(|r| r.to_string()).collect();
                groups.push(format!("r{packed}c{col}"));
            }
        }
    }
    groups.sort();
    groups.join(",")
}

/// Formats a candidate set as ascending digits separated by commas, e.g.
/// `4,7`.
#[must_use]
pub fn packed_candidates(digits: DigitSet) -> String {
    let mut out = String::new();
    for (i, digit) in digits.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{digit}");
    }
    out
}

/// Formats a removal map as discard fragments sorted by digit, e.g.
/// `r45c8<>3, r4c89<>5`.
#[must_use]
pub fn discard_text(removed: &RemovedMap) -> String {
    let mut fragments = Vec::new();
    for (digit, cells) in removed.iter() {
        fragments.push(format!("{}<>{digit}", packed_coordinates(cells)));
    }
    fragments.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, Digit};

    #[test]
    fn test_packed_coordinates_prefers_fewer_groups() {
        // three cells of one row: one row group vs three column groups
        let cells = CellSet::from_iter([Cell::at(0, 0), Cell::at(0, 4), Cell::at(0, 8)]);
        assert_eq!(packed_coordinates(cells), "r1c159");

        // three cells of one column: column axis wins
        let cells = CellSet::from_iter([Cell::at(0, 7), Cell::at(4, 7), Cell::at(8, 7)]);
        assert_eq!(packed_coordinates(cells), "r159c8");
    }

    #[test]
    fn test_packed_coordinates_single_cell() {
        assert_eq!(packed_coordinates(CellSet::from_elem(Cell::at(2, 3))), "r3c4");
        assert_eq!(packed_coordinates(CellSet::EMPTY), "");
    }

    #[test]
    fn test_packed_candidates() {
        let digits = DigitSet::from_iter([Digit::D7, Digit::D4]);
        assert_eq!(packed_candidates(digits), "4,7");
        assert_eq!(packed_candidates(DigitSet::EMPTY), "");
    }

    #[test]
    fn test_discard_text_sorted_by_digit() {
        let mut removed = RemovedMap::new();
        removed.insert(Digit::D5, Cell::at(3, 7));
        removed.insert(Digit::D5, Cell::at(3, 8));
        removed.insert(Digit::D3, Cell::at(3, 7));
        removed.insert(Digit::D3, Cell::at(4, 7));
        assert_eq!(discard_text(&removed), "r45c8<>3, r4c89<>5");
    }
}
