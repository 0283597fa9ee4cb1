//! Basic fishes: X-wing, Swordfish, Jellyfish.

use sudotrace_core::{CellSet, Decor, Digit, DigitSet, Grid, Tint};
use sudotrace_core::unit::{COL_SETS, ROW_SETS};

use super::{Deduction, Technique, TechniqueId, support::k_subsets};

/// `k` base lines whose candidates for a digit fall into exactly `k` cover
/// lines eliminate the digit from the rest of the cover lines.
///
/// Rows are searched as base lines first, then columns (the transposed
/// variant).
#[derive(Debug, Clone, Copy)]
pub struct BasicFish {
    size: u8,
    id: TechniqueId,
}

impl BasicFish {
    /// Creates the X-wing search (2 base lines).
    #[must_use]
    pub const fn x_wing() -> Self {
        Self {
            size: 2,
            id: TechniqueId::XWing,
        }
    }

    /// Creates the Swordfish search (3 base lines).
    #[must_use]
    pub const fn swordfish() -> Self {
        Self {
            size: 3,
            id: TechniqueId::Swordfish,
        }
    }

    /// Creates the Jellyfish search (4 base lines).
    #[must_use]
    pub const fn jellyfish() -> Self {
        Self {
            size: 4,
            id: TechniqueId::Jellyfish,
        }
    }
}

/// One candidate base line: its index and the mask of cross indices where
/// the digit appears.
#[derive(Debug, Clone, Copy, Default)]
struct BaseLine {
    line: u8,
    cross: u16,
}

fn base_lines(grid: &Grid, digit: Digit, rows: bool, max: u8) -> Vec<BaseLine> {
    let mut lines = Vec::new();
    for line in 0..9u8 {
        let set = if rows {
            ROW_SETS[line as usize]
        } else {
            COL_SETS[line as usize]
        };
        let carriers = grid.candidates_in(set, digit);
        let count = carriers.len();
        if count < 2 || count > max as usize {
            continue;
        }
        let mut cross = 0u16;
        for cell in carriers {
            let index = if rows { cell.col() } else { cell.row() };
            cross |= 1 << index;
        }
        lines.push(BaseLine { line, cross });
    }
    lines
}

fn fish_subject(digit: Digit, base: &[u8], cover: &[u8], rows: bool) -> String {
    let pack = |v: &[u8]| v.iter().map(|i| (i + 1).to_string()).collect::<String>();
    if rows {
        format!("{digit} r{} c{}", pack(base), pack(cover))
    } else {
        format!("{digit} c{} r{}", pack(base), pack(cover))
    }
}

pub(super) fn find_basic(grid: &Grid, size: u8, rows: bool, digit: Digit) -> Option<Deduction> {
    let lines = base_lines(grid, digit, rows, size);
    for subset in k_subsets(u8::try_from(lines.len()).unwrap_or(0), size) {
        let base: Vec<BaseLine> = subset.iter().map(|&i| lines[i as usize]).collect();
        let cover_mask = base.iter().fold(0u16, |acc, b| acc | b.cross);
        if cover_mask.count_ones() != u32::from(size) {
            continue;
        }
        let base_cells: CellSet = base.iter().fold(CellSet::EMPTY, |acc, b| {
            acc | if rows {
                ROW_SETS[b.line as usize]
            } else {
                COL_SETS[b.line as usize]
            }
        });
        let mut victims = CellSet::EMPTY;
        for cross in 0..9u8 {
            if cover_mask & (1 << cross) != 0 {
                let set = if rows {
                    COL_SETS[cross as usize]
                } else {
                    ROW_SETS[cross as usize]
                };
                victims |= set - base_cells;
            }
        }
        let removals = grid.candidates_in(victims, digit);
        if removals.is_empty() {
            continue;
        }

        let base_indices: Vec<u8> = base.iter().map(|b| b.line).collect();
        let cover_lines: Vec<u8> = (0..9u8).filter(|i| cover_mask & (1 << i) != 0).collect();
        let defining = base.iter().fold(CellSet::EMPTY, |acc, b| {
            let line_set = if rows {
                ROW_SETS[b.line as usize]
            } else {
                COL_SETS[b.line as usize]
            };
            acc | grid.candidates_in(line_set, digit)
        });
        return Some(
            Deduction::discard(
                digit,
                victims,
                fish_subject(digit, &base_indices, &cover_lines, rows),
            )
            .with_tints(vec![
                Tint::new(defining, DigitSet::from_elem(digit), Decor::Defining),
                Tint::new(removals, DigitSet::from_elem(digit), Decor::Removed),
            ]),
        );
    }
    None
}

impl Technique for BasicFish {
    fn id(&self) -> TechniqueId {
        self.id
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            if let Some(deduction) = find_basic(grid, self.size, true, digit) {
                return Some(deduction);
            }
            if let Some(deduction) = find_basic(grid, self.size, false, digit) {
                return Some(deduction);
            }
        }
        None
    }
}
