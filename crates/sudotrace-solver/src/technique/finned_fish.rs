//! Finned and sashimi fishes.

use sudotrace_core::{CellSet, Decor, Digit, DigitSet, Grid, Tint};
use sudotrace_core::fmt::packed_coordinates;
use sudotrace_core::unit::{BOX_SETS, COL_SETS, ROW_SETS};

use super::{Deduction, Technique, TechniqueId, support::k_subsets};

/// A fish whose base lines leak out of the cover in one box.
///
/// The leak cells (fins) weaken the pattern: eliminations only survive
/// where they see every fin, which confines them to the fin box. The
/// sashimi variant additionally tolerates a base line with a missing
/// corner (a single cell inside the cover).
#[derive(Debug, Clone, Copy)]
pub struct FinnedFish {
    size: u8,
    sashimi: bool,
    id: TechniqueId,
}

impl FinnedFish {
    /// Creates a finned fish search of the given base size (2-4).
    ///
    /// # Panics
    ///
    /// Panics if `size` is not 2, 3, or 4.
    #[must_use]
    pub fn finned(size: u8) -> Self {
        let id = match size {
            2 => TechniqueId::FinnedXWing,
            3 => TechniqueId::FinnedSwordfish,
            4 => TechniqueId::FinnedJellyfish,
            _ => panic!("unsupported fish size: {size}"),
        };
        Self {
            size,
            sashimi: false,
            id,
        }
    }

    /// Creates a sashimi fish search of the given base size (2-4).
    ///
    /// # Panics
    ///
    /// Panics if `size` is not 2, 3, or 4.
    #[must_use]
    pub fn sashimi(size: u8) -> Self {
        let id = match size {
            2 => TechniqueId::SashimiXWing,
            3 => TechniqueId::SashimiSwordfish,
            4 => TechniqueId::SashimiJellyfish,
            _ => panic!("unsupported fish size: {size}"),
        };
        Self {
            size,
            sashimi: true,
            id,
        }
    }

    fn find_directed(&self, grid: &Grid, rows: bool, digit: Digit) -> Option<Deduction> {
        // unlike basic fishes, base lines have no upper candidate bound
        let mut lines = Vec::new();
        for line in 0..9u8 {
            let set = if rows {
                ROW_SETS[line as usize]
            } else {
                COL_SETS[line as usize]
            };
            let carriers = grid.candidates_in(set, digit);
            if carriers.len() >= 2 {
                let mut cross = 0u16;
                for cell in carriers {
                    cross |= 1 << if rows { cell.col() } else { cell.row() };
                }
                lines.push((line, cross, carriers));
            }
        }

        for base in k_subsets(u8::try_from(lines.len()).unwrap_or(0), self.size) {
            let base: Vec<_> = base.iter().map(|&i| &lines[i as usize]).collect();
            let union_mask = base.iter().fold(0u16, |acc, l| acc | l.1);
            let union: Vec<u8> = (0..9u8).filter(|i| union_mask & (1 << i) != 0).collect();
            if union.len() <= self.size as usize {
                // no leak; that is a basic fish
                continue;
            }
            for cover_subset in k_subsets(u8::try_from(union.len()).unwrap_or(0), self.size) {
                let cover_mask = cover_subset
                    .iter()
                    .fold(0u16, |acc, &i| acc | (1 << union[i as usize]));

                // corner census per base line decides finned vs sashimi
                let mut degenerate = false;
                let mut well_formed = true;
                for line in &base {
                    let in_cover = (line.1 & cover_mask).count_ones();
                    if in_cover == 0 {
                        well_formed = false;
                        break;
                    }
                    if in_cover == 1 {
                        degenerate = true;
                    }
                }
                if !well_formed || (degenerate != self.sashimi) {
                    continue;
                }

                let fins = base.iter().fold(CellSet::EMPTY, |acc, line| {
                    acc | line
                        .2
                        .into_iter()
                        .filter(|c| {
                            let cross = if rows { c.col() } else { c.row() };
                            cover_mask & (1 << cross) == 0
                        })
                        .collect::<CellSet>()
                });
                if fins.is_empty() {
                    continue;
                }
                let mut fin_boxes = fins.into_iter().map(|c| c.box_index());
                let fin_box = fin_boxes.next().unwrap_or(0);
                if fin_boxes.any(|b| b != fin_box) {
                    continue;
                }

                let base_cells: CellSet = base.iter().fold(CellSet::EMPTY, |acc, l| {
                    acc | if rows {
                        ROW_SETS[l.0 as usize]
                    } else {
                        COL_SETS[l.0 as usize]
                    }
                });
                let mut cover_cells = CellSet::EMPTY;
                for cross in 0..9u8 {
                    if cover_mask & (1 << cross) != 0 {
                        cover_cells |= if rows {
                            COL_SETS[cross as usize]
                        } else {
                            ROW_SETS[cross as usize]
                        };
                    }
                }
                let victims = (cover_cells & BOX_SETS[fin_box as usize]) - base_cells;
                let removals = grid.candidates_in(victims, digit);
                if removals.is_empty() {
                    continue;
                }

                let defining = base.iter().fold(CellSet::EMPTY, |acc, l| acc | l.2) - fins;
                let pack = |mask: u16| {
                    (0..9u8)
                        .filter(|i| mask & (1 << i) != 0)
                        .map(|i| (i + 1).to_string())
                        .collect::<String>()
                };
                let base_mask = base.iter().fold(0u16, |acc, l| acc | (1 << l.0));
                let subject = if rows {
                    format!(
                        "{digit} r{} c{} fin {}",
                        pack(base_mask),
                        pack(cover_mask),
                        packed_coordinates(fins)
                    )
                } else {
                    format!(
                        "{digit} c{} r{} fin {}",
                        pack(base_mask),
                        pack(cover_mask),
                        packed_coordinates(fins)
                    )
                };
                return Some(Deduction::discard(digit, victims, subject).with_tints(vec![
                    Tint::new(defining, DigitSet::from_elem(digit), Decor::Defining),
                    Tint::new(fins, DigitSet::from_elem(digit), Decor::Color1),
                    Tint::new(removals, DigitSet::from_elem(digit), Decor::Removed),
                ]));
            }
        }
        None
    }
}

impl Technique for FinnedFish {
    fn id(&self) -> TechniqueId {
        self.id
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for digit in Digit::ALL {
            if let Some(deduction) = self.find_directed(grid, true, digit) {
                return Some(deduction);
            }
            if let Some(deduction) = self.find_directed(grid, false, digit) {
                return Some(deduction);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use sudotrace_core::Cell;

    use super::*;
    use crate::testing::TechniqueTester;

    fn confine_row(grid: &mut Grid, digit: Digit, row: u8, cols: &[u8]) {
        for col in 0..9 {
            if !cols.contains(&col) {
                grid.remove_candidate(Cell::at(row, col), digit);
            }
        }
    }

    #[test]
    fn test_finned_x_wing() {
        let mut grid = Grid::new();
        confine_row(&mut grid, Digit::D1, 0, &[1, 7]);
        confine_row(&mut grid, Digit::D1, 4, &[1, 7, 8]);
        // other rows must not form competing bases with fewer candidates
        TechniqueTester::new(grid)
            .apply_once(&FinnedFish::finned(2))
            // eliminations confined to the fin box
            .assert_removed_exact(Cell::at(3, 7), [Digit::D1])
            .assert_removed_exact(Cell::at(5, 7), [Digit::D1])
            // a plain X-wing would remove these; the fin protects them
            .assert_no_change(Cell::at(2, 1))
            .assert_no_change(Cell::at(6, 7));
    }

    #[test]
    fn test_sashimi_x_wing() {
        let mut grid = Grid::new();
        confine_row(&mut grid, Digit::D1, 0, &[1, 7]);
        confine_row(&mut grid, Digit::D1, 4, &[1, 8]);
        TechniqueTester::new(grid)
            .apply_once(&FinnedFish::sashimi(2))
            .assert_removed_exact(Cell::at(3, 7), [Digit::D1])
            .assert_removed_exact(Cell::at(5, 7), [Digit::D1])
            .assert_no_change(Cell::at(2, 1));
    }

    #[test]
    fn test_finned_requires_fins_in_one_box() {
        let mut grid = Grid::new();
        confine_row(&mut grid, Digit::D1, 0, &[1, 7, 2]);
        confine_row(&mut grid, Digit::D1, 4, &[1, 7, 8]);
        // fins at r1c3 (box 1) and r5c9 (box 6) never share a box
        let _ = TechniqueTester::new(grid).assert_stuck(&FinnedFish::finned(2));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&FinnedFish::finned(2))
            .assert_stuck(&FinnedFish::sashimi(2));
    }
}
