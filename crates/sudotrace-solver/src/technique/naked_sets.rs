//! Naked subsets of size 2-4.

use sudotrace_core::{Cell, CellSet, Decor, DigitSet, Grid, Tint, Unit};
use sudotrace_core::fmt::{packed_candidates, packed_coordinates};

use super::{Deduction, Technique, TechniqueId, support::k_subsets};

/// `k` cells of a unit that collectively carry only `k` candidates exclude
/// those candidates from the unit's other unsolved cells.
#[derive(Debug, Clone, Copy)]
pub struct NakedSubset {
    size: u8,
    id: TechniqueId,
}

impl NakedSubset {
    /// Creates the naked pair search.
    #[must_use]
    pub const fn pair() -> Self {
        Self {
            size: 2,
            id: TechniqueId::NakedPair,
        }
    }

    /// Creates the naked triple search.
    #[must_use]
    pub const fn triple() -> Self {
        Self {
            size: 3,
            id: TechniqueId::NakedTriple,
        }
    }

    /// Creates the naked quadruple search.
    #[must_use]
    pub const fn quad() -> Self {
        Self {
            size: 4,
            id: TechniqueId::NakedQuad,
        }
    }
}

impl Technique for NakedSubset {
    fn id(&self) -> TechniqueId {
        self.id
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for unit in Unit::ALL {
            // cells with at least two candidates; naked singles are left to
            // their own technique
            let pool: Vec<Cell> = unit
                .cells()
                .into_iter()
                .filter(|&c| grid.candidates(c).len() > 1)
                .collect();
            if pool.len() <= self.size as usize {
                continue;
            }
            for subset in k_subsets(u8::try_from(pool.len()).unwrap_or(0), self.size) {
                let cells: CellSet = subset.iter().map(|&i| pool[i as usize]).collect();
                let candidates = cells
                    .into_iter()
                    .fold(DigitSet::EMPTY, |acc, c| acc | grid.candidates(c));
                if candidates.len() != self.size as usize {
                    continue;
                }
                let victims: CellSet = pool
                    .iter()
                    .copied()
                    .filter(|&c| !cells.contains(c))
                    .collect();
                let targets: Vec<_> = candidates
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
                    Deduction::eliminate(
                        targets,
                        format!(
                            "{} in {}",
                            packed_candidates(candidates),
                            packed_coordinates(cells)
                        ),
                    )
                    .with_tints(vec![
                        Tint::new(cells, candidates, Decor::Defining),
                        Tint::new(removed, candidates, Decor::Removed),
                    ]),
                );
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use sudotrace_core::Digit;

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_naked_pair_in_row() {
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(0, 1), [Digit::D4, Digit::D7])
            .sculpt(Cell::at(0, 5), [Digit::D4, Digit::D7])
            .apply_once(&NakedSubset::pair());
        tester
            .assert_removed_includes(Cell::at(0, 0), [Digit::D4, Digit::D7])
            .assert_removed_includes(Cell::at(0, 8), [Digit::D4, Digit::D7])
            // other rows untouched
            .assert_no_change(Cell::at(1, 0))
            // the pair itself keeps its candidates
            .assert_no_change(Cell::at(0, 1));
    }

    #[test]
    fn test_naked_triple_in_col() {
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(1, 3), [Digit::D1, Digit::D2])
            .sculpt(Cell::at(4, 3), [Digit::D2, Digit::D5])
            .sculpt(Cell::at(7, 3), [Digit::D1, Digit::D5])
            .apply_once(&NakedSubset::triple());
        tester
            .assert_removed_includes(Cell::at(0, 3), [Digit::D1, Digit::D2, Digit::D5])
            .assert_removed_includes(Cell::at(8, 3), [Digit::D1, Digit::D2, Digit::D5])
            .assert_no_change(Cell::at(0, 0));
    }

    #[test]
    fn test_naked_quad_in_box() {
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(3, 3), [Digit::D1, Digit::D2])
            .sculpt(Cell::at(3, 5), [Digit::D2, Digit::D3])
            .sculpt(Cell::at(5, 3), [Digit::D3, Digit::D4])
            .sculpt(Cell::at(5, 5), [Digit::D4, Digit::D1])
            .apply_once(&NakedSubset::quad());
        tester
            .assert_removed_includes(
                Cell::at(4, 4),
                [Digit::D1, Digit::D2, Digit::D3, Digit::D4],
            )
            .assert_no_change(Cell::at(0, 0));
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new())
            .assert_stuck(&NakedSubset::pair())
            .assert_stuck(&NakedSubset::triple())
            .assert_stuck(&NakedSubset::quad());
    }
}
