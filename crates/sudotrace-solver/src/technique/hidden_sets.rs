//! Hidden subsets of size 2-4.

use sudotrace_core::{CellSet, Decor, Digit, DigitSet, Grid, Tint, Unit};
use sudotrace_core::fmt::{packed_candidates, packed_coordinates};

use super::{Deduction, Technique, TechniqueId, support::k_subsets};

/// `k` candidates of a unit confined to `k` cells clear every other
/// candidate from those cells.
#[derive(Debug, Clone, Copy)]
pub struct HiddenSubset {
    size: u8,
    id: TechniqueId,
}

impl HiddenSubset {
    /// Creates the hidden pair search.
    #[must_use]
    pub const fn pair() -> Self {
        Self {
            size: 2,
            id: TechniqueId::HiddenPair,
        }
    }

    /// Creates the hidden triple search.
    #[must_use]
    pub const fn triple() -> Self {
        Self {
            size: 3,
            id: TechniqueId::HiddenTriple,
        }
    }

    /// Creates the hidden quadruple search.
    #[must_use]
    pub const fn quad() -> Self {
        Self {
            size: 4,
            id: TechniqueId::HiddenQuad,
        }
    }
}

impl Technique for HiddenSubset {
    fn id(&self) -> TechniqueId {
        self.id
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for unit in Unit::ALL {
            // digits still open in this unit
            let open: Vec<Digit> = Digit::ALL
                .into_iter()
                .filter(|&d| !grid.cells_with(d, unit).is_empty())
                .collect();
            if open.len() <= self.size as usize {
                // the open digits already fit the unsolved cells exactly
                continue;
            }
            for subset in k_subsets(u8::try_from(open.len()).unwrap_or(0), self.size) {
                let digits: DigitSet = subset.iter().map(|&i| open[i as usize]).collect();
                let carriers = digits
                    .into_iter()
                    .fold(CellSet::EMPTY, |acc, d| acc | grid.cells_with(d, unit));
                if carriers.len() != self.size as usize {
                    continue;
                }
                let targets: Vec<_> = Digit::ALL
                    .into_iter()
                    .filter(|d| !digits.contains(*d))
                    .map(|d| (d, carriers))
                    .filter(|&(d, cells)| grid.would_eliminate(d, cells))
                    .collect();
                if targets.is_empty() {
                    continue;
                }
                let removed_digits: DigitSet = targets.iter().map(|&(d, _)| d).collect();
                return Some(
                    Deduction::eliminate(
                        targets,
                        format!(
                            "{} in {}",
                            packed_candidates(digits),
                            packed_coordinates(carriers)
                        ),
                    )
                    .with_tints(vec![
                        Tint::new(carriers, digits, Decor::Defining),
                        Tint::new(carriers, removed_digits, Decor::Removed),
                    ]),
                );
            }
        }
        None
    }
}
