//! Sue de Coq.

use sudotrace_core::{BOX_COLS, BOX_ROWS, Band, CellSet, Decor, DigitSet, Grid, Tint};
use sudotrace_core::fmt::{packed_candidates, packed_coordinates};

use super::{Deduction, Technique, TechniqueId, support::k_subsets};

/// Two or three cells of a box-row/col whose candidates split into a line
/// part and a box part, each completed by an almost-locked set in the
/// corresponding complement: the line digits leave the rest of the line,
/// the box digits the rest of the box.
#[derive(Debug, Default, Clone, Copy)]
pub struct SueDeCoq;

impl SueDeCoq {
    /// Creates a new `SueDeCoq` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for SueDeCoq {
    fn id(&self) -> TechniqueId {
        TechniqueId::SueDeCoq
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        for band in BOX_ROWS.iter().chain(BOX_COLS.iter()) {
            if let Some(deduction) = find_in_band(grid, band) {
                return Some(deduction);
            }
        }
        None
    }
}

/// An almost-locked set drawn from a complement: its cells and candidates.
struct Als {
    cells: CellSet,
    digits: DigitSet,
}

fn als_pool(grid: &Grid, rest: CellSet) -> Vec<Als> {
    let pool: Vec<_> = rest
        .into_iter()
        .filter(|&c| grid.value(c).is_none())
        .collect();
    let mut out = Vec::new();
    for size in 1..=2u8 {
        if usize::from(size) > pool.len() {
            break;
        }
        for subset in k_subsets(u8::try_from(pool.len()).unwrap_or(0), size) {
            let cells: CellSet = subset.iter().map(|&i| pool[i as usize]).collect();
            let digits = cells
                .into_iter()
                .fold(DigitSet::EMPTY, |acc, c| acc | grid.candidates(c));
            if digits.len() == usize::from(size) + 1 {
                out.push(Als { cells, digits });
            }
        }
    }
    out
}

fn find_in_band(grid: &Grid, band: &Band) -> Option<Deduction> {
    let open: Vec<_> = band
        .cells
        .iter()
        .copied()
        .filter(|&c| grid.value(c).is_none())
        .collect();
    if open.len() < 2 {
        return None;
    }

    let line_sets = als_pool(grid, band.line_rest);
    let box_sets = als_pool(grid, band.box_rest);

    for size in 2..=open.len() {
        for subset in k_subsets(u8::try_from(open.len()).unwrap_or(0), u8::try_from(size).unwrap_or(0)) {
            let core: CellSet = subset.iter().map(|&i| open[i as usize]).collect();
            let core_digits = core
                .into_iter()
                .fold(DigitSet::EMPTY, |acc, c| acc | grid.candidates(c));
            if core_digits.len() < core.len() + 2 {
                continue;
            }
            for line_als in &line_sets {
                if (line_als.digits & core_digits).is_empty() {
                    continue;
                }
                for box_als in &box_sets {
                    if !(line_als.digits & box_als.digits).is_empty() {
                        continue;
                    }
                    let all_digits = core_digits | line_als.digits | box_als.digits;
                    let all_cells = core.len() + line_als.cells.len() + box_als.cells.len();
                    if all_digits.len() != all_cells {
                        continue;
                    }
                    let line_digits = line_als.digits | (core_digits - box_als.digits);
                    let box_digits = box_als.digits | (core_digits - line_als.digits);
                    let line_victims = band.line.set() - core - line_als.cells;
                    let box_victims = band.bx.set() - core - box_als.cells;

                    let mut targets = Vec::new();
                    for d in line_digits {
                        if grid.would_eliminate(d, line_victims) {
                            targets.push((d, line_victims));
                        }
                    }
                    for d in box_digits {
                        if grid.would_eliminate(d, box_victims) {
                            targets.push((d, box_victims));
                        }
                    }
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
                                "{} in {}, {} in {}, {} in {}",
                                packed_candidates(core_digits),
                                packed_coordinates(core),
                                packed_candidates(line_als.digits),
                                packed_coordinates(line_als.cells),
                                packed_candidates(box_als.digits),
                                packed_coordinates(box_als.cells)
                            ),
                        )
                        .with_tints(vec![
                            Tint::new(core, core_digits, Decor::Defining),
                            Tint::new(line_als.cells, line_als.digits, Decor::Color1),
                            Tint::new(box_als.cells, box_als.digits, Decor::Color2),
                            Tint::new(removed, all_digits, Decor::Removed),
                        ]),
                    );
                }
            }
        }
    }
    None
}
