//! XY-chains over bivalue cells, by transitive closure of typed links.

use sudotrace_core::{Cell, CellSet, Decor, Digit, DigitSet, Grid, PEERS, Tint};

use super::{Deduction, Technique, TechniqueId};

/// A chain: its cells and the candidate sequence along it. The candidate
/// sequence has one more entry than there are links: `cands[i]` enters cell
/// `cells[i]`, `cands[i+1]` leaves it.
#[derive(Debug, Clone)]
struct Chain {
    cells: Vec<Cell>,
    cands: Vec<Digit>,
}

/// A chain of bivalue cells in which adjacent cells share one candidate and
/// the two end candidates are equal: that digit leaves every cell seeing
/// both ends.
///
/// The search is an iterative transitive closure over the link adjacency
/// matrix; the first concatenation that produces an eliminating chain wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyChain;

impl XyChain {
    /// Creates a new `XyChain` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Technique for XyChain {
    fn id(&self) -> TechniqueId {
        TechniqueId::XyChain
    }

    fn find(&self, grid: &Grid) -> Option<Deduction> {
        let pairs: Vec<Cell> = Cell::ALL
            .into_iter()
            .filter(|&c| grid.is_bivalue(c))
            .collect();
        let n = pairs.len();
        if n < 3 {
            return None;
        }
        let index_of = |cell: Cell| pairs.iter().position(|&p| p == cell);

        // base links between seeing bivalue cells
        let mut adjacency: Vec<Vec<Vec<Chain>>> = vec![vec![Vec::new(); n]; n];
        for (i, &p1) in pairs.iter().enumerate() {
            let c1 = grid.candidates(p1);
            for p2 in PEERS[p1.index()] {
                let Some(j) = index_of(p2) else {
                    continue;
                };
                let c2 = grid.candidates(p2);
                if c1 == c2 {
                    // a remote-pair link works in both directions
                    let Some((a, b)) = c1.as_pair() else {
                        continue;
                    };
                    adjacency[i][j].push(Chain {
                        cells: vec![p1, p2],
                        cands: vec![a, b, a],
                    });
                    adjacency[i][j].push(Chain {
                        cells: vec![p1, p2],
                        cands: vec![b, a, b],
                    });
                } else if (c1 & c2).len() == 1 {
                    let shared = (c1 & c2).first().unwrap_or(Digit::D1);
                    let enter = (c1 - c2).first().unwrap_or(Digit::D1);
                    let exit = (c2 - c1).first().unwrap_or(Digit::D1);
                    adjacency[i][j].push(Chain {
                        cells: vec![p1, p2],
                        cands: vec![enter, shared, exit],
                    });
                }
            }
        }

        // transitive closure; every admissible concatenation is tested as it
        // is produced
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let mut fresh = Vec::new();
                    for left in &adjacency[i][k] {
                        for right in &adjacency[k][j] {
                            if left.cands[left.cands.len() - 2..] != right.cands[..2] {
                                continue;
                            }
                            if left
                                .cells
                                .iter()
                                .any(|c| right.cells[1..].contains(c))
                            {
                                continue;
                            }
                            let endpoints = (left.cands[0], *right.cands.last().unwrap_or(&Digit::D1));
                            if adjacency[i][j]
                                .iter()
                                .chain(fresh.iter())
                                .any(|c: &Chain| {
                                    (*c.cands.first().unwrap_or(&Digit::D1), *c.cands.last().unwrap_or(&Digit::D1))
                                        == endpoints
                                })
                            {
                                continue;
                            }
                            let mut cells = left.cells.clone();
                            cells.extend_from_slice(&right.cells[1..]);
                            let mut cands = left.cands.clone();
                            cands.extend_from_slice(&right.cands[2..]);
                            let chain = Chain { cells, cands };
                            if let Some(deduction) = eliminating(grid, &chain) {
                                return Some(deduction);
                            }
                            fresh.push(chain);
                        }
                    }
                    adjacency[i][j].append(&mut fresh);
                }
            }
        }
        None
    }
}

fn eliminating(grid: &Grid, chain: &Chain) -> Option<Deduction> {
    let first_cand = *chain.cands.first()?;
    let last_cand = *chain.cands.last()?;
    if first_cand != last_cand {
        return None;
    }
    let first = *chain.cells.first()?;
    let last = *chain.cells.last()?;
    let in_chain: CellSet = chain.cells.iter().copied().collect();
    let victims =
        (PEERS[first.index()] & PEERS[last.index()] & grid.digit_cells(first_cand)) - in_chain;
    if victims.is_empty() {
        return None;
    }

    let mut subject = format!("{first_cand} {first_cand}-");
    for (cell, cand) in chain.cells.iter().zip(chain.cands[1..].iter()) {
        subject.push_str(&format!("{cell} -{cand}-"));
    }
    subject.pop();
    let mut tints: Vec<Tint> = chain
        .cells
        .iter()
        .zip(chain.cands.windows(2))
        .map(|(&cell, w)| {
            Tint::new(
                CellSet::from_elem(cell),
                DigitSet::from_iter(w.iter().copied()),
                Decor::Defining,
            )
        })
        .collect();
    tints.push(Tint::new(
        victims,
        DigitSet::from_elem(first_cand),
        Decor::Removed,
    ));
    Some(Deduction::discard(first_cand, victims, subject).with_tints(tints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_three_cell_xy_chain() {
        // r1c1 {1,2} - r1c5 {2,3} - r5c5 {3,1}: both ends hold 1 when
        // either end is forced, so cells seeing both lose 1
        let tester = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(0, 0), [Digit::D1, Digit::D2])
            .sculpt(Cell::at(0, 4), [Digit::D2, Digit::D3])
            .sculpt(Cell::at(4, 4), [Digit::D3, Digit::D1])
            .apply_once(&XyChain::new());
        tester
            .assert_removed_exact(Cell::at(4, 0), [Digit::D1])
            .assert_no_change(Cell::at(0, 6))
            .assert_no_change(Cell::at(0, 4));
    }

    #[test]
    fn test_nothing_without_closing_candidate() {
        let _ = TechniqueTester::new(Grid::new())
            .sculpt(Cell::at(0, 0), [Digit::D1, Digit::D2])
            .sculpt(Cell::at(0, 4), [Digit::D2, Digit::D3])
            .sculpt(Cell::at(4, 4), [Digit::D3, Digit::D4])
            .assert_stuck(&XyChain::new());
    }

    #[test]
    fn test_nothing_on_empty_grid() {
        let _ = TechniqueTester::new(Grid::new()).assert_stuck(&XyChain::new());
    }
}
