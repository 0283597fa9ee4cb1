//! The solution oracle: complete-solution enumeration and uniqueness.
//!
//! Techniques never consult the oracle; it exists for generation hosts and
//! embedders that need a ground truth (uniqueness checks, full solutions).
//! The provided [`BacktrackOracle`] searches over candidate bitsets with
//! minimum-remaining-values cell selection; hosts may plug an exact-cover
//! implementation instead.

use sudotrace_core::{Cell, CellSet, Digit, DigitSet, Grid, PEERS};

/// A complete placement of all 81 cells.
pub type Solution = [Digit; 81];

/// Ground-truth access used by generators and uniqueness-aware hosts.
pub trait Oracle {
    /// Enumerates complete solutions of the grid lazily.
    fn solutions<'g>(&self, grid: &'g Grid) -> Box<dyn Iterator<Item = Solution> + 'g>;

    /// Returns `true` when the grid has exactly one solution.
    ///
    /// Stops searching after the second solution.
    fn is_unique(&self, grid: &Grid) -> bool {
        self.solutions(grid).take(2).count() == 1
    }
}

/// Backtracking search over candidate bitsets.
#[derive(Debug, Default, Clone, Copy)]
pub struct BacktrackOracle;

impl BacktrackOracle {
    /// Creates a new backtracking oracle.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Oracle for BacktrackOracle {
    fn solutions<'g>(&self, grid: &'g Grid) -> Box<dyn Iterator<Item = Solution> + 'g> {
        Box::new(Solutions::from_grid(grid))
    }
}

/// Search state: every cell's remaining candidates, with assigned cells
/// tracked separately (a one-candidate cell is merely forced until its
/// peers have been pruned).
#[derive(Clone)]
struct State {
    cands: [DigitSet; 81],
    assigned: CellSet,
}

impl State {
    fn from_grid(grid: &Grid) -> Self {
        let mut cands = [DigitSet::EMPTY; 81];
        let mut assigned = CellSet::EMPTY;
        for cell in Cell::ALL {
            cands[cell.index()] = match grid.value(cell) {
                Some(digit) => {
                    assigned.insert(cell);
                    DigitSet::from_elem(digit)
                }
                None => grid.candidates(cell),
            };
        }
        Self { cands, assigned }
    }

    /// Assigns a digit and propagates forced placements. Returns `false` on
    /// contradiction.
    fn assign(&mut self, cell: Cell, digit: Digit) -> bool {
        let mut queue = vec![(cell, digit)];
        while let Some((cell, digit)) = queue.pop() {
            self.cands[cell.index()] = DigitSet::from_elem(digit);
            self.assigned.insert(cell);
            for peer in PEERS[cell.index()] - self.assigned {
                let peer_cands = &mut self.cands[peer.index()];
                if !peer_cands.contains(digit) {
                    continue;
                }
                peer_cands.remove(digit);
                match peer_cands.as_single() {
                    Some(forced) => queue.push((peer, forced)),
                    None if peer_cands.is_empty() => return false,
                    None => {}
                }
            }
        }
        true
    }

    fn complete(&self) -> bool {
        self.assigned == CellSet::FULL
    }

    fn solution(&self) -> Solution {
        let mut out = [Digit::D1; 81];
        for cell in Cell::ALL {
            if let Some(digit) = self.cands[cell.index()].as_single() {
                out[cell.index()] = digit;
            }
        }
        out
    }

    /// Picks the unassigned cell with the fewest candidates.
    fn best_assumption(&self) -> Option<(Cell, DigitSet)> {
        (!self.assigned)
            .into_iter()
            .map(|cell| (cell, self.cands[cell.index()]))
            .min_by_key(|(cell, cands)| (cands.len(), cell.index()))
    }
}

/// Lazy solution enumeration with an explicit branching stack.
struct Solutions {
    stack: Vec<(State, Cell, DigitSet)>,
    exhausted: bool,
}

impl Solutions {
    fn from_grid(grid: &Grid) -> Self {
        let mut state = State::from_grid(grid);

        // settle the forced placements of the initial position
        let forced: Vec<Cell> = (!state.assigned)
            .into_iter()
            .filter(|&c| state.cands[c.index()].len() == 1)
            .collect();
        for cell in forced {
            if state.assigned.contains(cell) {
                continue;
            }
            let Some(digit) = state.cands[cell.index()].as_single() else {
                return Self { stack: Vec::new(), exhausted: true };
            };
            if !state.assign(cell, digit) {
                return Self { stack: Vec::new(), exhausted: true };
            }
        }
        if state.cands.iter().any(|c| c.is_empty()) {
            return Self { stack: Vec::new(), exhausted: true };
        }
        if state.complete() {
            // degenerate stack entry that yields the lone solution
            return Self {
                stack: vec![(state, Cell::new(0), DigitSet::EMPTY)],
                exhausted: false,
            };
        }
        let Some((cell, digits)) = state.best_assumption() else {
            return Self { stack: Vec::new(), exhausted: true };
        };
        Self {
            stack: vec![(state, cell, digits)],
            exhausted: false,
        }
    }
}

impl Iterator for Solutions {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.exhausted {
            return None;
        }
        while let Some((state, cell, mut digits)) = self.stack.pop() {
            if state.complete() {
                return Some(state.solution());
            }
            let Some(digit) = digits.first() else {
                continue;
            };
            digits.remove(digit);
            if !digits.is_empty() {
                self.stack.push((state.clone(), cell, digits));
            }
            let mut next = state;
            if !next.assign(cell, digit) {
                continue;
            }
            if next.complete() {
                return Some(next.solution());
            }
            if let Some((cell, digits)) = next.best_assumption() {
                self.stack.push((next, cell, digits));
            }
        }
        self.exhausted = true;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_solved_grid_has_one_solution() {
        let grid = Grid::parse(SOLVED).unwrap();
        let oracle = BacktrackOracle::new();
        let solutions: Vec<_> = oracle.solutions(&grid).collect();
        assert_eq!(solutions.len(), 1);
        assert!(oracle.is_unique(&grid));
        let s81: String = solutions[0].iter().map(|d| d.to_char()).collect();
        assert_eq!(s81, SOLVED);
    }

    #[test]
    fn test_near_complete_grid() {
        // remove one value: still exactly one completion
        let mut s = SOLVED.to_string();
        s.replace_range(0..1, ".");
        let grid = Grid::parse(&s).unwrap();
        let oracle = BacktrackOracle::new();
        assert!(oracle.is_unique(&grid));
        let solution = oracle.solutions(&grid).next().unwrap();
        assert_eq!(solution[0], Digit::D5);
    }

    #[test]
    fn test_empty_grid_has_many_solutions() {
        let grid = Grid::new();
        let oracle = BacktrackOracle::new();
        assert!(!oracle.is_unique(&grid));
        assert_eq!(oracle.solutions(&grid).take(3).count(), 3);
    }

    #[test]
    fn test_contradictory_grid_has_no_solutions() {
        let mut grid = Grid::new();
        // a cell with no candidates is unsatisfiable
        grid.set_candidates(Cell::at(0, 0), DigitSet::EMPTY);
        let oracle = BacktrackOracle::new();
        assert_eq!(oracle.solutions(&grid).count(), 0);
        assert!(!oracle.is_unique(&grid));
    }

    #[test]
    fn test_solutions_are_valid() {
        let grid =
            Grid::parse("........2..6....39..9.7..463....672..5..........4.1.....235....9.1.8...5.3...9...")
                .unwrap();
        let oracle = BacktrackOracle::new();
        let solution = oracle.solutions(&grid).next().unwrap();
        // each row holds each digit once
        for row in 0..9 {
            let digits: DigitSet = (0..9).map(|col| solution[row * 9 + col]).collect();
            assert_eq!(digits, DigitSet::FULL);
        }
    }
}
