//! The candidate grid: 81 cells, their candidate sets, and the move journal.

use crate::{
    Cell, CellSet, Digit, DigitSet, Unit,
    error::ConsistencyError,
    history::{Entry, EntryKind, RemovedMap},
    render::DecorMode,
    unit::PEERS,
};

/// The 9×9 candidate grid.
///
/// A grid owns the full solving state: the placed values, the given flags,
/// the per-cell candidate sets, and the journal of applied moves. Candidate
/// state is kept in two synchronized views:
///
/// - per cell, a [`DigitSet`] of admissible digits;
/// - per digit, a [`CellSet`] of cells still carrying it.
///
/// The second view is the bitboard the technique library works from: fish,
/// colouring, and chain searches are all intersections of a digit's cell
/// mask with unit masks.
///
/// All solving mutations go through [`place`](Self::place) and
/// [`eliminate`](Self::eliminate), which journal their deltas;
/// [`undo`](Self::undo) and [`redo`](Self::redo) move the journal cursor.
/// Loading a puzzle uses the unjournaled ingestion primitives instead, so
/// the journal always replays on top of the recorded givens.
///
/// # Examples
///
/// ```
/// use sudotrace_core::{Cell, Digit, Grid};
///
/// let mut grid = Grid::new();
/// grid.place("Naked single", Cell::at(4, 4), Digit::D5, false);
/// assert_eq!(grid.value(Cell::at(4, 4)), Some(Digit::D5));
/// assert!(!grid.candidates(Cell::at(4, 5)).contains(Digit::D5));
///
/// grid.undo();
/// assert_eq!(grid.value(Cell::at(4, 4)), None);
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    values: [Option<Digit>; 81],
    candidates: [DigitSet; 81],
    /// `positions[d-1]` is the set of cells carrying `d` as a candidate.
    positions: [CellSet; 9],
    solved_set: CellSet,
    givens: CellSet,
    journal: Vec<Entry>,
    cursor: usize,
    decoration: DecorMode,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Grid {
    /// Two grids are equal when their values, given flags, and candidate
    /// sets agree; journals are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
            && self.candidates == other.candidates
            && self.givens == other.givens
    }
}

impl Eq for Grid {}

impl Grid {
    /// Creates an empty grid: no values, every cell carries all nine
    /// candidates.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: [None; 81],
            candidates: [DigitSet::FULL; 81],
            positions: [CellSet::FULL; 9],
            solved_set: CellSet::EMPTY,
            givens: CellSet::EMPTY,
            journal: Vec::new(),
            cursor: 0,
            decoration: DecorMode::Plain,
        }
    }

    /// Clears all values, candidates, given flags, and the journal.
    pub fn reset(&mut self) {
        let decoration = self.decoration;
        *self = Self::new();
        self.decoration = decoration;
    }

    // --- read-only queries ---------------------------------------------

    /// Returns the value of a cell, `None` while unsolved.
    #[must_use]
    #[inline]
    pub fn value(&self, cell: Cell) -> Option<Digit> {
        self.values[cell.index()]
    }

    /// Returns `true` if the cell's value came from the initial puzzle.
    #[must_use]
    #[inline]
    pub fn is_given(&self, cell: Cell) -> bool {
        self.givens.contains(cell)
    }

    /// Returns the set of cells whose value came from the initial puzzle.
    #[must_use]
    #[inline]
    pub fn givens(&self) -> CellSet {
        self.givens
    }

    /// Returns the candidates of a cell. Empty exactly when the cell is
    /// solved.
    #[must_use]
    #[inline]
    pub fn candidates(&self, cell: Cell) -> DigitSet {
        self.candidates[cell.index()]
    }

    /// Returns the set of cells carrying `digit` as a candidate.
    #[must_use]
    #[inline]
    pub fn digit_cells(&self, digit: Digit) -> CellSet {
        self.positions[digit.value() as usize - 1]
    }

    /// Returns the cells of `cells` that carry `digit` as a candidate.
    #[must_use]
    #[inline]
    pub fn candidates_in(&self, cells: CellSet, digit: Digit) -> CellSet {
        self.digit_cells(digit) & cells
    }

    /// Returns the cells of `unit` that carry `digit` as a candidate.
    #[must_use]
    #[inline]
    pub fn cells_with(&self, digit: Digit, unit: Unit) -> CellSet {
        self.digit_cells(digit) & unit.set()
    }

    /// Returns the set of solved cells.
    #[must_use]
    #[inline]
    pub fn solved_cells(&self) -> CellSet {
        self.solved_set
    }

    /// Returns the set of unsolved cells.
    #[must_use]
    #[inline]
    pub fn unsolved_cells(&self) -> CellSet {
        !self.solved_set
    }

    /// Returns `true` if every cell has a value.
    #[must_use]
    pub fn solved(&self) -> bool {
        self.solved_set == CellSet::FULL
    }

    /// Returns `true` if the cell has exactly two candidates.
    #[must_use]
    #[inline]
    pub fn is_bivalue(&self, cell: Cell) -> bool {
        self.candidates[cell.index()].len() == 2
    }

    /// Returns every cell conjugate to `cell` for `digit`: the other cell of
    /// any unit in which `cell` is one of exactly two carriers of `digit`.
    #[must_use]
    pub fn conjugate_partners(&self, cell: Cell, digit: Digit) -> CellSet {
        let mut partners = CellSet::EMPTY;
        for unit in Unit::of(cell) {
            let carriers = self.cells_with(digit, unit);
            if carriers.len() == 2 && carriers.contains(cell) {
                partners |= carriers - CellSet::from_elem(cell);
            }
        }
        partners
    }

    /// Returns `true` if removing `digit` from any cell of `cells` would
    /// change the grid.
    #[must_use]
    #[inline]
    pub fn would_eliminate(&self, digit: Digit, cells: CellSet) -> bool {
        !(self.digit_cells(digit) & cells).is_empty()
    }

    // --- decoration -----------------------------------------------------

    /// Returns how the dump renders candidate decorations.
    #[must_use]
    pub fn decoration(&self) -> DecorMode {
        self.decoration
    }

    /// Sets how the dump renders candidate decorations.
    pub fn set_decoration(&mut self, mode: DecorMode) {
        self.decoration = mode;
    }

    // --- ingestion primitives (no journal) ------------------------------

    /// Places a given digit while loading a puzzle. Not journaled.
    pub fn place_given(&mut self, cell: Cell, digit: Digit) {
        self.set_value_raw(cell, digit, true);
        self.propagate_value(cell, digit);
    }

    /// Places a non-given value while loading a puzzle. Not journaled.
    pub fn place_value(&mut self, cell: Cell, digit: Digit) {
        self.set_value_raw(cell, digit, false);
        self.propagate_value(cell, digit);
    }

    /// Overwrites the candidate set of an unsolved cell while loading a
    /// puzzle or sculpting a test position. Not journaled.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already solved.
    pub fn set_candidates(&mut self, cell: Cell, digits: DigitSet) {
        assert!(
            self.values[cell.index()].is_none(),
            "cannot set candidates of solved cell {cell}"
        );
        self.clear_candidates(cell);
        for digit in digits {
            self.insert_candidate(cell, digit);
        }
    }

    /// Removes a single candidate while sculpting a test position. Not
    /// journaled.
    pub fn remove_candidate(&mut self, cell: Cell, digit: Digit) {
        self.remove_candidate_raw(cell, digit);
    }

    // --- journaled mutation primitives -----------------------------------

    /// Places `digit` in `cell`, journals the move, and returns the number
    /// of changes (the placement itself plus every implied candidate
    /// elimination).
    ///
    /// The recorded removal map holds the cell's other candidates plus the
    /// digit's removal from every peer that carried it, which is exactly the
    /// delta [`undo`](Self::undo) inverts.
    ///
    /// # Panics
    ///
    /// Panics if `digit` is not a candidate of `cell`; attempting such a
    /// placement is a bug in the calling technique, not a runtime condition.
    pub fn place(&mut self, technique: &'static str, cell: Cell, digit: Digit, given: bool) -> usize {
        assert!(
            self.candidates[cell.index()].contains(digit),
            "{technique}: {digit} is not a candidate of {cell}"
        );

        let mut removed = RemovedMap::new();
        for other in self.candidates[cell.index()] {
            if other != digit {
                removed.insert(other, cell);
            }
        }
        let peers = PEERS[cell.index()] & self.digit_cells(digit);
        removed.extend(digit, peers);

        self.set_value_raw(cell, digit, given);
        for peer in peers {
            self.remove_candidate_raw(peer, digit);
        }

        let eliminations = removed.count();
        self.push_entry(Entry::new(
            technique,
            EntryKind::Place { cell, digit, given },
            removed,
        ));
        1 + eliminations
    }

    /// Removes the listed digits from the listed cells, journals the actual
    /// removals as one discard entry, and returns how many candidates were
    /// removed.
    ///
    /// When nothing would change, no entry is written and 0 is returned, so
    /// an unproductive call leaves the grid untouched.
    pub fn eliminate(&mut self, technique: &'static str, targets: &[(Digit, CellSet)]) -> usize {
        let mut removed = RemovedMap::new();
        for &(digit, cells) in targets {
            let actual = cells & self.digit_cells(digit);
            for cell in actual {
                self.remove_candidate_raw(cell, digit);
            }
            removed.extend(digit, actual);
        }
        if removed.is_empty() {
            return 0;
        }
        let count = removed.count();
        self.push_entry(Entry::new(technique, EntryKind::Discard, removed));
        count
    }

    // --- journal ---------------------------------------------------------

    /// Returns the journal entries, applied and redoable alike.
    #[must_use]
    pub fn history(&self) -> &[Entry] {
        &self.journal
    }

    /// Returns the journal cursor: entries `0..cursor` are applied, the rest
    /// are redoable.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the most recently applied entry.
    #[must_use]
    pub fn last_entry(&self) -> Option<&Entry> {
        self.cursor.checked_sub(1).map(|i| &self.journal[i])
    }

    /// Undoes the most recently applied entry. Returns `false` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(index) = self.cursor.checked_sub(1) else {
            return false;
        };
        let entry = self.journal[index].clone();
        match entry.kind() {
            EntryKind::Place { cell, digit, given } => {
                self.values[cell.index()] = None;
                self.solved_set.remove(cell);
                if given {
                    self.givens.remove(cell);
                }
                self.insert_candidate(cell, digit);
                for (d, cells) in entry.removed().iter() {
                    for c in cells {
                        self.insert_candidate(c, d);
                    }
                }
            }
            EntryKind::Discard => {
                for (d, cells) in entry.removed().iter() {
                    for c in cells {
                        // Tolerate replay in a different order: a candidate
                        // shadowed by a solved peer stays removed.
                        if self.values[c.index()].is_none() && !self.value_forbids(c, d) {
                            self.insert_candidate(c, d);
                        }
                    }
                }
            }
        }
        self.cursor = index;
        true
    }

    /// Reapplies the entry at the cursor. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.cursor >= self.journal.len() {
            return false;
        }
        let entry = self.journal[self.cursor].clone();
        match entry.kind() {
            EntryKind::Place { cell, digit, given } => {
                self.set_value_raw(cell, digit, given);
            }
            EntryKind::Discard => {}
        }
        for (d, cells) in entry.removed().iter() {
            for c in cells {
                self.remove_candidate_raw(c, d);
            }
        }
        self.cursor += 1;
        true
    }

    // --- consistency ------------------------------------------------------

    /// Checks the grid's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] naming the first violated invariant:
    /// a solved cell with leftover candidates, a peer still carrying a
    /// solved value, an unsolved cell with no candidates, or a unit in which
    /// some digit can no longer be placed.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for cell in Cell::ALL {
            match self.values[cell.index()] {
                Some(digit) => {
                    if !self.candidates[cell.index()].is_empty() {
                        return Err(ConsistencyError::SolvedCellWithCandidates { cell });
                    }
                    if self.would_eliminate(digit, PEERS[cell.index()]) {
                        return Err(ConsistencyError::PeerCarriesValue { cell, digit });
                    }
                }
                None => {
                    if self.candidates[cell.index()].is_empty() {
                        return Err(ConsistencyError::NoCandidates { cell });
                    }
                }
            }
        }
        for unit in Unit::ALL {
            for digit in Digit::ALL {
                let placed = unit
                    .cells()
                    .iter()
                    .any(|&c| self.values[c.index()] == Some(digit));
                if !placed && self.cells_with(digit, unit).is_empty() {
                    return Err(ConsistencyError::DigitUnplaceable { unit, digit });
                }
            }
        }
        Ok(())
    }

    // --- internals --------------------------------------------------------

    fn value_forbids(&self, cell: Cell, digit: Digit) -> bool {
        PEERS[cell.index()]
            .into_iter()
            .any(|peer| self.values[peer.index()] == Some(digit))
    }

    fn set_value_raw(&mut self, cell: Cell, digit: Digit, given: bool) {
        self.clear_candidates(cell);
        self.values[cell.index()] = Some(digit);
        self.solved_set.insert(cell);
        if given {
            self.givens.insert(cell);
        }
    }

    fn propagate_value(&mut self, cell: Cell, digit: Digit) {
        for peer in PEERS[cell.index()] & self.digit_cells(digit) {
            self.remove_candidate_raw(peer, digit);
        }
    }

    fn clear_candidates(&mut self, cell: Cell) {
        for digit in self.candidates[cell.index()] {
            self.positions[digit.value() as usize - 1].remove(cell);
        }
        self.candidates[cell.index()] = DigitSet::EMPTY;
    }

    fn insert_candidate(&mut self, cell: Cell, digit: Digit) {
        self.candidates[cell.index()].insert(digit);
        self.positions[digit.value() as usize - 1].insert(cell);
    }

    fn remove_candidate_raw(&mut self, cell: Cell, digit: Digit) {
        self.candidates[cell.index()].remove(digit);
        self.positions[digit.value() as usize - 1].remove(cell);
    }

    fn push_entry(&mut self, entry: Entry) {
        self.journal.truncate(self.cursor);
        self.journal.push(entry);
        self.cursor = self.journal.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_has_full_candidates() {
        let grid = Grid::new();
        assert!(!grid.solved());
        for cell in Cell::ALL {
            assert_eq!(grid.candidates(cell), DigitSet::FULL);
        }
        assert_eq!(grid.digit_cells(Digit::D1), CellSet::FULL);
        grid.check_consistency().unwrap();
    }

    #[test]
    fn test_place_propagates_and_journals() {
        let mut grid = Grid::new();
        let n = grid.place("Hidden single", Cell::at(0, 0), Digit::D5, false);
        // 8 other candidates at the cell + 20 peers carrying D5 + the placement
        assert_eq!(n, 1 + 8 + 20);
        assert_eq!(grid.value(Cell::at(0, 0)), Some(Digit::D5));
        assert!(grid.candidates(Cell::at(0, 0)).is_empty());
        assert!(!grid.candidates(Cell::at(0, 8)).contains(Digit::D5));
        assert!(!grid.candidates(Cell::at(8, 0)).contains(Digit::D5));
        assert!(!grid.candidates(Cell::at(2, 2)).contains(Digit::D5));
        assert_eq!(grid.history().len(), 1);
        assert_eq!(grid.last_entry().unwrap().technique(), "Hidden single");
        grid.check_consistency().unwrap();
    }

    #[test]
    fn test_eliminate_records_actual_removals_only() {
        let mut grid = Grid::new();
        let targets = [(Digit::D3, CellSet::from_iter([Cell::at(0, 0), Cell::at(0, 1)]))];
        assert_eq!(grid.eliminate("Pointing", &targets), 2);
        // a second identical call removes nothing and writes no entry
        assert_eq!(grid.eliminate("Pointing", &targets), 0);
        assert_eq!(grid.history().len(), 1);
    }

    #[test]
    fn test_undo_redo_involution() {
        let mut grid = Grid::new();
        grid.place_given(Cell::at(0, 0), Digit::D1);
        let before = grid.clone();

        grid.place("Naked single", Cell::at(4, 4), Digit::D7, false);
        grid.eliminate("Pointing", &[(Digit::D2, CellSet::from_elem(Cell::at(8, 8)))]);
        let after = grid.clone();

        assert!(grid.undo());
        assert!(grid.undo());
        assert_eq!(grid, before);
        assert!(!grid.undo());

        assert!(grid.redo());
        assert!(grid.redo());
        assert_eq!(grid, after);
        assert!(!grid.redo());
    }

    #[test]
    fn test_new_entry_truncates_redo_tail() {
        let mut grid = Grid::new();
        grid.eliminate("Pointing", &[(Digit::D1, CellSet::from_elem(Cell::at(0, 0)))]);
        grid.eliminate("Claiming", &[(Digit::D2, CellSet::from_elem(Cell::at(0, 1)))]);
        grid.undo();
        assert_eq!(grid.history().len(), 2);
        grid.eliminate("X-wing", &[(Digit::D3, CellSet::from_elem(Cell::at(0, 2)))]);
        assert_eq!(grid.history().len(), 2);
        assert_eq!(grid.history()[1].technique(), "X-wing");
        assert_eq!(grid.cursor(), 2);
    }

    #[test]
    fn test_undo_discard_respects_solved_peers() {
        let mut grid = Grid::new();
        // discard D5 from r1c2, then solve r1c1 with D5
        grid.eliminate("Pointing", &[(Digit::D5, CellSet::from_elem(Cell::at(0, 1)))]);
        grid.place("Naked single", Cell::at(0, 0), Digit::D5, false);
        // undoing only the discard must not resurrect D5 at r1c2: the solved
        // peer still forbids it
        grid.undo(); // undo the placement first
        grid.redo();
        // now cursor is past both; undo placement, then discard
        grid.undo();
        grid.undo();
        assert!(grid.candidates(Cell::at(0, 1)).contains(Digit::D5));
    }

    #[test]
    fn test_conjugate_partners() {
        let mut grid = Grid::new();
        // leave D4 only at r1c1 and r1c9 in row 1
        for col in 1..8 {
            grid.remove_candidate(Cell::at(0, col), Digit::D4);
        }
        let partners = grid.conjugate_partners(Cell::at(0, 0), Digit::D4);
        assert!(partners.contains(Cell::at(0, 8)));
    }

    #[test]
    fn test_bivalue_query() {
        let mut grid = Grid::new();
        grid.set_candidates(Cell::at(2, 2), DigitSet::from_iter([Digit::D1, Digit::D2]));
        assert!(grid.is_bivalue(Cell::at(2, 2)));
        assert!(!grid.is_bivalue(Cell::at(0, 0)));
    }

    #[test]
    #[should_panic(expected = "is not a candidate")]
    fn test_place_non_candidate_panics() {
        let mut grid = Grid::new();
        grid.remove_candidate(Cell::at(0, 0), Digit::D1);
        grid.place("Naked single", Cell::at(0, 0), Digit::D1, false);
    }
}
