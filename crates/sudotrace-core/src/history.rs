//! The move journal: recorded deltas for undo/redo and replay.

use crate::{Cell, CellSet, Digit};

/// Candidate eliminations keyed by digit.
///
/// Every mutation primitive summarises its effect as one of these maps:
/// `removed.cells(d)` is the set of cells that lost candidate `d`. The map is
/// what makes a move invertible and what the discard descriptions are
/// formatted from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemovedMap {
    by_digit: [CellSet; 9],
}

impl RemovedMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            by_digit: [CellSet::EMPTY; 9],
        }
    }

    /// Records the removal of `digit` from `cell`.
    pub const fn insert(&mut self, digit: Digit, cell: Cell) {
        self.by_digit[digit.value() as usize - 1].insert(cell);
    }

    /// Records the removal of `digit` from every cell of `cells`.
    pub fn extend(&mut self, digit: Digit, cells: CellSet) {
        self.by_digit[digit.value() as usize - 1] |= cells;
    }

    /// Returns the cells that lost `digit`.
    #[must_use]
    pub const fn cells(&self, digit: Digit) -> CellSet {
        self.by_digit[digit.value() as usize - 1]
    }

    /// Returns `true` if no removal was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_digit.iter().all(|cs: &CellSet| cs.is_empty())
    }

    /// Returns the total number of recorded removals.
    #[must_use]
    pub fn count(&self) -> usize {
        self.by_digit.iter().map(|cells| cells.len()).sum()
    }

    /// Iterates the non-empty `(digit, cells)` pairs in ascending digit order.
    pub fn iter(&self) -> impl Iterator<Item = (Digit, CellSet)> + '_ {
        Digit::ALL
            .into_iter()
            .map(|d| (d, self.cells(d)))
            .filter(|(_, cells)| !cells.is_empty())
    }
}

/// The effect of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A digit was placed in a cell.
    Place {
        /// The cell that received the value.
        cell: Cell,
        /// The placed digit.
        digit: Digit,
        /// Whether the value came from the initial puzzle.
        given: bool,
    },
    /// Candidates were discarded without placing a value.
    Discard,
}

/// One journal entry: the technique that produced it, what it did, and every
/// candidate elimination it implied.
///
/// Replaying the journal from the recorded givens reconstructs the candidate
/// state exactly; inverting an entry restores the state before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    technique: &'static str,
    kind: EntryKind,
    removed: RemovedMap,
}

impl Entry {
    pub(crate) fn new(technique: &'static str, kind: EntryKind, removed: RemovedMap) -> Self {
        Self {
            technique,
            kind,
            removed,
        }
    }

    /// Returns the name of the technique that produced this entry.
    #[must_use]
    pub fn technique(&self) -> &'static str {
        self.technique
    }

    /// Returns what the entry did.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns the recorded eliminations.
    #[must_use]
    pub fn removed(&self) -> &RemovedMap {
        &self.removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removed_map() {
        let mut map = RemovedMap::new();
        assert!(map.is_empty());
        map.insert(Digit::D3, Cell::at(0, 0));
        map.insert(Digit::D3, Cell::at(0, 1));
        map.insert(Digit::D7, Cell::at(8, 8));
        assert_eq!(map.count(), 3);
        assert_eq!(map.cells(Digit::D3).len(), 2);
        assert!(map.cells(Digit::D1).is_empty());

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, Digit::D3);
        assert_eq!(pairs[1].0, Digit::D7);
    }

    #[test]
    fn test_entry_accessors() {
        let mut removed = RemovedMap::new();
        removed.insert(Digit::D5, Cell::at(1, 1));
        let entry = Entry::new("Naked single", EntryKind::Discard, removed);
        assert_eq!(entry.technique(), "Naked single");
        assert_eq!(entry.kind(), EntryKind::Discard);
        assert_eq!(entry.removed().count(), 1);
    }
}
