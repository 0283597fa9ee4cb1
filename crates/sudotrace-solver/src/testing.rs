//! Test utilities for technique implementations.
//!
//! This module provides [`TechniqueTester`], a fluent harness for verifying
//! that techniques find what they should, commit what they found, and leave
//! the grid untouched otherwise.
//!
//! # Example
//!
//! ```
//! use sudotrace_core::{Cell, Digit};
//! use sudotrace_solver::technique::NakedSingle;
//! use sudotrace_solver::testing::TechniqueTester;
//!
//! TechniqueTester::from_s81(
//!     "12345678.........................................................................",
//! )
//! .apply_once(&NakedSingle::new())
//! .assert_placed(Cell::at(0, 8), Digit::D9);
//! ```

use sudotrace_core::{Cell, Digit, DigitSet, Grid};

use crate::technique::{Technique, commit};

/// A test harness for verifying technique implementations.
///
/// The tester keeps the initial and current grid, so assertions can speak
/// about what changed. All methods return `self` for chaining and panic
/// with `#[track_caller]` locations on failure.
#[derive(Debug)]
pub struct TechniqueTester {
    initial: Grid,
    current: Grid,
}

impl TechniqueTester {
    /// Creates a tester from a grid.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            initial: grid.clone(),
            current: grid,
        }
    }

    /// Creates a tester from an 81-character puzzle string.
    ///
    /// # Panics
    ///
    /// Panics if the string is not valid S81.
    #[track_caller]
    #[must_use]
    pub fn from_s81(s: &str) -> Self {
        Self::new(Grid::parse(s).expect("invalid S81 fixture"))
    }

    /// Overwrites the candidates of a cell before applying techniques.
    ///
    /// Also refreshes the recorded initial state, so later assertions
    /// compare against the sculpted position.
    #[must_use]
    pub fn sculpt<I>(mut self, cell: Cell, digits: I) -> Self
    where
        I: IntoIterator<Item = Digit>,
    {
        self.current.set_candidates(cell, DigitSet::from_iter(digits));
        self.initial = self.current.clone();
        self
    }

    /// Returns the current grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// Applies the technique once; panics if a found deduction commits
    /// nothing (a technique must only report productive applications).
    #[track_caller]
    #[must_use]
    pub fn apply_once<T: Technique>(mut self, technique: &T) -> Self {
        if let Some(deduction) = technique.find(&self.current) {
            let changed = commit(&mut self.current, technique.id(), &deduction);
            assert!(
                changed > 0,
                "{} found an unproductive deduction: {deduction:?}",
                technique.id().caption()
            );
        }
        self
    }

    /// Applies the technique repeatedly until it finds nothing.
    #[track_caller]
    #[must_use]
    pub fn apply_until_stuck<T: Technique>(mut self, technique: &T) -> Self {
        while let Some(deduction) = technique.find(&self.current) {
            let changed = commit(&mut self.current, technique.id(), &deduction);
            assert!(
                changed > 0,
                "{} found an unproductive deduction: {deduction:?}",
                technique.id().caption()
            );
        }
        self
    }

    /// Asserts that the technique currently finds nothing.
    #[track_caller]
    #[must_use]
    pub fn assert_stuck<T: Technique>(self, technique: &T) -> Self {
        let found = technique.find(&self.current);
        assert!(
            found.is_none(),
            "Expected {} to find nothing, but found {found:?}",
            technique.id().caption()
        );
        self
    }

    /// Asserts that a previously unsolved cell now holds `digit`.
    #[track_caller]
    #[must_use]
    pub fn assert_placed(self, cell: Cell, digit: Digit) -> Self {
        assert_eq!(
            self.initial.value(cell),
            None,
            "Expected {cell} to start unsolved"
        );
        assert_eq!(
            self.current.value(cell),
            Some(digit),
            "Expected {cell} to be solved with {digit}, but it holds {:?} with candidates {:?}",
            self.current.value(cell),
            self.current.candidates(cell)
        );
        self
    }

    /// Asserts that all listed candidates were removed from a cell (other
    /// removals are allowed).
    #[track_caller]
    #[must_use]
    pub fn assert_removed_includes<I>(self, cell: Cell, digits: I) -> Self
    where
        I: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let initial = self.initial.candidates(cell);
        let current = self.current.candidates(cell);
        assert_eq!(
            initial & digits,
            digits,
            "Expected initial candidates at {cell} to include {digits:?}, but they are {initial:?}"
        );
        assert!(
            (current & digits).is_empty(),
            "Expected all of {digits:?} removed from {cell}, but candidates are {current:?}"
        );
        self
    }

    /// Asserts that exactly the listed candidates were removed from a cell.
    #[track_caller]
    #[must_use]
    pub fn assert_removed_exact<I>(self, cell: Cell, digits: I) -> Self
    where
        I: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let initial = self.initial.candidates(cell);
        let current = self.current.candidates(cell);
        let removed = initial - current;
        assert_eq!(
            removed, digits,
            "Expected exactly {digits:?} removed from {cell}, but removed {removed:?} (initial {initial:?}, current {current:?})"
        );
        self
    }

    /// Asserts that a cell's value and candidates did not change.
    #[track_caller]
    #[must_use]
    pub fn assert_no_change(self, cell: Cell) -> Self {
        assert_eq!(
            self.initial.value(cell),
            self.current.value(cell),
            "Expected no value change at {cell}"
        );
        assert_eq!(
            self.initial.candidates(cell),
            self.current.candidates(cell),
            "Expected no candidate change at {cell}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use sudotrace_core::CellSet;

    use super::*;
    use crate::technique::{Action, Deduction, TechniqueId};

    #[derive(Debug)]
    struct NoOp;

    impl Technique for NoOp {
        fn id(&self) -> TechniqueId {
            TechniqueId::NakedSingle
        }

        fn find(&self, _grid: &Grid) -> Option<Deduction> {
            None
        }
    }

    #[derive(Debug)]
    struct PlaceD1At00;

    impl Technique for PlaceD1At00 {
        fn id(&self) -> TechniqueId {
            TechniqueId::NakedSingle
        }

        fn find(&self, grid: &Grid) -> Option<Deduction> {
            let cell = Cell::at(0, 0);
            if grid.value(cell).is_none() {
                Some(Deduction::place(cell, Digit::D1, "r1c1=1"))
            } else {
                None
            }
        }
    }

    #[derive(Debug)]
    struct StaleEliminator;

    impl Technique for StaleEliminator {
        fn id(&self) -> TechniqueId {
            TechniqueId::Pointing
        }

        fn find(&self, _grid: &Grid) -> Option<Deduction> {
            // proposes removing a candidate that is already gone
            Some(Deduction {
                action: Action::Eliminate {
                    targets: vec![(Digit::D1, CellSet::from_elem(Cell::at(0, 0)))],
                },
                subject: String::new(),
                tints: Vec::new(),
            })
        }
    }

    #[test]
    fn test_apply_and_assert_placed() {
        TechniqueTester::new(Grid::new())
            .apply_once(&PlaceD1At00)
            .assert_placed(Cell::at(0, 0), Digit::D1)
            .apply_once(&NoOp)
            .assert_no_change(Cell::at(4, 4));
    }

    #[test]
    fn test_assert_stuck() {
        let _ = TechniqueTester::new(Grid::new()).assert_stuck(&NoOp);
    }

    #[test]
    #[should_panic(expected = "unproductive deduction")]
    fn test_unproductive_deduction_panics() {
        let mut grid = Grid::new();
        grid.remove_candidate(Cell::at(0, 0), Digit::D1);
        let _ = TechniqueTester::new(grid).apply_once(&StaleEliminator);
    }

    #[test]
    fn test_sculpt_resets_initial() {
        let tester = TechniqueTester::new(Grid::new()).sculpt(
            Cell::at(0, 0),
            [Digit::D1, Digit::D2],
        );
        assert!(tester.grid().is_bivalue(Cell::at(0, 0)));
        let _ = tester.assert_no_change(Cell::at(0, 0));
    }
}
