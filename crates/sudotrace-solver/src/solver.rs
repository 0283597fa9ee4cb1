//! The solver loop: a strategy-ordered technique dispatcher.

use std::time::{Duration, Instant};

use log::debug;
use sudotrace_core::Grid;

use crate::{
    error::StrategyError,
    explain::{Explanation, explain_last},
    strategy,
    technique::{self, BoxedTechnique, TechniqueId, commit},
};

/// Statistics collected during solving: one application counter per
/// configured technique, in solver order.
#[derive(Debug, Clone)]
pub struct SolverStats {
    applications: Vec<usize>,
    total_steps: usize,
    eliminations: usize,
}

impl SolverStats {
    /// Returns technique application counts in solver order.
    ///
    /// Includes techniques that were never applied with a count of `0`.
    #[must_use]
    pub fn applications(&self) -> &[usize] {
        &self.applications
    }

    /// Returns the total number of productive passes.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Returns the total number of changes (placements plus candidate
    /// eliminations).
    #[must_use]
    pub fn eliminations(&self) -> usize {
        self.eliminations
    }

    /// Returns `true` if any technique was applied at least once.
    #[must_use]
    pub fn has_progress(&self) -> bool {
        self.total_steps > 0
    }
}

/// One productive pass of the solver.
#[derive(Debug)]
pub struct StepReport {
    /// The technique that applied.
    pub technique: TechniqueId,
    /// The number of changes it committed.
    pub changes: usize,
    /// The explanation, when the solver was built with
    /// [`with_explanations`](Solver::with_explanations).
    pub explanation: Option<Explanation>,
}

/// The outcome of a full solving run.
#[derive(Debug)]
pub struct SolveRun {
    /// `true` when the grid ended fully solved.
    pub solved: bool,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Per-technique application counts.
    pub stats: SolverStats,
    /// One explanation per productive pass, when enabled.
    pub explanations: Vec<Explanation>,
}

/// A solver that applies named techniques in strategy order.
///
/// Each pass walks the technique list from the top and commits the first
/// application found; the pass ends there, so cheaper techniques always get
/// another look before harder ones run again. The loop stops when the grid
/// is solved or no technique applies.
///
/// # Examples
///
/// ```
/// use sudotrace_core::Grid;
/// use sudotrace_solver::Solver;
///
/// let solver = Solver::from_strategy("ssts")?;
/// let mut grid = Grid::parse(
///     "........2..6....39..9.7..463....672..5..........4.1.....235....9.1.8...5.3...9...",
/// ).unwrap();
///
/// let run = solver.solve(&mut grid);
/// println!("solved: {} in {} steps", run.solved, run.stats.total_steps());
/// # Ok::<(), sudotrace_solver::StrategyError>(())
/// ```
#[derive(Debug)]
pub struct Solver {
    techniques: Vec<BoxedTechnique>,
    explain: bool,
}

impl Solver {
    /// Creates a solver from an explicit technique list.
    #[must_use]
    pub fn new(techniques: Vec<BoxedTechnique>) -> Self {
        Self {
            techniques,
            explain: false,
        }
    }

    /// Creates a solver from a strategy expression (see [`strategy`]).
    ///
    /// # Errors
    ///
    /// Returns [`StrategyError`] when the expression does not resolve.
    pub fn from_strategy(expression: &str) -> Result<Self, StrategyError> {
        let ids = strategy::resolve(expression)?;
        Ok(Self::new(ids.into_iter().map(technique::technique).collect()))
    }

    /// Creates a solver with the whole catalogue, easiest first.
    #[must_use]
    pub fn with_all_techniques() -> Self {
        Self::new(technique::all_techniques())
    }

    /// Enables explanation collection on every productive pass.
    #[must_use]
    pub fn with_explanations(mut self) -> Self {
        self.explain = true;
        self
    }

    /// Returns the configured techniques in application order.
    #[must_use]
    pub fn techniques(&self) -> &[BoxedTechnique] {
        &self.techniques
    }

    /// Creates a statistics object aligned with this solver's technique
    /// order.
    #[must_use]
    pub fn new_stats(&self) -> SolverStats {
        SolverStats {
            applications: vec![0; self.techniques.len()],
            total_steps: 0,
            eliminations: 0,
        }
    }

    /// Runs one pass: applies the first technique with an application.
    ///
    /// Returns `None` when no technique makes progress (the single-step
    /// boundary of the solving loop).
    pub fn step(&self, grid: &mut Grid, stats: &mut SolverStats) -> Option<StepReport> {
        debug_assert_eq!(self.techniques.len(), stats.applications.len());
        for (i, technique) in self.techniques.iter().enumerate() {
            let Some(deduction) = technique.find(grid) else {
                continue;
            };
            let id = technique.id();
            let changes = commit(grid, id, &deduction);
            debug_assert!(changes > 0, "{} committed nothing", id.caption());
            stats.applications[i] += 1;
            stats.total_steps += 1;
            stats.eliminations += changes;
            debug!("{}: {} ({changes} changes)", id.caption(), deduction.subject);
            let explanation = self
                .explain
                .then(|| explain_last(grid, id, &deduction));
            return Some(StepReport {
                technique: id,
                changes,
                explanation,
            });
        }
        None
    }

    /// Applies passes until the grid is solved or no technique applies.
    ///
    /// Success means the loop terminated; the caller decides the outcome
    /// from [`SolveRun::solved`] (which mirrors [`Grid::solved`]).
    pub fn solve(&self, grid: &mut Grid) -> SolveRun {
        let started = Instant::now();
        let mut stats = self.new_stats();
        let mut explanations = Vec::new();
        while !grid.solved() {
            let Some(report) = self.step(grid, &mut stats) else {
                break;
            };
            if let Some(explanation) = report.explanation {
                explanations.push(explanation);
            }
        }
        let solved = grid.solved();
        debug!(
            "solve finished: solved={solved} steps={} changes={}",
            stats.total_steps(),
            stats.eliminations()
        );
        SolveRun {
            solved,
            elapsed: started.elapsed(),
            stats,
            explanations,
        }
    }
}

#[cfg(test)]
mod tests {
    use sudotrace_core::{Cell, Digit};

    use super::*;

    const POINTING_GRID: &str =
        "........2..6....39..9.7..463....672..5..........4.1.....235....9.1.8...5.3...9...";

    #[test]
    fn test_step_returns_none_on_empty_grid() {
        let solver = Solver::from_strategy("n1,h1").unwrap();
        let mut grid = Grid::new();
        let mut stats = solver.new_stats();
        assert!(solver.step(&mut grid, &mut stats).is_none());
        assert!(!stats.has_progress());
    }

    #[test]
    fn test_step_applies_first_technique() {
        let solver = Solver::from_strategy("n1,h1").unwrap();
        let mut grid = Grid::new();
        grid.set_candidates(Cell::at(4, 4), [Digit::D5].into_iter().collect());
        let mut stats = solver.new_stats();
        let report = solver.step(&mut grid, &mut stats).unwrap();
        assert_eq!(report.technique, crate::technique::TechniqueId::NakedSingle);
        assert_eq!(grid.value(Cell::at(4, 4)), Some(Digit::D5));
        assert_eq!(stats.applications()[0], 1);
        assert_eq!(stats.total_steps(), 1);
    }

    #[test]
    fn test_solve_on_already_solved_grid_is_noop() {
        const SOLVED: &str =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let solver = Solver::from_strategy("ssts").unwrap();
        let mut grid = Grid::parse(SOLVED).unwrap();
        let run = solver.solve(&mut grid);
        assert!(run.solved);
        assert_eq!(run.stats.total_steps(), 0);
        assert_eq!(grid.encode_s81(), SOLVED);
    }

    #[test]
    fn test_explanations_are_collected_when_enabled() {
        let solver = Solver::from_strategy("ssts").unwrap().with_explanations();
        let mut grid = Grid::parse(POINTING_GRID).unwrap();
        let run = solver.solve(&mut grid);
        assert!(run.stats.has_progress());
        assert_eq!(run.explanations.len(), run.stats.total_steps());
        assert!(run.explanations[0].summary.contains(':'));
    }

    #[test]
    fn test_solver_from_unknown_strategy_fails() {
        assert!(Solver::from_strategy("n1,zz").is_err());
    }
}
