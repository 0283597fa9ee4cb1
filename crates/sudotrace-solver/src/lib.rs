//! Human-style Sudoku solving for sudotrace grids.
//!
//! # Overview
//!
//! This crate implements the technique catalogue and the solving loop that
//! drives it:
//!
//! - [`technique`]: ~47 named deductions, from singles to Sue de Coq, each
//!   a [`Technique`](technique::Technique) that finds one application in
//!   the current grid.
//! - [`strategy`]: the strategy-string resolver (`"n1,h1"`, `"ssts"`,
//!   `"ssts-xy"`, hodoku difficulty macros).
//! - [`solver`]: the loop — each pass commits the first applicable
//!   technique and restarts from the top, until solved or stuck.
//! - [`explain`]: one-line move descriptions and decorated grid snapshots.
//! - [`oracle`]: the uniqueness/solution interface plus a backtracking
//!   implementation, for generation hosts.
//! - [`testing`]: a fluent harness for technique tests.
//!
//! # Examples
//!
//! ```
//! use sudotrace_core::Grid;
//! use sudotrace_solver::Solver;
//!
//! let mut grid = Grid::parse(
//!     "........2..6....39..9.7..463....672..5..........4.1.....235....9.1.8...5.3...9...",
//! ).unwrap();
//!
//! let solver = Solver::from_strategy("ssts")?;
//! let run = solver.solve(&mut grid);
//! assert!(run.solved);
//! # Ok::<(), sudotrace_solver::StrategyError>(())
//! ```

pub use self::{
    error::StrategyError,
    explain::Explanation,
    oracle::{BacktrackOracle, Oracle, Solution},
    solver::{SolveRun, Solver, SolverStats, StepReport},
};

pub mod error;
pub mod explain;
pub mod oracle;
pub mod solver;
pub mod strategy;
pub mod technique;
pub mod testing;
