//! Core data structures for the sudotrace solving engine.
//!
//! This crate provides the candidate grid model shared by the technique
//! library, the puzzle generator hosts, and the test harnesses.
//!
//! # Overview
//!
//! The crate is organized around three layers:
//!
//! 1. **Core types** - Fundamental sudoku types
//!    - [`digit`]: Type-safe representation of sudoku digits 1-9
//!    - [`cell`]: Cell indices 0-80 with derived row/column/box coordinates
//!
//! 2. **Bitset containers** - Set types sized for the domain
//!    - [`digit_set`]: 9-bit candidate sets
//!    - [`cell_set`]: 81-bit cell sets
//!    - [`unit`]: Precomputed unit, triplet, and peer tables
//!
//! 3. **The grid** - Solving state and its bookkeeping
//!    - [`grid`]: Values, candidates, the move journal with undo/redo
//!    - [`history`]: Journal entries and removal maps
//!    - [`codec`]: The textual encodings (S81, CSV, GVC, block, clipboard)
//!    - [`fmt`]: Packed coordinates and discard descriptions
//!    - [`render`]: The bordered grid dump with per-candidate decoration
//!
//! # Examples
//!
//! ```
//! use sudotrace_core::{Cell, Digit, Grid};
//!
//! let mut grid = Grid::parse(
//!     "........2..6....39..9.7..463....672..5..........4.1.....235....9.1.8...5.3...9...",
//! )?;
//!
//! assert_eq!(grid.value(Cell::at(0, 8)), Some(Digit::D2));
//! assert!(!grid.candidates(Cell::at(0, 0)).contains(Digit::D2));
//! # Ok::<(), sudotrace_core::ParseGridError>(())
//! ```

pub mod cell;
pub mod cell_set;
pub mod codec;
pub mod digit;
pub mod digit_set;
pub mod error;
pub mod fmt;
pub mod grid;
pub mod history;
pub mod render;
pub mod unit;

// Re-export commonly used types
pub use self::{
    cell::Cell,
    cell_set::CellSet,
    codec::Format,
    digit::Digit,
    digit_set::DigitSet,
    error::{ConsistencyError, ParseGridError},
    grid::Grid,
    history::{Entry, EntryKind, RemovedMap},
    render::{Decor, DecorMode, Tint},
    unit::{BOX_COLS, BOX_ROWS, Band, PEERS, Unit},
};
