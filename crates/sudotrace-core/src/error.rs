//! Error types for the core grid model.

use derive_more::{Display, Error};

use crate::{Cell, Digit, Unit, codec::Format};

/// A structural invariant of the candidate grid does not hold.
///
/// These errors surface from [`Grid::check_consistency`] only; the mutation
/// primitives themselves treat invariant violations as caller bugs and
/// assert.
///
/// [`Grid::check_consistency`]: crate::Grid::check_consistency
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyError {
    /// A solved cell still carries candidates.
    #[display("solved cell {cell} still carries candidates")]
    SolvedCellWithCandidates {
        /// The offending cell.
        cell: Cell,
    },
    /// A peer of a solved cell still carries the solved value as candidate.
    #[display("a peer of {cell} still carries {digit} as a candidate")]
    PeerCarriesValue {
        /// The solved cell.
        cell: Cell,
        /// Its value.
        digit: Digit,
    },
    /// An unsolved cell has no candidates left.
    #[display("unsolved cell {cell} has no candidates")]
    NoCandidates {
        /// The offending cell.
        cell: Cell,
    },
    /// A digit can no longer be placed anywhere in a unit.
    #[display("{digit} can no longer be placed in {unit}")]
    DigitUnplaceable {
        /// The unit with no remaining slot.
        unit: Unit,
        /// The digit that lost its last slot.
        digit: Digit,
    },
}

/// An ingested grid representation fails its grammar.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseGridError {
    /// The input matches none of the known formats.
    #[display("unrecognized grid format")]
    UnknownFormat,
    /// The input resembles `format` but breaks its grammar.
    #[display("bad {format} input at position {position}")]
    BadFormat {
        /// The format the input was parsed as.
        format: Format,
        /// Byte offset (or line index for line-oriented formats) of the
        /// first offending position.
        position: usize,
    },
    /// The input has the right shape but the wrong length.
    #[display("bad {format} input: expected {expected} fields, got {actual}")]
    BadLength {
        /// The format the input was parsed as.
        format: Format,
        /// Expected number of fields.
        expected: usize,
        /// Actual number of fields.
        actual: usize,
    },
}
