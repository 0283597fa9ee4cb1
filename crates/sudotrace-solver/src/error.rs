//! Error types for the solver crate.

use derive_more::{Display, Error};

/// A strategy string could not be resolved into a technique list.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// An id is neither a technique code nor an expansion macro.
    #[display("unknown technique id: {id}")]
    UnknownTechnique {
        /// The offending id.
        id: String,
    },
    /// The expression has more than one `-` operator.
    #[display("a strategy may subtract at most one term")]
    ExtraDifference,
    /// The expression is empty (or a term expanded to nothing).
    #[display("empty strategy")]
    Empty,
}
