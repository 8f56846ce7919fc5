use std::time::Duration;

use crossfill_core::Variable;

/// Errors that can occur while solving.
///
/// An unsolvable puzzle is *not* an error; it is reported as
/// [`SolveOutcome::NoSolution`](crate::SolveOutcome::NoSolution). These
/// variants signal a request that does not match the puzzle description, or a
/// search cut short by its time limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum SolverError {
    /// The variable is not a slot of the crossword being solved.
    #[display("unknown variable: {variable}")]
    UnknownVariable {
        /// The variable that was looked up.
        variable: Variable,
    },
    /// An arc was requested between two slots that do not cross.
    #[display("variables do not cross: {x} and {y}")]
    NotAdjacent {
        /// First slot of the arc.
        x: Variable,
        /// Second slot of the arc.
        y: Variable,
    },
    /// The search ran past its configured time limit.
    #[display("search exceeded its time limit of {limit:?}")]
    DeadlineExceeded {
        /// The configured limit.
        limit: Duration,
    },
}
