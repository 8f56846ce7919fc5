//! Crossword filling as a constraint satisfaction problem.
//!
//! Every slot of a [`Crossword`](crossfill_core::Crossword) is a variable
//! whose domain is the set of words it may still take, held by a
//! [`DomainStore`]. [`CrosswordSolver`] first filters the domains with the
//! [`consistency`] propagators (slot length, then AC-3 over crossing slots)
//! and then runs a [`BacktrackingSearch`] ordered by minimum remaining values
//! and least constraining value.
//!
//! # Examples
//!
//! ```
//! use crossfill_core::{Crossword, Vocabulary};
//! use crossfill_solver::{CrosswordSolver, SolveOutcome};
//!
//! let crossword = Crossword::new("#_#\n___\n#_#".parse()?, Vocabulary::parse("cat\ndog\ncar"));
//! match CrosswordSolver::default().solve(&crossword)?.into_outcome() {
//!     SolveOutcome::Solved(assignment) => println!("{assignment}"),
//!     SolveOutcome::NoSolution(reason) => println!("No solution: {reason}"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{assignment::*, domain::*, error::*, search::*, solver::*};

mod assignment;
pub mod consistency;
mod domain;
mod error;
mod search;
mod solver;

#[cfg(test)]
mod testing;
