//! Domain filtering.
//!
//! A [`Propagator`] removes candidates that cannot be part of any solution.
//! Two are provided:
//!
//! - [`NodeConsistency`]: drops words whose length differs from the slot length.
//! - [`ArcConsistency`]: AC-3 over every pair of crossing slots (see [`ac3`]).
//!
//! [`ConsistencyEngine`] runs a list of propagators once, in order, and stops
//! at the first wipeout.

use std::fmt::Debug;

use crossfill_core::{Variable, VariableId};

pub use self::{
    arc::{ArcConsistency, ac3, all_arcs, revise},
    node::{NodeConsistency, enforce_node_consistency},
};
use crate::{DomainStore, SolverError};

mod arc;
mod node;

/// An ordered pair of crossing variables: make `x` consistent with `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectedArc {
    /// The variable whose domain is revised.
    pub x: VariableId,
    /// The variable it is revised against.
    pub y: VariableId,
}

impl DirectedArc {
    /// Creates the arc `(x, y)`.
    #[must_use]
    pub const fn new(x: VariableId, y: VariableId) -> Self {
        Self { x, y }
    }
}

/// Result of running a propagator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Propagation {
    /// No candidate was removed.
    Unchanged,
    /// Some candidates were removed and every domain is still non-empty.
    Narrowed {
        /// Number of removed candidates.
        removed: usize,
    },
    /// A domain became empty; the puzzle has no solution under the current
    /// domains.
    Wipeout {
        /// The variable left without candidates.
        variable: Variable,
    },
}

impl Propagation {
    pub(crate) fn from_removed(removed: usize) -> Self {
        if removed == 0 {
            Self::Unchanged
        } else {
            Self::Narrowed { removed }
        }
    }

    /// Number of removed candidates, or `0` for a wipeout.
    #[must_use]
    pub fn removed(self) -> usize {
        match self {
            Self::Narrowed { removed } => removed,
            Self::Unchanged | Self::Wipeout { .. } => 0,
        }
    }
}

/// A domain filtering rule.
pub trait Propagator: Debug {
    /// Returns the name of the propagator.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the propagator.
    fn clone_box(&self) -> BoxedPropagator;

    /// Removes unsupported candidates from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the propagator is asked to work on variables the
    /// crossword does not relate.
    fn apply(&self, store: &mut DomainStore<'_>) -> Result<Propagation, SolverError>;
}

/// A boxed propagator.
pub type BoxedPropagator = Box<dyn Propagator>;

impl Clone for BoxedPropagator {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns node consistency followed by arc consistency.
#[must_use]
pub fn all_propagators() -> Vec<BoxedPropagator> {
    vec![Box::new(NodeConsistency::new()), Box::new(ArcConsistency::new())]
}

/// Removal counts collected by [`ConsistencyEngine::enforce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyStats {
    removals: Vec<usize>,
}

impl ConsistencyStats {
    /// Candidates removed by each propagator, in engine order.
    #[must_use]
    pub fn removals(&self) -> &[usize] {
        &self.removals
    }

    /// Candidates removed in total.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.removals.iter().sum()
    }
}

/// Runs a fixed list of propagators over a [`DomainStore`].
///
/// # Examples
///
/// ```
/// use crossfill_core::{Crossword, Vocabulary};
/// use crossfill_solver::{DomainStore, consistency::ConsistencyEngine};
///
/// let crossword = Crossword::new("#_#\n___\n#_#".parse()?, Vocabulary::new(["CAT", "CAR", "DOG", "HI"]));
/// let mut store = DomainStore::new(&crossword);
///
/// let engine = ConsistencyEngine::with_all_propagators();
/// let (propagation, stats) = engine.enforce(&mut store)?;
/// assert!(propagation.is_narrowed());
/// for var in crossword.ids() {
///     assert_eq!(store.size(var), 2); // CAT and CAR
/// }
/// assert_eq!(stats.removals(), [2, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConsistencyEngine {
    propagators: Vec<BoxedPropagator>,
}

impl Default for ConsistencyEngine {
    fn default() -> Self {
        Self::with_all_propagators()
    }
}

impl ConsistencyEngine {
    /// Creates an engine running `propagators` in the given order.
    #[must_use]
    pub fn new(propagators: Vec<BoxedPropagator>) -> Self {
        Self { propagators }
    }

    /// Creates an engine with [`all_propagators`].
    #[must_use]
    pub fn with_all_propagators() -> Self {
        Self::new(all_propagators())
    }

    /// Returns the configured propagators in application order.
    #[must_use]
    pub fn propagators(&self) -> &[BoxedPropagator] {
        &self.propagators
    }

    /// Creates statistics aligned with this engine's propagator order.
    #[must_use]
    pub fn new_stats(&self) -> ConsistencyStats {
        ConsistencyStats {
            removals: vec![0; self.propagators.len()],
        }
    }

    /// Runs every propagator once.
    ///
    /// Returns [`Propagation::Wipeout`] as soon as a propagator empties a
    /// domain; later propagators are not run.
    ///
    /// # Errors
    ///
    /// Propagates errors from the propagators.
    pub fn enforce(
        &self,
        store: &mut DomainStore<'_>,
    ) -> Result<(Propagation, ConsistencyStats), SolverError> {
        let mut stats = self.new_stats();
        let propagation = self.enforce_with_stats(store, &mut stats)?;
        Ok((propagation, stats))
    }

    /// Like [`enforce`](Self::enforce), accumulating into existing statistics.
    ///
    /// # Errors
    ///
    /// Propagates errors from the propagators.
    pub fn enforce_with_stats(
        &self,
        store: &mut DomainStore<'_>,
        stats: &mut ConsistencyStats,
    ) -> Result<Propagation, SolverError> {
        debug_assert_eq!(self.propagators.len(), stats.removals.len());

        let mut removed = 0;
        for (i, propagator) in self.propagators.iter().enumerate() {
            let propagation = propagator.apply(store)?;
            log::debug!("{}: {propagation:?}", propagator.name());
            if let Propagation::Wipeout { .. } = propagation {
                return Ok(propagation);
            }
            stats.removals[i] += propagation.removed();
            removed += propagation.removed();
        }
        Ok(Propagation::from_removed(removed))
    }
}
