use std::collections::{HashSet, VecDeque};

use crossfill_core::{Crossword, VariableId, WordId};

use super::{BoxedPropagator, DirectedArc, Propagation, Propagator};
use crate::{DomainStore, SolverError};

const NAME: &str = "arc consistency";

/// Runs [`ac3`] over every pair of crossing slots.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArcConsistency;

impl ArcConsistency {
    /// Creates a new `ArcConsistency` propagator.
    #[must_use]
    pub const fn new() -> Self {
        ArcConsistency
    }
}

impl Propagator for ArcConsistency {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedPropagator {
        Box::new(*self)
    }

    fn apply(&self, store: &mut DomainStore<'_>) -> Result<Propagation, SolverError> {
        ac3(store, None)
    }
}

/// Returns both directions of every crossing, in variable id order.
pub fn all_arcs(crossword: &Crossword) -> impl Iterator<Item = DirectedArc> + '_ {
    crossword.ids().flat_map(move |x| {
        crossword
            .neighbors(x)
            .iter()
            .map(move |&y| DirectedArc::new(x, y))
    })
}

/// Makes `x` arc consistent with `y`.
///
/// Removes every candidate of `x` whose letter at the shared cell matches no
/// candidate of `y`. Returns `true` if something was removed.
///
/// # Errors
///
/// Returns [`SolverError::NotAdjacent`] if `x` and `y` do not cross.
pub fn revise(
    store: &mut DomainStore<'_>,
    x: VariableId,
    y: VariableId,
) -> Result<bool, SolverError> {
    let crossword = store.crossword();
    let Some(overlap) = crossword.overlap(x, y) else {
        return Err(SolverError::NotAdjacent {
            x: crossword.variable(x),
            y: crossword.variable(y),
        });
    };
    let vocabulary = crossword.vocabulary();

    let supported = store
        .candidates(y)
        .iter()
        .filter_map(|&word| vocabulary.letters(word).get(overlap.y_offset).copied())
        .collect::<HashSet<_>>();
    let unsupported = store
        .candidates(x)
        .iter()
        .copied()
        .filter(|&word| {
            vocabulary
                .letters(word)
                .get(overlap.x_offset)
                .is_none_or(|letter| !supported.contains(letter))
        })
        .collect::<Vec<WordId>>();

    for &word in &unsupported {
        store.remove(x, word);
    }
    Ok(!unsupported.is_empty())
}

/// Enforces arc consistency with the AC-3 worklist algorithm.
///
/// With `arcs == None` the worklist starts with [`all_arcs`]; otherwise with
/// the given arcs, in order. Whenever revising `(x, y)` shrinks the domain of
/// `x`, every arc `(z, x)` with `z` a neighbor of `x` other than `y` is queued
/// again. An arc already waiting in the queue is not added twice.
///
/// Stops with [`Propagation::Wipeout`] as soon as a domain becomes empty.
///
/// # Errors
///
/// Returns [`SolverError::NotAdjacent`] if a given arc joins slots that do
/// not cross.
pub fn ac3(
    store: &mut DomainStore<'_>,
    arcs: Option<Vec<DirectedArc>>,
) -> Result<Propagation, SolverError> {
    let crossword = store.crossword();
    let mut queue = match arcs {
        Some(arcs) => VecDeque::from(arcs),
        None => all_arcs(crossword).collect(),
    };
    let mut queued = queue.iter().copied().collect::<HashSet<_>>();

    let mut removed = 0;
    while let Some(arc) = queue.pop_front() {
        queued.remove(&arc);
        let DirectedArc { x, y } = arc;
        let before = store.size(x);
        if !revise(store, x, y)? {
            continue;
        }
        removed += before - store.size(x);
        if store.size(x) == 0 {
            log::trace!("ac3: wipeout of {}", crossword.variable(x));
            return Ok(Propagation::Wipeout {
                variable: crossword.variable(x),
            });
        }
        for &z in crossword.neighbors(x) {
            let arc = DirectedArc::new(z, x);
            if z != y && queued.insert(arc) {
                queue.push_back(arc);
            }
        }
    }
    Ok(Propagation::from_removed(removed))
}
