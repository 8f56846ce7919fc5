use std::{
    cmp::Reverse,
    collections::HashMap,
    time::{Duration, Instant},
};

use crossfill_core::{VariableId, WordId};

use crate::{
    Assignment, DomainStore, SolverError,
    consistency::{DirectedArc, ac3},
};

/// Search settings.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use crossfill_solver::SearchConfig;
///
/// let config = SearchConfig::new()
///     .with_time_limit(Some(Duration::from_secs(10)))
///     .with_maintain_arc_consistency(true);
/// assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
/// assert!(config.maintain_arc_consistency());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    time_limit: Option<Duration>,
    maintain_arc_consistency: bool,
}

impl SearchConfig {
    /// Creates the default configuration: no time limit, no arc consistency
    /// during search.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget of a single search.
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Option<Duration>) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Enables AC-3 on the neighbors of each newly assigned variable.
    #[must_use]
    pub fn with_maintain_arc_consistency(mut self, enabled: bool) -> Self {
        self.maintain_arc_consistency = enabled;
        self
    }

    /// Returns the time limit, if any.
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Returns whether arc consistency is maintained during search.
    #[must_use]
    pub fn maintain_arc_consistency(&self) -> bool {
        self.maintain_arc_consistency
    }
}

/// Counters collected by [`BacktrackingSearch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    nodes: usize,
    values_tried: usize,
    backtracks: usize,
    max_depth: usize,
}

impl SearchStats {
    /// Number of recursive calls.
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of candidate words considered, consistent or not.
    #[must_use]
    pub fn values_tried(&self) -> usize {
        self.values_tried
    }

    /// Number of consistent assignments that were later undone.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Largest number of simultaneously assigned variables.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    limit: Duration,
}

impl Deadline {
    fn start(limit: Option<Duration>) -> Option<Self> {
        let limit = limit?;
        let at = Instant::now().checked_add(limit)?;
        Some(Self { at, limit })
    }

    fn check(self) -> Result<(), SolverError> {
        if Instant::now() >= self.at {
            return Err(SolverError::DeadlineExceeded { limit: self.limit });
        }
        Ok(())
    }
}

/// Depth-first backtracking over word assignments.
///
/// Variables are picked by [`select_unassigned_variable`], their candidates
/// tried in [`order_domain_values`] order. A candidate is assigned only if
/// the partial assignment [admits](Assignment::admits) it; the domain of the
/// variable is then narrowed to that word under a checkpoint, which is rolled
/// back before the next candidate and before returning, so the store leaves
/// [`search`](Self::search) as it entered.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Crossword, Vocabulary};
/// use crossfill_solver::{BacktrackingSearch, DomainStore, SearchConfig};
///
/// let crossword = Crossword::new("#_#\n___\n#_#".parse()?, Vocabulary::new(["CAT", "CAR", "DOG"]));
/// let mut store = DomainStore::new(&crossword);
///
/// let search = BacktrackingSearch::new(SearchConfig::new());
/// let (solution, stats) = search.search(&mut store)?;
/// let solution = solution.unwrap();
/// assert!(solution.is_consistent());
/// assert!(stats.nodes() >= 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSearch {
    config: SearchConfig,
}

impl BacktrackingSearch {
    /// Creates a search with the given settings.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Returns the search settings.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Looks for a complete, consistent assignment.
    ///
    /// Returns `None` when every branch fails.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::DeadlineExceeded`] if the time limit runs out.
    pub fn search<'c>(
        &self,
        store: &mut DomainStore<'c>,
    ) -> Result<(Option<Assignment<'c>>, SearchStats), SolverError> {
        let mut stats = SearchStats::default();
        let solution = self.search_with_stats(store, &mut stats)?;
        Ok((solution, stats))
    }

    /// Like [`search`](Self::search), accumulating into existing statistics.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::DeadlineExceeded`] if the time limit runs out.
    pub fn search_with_stats<'c>(
        &self,
        store: &mut DomainStore<'c>,
        stats: &mut SearchStats,
    ) -> Result<Option<Assignment<'c>>, SolverError> {
        let deadline = Deadline::start(self.config.time_limit);
        let mut assignment = Assignment::new(store.crossword());
        let solved = self.backtrack(store, &mut assignment, deadline, stats);
        log::debug!("search finished: {stats:?}");
        Ok(solved?.then_some(assignment))
    }

    fn backtrack<'c>(
        &self,
        store: &mut DomainStore<'c>,
        assignment: &mut Assignment<'c>,
        deadline: Option<Deadline>,
        stats: &mut SearchStats,
    ) -> Result<bool, SolverError> {
        if let Some(deadline) = deadline {
            deadline.check()?;
        }
        stats.nodes += 1;
        stats.max_depth = stats.max_depth.max(assignment.len());

        // `None` only when every variable is assigned
        let Some(var) = select_unassigned_variable(store, assignment) else {
            return Ok(true);
        };
        log::trace!(
            "depth {}: {} with {} candidates",
            assignment.len(),
            store.crossword().variable(var),
            store.size(var),
        );

        for word in order_domain_values(store, assignment, var) {
            stats.values_tried += 1;
            if !assignment.admits(var, word) {
                continue;
            }
            assignment.assign(var, word);
            let checkpoint = store.checkpoint();
            let result = self.descend(store, assignment, var, word, deadline, stats);
            store.rollback(checkpoint);
            match result {
                Ok(true) => return Ok(true),
                Ok(false) => {
                    assignment.unassign(var);
                    stats.backtracks += 1;
                }
                Err(err) => {
                    assignment.unassign(var);
                    return Err(err);
                }
            }
        }
        Ok(false)
    }

    fn descend<'c>(
        &self,
        store: &mut DomainStore<'c>,
        assignment: &mut Assignment<'c>,
        var: VariableId,
        word: WordId,
        deadline: Option<Deadline>,
        stats: &mut SearchStats,
    ) -> Result<bool, SolverError> {
        store.narrow(var, word);
        if self.config.maintain_arc_consistency {
            let crossword = store.crossword();
            let arcs = crossword
                .neighbors(var)
                .iter()
                .filter(|&&z| !assignment.is_assigned(z))
                .map(|&z| DirectedArc::new(z, var))
                .collect();
            if ac3(store, Some(arcs))?.is_wipeout() {
                return Ok(false);
            }
        }
        self.backtrack(store, assignment, deadline, stats)
    }
}

/// Picks the next variable to assign.
///
/// Chooses the unassigned variable with the fewest candidates, then the one
/// crossing the most slots, then the lowest id. Returns `None` if every
/// variable is assigned.
#[must_use]
pub fn select_unassigned_variable(
    store: &DomainStore<'_>,
    assignment: &Assignment<'_>,
) -> Option<VariableId> {
    let crossword = store.crossword();
    crossword
        .ids()
        .filter(|&var| !assignment.is_assigned(var))
        .min_by_key(|&var| (store.size(var), Reverse(crossword.degree(var))))
}

/// Orders the candidates of `var`, least constraining first.
///
/// Each candidate is scored by how many candidates of the unassigned
/// neighbors disagree with it at the shared cell. Equal scores keep the
/// domain order.
#[must_use]
pub fn order_domain_values(
    store: &DomainStore<'_>,
    assignment: &Assignment<'_>,
    var: VariableId,
) -> Vec<WordId> {
    let crossword = store.crossword();
    let vocabulary = crossword.vocabulary();

    // (offset in `var`, neighbor domain size, neighbor letter counts at the crossing)
    let neighbors = crossword
        .neighbors(var)
        .iter()
        .filter(|&&z| !assignment.is_assigned(z))
        .filter_map(|&z| {
            let overlap = crossword.overlap(var, z)?;
            let mut counts = HashMap::<char, usize>::new();
            for &word in store.candidates(z) {
                if let Some(&letter) = vocabulary.letters(word).get(overlap.y_offset) {
                    *counts.entry(letter).or_default() += 1;
                }
            }
            Some((overlap.x_offset, store.size(z), counts))
        })
        .collect::<Vec<_>>();

    let mut words = store.candidates(var).to_vec();
    words.sort_by_cached_key(|&word| {
        let letters = vocabulary.letters(word);
        neighbors
            .iter()
            .map(|(offset, size, counts)| {
                let compatible = letters
                    .get(*offset)
                    .and_then(|letter| counts.get(letter))
                    .copied()
                    .unwrap_or(0);
                size - compatible
            })
            .sum::<usize>()
    });
    words
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{consistency::enforce_node_consistency, testing};

    fn prefiltered(crossword: &crossfill_core::Crossword) -> DomainStore<'_> {
        let mut store = DomainStore::new(crossword);
        enforce_node_consistency(&mut store);
        store
    }

    #[test]
    fn test_select_prefers_fewest_candidates() {
        // across (0, 0) length 4, down (0, 3) length 3
        let crossword = testing::crossword("____\n###_\n###_", ["ABCD", "DEF", "DXY"]);
        let store = prefiltered(&crossword);
        let assignment = Assignment::new(&crossword);

        let var = select_unassigned_variable(&store, &assignment).unwrap();
        assert_eq!(crossword.variable(var).length(), 4);
    }

    #[test]
    fn test_select_breaks_ties_by_degree() {
        let crossword = testing::crossword(testing::STRUCTURE0, testing::WORDS0.lines());
        let store = prefiltered(&crossword);
        let assignment = Assignment::new(&crossword);

        let var = select_unassigned_variable(&store, &assignment).unwrap();
        let min_size = crossword.ids().map(|var| store.size(var)).min().unwrap();
        assert_eq!(store.size(var), min_size);
        let max_degree = crossword
            .ids()
            .filter(|&other| store.size(other) == min_size)
            .map(|other| crossword.degree(other))
            .max()
            .unwrap();
        assert_eq!(crossword.degree(var), max_degree);
        assert_eq!(max_degree, 2);
    }

    #[test]
    fn test_select_skips_assigned_and_ends() {
        let crossword = testing::crossword("____", ["ABCD"]);
        let store = prefiltered(&crossword);
        let mut assignment = Assignment::new(&crossword);
        let var = select_unassigned_variable(&store, &assignment).unwrap();
        assignment.assign(var, crossword.vocabulary().id_of("ABCD").unwrap());
        assert_eq!(select_unassigned_variable(&store, &assignment), None);
    }

    #[test]
    fn test_order_puts_least_constraining_first() {
        let crossword = testing::crossword("#_#\n___\n#_#", ["BAT", "CAR", "CAT", "DOG"]);
        let store = prefiltered(&crossword);
        let assignment = Assignment::new(&crossword);
        let var = crossword.ids().next().unwrap();
        let dog = crossword.vocabulary().id_of("DOG").unwrap();

        let order = order_domain_values(&store, &assignment, var);
        assert_eq!(order.len(), 4);
        // DOG rules out three words of the crossing slot, the others one
        assert_eq!(order.last(), Some(&dog));
    }

    #[test]
    fn test_order_ignores_assigned_neighbors() {
        let crossword = testing::crossword("#_#\n___\n#_#", ["BAT", "CAR", "CAT", "DOG"]);
        let store = prefiltered(&crossword);
        let mut ids = crossword.ids();
        let (x, y) = (ids.next().unwrap(), ids.next().unwrap());
        let mut assignment = Assignment::new(&crossword);
        assignment.assign(y, crossword.vocabulary().id_of("CAT").unwrap());

        // every score is zero: domain order is kept
        assert_eq!(order_domain_values(&store, &assignment, x), store.candidates(x));
    }

    #[test]
    fn test_search_solves_sample() {
        let crossword = testing::crossword(testing::STRUCTURE0, testing::WORDS0.lines());
        let mut store = prefiltered(&crossword);
        let before = testing::snapshot(&store);

        let (solution, stats) = BacktrackingSearch::default().search(&mut store).unwrap();
        let solution = solution.unwrap();
        testing::assert_valid_solution(&solution);
        assert_eq!(solution.to_string(), testing::SOLUTION0);
        assert_eq!(stats.max_depth(), 4);
        assert!(stats.values_tried() >= stats.backtracks());

        assert_eq!(testing::snapshot(&store), before);
        assert_eq!(store.checkpoint_depth(), 0);
    }

    #[test]
    fn test_search_without_prefiltering() {
        let crossword = testing::crossword(testing::STRUCTURE0, testing::WORDS0.lines());
        let mut store = DomainStore::new(&crossword);
        let (solution, _) = BacktrackingSearch::default().search(&mut store).unwrap();
        assert_eq!(solution.unwrap().to_string(), testing::SOLUTION0);
    }

    #[test]
    fn test_search_respects_uniqueness() {
        let crossword = testing::crossword("___\n###\n___", ["ABC"]);
        let mut store = prefiltered(&crossword);
        let (solution, stats) = BacktrackingSearch::default().search(&mut store).unwrap();
        assert!(solution.is_none());
        assert_eq!(stats.backtracks(), 1);
    }

    #[test]
    fn test_search_with_maintained_arc_consistency() {
        let crossword = testing::crossword(testing::STRUCTURE0, testing::WORDS0.lines());
        let mut store = prefiltered(&crossword);
        let before = testing::snapshot(&store);
        let search = BacktrackingSearch::new(SearchConfig::new().with_maintain_arc_consistency(true));

        let (solution, _) = search.search(&mut store).unwrap();
        assert_eq!(solution.unwrap().to_string(), testing::SOLUTION0);
        assert_eq!(testing::snapshot(&store), before);
    }

    #[test]
    fn test_search_deadline() {
        let crossword = testing::crossword(testing::STRUCTURE0, testing::WORDS0.lines());
        let mut store = prefiltered(&crossword);
        let before = testing::snapshot(&store);
        let search = BacktrackingSearch::new(SearchConfig::new().with_time_limit(Some(Duration::ZERO)));

        let err = search.search(&mut store).unwrap_err();
        assert_eq!(err, SolverError::DeadlineExceeded { limit: Duration::ZERO });
        assert_eq!(testing::snapshot(&store), before);
        assert_eq!(store.checkpoint_depth(), 0);
    }

    #[test]
    fn test_generous_deadline_does_not_interfere() {
        let crossword = testing::crossword("____", ["ABCD"]);
        let mut store = prefiltered(&crossword);
        let search = BacktrackingSearch::new(SearchConfig::new().with_time_limit(Some(Duration::MAX)));
        let (solution, _) = search.search(&mut store).unwrap();
        assert!(solution.unwrap().is_complete());
    }

    proptest! {
        #[test]
        fn test_search_agrees_with_brute_force(
            words in testing::word_list(3, 10),
            maintain_arc_consistency: bool,
        ) {
            let crossword = testing::crossword(testing::OPEN3, &words);
            let mut store = prefiltered(&crossword);
            let before = testing::snapshot(&store);
            let search = BacktrackingSearch::new(
                SearchConfig::new().with_maintain_arc_consistency(maintain_arc_consistency),
            );

            let (solution, _) = search.search(&mut store).unwrap();
            let expected = testing::brute_force_solutions(&crossword);
            prop_assert_eq!(solution.is_some(), !expected.is_empty());
            if let Some(solution) = solution {
                testing::assert_valid_solution(&solution);
            }
            prop_assert_eq!(testing::snapshot(&store), before);
        }
    }
}
