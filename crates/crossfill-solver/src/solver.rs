use crossfill_core::{Crossword, Variable};

use crate::{
    Assignment, BacktrackingSearch, DomainStore, SearchConfig, SearchStats, SolverError,
    consistency::{ConsistencyEngine, ConsistencyStats, Propagation},
};

/// Why a crossword has no fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum Infeasibility {
    /// Consistency enforcement left a slot without candidates; no search was
    /// attempted.
    #[display("no word fits {variable}")]
    EmptyDomain {
        /// The slot without candidates.
        variable: Variable,
    },
    /// The search tried every remaining candidate.
    #[display("no combination of words fits")]
    Exhausted,
}

/// Result of [`CrosswordSolver::solve`].
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum SolveOutcome<'c> {
    /// A complete, consistent assignment.
    Solved(Assignment<'c>),
    /// The crossword cannot be filled with its vocabulary.
    NoSolution(Infeasibility),
}

impl<'c> SolveOutcome<'c> {
    /// Returns the assignment if solved.
    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment<'c>> {
        match self {
            Self::Solved(assignment) => Some(assignment),
            Self::NoSolution(_) => None,
        }
    }

    /// Returns the assignment if solved, consuming the outcome.
    #[must_use]
    pub fn into_assignment(self) -> Option<Assignment<'c>> {
        match self {
            Self::Solved(assignment) => Some(assignment),
            Self::NoSolution(_) => None,
        }
    }
}

/// Statistics of a [`CrosswordSolver::solve`] call.
#[derive(Debug, Clone)]
pub struct SolverStats {
    consistency: ConsistencyStats,
    search: Option<SearchStats>,
}

impl SolverStats {
    /// Removal counts of the consistency pass.
    #[must_use]
    pub fn consistency(&self) -> &ConsistencyStats {
        &self.consistency
    }

    /// Search counters, or `None` if consistency already proved the crossword
    /// infeasible.
    #[must_use]
    pub fn search(&self) -> Option<&SearchStats> {
        self.search.as_ref()
    }
}

/// Outcome and statistics of a solve.
#[derive(Debug, Clone)]
pub struct Solution<'c> {
    outcome: SolveOutcome<'c>,
    stats: SolverStats,
}

impl<'c> Solution<'c> {
    /// Returns the outcome.
    #[must_use]
    pub fn outcome(&self) -> &SolveOutcome<'c> {
        &self.outcome
    }

    /// Returns the outcome, consuming the solution.
    #[must_use]
    pub fn into_outcome(self) -> SolveOutcome<'c> {
        self.outcome
    }

    /// Returns the assignment if solved.
    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment<'c>> {
        self.outcome.assignment()
    }

    /// Returns `true` if a fill was found.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.outcome.is_solved()
    }

    /// Returns the statistics.
    #[must_use]
    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }
}

/// Fills a crossword: consistency enforcement, then backtracking search.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Crossword, Vocabulary};
/// use crossfill_solver::CrosswordSolver;
///
/// let crossword = Crossword::new(
///     "#___#\n#_##_\n#_##_\n#_##_\n#____".parse()?,
///     Vocabulary::parse("one\ntwo\nthree\nfour\nfive\nsix\nseven\neight\nnine\nten"),
/// );
///
/// let solution = CrosswordSolver::default().solve(&crossword)?;
/// let assignment = solution.assignment().unwrap();
/// assert_eq!(assignment.to_string(), "█SIX█\n█E██F\n█V██I\n█E██V\n█NINE\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrosswordSolver {
    engine: ConsistencyEngine,
    search: BacktrackingSearch,
}

impl CrosswordSolver {
    /// Creates a solver from a consistency engine and search settings.
    #[must_use]
    pub fn new(engine: ConsistencyEngine, config: SearchConfig) -> Self {
        Self {
            engine,
            search: BacktrackingSearch::new(config),
        }
    }

    /// Replaces the search settings.
    #[must_use]
    pub fn with_search_config(mut self, config: SearchConfig) -> Self {
        self.search = BacktrackingSearch::new(config);
        self
    }

    /// Returns the consistency engine.
    #[must_use]
    pub fn engine(&self) -> &ConsistencyEngine {
        &self.engine
    }

    /// Returns the search settings.
    #[must_use]
    pub fn search_config(&self) -> &SearchConfig {
        self.search.config()
    }

    /// Fills `crossword`.
    ///
    /// An unfillable crossword is a [`SolveOutcome::NoSolution`], not an
    /// error. When consistency enforcement empties a domain the search is
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::DeadlineExceeded`] if the search runs past its
    /// time limit, or the error of a failing propagator.
    pub fn solve<'c>(&self, crossword: &'c Crossword) -> Result<Solution<'c>, SolverError> {
        let mut store = DomainStore::new(crossword);
        let (propagation, consistency) = self.engine.enforce(&mut store)?;

        if let Propagation::Wipeout { variable } = propagation {
            log::debug!("consistency emptied the domain of {variable}");
            return Ok(Solution {
                outcome: SolveOutcome::NoSolution(Infeasibility::EmptyDomain { variable }),
                stats: SolverStats {
                    consistency,
                    search: None,
                },
            });
        }
        if log::log_enabled!(log::Level::Debug) {
            for var in crossword.ids() {
                log::debug!("{}: {} candidates", crossword.variable(var), store.size(var));
            }
        }

        let (assignment, search) = self.search.search(&mut store)?;
        let outcome = match assignment {
            Some(assignment) => SolveOutcome::Solved(assignment),
            None => SolveOutcome::NoSolution(Infeasibility::Exhausted),
        };
        Ok(Solution {
            outcome,
            stats: SolverStats {
                consistency,
                search: Some(search),
            },
        })
    }
}
