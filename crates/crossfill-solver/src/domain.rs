use crossfill_core::{Crossword, Variable, VariableId, WordId};

use crate::SolverError;

/// Candidate words of a single variable.
///
/// A sparse set over the vocabulary: the live candidates are the prefix
/// `dense[..size]`, removed ones sit after it, and `position` maps every word
/// to its slot in `dense`. Removing or restoring a word is a single swap.
#[derive(Debug, Clone)]
struct SparseDomain {
    dense: Vec<WordId>,
    position: Vec<usize>,
    size: usize,
}

impl SparseDomain {
    fn full<I>(words: I) -> Self
    where
        I: ExactSizeIterator<Item = WordId>,
    {
        let dense = words.collect::<Vec<_>>();
        let position = (0..dense.len()).collect();
        let size = dense.len();
        Self {
            dense,
            position,
            size,
        }
    }

    fn live(&self) -> &[WordId] {
        &self.dense[..self.size]
    }

    fn contains(&self, word: WordId) -> bool {
        self.position[word.index()] < self.size
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.dense.swap(a, b);
        self.position[self.dense[a].index()] = a;
        self.position[self.dense[b].index()] = b;
    }

    fn remove(&mut self, word: WordId) -> bool {
        let pos = self.position[word.index()];
        if pos >= self.size {
            return false;
        }
        self.size -= 1;
        self.swap(pos, self.size);
        true
    }

    fn restore(&mut self, word: WordId) -> bool {
        let pos = self.position[word.index()];
        if pos < self.size {
            return false;
        }
        self.swap(pos, self.size);
        self.size += 1;
        true
    }
}

/// A point the [`DomainStore`] can be rolled back to.
///
/// Created by [`DomainStore::checkpoint`] and consumed by
/// [`DomainStore::rollback`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a checkpoint must be rolled back"]
pub struct Checkpoint {
    id: u64,
}

/// A recorded change to a domain.
#[derive(Debug, Clone, Copy)]
enum TrailEntry {
    Removed(VariableId, WordId),
    Restored(VariableId, WordId),
}

#[derive(Debug, Clone, Copy)]
struct OpenCheckpoint {
    id: u64,
    mark: usize,
}

/// Per-variable candidate words.
///
/// Every variable of the crossword starts with the whole vocabulary. Removing
/// and restoring a candidate are O(1) and exact inverses of each other.
///
/// Speculative narrowing is supported through a trail: while at least one
/// [`Checkpoint`] is open every removal and restoration is recorded, and
/// [`rollback`](Self::rollback) undoes the recorded changes in reverse
/// order. Changes made with no open checkpoint are permanent.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Crossword, Vocabulary};
/// use crossfill_solver::DomainStore;
///
/// let crossword = Crossword::new("____".parse()?, Vocabulary::new(["WORD", "CAT"]));
/// let var = crossword.ids().next().unwrap();
/// let cat = crossword.vocabulary().id_of("CAT").unwrap();
///
/// let mut store = DomainStore::new(&crossword);
/// assert_eq!(store.size(var), 2);
///
/// let checkpoint = store.checkpoint();
/// assert!(store.remove(var, cat));
/// assert_eq!(store.words(var).collect::<Vec<_>>(), ["WORD"]);
///
/// store.rollback(checkpoint);
/// assert_eq!(store.size(var), 2);
/// # Ok::<(), crossfill_core::StructureError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DomainStore<'c> {
    crossword: &'c Crossword,
    domains: Vec<SparseDomain>,
    trail: Vec<TrailEntry>,
    checkpoints: Vec<OpenCheckpoint>,
    next_checkpoint: u64,
}

impl<'c> DomainStore<'c> {
    /// Creates a store where every variable may take every word.
    #[must_use]
    pub fn new(crossword: &'c Crossword) -> Self {
        let vocabulary = crossword.vocabulary();
        let domains = crossword
            .ids()
            .map(|_| SparseDomain::full(vocabulary.ids()))
            .collect();
        Self {
            crossword,
            domains,
            trail: vec![],
            checkpoints: vec![],
            next_checkpoint: 0,
        }
    }

    /// The crossword the domains belong to.
    #[must_use]
    pub fn crossword(&self) -> &'c Crossword {
        self.crossword
    }

    /// Resolves a variable to its id.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownVariable`] if the crossword has no such slot.
    pub fn resolve(&self, variable: &Variable) -> Result<VariableId, SolverError> {
        self.crossword
            .id_of(variable)
            .ok_or(SolverError::UnknownVariable {
                variable: *variable,
            })
    }

    /// Returns the live candidates of a variable.
    ///
    /// The order is unspecified and changes as candidates are removed and
    /// restored.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownVariable`] if the crossword has no such slot.
    pub fn domain_of(&self, variable: &Variable) -> Result<&[WordId], SolverError> {
        Ok(self.candidates(self.resolve(variable)?))
    }

    /// Returns the number of live candidates of a variable.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownVariable`] if the crossword has no such slot.
    pub fn size_of(&self, variable: &Variable) -> Result<usize, SolverError> {
        Ok(self.size(self.resolve(variable)?))
    }

    /// Returns the live candidates of `var`.
    #[must_use]
    pub fn candidates(&self, var: VariableId) -> &[WordId] {
        self.domains[var.index()].live()
    }

    /// Returns the live candidates of `var` as text.
    pub fn words(&self, var: VariableId) -> impl ExactSizeIterator<Item = &'c str> {
        let vocabulary = self.crossword.vocabulary();
        self.candidates(var)
            .iter()
            .map(move |&word| vocabulary.word(word))
    }

    /// Number of live candidates of `var`.
    #[must_use]
    pub fn size(&self, var: VariableId) -> usize {
        self.domains[var.index()].size
    }

    /// Returns `true` if `word` is still a candidate of `var`.
    #[must_use]
    pub fn contains(&self, var: VariableId, word: WordId) -> bool {
        self.domains[var.index()].contains(word)
    }

    /// Returns `true` if some variable has no candidate left.
    #[must_use]
    pub fn has_empty_domain(&self) -> bool {
        self.domains.iter().any(|domain| domain.size == 0)
    }

    /// Removes `word` from the candidates of `var`.
    ///
    /// Returns `true` if the word was a candidate. The removal is recorded on
    /// the trail when a checkpoint is open.
    pub fn remove(&mut self, var: VariableId, word: WordId) -> bool {
        let removed = self.domains[var.index()].remove(word);
        if removed && !self.checkpoints.is_empty() {
            self.trail.push(TrailEntry::Removed(var, word));
        }
        removed
    }

    /// Reintroduces a previously removed candidate.
    ///
    /// Returns `true` if the word was not a candidate. The restoration is
    /// recorded on the trail when a checkpoint is open.
    pub fn restore(&mut self, var: VariableId, word: WordId) -> bool {
        let restored = self.domains[var.index()].restore(word);
        if restored && !self.checkpoints.is_empty() {
            self.trail.push(TrailEntry::Restored(var, word));
        }
        restored
    }

    /// Reduces the candidates of `var` to `word` alone.
    ///
    /// Returns the number of removed candidates. If `word` is not a
    /// candidate, the domain ends up empty.
    pub fn narrow(&mut self, var: VariableId, word: WordId) -> usize {
        let others = self
            .candidates(var)
            .iter()
            .copied()
            .filter(|&other| other != word)
            .collect::<Vec<_>>();
        for &other in &others {
            self.remove(var, other);
        }
        others.len()
    }

    /// Opens a checkpoint; changes from now on are recorded.
    pub fn checkpoint(&mut self) -> Checkpoint {
        let id = self.next_checkpoint;
        self.next_checkpoint += 1;
        self.checkpoints.push(OpenCheckpoint {
            id,
            mark: self.trail.len(),
        });
        Checkpoint { id }
    }

    /// Undoes every change made since `checkpoint` was opened and closes it,
    /// along with any checkpoint opened after it.
    ///
    /// A checkpoint already closed by rolling back an enclosing one is stale;
    /// rolling it back does nothing and returns `false`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn rollback(&mut self, checkpoint: Checkpoint) -> bool {
        let Some(depth) = self
            .checkpoints
            .iter()
            .rposition(|open| open.id == checkpoint.id)
        else {
            return false;
        };
        let mark = self.checkpoints[depth].mark;
        self.checkpoints.truncate(depth);
        for entry in self.trail.drain(mark..).rev() {
            match entry {
                TrailEntry::Removed(var, word) => self.domains[var.index()].restore(word),
                TrailEntry::Restored(var, word) => self.domains[var.index()].remove(word),
            };
        }
        true
    }

    /// Number of checkpoints currently open.
    #[must_use]
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }
}
