use std::fmt::{self, Display};

use crossfill_core::{Crossword, LetterGrid, Variable, VariableId, WordId};

use crate::SolverError;

/// A partial mapping from slots to words.
///
/// Lookups by [`Variable`] go through the crossword; everything else works on
/// [`VariableId`]s. Assigning does not check any constraint, use
/// [`admits`](Self::admits) first or [`is_consistent`](Self::is_consistent)
/// afterwards.
///
/// Displays as the filled grid.
///
/// # Examples
///
/// ```
/// use crossfill_core::{Crossword, Vocabulary};
/// use crossfill_solver::Assignment;
///
/// let crossword = Crossword::new("#_#\n___\n#_#".parse()?, Vocabulary::new(["CAT", "CAR"]));
/// let vocabulary = crossword.vocabulary();
/// let (down, across) = (crossword.variables()[0], crossword.variables()[1]);
///
/// let mut assignment = Assignment::new(&crossword);
/// assignment.assign(crossword.id_of(&across).unwrap(), vocabulary.id_of("CAT").unwrap());
/// assert!(!assignment.is_complete());
///
/// let down_id = crossword.id_of(&down).unwrap();
/// assert!(assignment.admits(down_id, vocabulary.id_of("CAR").unwrap()));
/// assert!(!assignment.admits(down_id, vocabulary.id_of("CAT").unwrap())); // already used
///
/// assignment.assign(down_id, vocabulary.id_of("CAR").unwrap());
/// assert!(assignment.is_complete());
/// assert!(assignment.is_consistent());
/// assert_eq!(assignment.get(&down)?, Some("CAR"));
/// assert_eq!(assignment.to_string(), "█C█\nCAT\n█R█\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Assignment<'c> {
    crossword: &'c Crossword,
    words: Vec<Option<WordId>>,
    len: usize,
}

impl<'c> Assignment<'c> {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new(crossword: &'c Crossword) -> Self {
        Self {
            crossword,
            words: vec![None; crossword.variables().len()],
            len: 0,
        }
    }

    /// The crossword being filled.
    #[must_use]
    pub fn crossword(&self) -> &'c Crossword {
        self.crossword
    }

    /// Assigns `word` to `var`, returning the word it replaces.
    pub fn assign(&mut self, var: VariableId, word: WordId) -> Option<WordId> {
        let previous = self.words[var.index()].replace(word);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Clears `var`, returning its word.
    pub fn unassign(&mut self, var: VariableId) -> Option<WordId> {
        let previous = self.words[var.index()].take();
        if previous.is_some() {
            self.len -= 1;
        }
        previous
    }

    /// Returns the word assigned to `var`.
    #[must_use]
    pub fn word_of(&self, var: VariableId) -> Option<WordId> {
        self.words[var.index()]
    }

    /// Returns `true` if `var` holds a word.
    #[must_use]
    pub fn is_assigned(&self, var: VariableId) -> bool {
        self.words[var.index()].is_some()
    }

    /// Returns the text assigned to `variable`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::UnknownVariable`] if the crossword has no such slot.
    pub fn get(&self, variable: &Variable) -> Result<Option<&'c str>, SolverError> {
        let var = self
            .crossword
            .id_of(variable)
            .ok_or(SolverError::UnknownVariable {
                variable: *variable,
            })?;
        let vocabulary = self.crossword.vocabulary();
        Ok(self.word_of(var).map(|word| vocabulary.word(word)))
    }

    /// Number of assigned slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot holds a word.
    ///
    /// Only coverage is checked.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.len == self.words.len()
    }

    /// Iterates over assigned slots and their words, in variable id order.
    pub fn iter(&self) -> impl Iterator<Item = (&'c Variable, &'c str)> + '_ {
        let crossword = self.crossword;
        let vocabulary = crossword.vocabulary();
        crossword
            .variables()
            .iter()
            .zip(&self.words)
            .filter_map(move |(variable, word)| word.map(|word| (variable, vocabulary.word(word))))
    }

    /// Iterates over assigned slot ids and word ids, in variable id order.
    pub fn ids(&self) -> impl Iterator<Item = (VariableId, WordId)> + '_ {
        self.crossword
            .ids()
            .zip(&self.words)
            .filter_map(|(var, word)| word.map(|word| (var, word)))
    }

    /// Returns `true` if `var` could take `word` given the other assigned
    /// slots.
    ///
    /// The word must have the slot length, must not be assigned to another
    /// slot, and must agree with every assigned neighbor at the shared cell.
    /// The current value of `var` itself is ignored.
    #[must_use]
    pub fn admits(&self, var: VariableId, word: WordId) -> bool {
        let crossword = self.crossword;
        let vocabulary = crossword.vocabulary();
        if vocabulary.word_len(word) != crossword.variable(var).length() {
            return false;
        }
        if self
            .ids()
            .any(|(other, other_word)| other != var && other_word == word)
        {
            return false;
        }
        let letters = vocabulary.letters(word);
        crossword.neighbors(var).iter().all(|&neighbor| {
            let (Some(neighbor_word), Some(overlap)) =
                (self.word_of(neighbor), crossword.overlap(var, neighbor))
            else {
                return true;
            };
            overlap.agrees(letters, vocabulary.letters(neighbor_word))
        })
    }

    /// Returns `true` if every assigned slot satisfies all constraints:
    /// lengths, crossings and distinct words.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.ids().all(|(var, word)| self.admits(var, word))
    }

    /// Renders the assigned words onto the crossword grid.
    #[must_use]
    pub fn to_grid(&self) -> LetterGrid {
        LetterGrid::filled(self.crossword.structure(), self.iter())
    }
}

impl Display for Assignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_grid(), f)
    }
}
