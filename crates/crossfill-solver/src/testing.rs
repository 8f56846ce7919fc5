//! Fixtures shared by the solver tests.

use std::collections::HashSet;

use crossfill_core::{Crossword, Structure, VariableId, Vocabulary, WordId};
use proptest::prelude::*;

use crate::{Assignment, DomainStore};

/// The small sample puzzle.
pub const STRUCTURE0: &str = "#___#\n#_##_\n#_##_\n#_##_\n#____";

/// Word list of the small sample puzzle.
pub const WORDS0: &str = "ONE\nTWO\nTHREE\nFOUR\nFIVE\nSIX\nSEVEN\nEIGHT\nNINE\nTEN\n";

/// The only fill of [`STRUCTURE0`] with [`WORDS0`].
pub const SOLUTION0: &str = "█SIX█\n█E██F\n█V██I\n█E██V\n█NINE\n";

/// A fully open 3x3 grid: three across and three down slots.
pub const OPEN3: &str = "___\n___\n___";

/// Builds a crossword from a structure text and verbatim words.
#[track_caller]
pub fn crossword<I, S>(structure: &str, words: I) -> Crossword
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let structure = structure.parse::<Structure>().unwrap();
    Crossword::new(structure, Vocabulary::new(words))
}

/// Returns `words` in ascending order.
pub fn sorted(words: &[WordId]) -> Vec<WordId> {
    let mut words = words.to_vec();
    words.sort_unstable();
    words
}

/// Returns every domain as a sorted list, in variable id order.
pub fn snapshot(store: &DomainStore<'_>) -> Vec<Vec<WordId>> {
    store
        .crossword()
        .ids()
        .map(|var| sorted(store.candidates(var)))
        .collect()
}

/// Non-empty lists of up to `max` words of `len` letters over `A`, `B` and `C`.
pub fn word_list(len: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    let word = proptest::string::string_regex(&format!("[A-C]{{{len}}}")).unwrap();
    prop::collection::vec(word, 1..=max)
}

/// Enumerates every valid fill, as word ids in variable id order.
pub fn brute_force_solutions(crossword: &Crossword) -> Vec<Vec<WordId>> {
    fn extend(
        assignment: &mut Assignment<'_>,
        ids: &[VariableId],
        solutions: &mut Vec<Vec<WordId>>,
    ) {
        let Some((&var, rest)) = ids.split_first() else {
            solutions.push(assignment.ids().map(|(_, word)| word).collect());
            return;
        };
        for word in assignment.crossword().vocabulary().ids() {
            if assignment.admits(var, word) {
                assignment.assign(var, word);
                extend(assignment, rest, solutions);
                assignment.unassign(var);
            }
        }
    }

    let ids = crossword.ids().collect::<Vec<_>>();
    let mut solutions = vec![];
    extend(&mut Assignment::new(crossword), &ids, &mut solutions);
    solutions
}

/// Asserts that `assignment` fills every slot with a word of the right
/// length, crossing slots agree and no word repeats.
#[track_caller]
pub fn assert_valid_solution(assignment: &Assignment<'_>) {
    assert!(assignment.is_complete(), "incomplete assignment:\n{assignment}");

    let mut seen = HashSet::new();
    for (variable, word) in assignment.iter() {
        assert_eq!(
            word.chars().count(),
            variable.length(),
            "{word} does not fit {variable}"
        );
        assert!(seen.insert(word), "{word} is used twice");
    }

    let grid = assignment.to_grid();
    for (variable, word) in assignment.iter() {
        for ((row, col), letter) in variable.cells().zip(word.chars()) {
            assert_eq!(
                grid.letter(row, col),
                Some(letter),
                "{word} at {variable} disagrees with a crossing slot"
            );
        }
    }
}
